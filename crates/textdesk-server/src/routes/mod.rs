//! HTTP route handlers organized by concern.

pub mod docs;
pub mod pages;
pub mod tasks;
pub mod text;
