//! `POST /api/process-text`

use axum::Json;
use serde::{Deserialize, Serialize};
use textdesk_core::text::{TextStatistics, analyze};
use tracing::info;

use crate::errors::ApiError;
use crate::extract::ApiBody;
use crate::metrics::TEXTS_PROCESSED_TOTAL;

/// Request body.
#[derive(Debug, Default, Deserialize)]
pub struct ProcessTextRequest {
    /// Text to analyze.
    #[serde(default)]
    pub text: Option<String>,
}

/// Response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessTextResponse {
    /// Input echoed back unchanged.
    pub original_text: String,
    /// Uppercased input.
    pub processed_text: String,
    /// Input with characters reversed.
    pub reversed_text: String,
    /// Counts and reading time.
    pub statistics: StatisticsBody,
}

/// Wire form of [`TextStatistics`] counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsBody {
    /// Character count of the raw input.
    pub characters: usize,
    /// Word count.
    pub words: usize,
    /// Sentence count.
    pub sentences: usize,
    /// Estimated reading time in minutes.
    pub reading_time: usize,
}

impl ProcessTextResponse {
    /// Assemble the response from the input and its statistics.
    pub fn new(original_text: String, stats: TextStatistics) -> Self {
        Self {
            original_text,
            processed_text: stats.uppercased,
            reversed_text: stats.reversed,
            statistics: StatisticsBody {
                characters: stats.character_count,
                words: stats.word_count,
                sentences: stats.sentence_count,
                reading_time: stats.reading_time_minutes,
            },
        }
    }
}

/// Analyze the submitted text.
pub async fn process_text(
    ApiBody(body): ApiBody<ProcessTextRequest>,
) -> Result<Json<ProcessTextResponse>, ApiError> {
    let text = body.text.unwrap_or_default();
    let stats = analyze(&text)?;

    metrics::counter!(TEXTS_PROCESSED_TOTAL).increment(1);
    info!(
        characters = stats.character_count,
        words = stats.word_count,
        sentences = stats.sentence_count,
        "text processed"
    );

    Ok(Json(ProcessTextResponse::new(text, stats)))
}
