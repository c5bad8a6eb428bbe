//! Text statistics.
//!
//! [`analyze`] is a pure function of its input: no I/O, no hidden state,
//! and repeated calls with the same text return identical results.
//!
//! Tokenization is deliberately simple. Words are runs of non-whitespace
//! (Unicode `White_Space`), sentences are separated by `.`, `!` or `?`, and
//! reversal works on Unicode scalar values rather than grapheme clusters.

use serde::{Deserialize, Serialize};

use crate::errors::{ValidationError, require_non_blank};

/// Assumed reading speed used for [`reading_time_minutes`].
pub const WORDS_PER_MINUTE: usize = 200;

const SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Everything derived from one piece of input text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStatistics {
    /// Characters in the raw, untrimmed input.
    pub character_count: usize,
    /// Whitespace-delimited tokens.
    pub word_count: usize,
    /// Non-blank segments between sentence terminators.
    pub sentence_count: usize,
    /// `ceil(word_count / 200)`.
    pub reading_time_minutes: usize,
    /// Input mapped to uppercase.
    pub uppercased: String,
    /// Input with its characters in reverse order.
    pub reversed: String,
}

/// Analyze `text`, which must contain at least one non-whitespace character.
pub fn analyze(text: &str) -> Result<TextStatistics, ValidationError> {
    require_non_blank(text, ValidationError::TextRequired)?;

    let word_count = word_count(text);
    Ok(TextStatistics {
        character_count: text.chars().count(),
        word_count,
        sentence_count: sentence_count(text),
        reading_time_minutes: reading_time_minutes(word_count),
        uppercased: text.to_uppercase(),
        reversed: reverse_chars(text),
    })
}

/// Number of whitespace-delimited tokens in `text`.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Number of segments between runs of `.`, `!`, `?` that are not blank.
pub fn sentence_count(text: &str) -> usize {
    text.split(SENTENCE_TERMINATORS)
        .filter(|segment| !segment.trim().is_empty())
        .count()
}

/// Minutes needed to read `words` words, rounded up. Zero words read in zero minutes.
pub fn reading_time_minutes(words: usize) -> usize {
    words.div_ceil(WORDS_PER_MINUTE)
}

/// `text` with its Unicode scalar values in reverse order.
pub fn reverse_chars(text: &str) -> String {
    text.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn reference_sentence() {
        let stats = analyze("Hello world. How are you?").unwrap();
        assert_eq!(stats.word_count, 5);
        assert_eq!(stats.sentence_count, 2);
        assert_eq!(stats.character_count, 25);
        assert_eq!(stats.reading_time_minutes, 1);
        assert_eq!(stats.uppercased, "HELLO WORLD. HOW ARE YOU?");
        assert_eq!(stats.reversed, "?uoy era woH .dlrow olleH");
    }

    #[test]
    fn empty_and_blank_are_rejected() {
        assert_matches!(analyze(""), Err(ValidationError::TextRequired));
        assert_matches!(analyze("   "), Err(ValidationError::TextRequired));
        assert_matches!(analyze("\n\t "), Err(ValidationError::TextRequired));
    }

    #[test]
    fn character_count_includes_surrounding_whitespace() {
        let stats = analyze("  hi  ").unwrap();
        assert_eq!(stats.character_count, 6);
        assert_eq!(stats.word_count, 1);
    }

    #[test]
    fn character_count_is_in_chars_not_bytes() {
        let stats = analyze("héllo").unwrap();
        assert_eq!(stats.character_count, 5);
    }

    #[test]
    fn words_split_on_whitespace_runs() {
        assert_eq!(word_count("one   two\tthree\n\nfour"), 4);
        assert_eq!(word_count("   "), 0);
        assert_eq!(word_count(""), 0);
    }

    #[test]
    fn sentences_split_on_terminator_runs() {
        assert_eq!(sentence_count("Wait... what?! Really."), 3);
        assert_eq!(sentence_count("no terminator"), 1);
        assert_eq!(sentence_count("?!."), 0);
        assert_eq!(sentence_count(". . ."), 0);
    }

    #[test]
    fn reading_time_rounds_up() {
        assert_eq!(reading_time_minutes(0), 0);
        assert_eq!(reading_time_minutes(1), 1);
        assert_eq!(reading_time_minutes(200), 1);
        assert_eq!(reading_time_minutes(201), 2);
        assert_eq!(reading_time_minutes(1000), 5);
    }

    #[test]
    fn punctuation_only_text_has_no_sentences() {
        let stats = analyze("!!!").unwrap();
        assert_eq!(stats.word_count, 1);
        assert_eq!(stats.sentence_count, 0);
        assert_eq!(stats.reading_time_minutes, 1);
    }

    #[test]
    fn reversal_is_code_point_based() {
        assert_eq!(reverse_chars("añb"), "bña");
        assert_eq!(reverse_chars(""), "");
    }

    #[test]
    fn uppercase_handles_non_ascii() {
        let stats = analyze("straße").unwrap();
        assert_eq!(stats.uppercased, "STRASSE");
    }

    #[test]
    fn analysis_is_idempotent() {
        let text = "Same input. Same output!";
        assert_eq!(analyze(text).unwrap(), analyze(text).unwrap());
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(analyze("Hi.").unwrap()).unwrap();
        assert_eq!(json["characterCount"], 3);
        assert_eq!(json["wordCount"], 1);
        assert_eq!(json["sentenceCount"], 1);
        assert_eq!(json["readingTimeMinutes"], 1);
        assert_eq!(json["uppercased"], "HI.");
        assert_eq!(json["reversed"], ".iH");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn character_count_matches_input(s in "\\PC*[a-zA-Z0-9]\\PC*") {
                let stats = analyze(&s).unwrap();
                prop_assert_eq!(stats.character_count, s.chars().count());
            }

            #[test]
            fn uppercase_preserves_ascii_length(s in "[ -~]*[a-z][ -~]*") {
                let stats = analyze(&s).unwrap();
                prop_assert_eq!(stats.uppercased.len(), s.len());
                prop_assert!(!stats.uppercased.chars().any(|c| c.is_ascii_lowercase()));
            }

            #[test]
            fn reversal_is_an_involution(s in "\\PC*") {
                prop_assert_eq!(reverse_chars(&reverse_chars(&s)), s);
            }

            #[test]
            fn reading_time_covers_word_count(words in 0usize..100_000) {
                let minutes = reading_time_minutes(words);
                prop_assert!(minutes * WORDS_PER_MINUTE >= words);
                prop_assert!(minutes == 0 || (minutes - 1) * WORDS_PER_MINUTE < words);
            }
        }
    }
}
