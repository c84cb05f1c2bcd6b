//! Schedule extraction and availability evaluation.
//!
//! The pipeline is: [`ScheduleMatcher`] pulls a schedule out of a lower-cased
//! snippet, [`normalize_time`] canonicalizes the time tokens it found, and
//! [`evaluate`] decides whether the business is open right now.
//! [`ScheduleExtractor`] wires the three together over a list of snippets.

use std::fmt;

mod evaluate;
mod extractor;
mod matcher;
mod normalize;

pub use evaluate::{Availability, CanonicalTimeRange, MINUTES_PER_DAY, evaluate, minutes_of};
pub use extractor::{DEFAULT_MAX_SNIPPETS, Extraction, ScheduleExtractor};
pub use matcher::{Heuristic, ScheduleMatcher};
pub use normalize::normalize_time;

/// What a snippet revealed about today's opening hours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleText {
    /// Explicit open and close tokens, plus the substring they came from.
    Range {
        matched: String,
        open: String,
        close: String,
    },
    /// Free-text context around an "abierto ..." mention with no times.
    Phrase { text: String },
    /// The business advertises round-the-clock opening ("24 horas", "24h").
    AlwaysOpen,
}

impl ScheduleText {
    /// Canonicalize the open/close tokens of a range to `HH:MM`.
    #[must_use]
    pub fn normalized(self) -> Self {
        match self {
            Self::Range {
                matched,
                open,
                close,
            } => Self::Range {
                matched,
                open: normalize_time(&open),
                close: normalize_time(&close),
            },
            other => other,
        }
    }

    /// The evaluable range, if this schedule carries valid clock times.
    #[must_use]
    pub fn time_range(&self) -> Option<CanonicalTimeRange> {
        match self {
            Self::Range { open, close, .. } => CanonicalTimeRange::parse(open, close),
            Self::Phrase { .. } | Self::AlwaysOpen => None,
        }
    }
}

impl fmt::Display for ScheduleText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Range { open, close, .. } => write!(f, "{open} - {close}"),
            Self::Phrase { text } => f.write_str(text),
            Self::AlwaysOpen => f.write_str("24h"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_range_tokens_only() {
        let range = ScheduleText::Range {
            matched: "10h-22.30".to_string(),
            open: "10".to_string(),
            close: "22.30".to_string(),
        }
        .normalized();
        assert_eq!(range.to_string(), "10:00 - 22:30");
        assert!(matches!(range, ScheduleText::Range { ref matched, .. } if matched == "10h-22.30"));

        let phrase = ScheduleText::Phrase {
            text: "abierto de lunes a viernes".to_string(),
        };
        assert_eq!(phrase.clone().normalized(), phrase);
    }

    #[test]
    fn only_ranges_have_time_range() {
        let range = ScheduleText::Range {
            matched: String::new(),
            open: "09:00".to_string(),
            close: "18:00".to_string(),
        };
        assert_eq!(
            range.time_range(),
            Some(CanonicalTimeRange {
                open: 540,
                close: 1080
            })
        );
        assert_eq!(ScheduleText::AlwaysOpen.time_range(), None);
        assert_eq!(
            ScheduleText::Phrase {
                text: "abierto".to_string()
            }
            .time_range(),
            None
        );
    }
}
