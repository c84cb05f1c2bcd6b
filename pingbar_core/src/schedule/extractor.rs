use chrono::{Local, NaiveTime};
use tracing::debug;

use super::{Availability, ScheduleMatcher, ScheduleText, evaluate};

/// Snippets examined per business unless configured otherwise.
pub const DEFAULT_MAX_SNIPPETS: usize = 3;

/// Outcome of scanning one business's snippets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub schedule: Option<ScheduleText>,
    pub availability: Availability,
}

/// Runs the matcher over a business's snippets and evaluates the result.
#[derive(Debug, Clone)]
pub struct ScheduleExtractor {
    matcher: ScheduleMatcher,
    max_snippets: usize,
}

impl ScheduleExtractor {
    /// Create an extractor that looks at no more than `max_snippets` snippets.
    ///
    /// # Errors
    /// Returns an error if the matcher patterns fail to compile.
    pub fn new(max_snippets: usize) -> Result<Self, regex::Error> {
        Ok(Self {
            matcher: ScheduleMatcher::new()?,
            max_snippets: max_snippets.max(1),
        })
    }

    /// # Errors
    /// Returns an error if the matcher patterns fail to compile.
    pub fn with_defaults() -> Result<Self, regex::Error> {
        Self::new(DEFAULT_MAX_SNIPPETS)
    }

    #[must_use]
    pub const fn max_snippets(&self) -> usize {
        self.max_snippets
    }

    /// Extract today's schedule and evaluate it against the local clock.
    #[must_use]
    pub fn extract<S: AsRef<str>>(&self, snippets: &[S]) -> Extraction {
        self.extract_at(snippets, Local::now().time())
    }

    /// Extract today's schedule and evaluate it at `now`.
    ///
    /// Snippets beyond `max_snippets` are never examined. The first snippet
    /// that yields a schedule decides the result.
    #[must_use]
    pub fn extract_at<S: AsRef<str>>(&self, snippets: &[S], now: NaiveTime) -> Extraction {
        let schedule = snippets
            .iter()
            .take(self.max_snippets)
            .find_map(|snippet| self.matcher.find(&snippet.as_ref().to_lowercase()))
            .map(ScheduleText::normalized);

        if schedule.is_none() {
            debug!(
                "No schedule in {} snippet(s)",
                snippets.len().min(self.max_snippets)
            );
        }

        let availability = evaluate(schedule.as_ref(), now);
        Extraction {
            schedule,
            availability,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn normalizes_and_evaluates() {
        let extractor = ScheduleExtractor::with_defaults().unwrap();
        let extraction = extractor.extract_at(&["Abierto HOY de 9h a 14h"], at(10, 0));

        assert_eq!(
            extraction.schedule.as_ref().map(ToString::to_string),
            Some("09:00 - 14:00".to_string())
        );
        assert_eq!(extraction.availability, Availability::Open);
    }

    #[test]
    fn snippets_are_lower_cased() {
        let extractor = ScheduleExtractor::with_defaults().unwrap();
        let extraction = extractor.extract_at(&["ABIERTO 24 HORAS"], at(3, 0));
        assert_eq!(extraction.schedule, Some(ScheduleText::AlwaysOpen));
        assert_eq!(extraction.availability, Availability::Open);
    }

    #[test]
    fn first_snippet_with_schedule_wins() {
        let extractor = ScheduleExtractor::with_defaults().unwrap();
        let snippets = [
            "Las mejores tapas de la ciudad",
            "Horario: 22:00 - 02:00",
            "Horario: 09:00 - 18:00",
        ];
        let extraction = extractor.extract_at(&snippets, at(23, 30));
        assert_eq!(
            extraction.schedule.map(|s| s.to_string()),
            Some("22:00 - 02:00".to_string())
        );
        assert_eq!(extraction.availability, Availability::Open);
    }

    #[test]
    fn only_first_three_snippets_are_scanned() {
        let extractor = ScheduleExtractor::with_defaults().unwrap();
        let snippets = ["nada", "nada", "nada", "09:00 - 18:00"];
        let extraction = extractor.extract_at(&snippets, at(12, 0));
        assert_eq!(extraction.schedule, None);
        assert_eq!(extraction.availability, Availability::Unknown);
    }

    #[test]
    fn snippet_limit_is_configurable() {
        let extractor = ScheduleExtractor::new(4).unwrap();
        let snippets = ["nada", "nada", "nada", "09:00 - 18:00"];
        let extraction = extractor.extract_at(&snippets, at(20, 0));
        assert_eq!(extraction.availability, Availability::Closed);

        assert_eq!(ScheduleExtractor::new(0).unwrap().max_snippets(), 1);
    }

    #[test]
    fn empty_input_is_unknown() {
        let extractor = ScheduleExtractor::with_defaults().unwrap();
        let extraction = extractor.extract_at::<&str>(&[], at(12, 0));
        assert_eq!(extraction.availability, Availability::Unknown);
    }
}
