//! Ordered heuristics for spotting opening hours in Spanish snippets.
//!
//! Several heuristics can match overlapping parts of the same text. They are
//! tried in [`Heuristic::ALL`] order and the first hit wins; earlier entries are
//! the higher-confidence shapes.

use regex::Regex;
use tracing::debug;

use super::ScheduleText;

/// Characters of context kept after an "abierto ... <weekday>" match.
const PHRASE_CONTEXT_CHARS: usize = 50;

/// Characters scanned after the word "horario" by the fallback pass.
const HORARIO_WINDOW_CHARS: usize = 60;

/// Looser `time - time` shape used only inside the "horario" window.
const HORARIO_FALLBACK_PATTERN: &str =
    r"(\d{1,2}[:\.]?\d{0,2})\s*[-–a]\s*(\d{1,2}[:\.]?\d{0,2})";

const ALWAYS_OPEN_MARKERS: [&str; 2] = ["24 horas", "24h"];

/// One schedule-extraction rule. [`Heuristic::ALL`] lists them in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heuristic {
    /// `10:00 - 22:00`, `10:00–22:00`, `10:00 a 22:00`
    ClockRange,
    /// `de 10:00 a 22:00`
    FromTo,
    /// `10h-22h`, `10h a 22h`
    HourSuffix,
    /// `lunes a sábado 10:00 - 22:00`
    WeekdayRange,
    /// `abierto de lunes a sábado`, without times
    OpenOnWeekday,
}

impl Heuristic {
    /// Evaluation order. First match wins.
    pub const ALL: [Self; 5] = [
        Self::ClockRange,
        Self::FromTo,
        Self::HourSuffix,
        Self::WeekdayRange,
        Self::OpenOnWeekday,
    ];

    #[must_use]
    pub const fn pattern(self) -> &'static str {
        match self {
            Self::ClockRange => r"(\d{1,2}:\d{2})\s*[-–a]\s*(\d{1,2}:\d{2})",
            Self::FromTo => r"de\s+(\d{1,2}:\d{2})\s+a\s+(\d{1,2}:\d{2})",
            Self::HourSuffix => r"(\d{1,2})h\s*[-–a]\s*(\d{1,2})h",
            Self::WeekdayRange => {
                r"(?:lunes|martes|miércoles|jueves|viernes|sábado|domingo).*?(\d{1,2}:\d{2})\s*[-–a]\s*(\d{1,2}:\d{2})"
            }
            Self::OpenOnWeekday => {
                r"abierto.*?(?:lunes|martes|miércoles|jueves|viernes|sábado|domingo)"
            }
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ClockRange => "clock_range",
            Self::FromTo => "from_to",
            Self::HourSuffix => "hour_suffix",
            Self::WeekdayRange => "weekday_range",
            Self::OpenOnWeekday => "open_on_weekday",
        }
    }
}

/// Compiled heuristics, ready to scan snippets.
#[derive(Debug, Clone)]
pub struct ScheduleMatcher {
    heuristics: Vec<(Heuristic, Regex)>,
    horario_fallback: Regex,
}

impl ScheduleMatcher {
    /// Compile every heuristic.
    ///
    /// # Errors
    /// Returns an error if a built-in pattern fails to compile.
    pub fn new() -> Result<Self, regex::Error> {
        let heuristics = Heuristic::ALL
            .iter()
            .map(|&heuristic| Regex::new(heuristic.pattern()).map(|re| (heuristic, re)))
            .collect::<Result<Vec<_>, _>>()?;
        let horario_fallback = Regex::new(HORARIO_FALLBACK_PATTERN)?;

        Ok(Self {
            heuristics,
            horario_fallback,
        })
    }

    /// Extract a schedule from a lower-cased snippet.
    ///
    /// Round-the-clock markers short-circuit everything else. Otherwise the
    /// heuristics run in order, then the "horario" window fallback.
    #[must_use]
    pub fn find(&self, text: &str) -> Option<ScheduleText> {
        if ALWAYS_OPEN_MARKERS.iter().any(|marker| text.contains(marker)) {
            debug!("Always-open marker found");
            return Some(ScheduleText::AlwaysOpen);
        }

        for (heuristic, re) in &self.heuristics {
            if let Some(schedule) = Self::apply(*heuristic, re, text) {
                debug!("Heuristic {} matched: {schedule}", heuristic.as_str());
                return Some(schedule);
            }
        }

        self.find_after_horario(text)
    }

    /// Run a single heuristic in isolation.
    #[must_use]
    pub fn find_with(&self, heuristic: Heuristic, text: &str) -> Option<ScheduleText> {
        self.heuristics
            .iter()
            .find(|(h, _)| *h == heuristic)
            .and_then(|(h, re)| Self::apply(*h, re, text))
    }

    /// Scan the fixed window that follows the first "horario" for a loose range.
    #[must_use]
    pub fn find_after_horario(&self, text: &str) -> Option<ScheduleText> {
        let start = text.find("horario")?;
        let window = &text[start..char_offset(text, start, HORARIO_WINDOW_CHARS)];

        let schedule = range_from(&self.horario_fallback, window)?;
        debug!("Horario fallback matched: {schedule}");
        Some(schedule)
    }

    fn apply(heuristic: Heuristic, re: &Regex, text: &str) -> Option<ScheduleText> {
        match heuristic {
            Heuristic::OpenOnWeekday => {
                let m = re.find(text)?;
                let end = char_offset(text, m.end(), PHRASE_CONTEXT_CHARS);
                Some(ScheduleText::Phrase {
                    text: text[m.start()..end].trim().to_string(),
                })
            }
            _ => range_from(re, text),
        }
    }
}

fn range_from(re: &Regex, text: &str) -> Option<ScheduleText> {
    let caps = re.captures(text)?;
    Some(ScheduleText::Range {
        matched: caps.get(0)?.as_str().to_string(),
        open: caps.get(1)?.as_str().to_string(),
        close: caps.get(2)?.as_str().to_string(),
    })
}

/// Byte index `chars` characters past `from`, clamped to the end of `text`.
fn char_offset(text: &str, from: usize, chars: usize) -> usize {
    text[from..]
        .char_indices()
        .nth(chars)
        .map_or(text.len(), |(i, _)| from + i)
}
