//! Text and JSON rendering of lookup results.

use chrono::Weekday;
use crossterm::style::{Color, Stylize};
use pingbar_core::{Availability, BusinessReport, ProviderError, ScheduleText};
use serde_json::json;

use crate::i18n::Messages;

const INDENT: &str = "          ";
const MAX_STARS: usize = 5;

pub struct Renderer {
    messages: &'static Messages,
    color: bool,
}

impl Renderer {
    pub const fn new(messages: &'static Messages, color: bool) -> Self {
        Self { messages, color }
    }

    fn paint(&self, text: &str, color: Color, bold: bool) -> String {
        if !self.color {
            return text.to_string();
        }
        let styled = text.with(color);
        if bold {
            styled.bold().to_string()
        } else {
            styled.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        self.paint(text, Color::DarkGrey, false)
    }

    fn schedule_label(&self, schedule: &ScheduleText) -> String {
        match schedule {
            ScheduleText::AlwaysOpen => self.messages.always_open.to_string(),
            other => other.to_string(),
        }
    }

    /// Human-readable report, one block per business.
    #[must_use]
    pub fn text(
        &self,
        reports: &[BusinessReport],
        business: &str,
        city: &str,
        today: Weekday,
    ) -> String {
        let msgs = self.messages;
        if reports.is_empty() {
            return format!("{}\n", msgs.not_found(business, city));
        }

        let mut out = String::new();
        if reports.len() > 1 {
            out.push_str(&msgs.found(reports.len()));
            out.push_str("\n\n");
        }

        let blocks: Vec<String> = reports
            .iter()
            .map(|report| self.block(report, today))
            .collect();
        out.push_str(&blocks.join("\n"));
        out
    }

    fn block(&self, report: &BusinessReport, today: Weekday) -> String {
        let msgs = self.messages;
        let place = &report.place;

        let (status, color) = match report.availability {
            Availability::Open => (msgs.open, Color::Green),
            Availability::Closed => (msgs.closed, Color::Red),
            Availability::Unknown => (msgs.unknown, Color::Yellow),
        };

        let mut lines = Vec::new();
        let badge = self.paint(&format!("[{status}]"), color, true);
        let mut header = format!("{badge} {}", place.title);
        if !place.address.is_empty() {
            header.push_str(" - ");
            header.push_str(&place.address);
        }
        lines.push(header);

        lines.push(report.schedule.as_ref().map_or_else(
            || self.dim(&format!("{INDENT}{}", msgs.no_schedule)),
            |schedule| {
                format!(
                    "{INDENT}{} {}: {}",
                    msgs.today,
                    msgs.day(today),
                    self.schedule_label(schedule)
                )
            },
        ));

        if place.rating > 0.0 {
            let mut rating = format!("{INDENT}{} {:.1}", stars(place.rating), place.rating);
            if place.rating_count > 0 {
                rating.push(' ');
                rating.push_str(&msgs.reviews(place.rating_count));
            }
            lines.push(self.dim(&rating));
        }

        if !place.category.is_empty() {
            lines.push(self.dim(&format!("{INDENT}{}", place.category)));
        }
        if !place.phone_number.is_empty() {
            lines.push(self.dim(&format!("{INDENT}📞 {}", place.phone_number)));
        }

        let mut block = lines.join("\n");
        block.push('\n');
        block
    }

    /// Machine-readable report. `abierto` is `null` when the hours are unknown.
    pub fn json(
        &self,
        reports: &[BusinessReport],
        business: &str,
        city: &str,
    ) -> serde_json::Result<String> {
        let results: Vec<serde_json::Value> = reports
            .iter()
            .map(|report| {
                let place = &report.place;
                let mut item = json!({
                    "nombre": place.title,
                    "direccion": place.address,
                    "rating": place.rating,
                    "opiniones": place.rating_count,
                    "categoria": place.category,
                    "telefono": place.phone_number,
                    "website": place.website,
                    "abierto": report.availability.is_open(),
                });
                if let Some(schedule) = &report.schedule {
                    item["horario"] = json!(self.schedule_label(schedule));
                }
                item
            })
            .collect();

        serde_json::to_string_pretty(&json!({
            "query": {
                "negocio": business,
                "ciudad": city,
            },
            "total": reports.len(),
            "resultados": results,
        }))
    }

    #[must_use]
    pub fn welcome(&self) -> String {
        let msgs = self.messages;
        format!(
            "{}\n\n{}\n\n{}\n\n{}",
            msgs.welcome_title, msgs.no_api_key, msgs.get_api_key, msgs.more_info
        )
    }
}

/// Localized message for a provider failure.
#[must_use]
pub fn provider_error_message(messages: &Messages, err: &ProviderError) -> String {
    match err {
        ProviderError::NoApiKey => messages.error_no_api_key.to_string(),
        ProviderError::InvalidKey => messages.error_invalid_key.to_string(),
        ProviderError::LimitReached => messages.error_limit_reached.to_string(),
        ProviderError::Connection(_) => messages.error_no_connection.to_string(),
        ProviderError::Status(code) => messages.error_status(*code),
        ProviderError::Decode(_) => err.to_string(),
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "rating is clamped to 0..=5 before the cast"
)]
fn stars(rating: f64) -> String {
    let full = (rating.clamp(0.0, 5.0).floor() as usize).min(MAX_STARS);
    "★".repeat(full) + &"☆".repeat(MAX_STARS - full)
}
