//! User-facing strings for modes.

use std::fmt::Write;

use chrono::DateTime;

use crate::mode::ActionLabel;

const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

pub trait Localizer: Send + Sync {
    fn action_label(&self, label: ActionLabel) -> String;
    /// Banner for a send ban that expires at `until_date` (unix seconds).
    fn restricted_until(&self, until_date: i32) -> String;
    fn restricted_forever(&self) -> String;
}

/// Built-in English strings. Dates are rendered in UTC with a `chrono`
/// strftime pattern.
#[derive(Debug, Clone)]
pub struct EnglishLocalizer {
    date_format: String,
}

impl EnglishLocalizer {
    #[must_use]
    pub fn new(date_format: impl Into<String>) -> Self {
        Self {
            date_format: date_format.into(),
        }
    }

    #[must_use]
    pub fn format_date(&self, timestamp: i32) -> String {
        let Some(date) = DateTime::from_timestamp(i64::from(timestamp), 0) else {
            return timestamp.to_string();
        };
        let mut out = String::new();
        if write!(out, "{}", date.format(&self.date_format)).is_ok() {
            return out;
        }
        tracing::warn!(
            "Invalid restriction date format {:?}, using {}",
            self.date_format,
            FALLBACK_DATE_FORMAT
        );
        date.format(FALLBACK_DATE_FORMAT).to_string()
    }
}

impl Default for EnglishLocalizer {
    fn default() -> Self {
        Self::new("%b %-d, %Y %H:%M")
    }
}

impl Localizer for EnglishLocalizer {
    fn action_label(&self, label: ActionLabel) -> String {
        match label {
            ActionLabel::Join => "Join",
            ActionLabel::Delete => "Delete and Exit",
            ActionLabel::Mute => "Mute",
            ActionLabel::Unmute => "Unmute",
            ActionLabel::Return => "Return to Group",
            ActionLabel::WaitingOnline => "Waiting for user to come online",
            ActionLabel::Unblock => "Unblock",
            ActionLabel::StartBot => "Start",
        }
        .to_string()
    }

    fn restricted_until(&self, until_date: i32) -> String {
        format!(
            "You are restricted from sending messages until {}",
            self.format_date(until_date)
        )
    }

    fn restricted_forever(&self) -> String {
        "You are restricted from sending messages".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_format() {
        let localizer = EnglishLocalizer::default();
        assert_eq!(localizer.format_date(1_700_000_000), "Nov 14, 2023 22:13");
    }

    #[test]
    fn invalid_format_falls_back() {
        let localizer = EnglishLocalizer::new("%Y %");
        assert_eq!(localizer.format_date(0), "1970-01-01 00:00");
    }

    #[test]
    fn labels() {
        let localizer = EnglishLocalizer::default();
        assert_eq!(localizer.action_label(ActionLabel::StartBot), "Start");
        assert_eq!(localizer.action_label(ActionLabel::Unmute), "Unmute");
        assert!(
            localizer
                .restricted_until(0)
                .ends_with("until Jan 1, 1970 00:00")
        );
    }
}
