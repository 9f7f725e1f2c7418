//! Widget catalogue for bento workspaces.
//!
//! Every bento item is one widget of a fixed [`WidgetKind`]. The kind decides
//! the default span a new item gets and the shape of its
//! [`ItemContent`](content::ItemContent) payload.
//!
//! # Example
//!
//! ```
//! use bento_grid::widgets::WidgetKind;
//!
//! let kind: WidgetKind = "calendar".parse().expect("known kind");
//! assert_eq!(kind.default_span(), (2, 1));
//! ```

pub mod content;

pub use content::{ContentError, ItemContent};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kinds of widget a workspace can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    /// A single photo.
    Photo,
    /// Dated events.
    Calendar,
    /// An embedded video or playlist.
    Youtube,
    /// Bookmarked links.
    Links,
    /// A gallery of screenshots.
    Screenshots,
    /// Address book entries.
    Contacts,
    /// Websites watched for availability.
    Websites,
    /// Work/break timer.
    Pomodoro,
    /// Quote of the day.
    Quote,
    /// One-click mail recipients.
    #[serde(rename = "quickmail")]
    QuickMail,
    /// Forecast for one location.
    Weather,
    /// Subscribed RSS feeds.
    #[serde(rename = "rssfeed")]
    RssFeed,
    /// Plain notes.
    Notes,
}

impl WidgetKind {
    /// Every kind, in catalogue order.
    pub const ALL: [WidgetKind; 13] = [
        WidgetKind::Photo,
        WidgetKind::Calendar,
        WidgetKind::Youtube,
        WidgetKind::Links,
        WidgetKind::Screenshots,
        WidgetKind::Contacts,
        WidgetKind::Websites,
        WidgetKind::Pomodoro,
        WidgetKind::Quote,
        WidgetKind::QuickMail,
        WidgetKind::Weather,
        WidgetKind::RssFeed,
        WidgetKind::Notes,
    ];

    /// Wire name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            WidgetKind::Photo => "photo",
            WidgetKind::Calendar => "calendar",
            WidgetKind::Youtube => "youtube",
            WidgetKind::Links => "links",
            WidgetKind::Screenshots => "screenshots",
            WidgetKind::Contacts => "contacts",
            WidgetKind::Websites => "websites",
            WidgetKind::Pomodoro => "pomodoro",
            WidgetKind::Quote => "quote",
            WidgetKind::QuickMail => "quickmail",
            WidgetKind::Weather => "weather",
            WidgetKind::RssFeed => "rssfeed",
            WidgetKind::Notes => "notes",
        }
    }

    /// Span `(columns, rows)` given to a freshly added item.
    ///
    /// Content-heavy widgets take two columns. Everything is one row tall;
    /// quotes would like half a row but the grid has no fractional rows.
    pub fn default_span(self) -> (u32, u32) {
        match self {
            WidgetKind::Calendar
            | WidgetKind::Screenshots
            | WidgetKind::RssFeed
            | WidgetKind::Notes => (2, 1),
            _ => (1, 1),
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for parsing [`WidgetKind`] from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWidgetKindError(pub String);

impl fmt::Display for ParseWidgetKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown widget kind: {}", self.0)
    }
}

impl std::error::Error for ParseWidgetKindError {}

impl FromStr for WidgetKind {
    type Err = ParseWidgetKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        WidgetKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == lower)
            .ok_or_else(|| ParseWidgetKindError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Photo".parse::<WidgetKind>(), Ok(WidgetKind::Photo));
        assert_eq!("RSSFEED".parse::<WidgetKind>(), Ok(WidgetKind::RssFeed));
        assert_eq!("quickmail".parse::<WidgetKind>(), Ok(WidgetKind::QuickMail));
    }

    #[test]
    fn parse_unknown_kind_fails() {
        let err = "spreadsheet".parse::<WidgetKind>().expect_err("unknown kind");
        assert_eq!(err.to_string(), "unknown widget kind: spreadsheet");
    }

    #[test]
    fn display_matches_serde_name() {
        for kind in WidgetKind::ALL {
            let json = serde_json::to_string(&kind).expect("serialize kind");
            assert_eq!(json, format!("\"{kind}\""));
        }
    }

    #[test]
    fn display_parse_roundtrip_covers_catalogue() {
        for kind in WidgetKind::ALL {
            assert_eq!(kind.to_string().parse::<WidgetKind>(), Ok(kind));
        }
    }

    #[test]
    fn wide_widgets_span_two_columns() {
        for kind in [
            WidgetKind::Calendar,
            WidgetKind::Screenshots,
            WidgetKind::RssFeed,
            WidgetKind::Notes,
        ] {
            assert_eq!(kind.default_span(), (2, 1), "{kind}");
        }
    }

    #[test]
    fn other_widgets_span_one_cell() {
        for kind in [
            WidgetKind::Photo,
            WidgetKind::Youtube,
            WidgetKind::Links,
            WidgetKind::Quote,
            WidgetKind::Weather,
        ] {
            assert_eq!(kind.default_span(), (1, 1), "{kind}");
        }
    }
}
