//! Typed content payloads, one variant per widget kind.
//!
//! Content is validated when it crosses into the store
//! ([`ItemContent::validate`]); the layout engine never looks at it.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::WidgetKind;

static HTTP_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[^\s/?#]+[^\s]*$").unwrap());
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static YOUTUBE_VIDEO_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^.*(youtu\.be/|v/|u/\w/|embed/|watch\?v=|&v=)([^#&?]*).*").unwrap()
});
static YOUTUBE_LIST_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"list=([^&]+)").unwrap());

/// Length of a YouTube video id.
const VIDEO_ID_LEN: usize = 11;

/// Allowed range for pomodoro phase lengths, in minutes.
const POMODORO_MINUTES: std::ops::RangeInclusive<u32> = 1..=240;

/// Reasons content is rejected at the store boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContentError {
    /// A URL field is not an http(s) URL.
    #[error("invalid URL in {field}: {value}")]
    InvalidUrl {
        /// Field holding the URL.
        field: &'static str,
        /// Offending value.
        value: String,
    },

    /// An email field is malformed.
    #[error("invalid email address: {value}")]
    InvalidEmail {
        /// Offending value.
        value: String,
    },

    /// A required field is empty.
    #[error("missing required field: {field}")]
    MissingField {
        /// Name of the empty field.
        field: &'static str,
    },

    /// A numeric field is outside its allowed range.
    #[error("{field} out of range: {value}")]
    OutOfRange {
        /// Name of the field.
        field: &'static str,
        /// Offending value, formatted.
        value: String,
    },

    /// The payload belongs to a different widget kind than the item.
    #[error("content for {found} cannot be stored on a {expected} item")]
    KindMismatch {
        /// Kind of the item.
        expected: WidgetKind,
        /// Kind of the offered content.
        found: WidgetKind,
    },
}

/// Content payload of a bento item, tagged by widget kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemContent {
    Photo(PhotoContent),
    Calendar(CalendarContent),
    Youtube(YoutubeContent),
    Links(LinksContent),
    Screenshots(ScreenshotsContent),
    Contacts(ContactsContent),
    Websites(WebsitesContent),
    Pomodoro(PomodoroContent),
    Quote(QuoteContent),
    #[serde(rename = "quickmail")]
    QuickMail(QuickMailContent),
    Weather(WeatherContent),
    #[serde(rename = "rssfeed")]
    RssFeed(RssFeedContent),
    Notes(NotesContent),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotoContent {
    pub image_url: Option<String>,
    pub alt: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarContent {
    pub events: Vec<CalendarEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YoutubeContent {
    pub url: Option<String>,
    pub embed_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinksContent {
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenshotsContent {
    pub screenshots: Vec<Screenshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Screenshot {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    pub image_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactsContent {
    pub contacts: Vec<Contact>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebsitesContent {
    pub websites: Vec<Website>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Website {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PomodoroContent {
    pub work_minutes: u32,
    pub break_minutes: u32,
}

impl Default for PomodoroContent {
    fn default() -> Self {
        Self {
            work_minutes: 25,
            break_minutes: 5,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteContent {
    pub quote: Option<Quote>,
    pub last_updated: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub author: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuickMailContent {
    pub contacts: Vec<MailContact>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MailContact {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherContent {
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RssFeedContent {
    pub feeds: Vec<RssFeed>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RssFeed {
    pub id: String,
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotesContent {
    pub notes: Vec<Note>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
}

impl ItemContent {
    /// Blank content for a freshly added item of `kind`.
    pub fn empty(kind: WidgetKind) -> Self {
        match kind {
            WidgetKind::Photo => ItemContent::Photo(PhotoContent::default()),
            WidgetKind::Calendar => ItemContent::Calendar(CalendarContent::default()),
            WidgetKind::Youtube => ItemContent::Youtube(YoutubeContent::default()),
            WidgetKind::Links => ItemContent::Links(LinksContent::default()),
            WidgetKind::Screenshots => ItemContent::Screenshots(ScreenshotsContent::default()),
            WidgetKind::Contacts => ItemContent::Contacts(ContactsContent::default()),
            WidgetKind::Websites => ItemContent::Websites(WebsitesContent::default()),
            WidgetKind::Pomodoro => ItemContent::Pomodoro(PomodoroContent::default()),
            WidgetKind::Quote => ItemContent::Quote(QuoteContent::default()),
            WidgetKind::QuickMail => ItemContent::QuickMail(QuickMailContent::default()),
            WidgetKind::Weather => ItemContent::Weather(WeatherContent::default()),
            WidgetKind::RssFeed => ItemContent::RssFeed(RssFeedContent::default()),
            WidgetKind::Notes => ItemContent::Notes(NotesContent::default()),
        }
    }

    /// Builds YouTube content from a watch, short, embed or playlist link.
    pub fn youtube(url: &str) -> Result<Self, ContentError> {
        let embed_url = youtube_embed_url(url).ok_or_else(|| ContentError::InvalidUrl {
            field: "url",
            value: url.to_string(),
        })?;
        Ok(ItemContent::Youtube(YoutubeContent {
            url: Some(url.to_string()),
            embed_url: Some(embed_url),
        }))
    }

    /// Widget kind this payload belongs to.
    pub fn kind(&self) -> WidgetKind {
        match self {
            ItemContent::Photo(_) => WidgetKind::Photo,
            ItemContent::Calendar(_) => WidgetKind::Calendar,
            ItemContent::Youtube(_) => WidgetKind::Youtube,
            ItemContent::Links(_) => WidgetKind::Links,
            ItemContent::Screenshots(_) => WidgetKind::Screenshots,
            ItemContent::Contacts(_) => WidgetKind::Contacts,
            ItemContent::Websites(_) => WidgetKind::Websites,
            ItemContent::Pomodoro(_) => WidgetKind::Pomodoro,
            ItemContent::Quote(_) => WidgetKind::Quote,
            ItemContent::QuickMail(_) => WidgetKind::QuickMail,
            ItemContent::Weather(_) => WidgetKind::Weather,
            ItemContent::RssFeed(_) => WidgetKind::RssFeed,
            ItemContent::Notes(_) => WidgetKind::Notes,
        }
    }

    /// Checks the payload against the rules of its kind.
    pub fn validate(&self) -> Result<(), ContentError> {
        match self {
            ItemContent::Photo(c) => optional_url("image_url", c.image_url.as_deref()),
            ItemContent::Calendar(c) => c
                .events
                .iter()
                .try_for_each(|e| required("events.title", &e.title)),
            ItemContent::Youtube(c) => {
                optional_url("url", c.url.as_deref())?;
                optional_url("embed_url", c.embed_url.as_deref())
            }
            ItemContent::Links(c) => c.links.iter().try_for_each(|l| url("links.url", &l.url)),
            ItemContent::Screenshots(c) => c
                .screenshots
                .iter()
                .try_for_each(|s| url("screenshots.image_url", &s.image_url)),
            ItemContent::Contacts(c) => c.contacts.iter().try_for_each(|contact| {
                required("contacts.name", &contact.name)?;
                contact.email.as_deref().map_or(Ok(()), email)
            }),
            ItemContent::Websites(c) => c
                .websites
                .iter()
                .try_for_each(|w| url("websites.url", &w.url)),
            ItemContent::Pomodoro(c) => {
                in_range("work_minutes", c.work_minutes)?;
                in_range("break_minutes", c.break_minutes)
            }
            ItemContent::Quote(_) => Ok(()),
            ItemContent::QuickMail(c) => c.contacts.iter().try_for_each(|contact| {
                required("contacts.name", &contact.name)?;
                email(&contact.email)
            }),
            ItemContent::Weather(c) => {
                coordinate("latitude", c.latitude, 90.0)?;
                coordinate("longitude", c.longitude, 180.0)
            }
            ItemContent::RssFeed(c) => c.feeds.iter().try_for_each(|f| url("feeds.url", &f.url)),
            ItemContent::Notes(c) => c
                .notes
                .iter()
                .try_for_each(|n| required("notes.title", &n.title)),
        }
    }
}

/// Embed URL for a YouTube video or playlist link.
///
/// Video links must carry an 11 character id; playlist links embed as a
/// video series.
pub fn youtube_embed_url(url: &str) -> Option<String> {
    if let Some(caps) = YOUTUBE_VIDEO_RE.captures(url) {
        let id = &caps[2];
        if id.len() == VIDEO_ID_LEN {
            return Some(format!("https://www.youtube.com/embed/{id}"));
        }
    }
    YOUTUBE_LIST_RE
        .captures(url)
        .map(|caps| format!("https://www.youtube.com/embed/videoseries?list={}", &caps[1]))
}

fn url(field: &'static str, value: &str) -> Result<(), ContentError> {
    if HTTP_URL_RE.is_match(value) {
        Ok(())
    } else {
        Err(ContentError::InvalidUrl {
            field,
            value: value.to_string(),
        })
    }
}

fn optional_url(field: &'static str, value: Option<&str>) -> Result<(), ContentError> {
    value.map_or(Ok(()), |v| url(field, v))
}

fn email(value: &str) -> Result<(), ContentError> {
    if EMAIL_RE.is_match(value) {
        Ok(())
    } else {
        Err(ContentError::InvalidEmail {
            value: value.to_string(),
        })
    }
}

fn required(field: &'static str, value: &str) -> Result<(), ContentError> {
    if value.trim().is_empty() {
        Err(ContentError::MissingField { field })
    } else {
        Ok(())
    }
}

fn in_range(field: &'static str, minutes: u32) -> Result<(), ContentError> {
    if POMODORO_MINUTES.contains(&minutes) {
        Ok(())
    } else {
        Err(ContentError::OutOfRange {
            field,
            value: minutes.to_string(),
        })
    }
}

fn coordinate(field: &'static str, value: Option<f64>, limit: f64) -> Result<(), ContentError> {
    match value {
        Some(v) if !(-limit..=limit).contains(&v) => Err(ContentError::OutOfRange {
            field,
            value: v.to_string(),
        }),
        _ => Ok(()),
    }
}
