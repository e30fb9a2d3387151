//! Reply embed builders for Discord responses
//!
//! Shared embed construction so every reply carries the same timestamp,
//! footer and accent handling.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Add `ReplyStyle` so footer and colour mode come from config
//! - 1.0.0: Initial reply payload with pastel accents

use chrono::{DateTime, Utc};
use serenity::builder::CreateEmbed;
use serenity::model::Timestamp;

use crate::core::colour::{random_colour, ColourMode};

/// Footer stamped on every reply unless overridden by config
pub const DEFAULT_FOOTER: &str = "✨ Powered by Starlight-Bot";

/// A single embed field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// Standardized reply payload, rendered as a Discord embed
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub title: String,
    pub body: String,
    pub colour: u32,
    pub timestamp: DateTime<Utc>,
    pub footer: String,
    pub fields: Vec<ReplyField>,
    pub thumbnail: Option<String>,
}

impl Reply {
    /// Append an embed field
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(ReplyField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    /// Set the embed thumbnail
    pub fn with_thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail = Some(url.into());
        self
    }

    /// Write this reply into a serenity embed builder.
    ///
    /// Used from the `embed(|e| ...)` closures of message and interaction builders.
    pub fn write_embed<'a>(&self, embed: &'a mut CreateEmbed) -> &'a mut CreateEmbed {
        embed.title(&self.title);
        embed.description(&self.body);
        embed.color(self.colour);
        if let Ok(timestamp) = Timestamp::from_unix_timestamp(self.timestamp.timestamp()) {
            embed.timestamp(timestamp);
        }
        embed.footer(|f| f.text(&self.footer));
        for field in &self.fields {
            embed.field(&field.name, &field.value, field.inline);
        }
        if let Some(url) = &self.thumbnail {
            embed.thumbnail(url);
        }
        embed
    }

    /// Render into an owned serenity embed
    pub fn into_embed(self) -> CreateEmbed {
        let mut embed = CreateEmbed::default();
        self.write_embed(&mut embed);
        embed
    }
}

/// Process-wide reply formatting settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyStyle {
    pub colour_mode: ColourMode,
    pub footer: String,
}

impl Default for ReplyStyle {
    fn default() -> Self {
        Self {
            colour_mode: ColourMode::Pastel,
            footer: DEFAULT_FOOTER.to_string(),
        }
    }
}

impl ReplyStyle {
    pub fn new(colour_mode: ColourMode, footer: impl Into<String>) -> Self {
        Self {
            colour_mode,
            footer: footer.into(),
        }
    }

    /// Build a reply: verbatim title, body or `""`, explicit colour or one picked by `colour_mode`.
    pub fn build(&self, title: &str, body: Option<&str>, colour: Option<u32>) -> Reply {
        Reply {
            title: title.to_string(),
            body: body.unwrap_or_default().to_string(),
            colour: colour.unwrap_or_else(|| random_colour(self.colour_mode)),
            timestamp: Utc::now(),
            footer: self.footer.clone(),
            fields: Vec::new(),
            thumbnail: None,
        }
    }
}

/// Build a reply with the default style (pastel accent, standard footer)
pub fn build_reply(title: &str, body: Option<&str>, colour: Option<u32>) -> Reply {
    ReplyStyle::default().build(title, body, colour)
}
