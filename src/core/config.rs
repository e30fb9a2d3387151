//! Environment-driven configuration
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Intents, sync scope and legacy prefix become config flags
//! - 1.0.0: TOKEN + LOG_LEVEL

use anyhow::{bail, Context as _, Result};

use crate::core::colour::ColourMode;
use crate::core::embeds::{ReplyStyle, DEFAULT_FOOTER};

/// Where application commands are published
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncScope {
    /// Globally (may take up to an hour to propagate)
    Global,
    /// A single guild (instant, for development)
    Guild(u64),
}

/// Privileged gateway intents the bot asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntentFlags {
    pub message_content: bool,
    pub guild_members: bool,
}

impl Default for IntentFlags {
    fn default() -> Self {
        Self {
            message_content: true,
            guild_members: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub log_level: String,
    pub sync_scope: SyncScope,
    pub colour_mode: ColourMode,
    pub footer: String,
    pub intents: IntentFlags,
    pub command_prefix: Option<String>,
}

impl Config {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let Some(discord_token) = get("TOKEN") else {
            bail!("TOKEN missing in .env – aborting!");
        };

        let sync_scope = match get("DISCORD_GUILD_ID") {
            Some(id) => SyncScope::Guild(
                id.parse()
                    .with_context(|| format!("DISCORD_GUILD_ID '{id}' is not a valid guild id"))?,
            ),
            None => SyncScope::Global,
        };

        let colour_mode = match get("EMBED_COLOUR_MODE") {
            Some(mode) => mode.parse()?,
            None => ColourMode::default(),
        };

        let intents = IntentFlags {
            message_content: parse_flag("INTENT_MESSAGE_CONTENT", get("INTENT_MESSAGE_CONTENT"), true)?,
            guild_members: parse_flag("INTENT_GUILD_MEMBERS", get("INTENT_GUILD_MEMBERS"), true)?,
        };

        Ok(Self {
            discord_token,
            log_level: get("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            sync_scope,
            colour_mode,
            footer: get("EMBED_FOOTER").unwrap_or_else(|| DEFAULT_FOOTER.to_string()),
            intents,
            command_prefix: get("COMMAND_PREFIX"),
        })
    }

    /// Reply formatting derived from this config
    pub fn reply_style(&self) -> ReplyStyle {
        ReplyStyle::new(self.colour_mode, self.footer.clone())
    }
}

fn parse_flag(key: &str, value: Option<String>, default: bool) -> Result<bool> {
    let Some(value) = value else {
        return Ok(default);
    };
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("{key} must be a boolean, got '{other}'"),
    }
}
