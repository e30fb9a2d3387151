//! Shared and per-invocation context for command handlers
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: Split into shared `CommandContext` and per-event `Invocation`;
//!   guild data goes through the `Platform` trait
//! - 1.0.0: Initial implementation with core shared state

use anyhow::{Context as _, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use serenity::client::bridge::gateway::{ShardId, ShardManager};
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::channel::Message;
use serenity::model::id::{GuildId, UserId};
use serenity::model::mention::Mentionable;
use serenity::model::Timestamp;
use serenity::prelude::{Context, Mutex, TypeMapKey};
use std::sync::Arc;
use std::time::Duration;

use crate::core::{Reply, ReplyStyle};

/// Shared context for all command handlers
///
/// Holds only immutable, process-wide settings. Handlers never store
/// per-invocation state here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandContext {
    pub reply_style: ReplyStyle,
}

impl CommandContext {
    pub fn new(reply_style: ReplyStyle) -> Self {
        Self { reply_style }
    }

    /// Build a reply with the configured style
    pub fn reply(&self, title: &str, body: Option<&str>, colour: Option<u32>) -> Reply {
        self.reply_style.build(title, body, colour)
    }
}

/// Which command surface an invocation arrived through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Discord application (slash) command
    Slash,
    /// Legacy prefixed text message
    Text,
}

/// The user who invoked a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokerInfo {
    pub id: u64,
    pub name: String,
}

impl InvokerInfo {
    pub fn mention(&self) -> String {
        format!("<@{}>", self.id)
    }
}

/// The guild fields `/server` reads
#[derive(Debug, Clone, PartialEq)]
pub struct GuildSnapshot {
    pub id: u64,
    pub name: String,
    /// `None` when the owner could not be resolved
    pub owner_mention: Option<String>,
    pub member_count: u64,
    pub created_at: DateTime<Utc>,
    pub icon_url: Option<String>,
}

/// Lookups handlers need from the chat platform
#[async_trait]
pub trait Platform: Send + Sync {
    /// Gateway heartbeat round-trip, if one has been measured yet
    async fn latency(&self) -> Option<Duration>;

    /// Resolve a guild, `Ok(None)` if the bot cannot see it
    async fn guild(&self, guild_id: u64) -> Result<Option<GuildSnapshot>>;
}

/// A single command invocation
pub struct Invocation<'a> {
    pub command: String,
    pub origin: Origin,
    pub invoker: InvokerInfo,
    pub channel_id: u64,
    pub guild_id: Option<u64>,
    pub platform: &'a dyn Platform,
}

impl<'a> Invocation<'a> {
    pub fn from_slash(command: &ApplicationCommandInteraction, platform: &'a dyn Platform) -> Self {
        Self {
            command: command.data.name.clone(),
            origin: Origin::Slash,
            invoker: InvokerInfo {
                id: command.user.id.0,
                name: command.user.name.clone(),
            },
            channel_id: command.channel_id.0,
            guild_id: command.guild_id.map(|id| id.0),
            platform,
        }
    }

    pub fn from_message(msg: &Message, command: &str, platform: &'a dyn Platform) -> Self {
        Self {
            command: command.to_string(),
            origin: Origin::Text,
            invoker: InvokerInfo {
                id: msg.author.id.0,
                name: msg.author.name.clone(),
            },
            channel_id: msg.channel_id.0,
            guild_id: msg.guild_id.map(|id| id.0),
            platform,
        }
    }
}

/// TypeMap key giving handlers access to shard latency
pub struct ShardManagerContainer;

impl TypeMapKey for ShardManagerContainer {
    type Value = Arc<Mutex<ShardManager>>;
}

/// `Platform` backed by serenity's cache and HTTP client
pub struct SerenityPlatform<'a> {
    ctx: &'a Context,
}

impl<'a> SerenityPlatform<'a> {
    pub fn new(ctx: &'a Context) -> Self {
        Self { ctx }
    }

    async fn owner_mention(&self, owner_id: UserId) -> Option<String> {
        if let Some(user) = self.ctx.cache.user(owner_id) {
            return Some(user.mention().to_string());
        }
        match owner_id.to_user(self.ctx).await {
            Ok(user) => Some(user.mention().to_string()),
            Err(e) => {
                debug!("Could not resolve guild owner {owner_id}: {e}");
                None
            }
        }
    }
}

#[async_trait]
impl Platform for SerenityPlatform<'_> {
    async fn latency(&self) -> Option<Duration> {
        let data = self.ctx.data.read().await;
        let shard_manager = data.get::<ShardManagerContainer>()?;
        let manager = shard_manager.lock().await;
        let runners = manager.runners.lock().await;
        runners
            .get(&ShardId(self.ctx.shard_id))
            .and_then(|runner| runner.latency)
    }

    async fn guild(&self, guild_id: u64) -> Result<Option<GuildSnapshot>> {
        let id = GuildId(guild_id);

        if let Some(guild) = id.to_guild_cached(&self.ctx.cache) {
            let owner_mention = match guild.members.get(&guild.owner_id) {
                Some(member) => Some(member.user.mention().to_string()),
                None => self.owner_mention(guild.owner_id).await,
            };
            return Ok(Some(GuildSnapshot {
                id: guild.id.0,
                name: guild.name.clone(),
                owner_mention,
                member_count: guild.member_count,
                created_at: to_utc(guild.id.created_at()),
                icon_url: guild.icon_url(),
            }));
        }

        debug!("Guild {guild_id} not cached, fetching over HTTP");
        let partial = self
            .ctx
            .http
            .get_guild_with_counts(guild_id)
            .await
            .with_context(|| format!("Failed to fetch guild {guild_id}"))?;

        let owner_mention = self.owner_mention(partial.owner_id).await;
        Ok(Some(GuildSnapshot {
            id: partial.id.0,
            name: partial.name.clone(),
            owner_mention,
            member_count: partial.approximate_member_count.unwrap_or_default(),
            created_at: to_utc(partial.id.created_at()),
            icon_url: partial.icon_url(),
        }))
    }
}

fn to_utc(timestamp: Timestamp) -> DateTime<Utc> {
    DateTime::from_timestamp(timestamp.unix_timestamp(), 0).unwrap_or_default()
}
