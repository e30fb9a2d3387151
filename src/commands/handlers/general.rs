//! General info command handlers
//!
//! Handles: ping, hello, server
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::info;
use std::sync::Arc;
use std::time::Duration;

use crate::commands::context::{CommandContext, GuildSnapshot, Invocation, InvokerInfo};
use crate::commands::handler::SlashCommandHandler;
use crate::commands::responder::{Outgoing, Responder};
use crate::core::{format_date, format_number, format_utc_minute};

/// Sent privately when `/server` is used outside a guild
pub const NOT_IN_GUILD: &str = "Not in a guild!";

/// Handler for informational commands: ping, hello, server
pub struct GeneralHandler;

#[async_trait]
impl SlashCommandHandler for GeneralHandler {
    fn cog(&self) -> &'static str {
        "general"
    }

    fn command_names(&self) -> &'static [&'static str] {
        &["ping", "hello", "server"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        invocation: &Invocation<'_>,
        responder: &dyn Responder,
    ) -> Result<()> {
        match invocation.command.as_str() {
            "ping" => self.handle_ping(&ctx, invocation, responder).await,
            "hello" => self.handle_hello(&ctx, invocation, responder).await,
            "server" => self.handle_server(&ctx, invocation, responder).await,
            other => bail!("Unknown general command '{other}'"),
        }
    }
}

impl GeneralHandler {
    /// Handle /ping command
    async fn handle_ping(
        &self,
        ctx: &CommandContext,
        invocation: &Invocation<'_>,
        responder: &dyn Responder,
    ) -> Result<()> {
        let latency = invocation.platform.latency().await;
        responder.send(ping_reply(ctx, latency)).await?;

        info!("Ping command completed for user {}", invocation.invoker.id);
        Ok(())
    }

    /// Handle /hello command
    async fn handle_hello(
        &self,
        ctx: &CommandContext,
        invocation: &Invocation<'_>,
        responder: &dyn Responder,
    ) -> Result<()> {
        responder
            .send(hello_reply(ctx, &invocation.invoker, Utc::now()))
            .await
    }

    /// Handle /server command
    async fn handle_server(
        &self,
        ctx: &CommandContext,
        invocation: &Invocation<'_>,
        responder: &dyn Responder,
    ) -> Result<()> {
        let Some(guild_id) = invocation.guild_id else {
            return responder.send(Outgoing::private_text(NOT_IN_GUILD)).await;
        };

        let guild = invocation
            .platform
            .guild(guild_id)
            .await?
            .ok_or_else(|| anyhow!("Guild {guild_id} is not visible to the bot"))?;

        responder.send(server_reply(ctx, &guild)).await
    }
}

/// Whole milliseconds, 0 when no heartbeat has been measured yet
pub fn latency_ms(latency: Option<Duration>) -> u64 {
    latency
        .map(|d| (d.as_secs_f64() * 1000.0).round() as u64)
        .unwrap_or(0)
}

pub fn ping_reply(ctx: &CommandContext, latency: Option<Duration>) -> Outgoing {
    let body = format!("Latency: `{} ms`", latency_ms(latency));
    Outgoing::private(ctx.reply("🏓 Pong!", Some(&body), None))
}

pub fn hello_reply(ctx: &CommandContext, invoker: &InvokerInfo, now: DateTime<Utc>) -> Outgoing {
    let body = format!(
        "Greetings {}! It’s **{}**.",
        invoker.mention(),
        format_utc_minute(now)
    );
    Outgoing::public(ctx.reply("👋 Hello there!", Some(&body), None))
}

pub fn server_reply(ctx: &CommandContext, guild: &GuildSnapshot) -> Outgoing {
    let owner = guild.owner_mention.as_deref().unwrap_or("Unknown");
    let body = format!("ID • `{}`\nOwner • {}", guild.id, owner);

    let mut reply = ctx
        .reply(&format!("🌐 {}", guild.name), Some(&body), None)
        .with_field("👥 Members", format_number(guild.member_count), true)
        .with_field("🗓️ Created", format_date(guild.created_at), true);
    if let Some(url) = &guild.icon_url {
        reply = reply.with_thumbnail(url);
    }
    Outgoing::public(reply)
}
