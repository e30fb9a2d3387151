//! # Slash Commands (/)
//!
//! Command definitions and bulk synchronization with Discord.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! Commands are published once per process. The pre-login attempt learns the
//! application id over HTTP; if it fails, the first READY retries.
//!
//! ## Changelog
//! - 1.2.0: `CommandSync` publishes before login, READY is the fallback
//! - 1.1.0: Single `sync_commands` entry point driven by `SyncScope`
//! - 1.0.0: General and fun command definitions

mod fun;
mod general;

use anyhow::{Context as _, Result};
use log::{debug, info};
use serenity::builder::CreateApplicationCommand;
use serenity::http::Http;
use serenity::model::application::command::Command;
use serenity::model::id::GuildId;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::core::SyncScope;

/// Creates all slash command definitions
pub fn create_slash_commands() -> Vec<CreateApplicationCommand> {
    let mut commands = Vec::new();

    // General commands
    commands.extend(general::create_commands());

    // Fun commands
    commands.extend(fun::create_commands());

    commands
}

/// Publishes the full command set in one bulk overwrite
///
/// Returns the number of commands Discord now has registered for the scope.
pub async fn sync_commands(http: &Http, scope: SyncScope) -> Result<usize> {
    let slash_commands = create_slash_commands();

    let synced = match scope {
        SyncScope::Global => Command::set_global_application_commands(http, |commands| {
            for command in slash_commands {
                commands.add_application_command(command);
            }
            commands
        })
        .await
        .context("Failed to register global slash commands")?,
        SyncScope::Guild(guild_id) => GuildId(guild_id)
            .set_application_commands(http, |commands| {
                for command in slash_commands {
                    commands.add_application_command(command);
                }
                commands
            })
            .await
            .with_context(|| format!("Failed to register slash commands for guild {guild_id}"))?,
    };

    match scope {
        SyncScope::Global => info!(
            "Synced {} application commands globally (may take up to 1 hour to propagate)",
            synced.len()
        ),
        SyncScope::Guild(guild_id) => {
            info!("Synced {} application commands to guild {guild_id}", synced.len())
        }
    }
    Ok(synced.len())
}

/// Once-per-process command synchronization
pub struct CommandSync {
    scope: SyncScope,
    done: AtomicBool,
}

impl CommandSync {
    pub fn new(scope: SyncScope) -> Self {
        Self {
            scope,
            done: AtomicBool::new(false),
        }
    }

    pub fn scope(&self) -> SyncScope {
        self.scope
    }

    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::SeqCst)
    }

    /// Publish the command set unless an earlier attempt succeeded.
    ///
    /// `Ok(None)` means skipped. A failed attempt leaves the sync pending.
    pub async fn sync_once(&self, http: &Http) -> Result<Option<usize>> {
        if self.done.swap(true, Ordering::SeqCst) {
            debug!("Application commands already synced");
            return Ok(None);
        }
        match sync_commands(http, self.scope).await {
            Ok(count) => Ok(Some(count)),
            Err(e) => {
                self.done.store(false, Ordering::SeqCst);
                Err(e)
            }
        }
    }

    /// Pre-login sync: fetch the application id over HTTP, then publish
    pub async fn sync_before_login(&self, http: &Http) -> Result<Option<usize>> {
        if self.is_done() {
            return Ok(None);
        }
        if http.application_id().is_none() {
            let app = http
                .get_current_application_info()
                .await
                .context("Failed to fetch application info")?;
            http.set_application_id(app.id.0);
        }
        self.sync_once(http).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serenity::http::HttpBuilder;
    use std::net::TcpListener;

    /// An `Http` whose API base is a closed local port
    fn unreachable_http(application_id: Option<u64>) -> Http {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let builder = HttpBuilder::new("token")
            .proxy(format!("http://127.0.0.1:{port}"))
            .unwrap()
            .ratelimiter_disabled(true);
        match application_id {
            Some(id) => builder.application_id(id).build(),
            None => builder.build(),
        }
    }

    #[test]
    fn test_create_slash_commands() {
        let commands = create_slash_commands();
        assert_eq!(commands.len(), 4);

        let command_names: Vec<String> = commands
            .iter()
            .map(|cmd| cmd.0.get("name").unwrap().as_str().unwrap().to_string())
            .collect();

        for expected in ["ping", "hello", "server", "joke"] {
            assert!(
                command_names.contains(&expected.to_string()),
                "Missing command: {expected}"
            );
        }
    }

    #[test]
    fn test_every_definition_has_a_handler() {
        let mut registry = crate::commands::CommandRegistry::new();
        for handler in crate::commands::handlers::create_all_handlers() {
            registry.register(handler).unwrap();
        }
        for command in create_slash_commands() {
            let name = command.0.get("name").unwrap().as_str().unwrap().to_string();
            assert!(registry.contains(&name), "No handler for /{name}");
        }
    }

    #[tokio::test]
    async fn test_failed_sync_stays_pending() {
        let sync = CommandSync::new(SyncScope::Guild(1));
        let http = unreachable_http(Some(99));

        assert!(sync.sync_once(&http).await.is_err());
        assert!(!sync.is_done());
        // A second attempt (the READY fallback) tries again
        assert!(sync.sync_once(&http).await.is_err());
        assert!(!sync.is_done());
    }

    #[tokio::test]
    async fn test_pre_login_failure_leaves_ready_fallback() {
        let sync = CommandSync::new(SyncScope::Global);
        let http = unreachable_http(None);

        let err = sync.sync_before_login(&http).await.unwrap_err();
        assert!(err.to_string().contains("application info"));
        assert!(http.application_id().is_none());
        assert!(!sync.is_done());
        assert_eq!(sync.scope(), SyncScope::Global);
    }
}
