//! Routes invocations to handlers and failures to the interceptor
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use log::{error, info, warn};
use std::sync::Arc;

use super::context::{CommandContext, Invocation};
use super::errors::{CommandFailure, ErrorInterceptor};
use super::registry::CommandRegistry;
use super::responder::Responder;

/// What happened to one invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Handled,
    /// Handler failed; the interceptor took over
    Failed,
    /// No handler for this command name
    Unknown,
}

pub struct CommandDispatcher {
    registry: CommandRegistry,
    interceptor: ErrorInterceptor,
    ctx: Arc<CommandContext>,
}

impl CommandDispatcher {
    pub fn new(registry: CommandRegistry, interceptor: ErrorInterceptor, ctx: Arc<CommandContext>) -> Self {
        Self {
            registry,
            interceptor,
            ctx,
        }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub async fn dispatch(&self, invocation: &Invocation<'_>, responder: &dyn Responder) -> DispatchOutcome {
        let Some(handler) = self.registry.get(&invocation.command) else {
            warn!("Unknown command '{}' from user {}", invocation.command, invocation.invoker.id);
            return DispatchOutcome::Unknown;
        };

        info!(
            "/{} invoked | User: {} ({}) | Channel: {} | Guild: {:?}",
            invocation.command,
            invocation.invoker.name,
            invocation.invoker.id,
            invocation.channel_id,
            invocation.guild_id
        );

        match handler.handle(Arc::clone(&self.ctx), invocation, responder).await {
            Ok(()) => DispatchOutcome::Handled,
            Err(error) => {
                let failure = CommandFailure {
                    command: invocation.command.clone(),
                    origin: invocation.origin,
                    error,
                };
                if let Err(e) = self.interceptor.on_command_error(&failure, responder).await {
                    error!("Failed to send error reply for '{}': {e:?}", failure.command);
                }
                DispatchOutcome::Failed
            }
        }
    }
}

/// Extract the command name from a prefixed text message
///
/// `"!ping extra"` with prefix `"!"` gives `Some("ping")`. Names are matched
/// case-insensitively by lowercasing.
pub fn parse_prefixed(content: &str, prefix: &str) -> Option<String> {
    let rest = content.trim_start().strip_prefix(prefix)?;
    let name = rest.split_whitespace().next()?;
    // "! ping" is not a command
    if rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(name.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::context::{Origin, Platform};
    use crate::commands::handler::SlashCommandHandler;
    use crate::commands::responder::Outgoing;
    use crate::commands::testing::{invocation, Delivery, FakePlatform, RecordingResponder};
    use crate::core::ReplyStyle;
    use anyhow::{bail, Result};
    use async_trait::async_trait;

    struct OkHandler;
    struct FailingHandler;

    #[async_trait]
    impl SlashCommandHandler for OkHandler {
        fn cog(&self) -> &'static str {
            "test"
        }

        fn command_names(&self) -> &'static [&'static str] {
            &["ok"]
        }

        async fn handle(
            &self,
            ctx: Arc<CommandContext>,
            _invocation: &Invocation<'_>,
            responder: &dyn Responder,
        ) -> Result<()> {
            responder.send(Outgoing::public(ctx.reply("ok", None, None))).await
        }
    }

    #[async_trait]
    impl SlashCommandHandler for FailingHandler {
        fn cog(&self) -> &'static str {
            "test"
        }

        fn command_names(&self) -> &'static [&'static str] {
            &["boom", "late_boom"]
        }

        async fn handle(
            &self,
            ctx: Arc<CommandContext>,
            invocation: &Invocation<'_>,
            responder: &dyn Responder,
        ) -> Result<()> {
            if invocation.command == "late_boom" {
                responder.send(Outgoing::public(ctx.reply("partial", None, None))).await?;
            }
            bail!("handler exploded")
        }
    }

    fn dispatcher() -> CommandDispatcher {
        let mut registry = CommandRegistry::new();
        registry.register(Arc::new(OkHandler)).unwrap();
        registry.register(Arc::new(FailingHandler)).unwrap();
        CommandDispatcher::new(
            registry,
            ErrorInterceptor::default(),
            Arc::new(CommandContext::new(ReplyStyle::default())),
        )
    }

    #[tokio::test]
    async fn test_dispatch_handled() {
        let platform = FakePlatform::default();
        let responder = RecordingResponder::new();
        let outcome = dispatcher()
            .dispatch(&invocation("ok", None, &platform as &dyn Platform), &responder)
            .await;
        assert_eq!(outcome, DispatchOutcome::Handled);
        assert_eq!(responder.single().0, Delivery::Initial);
    }

    #[tokio::test]
    async fn test_dispatch_unknown_sends_nothing() {
        let platform = FakePlatform::default();
        let responder = RecordingResponder::new();
        let outcome = dispatcher()
            .dispatch(&invocation("nope", None, &platform), &responder)
            .await;
        assert_eq!(outcome, DispatchOutcome::Unknown);
        assert!(responder.deliveries().is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_failure_goes_to_interceptor() {
        let platform = FakePlatform::default();
        let responder = RecordingResponder::new();
        let outcome = dispatcher()
            .dispatch(&invocation("boom", None, &platform), &responder)
            .await;
        assert_eq!(outcome, DispatchOutcome::Failed);

        let (delivery, outgoing) = responder.single();
        assert_eq!(delivery, Delivery::Initial);
        assert!(outgoing.is_private());
    }

    #[tokio::test]
    async fn test_dispatch_failure_after_reply_follows_up() {
        let platform = FakePlatform::default();
        let responder = RecordingResponder::new();
        dispatcher()
            .dispatch(&invocation("late_boom", None, &platform), &responder)
            .await;

        let deliveries = responder.deliveries();
        assert_eq!(deliveries.len(), 2);
        assert_eq!(deliveries[1].0, Delivery::FollowUp);
        assert!(deliveries[1].1.is_private());
    }

    #[tokio::test]
    async fn test_text_origin_is_carried_into_failure() {
        let platform = FakePlatform::default();
        let responder = RecordingResponder::new();
        let mut inv = invocation("boom", None, &platform);
        inv.origin = Origin::Text;
        assert_eq!(dispatcher().dispatch(&inv, &responder).await, DispatchOutcome::Failed);
    }

    #[test]
    fn test_parse_prefixed() {
        assert_eq!(parse_prefixed("!ping", "!").as_deref(), Some("ping"));
        assert_eq!(parse_prefixed("  !Joke please", "!").as_deref(), Some("joke"));
        assert_eq!(parse_prefixed("sl!server", "sl!").as_deref(), Some("server"));
        assert_eq!(parse_prefixed("ping", "!"), None);
        assert_eq!(parse_prefixed("!", "!"), None);
        assert_eq!(parse_prefixed("! ping", "!"), None);
    }
}
