//! The cog trait every command handler implements
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use super::context::{CommandContext, Invocation};
use super::responder::Responder;

/// A cog: a named group of commands sharing one `handle` entry point.
///
/// Implementations are stateless. Everything an invocation needs arrives in
/// the `Invocation`, and replies leave through the `Responder`. Returned
/// errors reach the error interceptor; a cog never reports its own failures.
///
/// ```ignore
/// pub struct EchoCog;
///
/// #[async_trait]
/// impl SlashCommandHandler for EchoCog {
///     fn cog(&self) -> &'static str { "echo" }
///     fn command_names(&self) -> &'static [&'static str] { &["echo"] }
///
///     async fn handle(&self, ctx: Arc<CommandContext>, inv: &Invocation<'_>, out: &dyn Responder) -> Result<()> {
///         out.send(Outgoing::public(ctx.reply(&inv.command, None, None))).await
///     }
/// }
/// ```
#[async_trait]
pub trait SlashCommandHandler: Send + Sync {
    fn cog(&self) -> &'static str;

    /// Commands routed to this cog
    fn command_names(&self) -> &'static [&'static str];

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        invocation: &Invocation<'_>,
        responder: &dyn Responder,
    ) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Registry stores cogs as trait objects
    fn _assert_object_safe(_: &dyn SlashCommandHandler) {}
}
