//! # Command System
//!
//! Slash command (/) handling plus the optional legacy prefix path.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Legacy prefixed text commands share the slash handlers
//! - 1.0.0: Handler trait, registry, dispatcher and error interceptor

pub mod context;
pub mod dispatcher;
pub mod errors;
pub mod handler;
pub mod handlers;
pub mod registry;
pub mod responder;
pub mod slash;

#[cfg(test)]
pub(crate) mod testing;

// Re-export handler infrastructure
pub use context::{
    CommandContext, GuildSnapshot, Invocation, InvokerInfo, Origin, Platform, SerenityPlatform,
    ShardManagerContainer,
};
pub use dispatcher::{parse_prefixed, CommandDispatcher, DispatchOutcome};
pub use errors::{CommandFailure, ErrorInterceptor};
pub use handler::SlashCommandHandler;
pub use registry::CommandRegistry;
pub use responder::{MessageResponder, Outgoing, Payload, Responder, SlashResponder, Visibility};

// Re-export commonly used items from submodules
pub use slash::{create_slash_commands, sync_commands, CommandSync};
