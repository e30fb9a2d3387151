//! Global command error interceptor
//!
//! Keeps error details out of chat but logs them in full server-side.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Handle failures from legacy text commands
//! - 1.0.0: Slash command failures with acknowledgment-aware replies

use anyhow::Result;
use log::{debug, error};

use super::context::Origin;
use super::responder::{Outgoing, Responder};
use crate::core::{Reply, ReplyStyle, ERROR_RED};

pub const FAILURE_TITLE: &str = "❌ Something went wrong.";
pub const FAILURE_BODY: &str = "If this keeps happening please ping the developer.";

/// A handler error on its way to the interceptor
#[derive(Debug)]
pub struct CommandFailure {
    pub command: String,
    pub origin: Origin,
    pub error: anyhow::Error,
}

/// Turns handler errors into a log entry plus a generic private reply
#[derive(Debug, Clone, Default)]
pub struct ErrorInterceptor {
    style: ReplyStyle,
}

impl ErrorInterceptor {
    pub fn new(style: ReplyStyle) -> Self {
        Self { style }
    }

    /// The user-facing failure reply. Never contains error details.
    pub fn failure_reply(&self) -> Reply {
        self.style
            .build(FAILURE_TITLE, Some(FAILURE_BODY), Some(ERROR_RED))
    }

    /// Log `failure` and tell the invoker something went wrong.
    ///
    /// Slash failures go out as the initial response when the interaction is
    /// still unacknowledged and as a follow-up otherwise.
    pub async fn on_command_error(
        &self,
        failure: &CommandFailure,
        responder: &dyn Responder,
    ) -> Result<()> {
        match failure.origin {
            Origin::Slash => error!(
                "Slash command error in /{}: {:?}",
                failure.command, failure.error
            ),
            Origin::Text => error!(
                "Prefix command error in '{}': {:?}",
                failure.command, failure.error
            ),
        }

        let reply = Outgoing::private(self.failure_reply());
        if responder.is_acknowledged() {
            debug!("'{}' already acknowledged, sending failure as follow-up", failure.command);
            responder.follow_up(reply).await
        } else {
            responder.respond(reply).await
        }
    }
}
