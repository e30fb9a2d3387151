//! Reply delivery for slash interactions and text messages
//!
//! A `Responder` tracks whether the invocation has been acknowledged so a
//! reply is never sent as a second initial response.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::{Context as _, Result};
use async_trait::async_trait;
use log::debug;
use serenity::http::Http;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::model::channel::Message;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::core::Reply;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    /// Visible only to the invoker (ephemeral)
    Private,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Text(String),
    Embed(Reply),
}

/// A reply ready for delivery
#[derive(Debug, Clone, PartialEq)]
pub struct Outgoing {
    pub payload: Payload,
    pub visibility: Visibility,
}

impl Outgoing {
    pub fn public(reply: Reply) -> Self {
        Self {
            payload: Payload::Embed(reply),
            visibility: Visibility::Public,
        }
    }

    pub fn private(reply: Reply) -> Self {
        Self {
            payload: Payload::Embed(reply),
            visibility: Visibility::Private,
        }
    }

    pub fn private_text(text: impl Into<String>) -> Self {
        Self {
            payload: Payload::Text(text.into()),
            visibility: Visibility::Private,
        }
    }

    pub fn is_private(&self) -> bool {
        self.visibility == Visibility::Private
    }
}

#[async_trait]
pub trait Responder: Send + Sync {
    /// Whether an initial response has already been sent
    fn is_acknowledged(&self) -> bool;

    /// Send the initial response (acknowledges the invocation)
    async fn respond(&self, reply: Outgoing) -> Result<()>;

    /// Send an additional message after the initial response
    async fn follow_up(&self, reply: Outgoing) -> Result<()>;

    /// Respond, or follow up if already acknowledged
    async fn send(&self, reply: Outgoing) -> Result<()> {
        if self.is_acknowledged() {
            self.follow_up(reply).await
        } else {
            self.respond(reply).await
        }
    }
}

/// Responder for an application command interaction
pub struct SlashResponder<'a> {
    http: &'a Http,
    command: &'a ApplicationCommandInteraction,
    acknowledged: AtomicBool,
}

impl<'a> SlashResponder<'a> {
    pub fn new(http: &'a Http, command: &'a ApplicationCommandInteraction) -> Self {
        Self {
            http,
            command,
            acknowledged: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl Responder for SlashResponder<'_> {
    fn is_acknowledged(&self) -> bool {
        self.acknowledged.load(Ordering::SeqCst)
    }

    async fn respond(&self, reply: Outgoing) -> Result<()> {
        let ephemeral = reply.is_private();
        self.command
            .create_interaction_response(self.http, |response| {
                response
                    .kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|message| {
                        message.ephemeral(ephemeral);
                        match &reply.payload {
                            Payload::Text(text) => message.content(text),
                            Payload::Embed(embed) => message.embed(|e| embed.write_embed(e)),
                        }
                    })
            })
            .await
            .with_context(|| format!("Failed to respond to /{}", self.command.data.name))?;

        self.acknowledged.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn follow_up(&self, reply: Outgoing) -> Result<()> {
        let ephemeral = reply.is_private();
        self.command
            .create_followup_message(self.http, |message| {
                message.ephemeral(ephemeral);
                match &reply.payload {
                    Payload::Text(text) => message.content(text),
                    Payload::Embed(embed) => message.embed(|e| embed.write_embed(e)),
                }
            })
            .await
            .with_context(|| format!("Failed to follow up on /{}", self.command.data.name))?;
        Ok(())
    }
}

/// Responder for a legacy prefixed text command
///
/// Text channels have no ephemeral messages, so private replies are sent as
/// a quiet reply to the triggering message.
pub struct MessageResponder<'a> {
    http: &'a Http,
    message: &'a Message,
    acknowledged: AtomicBool,
}

impl<'a> MessageResponder<'a> {
    pub fn new(http: &'a Http, message: &'a Message) -> Self {
        Self {
            http,
            message,
            acknowledged: AtomicBool::new(false),
        }
    }

    async fn send_to_channel(&self, reply: &Outgoing) -> Result<()> {
        if reply.is_private() {
            debug!(
                "Private reply requested in channel {}, sending as quiet reply",
                self.message.channel_id
            );
        }
        self.message
            .channel_id
            .send_message(self.http, |m| {
                m.reference_message(self.message);
                m.allowed_mentions(|am| am.replied_user(false));
                match &reply.payload {
                    Payload::Text(text) => m.content(text),
                    Payload::Embed(embed) => m.embed(|e| embed.write_embed(e)),
                }
            })
            .await
            .with_context(|| format!("Failed to reply in channel {}", self.message.channel_id))?;
        Ok(())
    }
}

#[async_trait]
impl Responder for MessageResponder<'_> {
    fn is_acknowledged(&self) -> bool {
        self.acknowledged.load(Ordering::SeqCst)
    }

    async fn respond(&self, reply: Outgoing) -> Result<()> {
        self.send_to_channel(&reply).await?;
        self.acknowledged.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn follow_up(&self, reply: Outgoing) -> Result<()> {
        self.send_to_channel(&reply).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{Delivery, RecordingResponder};
    use crate::core::build_reply;

    fn _assert_object_safe(_: &dyn Responder) {}

    #[test]
    fn test_outgoing_constructors() {
        let reply = build_reply("t", None, Some(0));
        assert!(!Outgoing::public(reply.clone()).is_private());
        assert!(Outgoing::private(reply).is_private());

        let text = Outgoing::private_text("hi");
        assert!(text.is_private());
        assert_eq!(text.payload, Payload::Text("hi".to_string()));
    }

    #[tokio::test]
    async fn test_send_responds_then_follows_up() {
        let responder = RecordingResponder::new();
        responder.send(Outgoing::private_text("first")).await.unwrap();
        responder.send(Outgoing::private_text("second")).await.unwrap();

        let deliveries = responder.deliveries();
        assert_eq!(deliveries.len(), 2);
        assert_eq!(deliveries[0].0, Delivery::Initial);
        assert_eq!(deliveries[1].0, Delivery::FollowUp);
    }
}
