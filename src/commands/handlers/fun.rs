//! Entertainment command handlers
//!
//! Handles: joke
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::Result;
use async_trait::async_trait;
use rand::Rng;
use std::sync::Arc;

use crate::commands::context::{CommandContext, Invocation};
use crate::commands::handler::SlashCommandHandler;
use crate::commands::responder::{Outgoing, Responder};

pub const JOKES: [&str; 5] = [
    "Why don't scientists trust atoms? They make up everything!",
    "Why did the scarecrow win an award? He was outstanding in his field!",
    "What do you call fake spaghetti? An impasta!",
    "Why don't skeletons fight each other? They don't have the guts!",
    "What do you call a bear with no teeth?  **A gummy bear!**",
];

/// Handler for fun commands: joke
pub struct FunHandler;

#[async_trait]
impl SlashCommandHandler for FunHandler {
    fn cog(&self) -> &'static str {
        "fun"
    }

    fn command_names(&self) -> &'static [&'static str] {
        &["joke"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        _invocation: &Invocation<'_>,
        responder: &dyn Responder,
    ) -> Result<()> {
        let joke = random_joke();
        responder
            .send(Outgoing::public(ctx.reply("😂 Dad Joke", Some(joke), None)))
            .await
    }
}

/// Pick a joke uniformly from `JOKES`
pub fn pick_joke<R: Rng>(rng: &mut R) -> &'static str {
    JOKES[rng.random_range(0..JOKES.len())]
}

// Kept out of `handle` so the thread-local RNG never lives across an await
fn random_joke() -> &'static str {
    pick_joke(&mut rand::rng())
}
