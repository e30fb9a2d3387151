//! # Bot Lifecycle
//!
//! Owns the single Discord session: configures intents, registers cogs,
//! syncs commands before login (first READY retries a failed sync) and
//! guarantees the shard manager is shut down however the session ends.
//! Ctrl-C cancels whichever phase is running.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.2.0: Ctrl-C races every connect phase; pre-login command sync
//! - 1.1.0: Legacy prefix commands, configurable intents and sync scope
//! - 1.0.0: Initial lifecycle with Ctrl-C handling

use anyhow::{anyhow, Result};
use log::{error, info, warn};
use serenity::async_trait;
use serenity::client::ClientBuilder;
use serenity::model::application::interaction::Interaction;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use std::future::Future;
use std::sync::Arc;

use crate::commands::handlers::create_all_handlers;
use crate::commands::{
    parse_prefixed, CommandContext, CommandDispatcher, CommandRegistry, CommandSync,
    ErrorInterceptor, Invocation, MessageResponder, SerenityPlatform, ShardManagerContainer,
    SlashResponder,
};
use crate::core::{Config, IntentFlags};
use crate::lifecycle::{Lifecycle, LifecycleState};

/// Gateway intents: the non-privileged defaults plus the configured privileged ones
pub fn gateway_intents(flags: IntentFlags) -> GatewayIntents {
    let mut intents = GatewayIntents::non_privileged();
    if flags.message_content {
        intents |= GatewayIntents::MESSAGE_CONTENT;
    }
    if flags.guild_members {
        intents |= GatewayIntents::GUILD_MEMBERS;
    }
    intents
}

/// The one bot session of this process
pub struct StarlightBot {
    config: Config,
    lifecycle: Arc<Lifecycle>,
}

impl StarlightBot {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            lifecycle: Arc::new(Lifecycle::new()),
        }
    }

    pub fn lifecycle(&self) -> Arc<Lifecycle> {
        Arc::clone(&self.lifecycle)
    }

    pub fn intents(&self) -> GatewayIntents {
        gateway_intents(self.config.intents)
    }

    /// One-time pre-login hook: register every cog and the error interceptor
    pub fn setup(&self) -> Result<Arc<CommandDispatcher>> {
        self.lifecycle.advance(LifecycleState::Configuring)?;

        let style = self.config.reply_style();
        let mut registry = CommandRegistry::new();
        for handler in create_all_handlers() {
            let cog = handler.cog();
            registry.register(handler)?;
            info!("Loaded cog {cog}");
        }

        let interceptor = ErrorInterceptor::new(style.clone());
        info!("Loaded cog errors");
        info!(
            "📦 {} cogs ready with {} commands",
            registry.cog_names().len() + 1,
            registry.len()
        );

        let ctx = Arc::new(CommandContext::new(style));
        Ok(Arc::new(CommandDispatcher::new(registry, interceptor, ctx)))
    }

    /// Connect and run until Ctrl-C or a gateway error
    pub async fn run(self) -> Result<()> {
        let builder = Client::builder(&self.config.discord_token, self.intents());
        self.run_with(builder, ctrl_c()).await
    }

    /// Run the session from a prepared client builder until it ends or
    /// `interrupt` resolves.
    ///
    /// The interrupt is honoured in every phase: client construction,
    /// pre-login command sync and the gateway session itself.
    pub async fn run_with<I>(self, builder: ClientBuilder, interrupt: I) -> Result<()>
    where
        I: Future<Output = ()>,
    {
        let dispatcher = match self.setup() {
            Ok(dispatcher) => dispatcher,
            Err(e) => {
                self.close();
                return Err(e);
            }
        };

        if self.config.command_prefix.is_some() && !self.config.intents.message_content {
            warn!("COMMAND_PREFIX is set but the message content intent is off; prefix commands will not see message text");
        }

        let sync = Arc::new(CommandSync::new(self.config.sync_scope));
        let handler = Handler {
            dispatcher,
            lifecycle: Arc::clone(&self.lifecycle),
            sync: Arc::clone(&sync),
            command_prefix: self.config.command_prefix.clone(),
        };

        tokio::pin!(interrupt);

        let built = tokio::select! {
            built = builder.event_handler(handler) => built,
            () = &mut interrupt => {
                info!("Exiting via Ctrl-C…");
                self.close();
                return Ok(());
            }
        };
        let mut client = match built {
            Ok(client) => client,
            Err(e) => {
                error!("Failed to create Discord client: {e}");
                self.close();
                return Err(anyhow!("Client creation failed: {}", e));
            }
        };

        {
            let mut data = client.data.write().await;
            data.insert::<ShardManagerContainer>(Arc::clone(&client.shard_manager));
        }

        let shards = Arc::clone(&client.shard_manager);
        let shutdown_shards = async move {
            shards.lock().await.shutdown_all().await;
        };

        let http = Arc::clone(&client.cache_and_http.http);
        let interrupted = tokio::select! {
            synced = sync.sync_before_login(&http) => {
                if let Err(e) = synced {
                    warn!("Pre-login command sync failed, retrying on READY: {e:?}");
                }
                false
            }
            () = &mut interrupt => true,
        };
        if interrupted {
            info!("Exiting via Ctrl-C…");
            self.release(shutdown_shards).await;
            return Ok(());
        }

        self.supervise(client.start(), interrupt, shutdown_shards).await
    }

    /// Drive `session` until it ends or `interrupt` fires, then release it.
    ///
    /// `shutdown_shards` runs on every exit path.
    async fn supervise<S, I, R>(&self, session: S, interrupt: I, shutdown_shards: R) -> Result<()>
    where
        S: Future<Output = serenity::Result<()>>,
        I: Future<Output = ()>,
        R: Future<Output = ()>,
    {
        if let Err(e) = self.lifecycle.advance(LifecycleState::Connecting) {
            warn!("{e}");
        }
        info!("Establishing WebSocket connection to Discord gateway...");
        info!("Gateway intents: {:?}", self.intents());

        let outcome = tokio::select! {
            result = session => result.map_err(|why| {
                error!("Gateway connection failed: {why:?}");
                anyhow!("Failed to establish gateway connection: {}", why)
            }),
            () = interrupt => {
                info!("Exiting via Ctrl-C…");
                Ok(())
            }
        };

        self.release(shutdown_shards).await;
        outcome
    }

    /// `ShuttingDown`, stop the shards, then `Closed`
    async fn release<R: Future<Output = ()>>(&self, shutdown_shards: R) {
        self.lifecycle.begin_shutdown();
        shutdown_shards.await;
        self.close();
    }

    fn close(&self) {
        self.lifecycle.begin_shutdown();
        match self.lifecycle.advance(LifecycleState::Closed) {
            Ok(()) => info!("Graceful shutdown complete."),
            Err(e) => warn!("{e}"),
        }
    }
}

/// Resolves on the first Ctrl-C; never resolves if the signal cannot be watched
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Unable to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}

struct Handler {
    dispatcher: Arc<CommandDispatcher>,
    lifecycle: Arc<Lifecycle>,
    sync: Arc<CommandSync>,
    command_prefix: Option<String>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        match self.lifecycle.state() {
            LifecycleState::Connecting => {
                if let Err(e) = self.lifecycle.advance(LifecycleState::Ready) {
                    warn!("{e}");
                }
            }
            LifecycleState::Ready => info!("🔄 Gateway session re-established"),
            state => warn!("READY received while {state}"),
        }

        // Fallback for a failed pre-login sync
        if let Err(e) = self.sync.sync_once(&ctx.http).await {
            error!("❌ {e:?}");
        }

        info!("🌟  Starlight-Bot Online! 🌟");
        info!("🤖 User: {} • ID: {}", ready.user.name, ready.user.id);
        info!("📡 Connected to {} guild(s).", ready.guilds.len());
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        if let Interaction::ApplicationCommand(command) = interaction {
            let platform = SerenityPlatform::new(&ctx);
            let invocation = Invocation::from_slash(&command, &platform);
            let responder = SlashResponder::new(&ctx.http, &command);
            self.dispatcher.dispatch(&invocation, &responder).await;
        }
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }
        let Some(prefix) = &self.command_prefix else {
            return;
        };
        let Some(name) = parse_prefixed(&msg.content, prefix) else {
            return;
        };
        // Ordinary chat that happens to start with the prefix
        if !self.dispatcher.registry().contains(&name) {
            return;
        }

        let platform = SerenityPlatform::new(&ctx);
        let invocation = Invocation::from_message(&msg, &name, &platform);
        let responder = MessageResponder::new(&ctx.http, &msg);
        self.dispatcher.dispatch(&invocation, &responder).await;
    }
}
