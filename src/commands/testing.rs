//! In-memory `Responder` and `Platform` fakes for handler tests

use anyhow::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use super::context::{GuildSnapshot, Invocation, InvokerInfo, Origin, Platform};
use super::responder::{Outgoing, Responder};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Initial,
    FollowUp,
}

/// Records every reply instead of sending it
#[derive(Default)]
pub struct RecordingResponder {
    acknowledged: AtomicBool,
    sent: Mutex<Vec<(Delivery, Outgoing)>>,
}

impl RecordingResponder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A responder whose interaction was already answered
    pub fn acknowledged() -> Self {
        let responder = Self::default();
        responder.acknowledged.store(true, Ordering::SeqCst);
        responder
    }

    pub fn deliveries(&self) -> Vec<(Delivery, Outgoing)> {
        self.sent.lock().unwrap().clone()
    }

    /// The only reply sent, panicking if there were zero or several
    pub fn single(&self) -> (Delivery, Outgoing) {
        let deliveries = self.deliveries();
        assert_eq!(deliveries.len(), 1, "expected exactly one reply");
        deliveries.into_iter().next().unwrap()
    }
}

#[async_trait]
impl Responder for RecordingResponder {
    fn is_acknowledged(&self) -> bool {
        self.acknowledged.load(Ordering::SeqCst)
    }

    async fn respond(&self, reply: Outgoing) -> Result<()> {
        assert!(!self.is_acknowledged(), "interaction acknowledged twice");
        self.sent.lock().unwrap().push((Delivery::Initial, reply));
        self.acknowledged.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn follow_up(&self, reply: Outgoing) -> Result<()> {
        assert!(self.is_acknowledged(), "follow-up before acknowledgment");
        self.sent.lock().unwrap().push((Delivery::FollowUp, reply));
        Ok(())
    }
}

/// Platform returning canned latency and guild data
#[derive(Default)]
pub struct FakePlatform {
    pub latency: Option<Duration>,
    pub guild: Option<GuildSnapshot>,
    pub guild_lookups: AtomicUsize,
}

impl FakePlatform {
    pub fn lookups(&self) -> usize {
        self.guild_lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Platform for FakePlatform {
    async fn latency(&self) -> Option<Duration> {
        self.latency
    }

    async fn guild(&self, _guild_id: u64) -> Result<Option<GuildSnapshot>> {
        self.guild_lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.guild.clone())
    }
}

pub fn invocation<'a>(command: &str, guild_id: Option<u64>, platform: &'a dyn Platform) -> Invocation<'a> {
    Invocation {
        command: command.to_string(),
        origin: Origin::Slash,
        invoker: InvokerInfo {
            id: 42,
            name: "tester".to_string(),
        },
        channel_id: 7,
        guild_id,
        platform,
    }
}
