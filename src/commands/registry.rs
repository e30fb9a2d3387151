//! Static command registry
//!
//! Cogs are kept in the order they were loaded; a name index points each
//! command at its cog.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::{bail, Result};
use std::collections::HashMap;
use std::sync::Arc;

use super::handler::SlashCommandHandler;

#[derive(Clone, Default)]
pub struct CommandRegistry {
    cogs: Vec<Arc<dyn SlashCommandHandler>>,
    index: HashMap<&'static str, usize>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a cog under every name it declares.
    ///
    /// All-or-nothing: a name clash with an already loaded cog rejects the
    /// whole cog.
    pub fn register(&mut self, cog: Arc<dyn SlashCommandHandler>) -> Result<()> {
        if let Some(taken) = cog
            .command_names()
            .iter()
            .find(|name| self.index.contains_key(*name))
        {
            let owner = &self.cogs[self.index[taken]];
            bail!(
                "Command '{taken}' from cog '{}' is already registered by cog '{}'",
                cog.cog(),
                owner.cog()
            );
        }

        let slot = self.cogs.len();
        self.index
            .extend(cog.command_names().iter().map(|name| (*name, slot)));
        self.cogs.push(cog);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn SlashCommandHandler>> {
        self.index.get(name).map(|&slot| &self.cogs[slot])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of command names (not cogs)
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Cog names in load order
    pub fn cog_names(&self) -> Vec<&'static str> {
        self.cogs.iter().map(|cog| cog.cog()).collect()
    }
}
