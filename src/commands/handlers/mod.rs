//! Per-cog handler implementations
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

pub mod fun;
pub mod general;

use std::sync::Arc;

use super::handler::SlashCommandHandler;

/// Create all registered command handlers
///
/// The static, auditable list of cogs. Returns handlers ready to be
/// registered with `CommandRegistry`.
pub fn create_all_handlers() -> Vec<Arc<dyn SlashCommandHandler>> {
    vec![Arc::new(general::GeneralHandler), Arc::new(fun::FunHandler)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::registry::CommandRegistry;

    #[test]
    fn test_all_handlers_register_without_conflicts() {
        let mut registry = CommandRegistry::new();
        for handler in create_all_handlers() {
            registry.register(handler).unwrap();
        }
        assert_eq!(registry.len(), 4);
        for name in ["ping", "hello", "server", "joke"] {
            assert!(registry.contains(name), "missing {name}");
        }
        assert_eq!(registry.cog_names(), vec!["general", "fun"]);
    }
}
