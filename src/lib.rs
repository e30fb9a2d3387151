// Core layer - configuration and reply formatting
pub mod core;

// Application layer
pub mod commands;

// Session lifecycle
pub mod bot;
pub mod lifecycle;

// Re-export core config for convenience
pub use crate::core::Config;

pub use bot::StarlightBot;
pub use lifecycle::{Lifecycle, LifecycleState};
