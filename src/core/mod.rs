//! # Core Module
//!
//! Configuration and the shared reply-formatting helpers.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Add format module (number/date helpers)
//! - 1.0.0: Initial creation with config, colour and embed modules

pub mod colour;
pub mod config;
pub mod embeds;
pub mod format;

// Re-export commonly used items
pub use colour::{clamp, random_colour, ColourMode, ERROR_RED};
pub use config::{Config, IntentFlags, SyncScope};
pub use embeds::{build_reply, Reply, ReplyField, ReplyStyle, DEFAULT_FOOTER};
pub use format::{format_date, format_number, format_utc_minute};
