//! # General Commands
//!
//! `/ping`, `/hello` and `/server` definitions.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use serenity::builder::CreateApplicationCommand;

pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![
        create_command("ping", "Show bot latency."),
        create_command("hello", "Receive a friendly greeting."),
        create_command("server", "Information about this server."),
    ]
}

fn create_command(name: &str, description: &str) -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command.name(name).description(description);
    command
}
