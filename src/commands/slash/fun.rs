//! # Joke Command
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use serenity::builder::CreateApplicationCommand;

pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![create_joke_command()]
}

fn create_joke_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command.name("joke").description("Hear a dad joke.");
    command
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_joke_command() {
        let commands = create_commands();
        assert_eq!(commands.len(), 1);

        let joke = &commands[0];
        let name = joke.0.get("name").unwrap().as_str().unwrap();
        assert_eq!(name, "joke");
    }
}
