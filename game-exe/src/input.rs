//! Key names to commands. There is no window, so keys arrive by name from
//! the command line.

use level::MovementCommand;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    Move(MovementCommand),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputConfig {
    pub key_up: String,
    pub key_down: String,
    pub key_left: String,
    pub key_right: String,
    pub key_quit: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        InputConfig {
            key_up: "up".to_owned(),
            key_down: "down".to_owned(),
            key_left: "left".to_owned(),
            key_right: "right".to_owned(),
            key_quit: "escape".to_owned(),
        }
    }
}

impl InputConfig {
    /// Case is ignored. `None` for a key with nothing bound.
    pub fn command_for(&self, key: &str) -> Option<InputCommand> {
        let bindings = [
            (&self.key_up, InputCommand::Move(MovementCommand::Forward)),
            (&self.key_down, InputCommand::Move(MovementCommand::Backward)),
            (&self.key_left, InputCommand::Move(MovementCommand::RotateLeft)),
            (&self.key_right, InputCommand::Move(MovementCommand::RotateRight)),
            (&self.key_quit, InputCommand::Quit),
        ];
        bindings
            .into_iter()
            .find(|(bound, _)| bound.eq_ignore_ascii_case(key))
            .map(|(_, cmd)| cmd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings() {
        let input = InputConfig::default();
        assert_eq!(input.command_for("up"), Some(InputCommand::Move(MovementCommand::Forward)));
        assert_eq!(input.command_for("LEFT"), Some(InputCommand::Move(MovementCommand::RotateLeft)));
        assert_eq!(input.command_for("escape"), Some(InputCommand::Quit));
        assert_eq!(input.command_for("space"), None);
    }

    #[test]
    fn rebound_key() {
        let input = InputConfig {
            key_up: "w".to_owned(),
            ..InputConfig::default()
        };
        assert_eq!(input.command_for("w"), Some(InputCommand::Move(MovementCommand::Forward)));
        assert_eq!(input.command_for("up"), None);
    }
}
