use pairs_core::TileId;
use std::str::FromStr;
use thiserror::Error;

/// One user intent read from the terminal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Flip(TileId),
    Reset,
    CycleSize,
    ToggleMute,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub(crate) enum CommandError {
    #[error("Unknown command {0:?}, type `help` for a list")]
    Unknown(String),
    #[error("Expected a tile number, got {0:?}")]
    InvalidTile(String),
    #[error("Missing tile number")]
    MissingTile,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(CommandError::Unknown(String::new()));
        };

        Ok(match head.to_ascii_lowercase().as_str() {
            "f" | "flip" => match words.next() {
                Some(tile) => Command::Flip(parse_tile(tile)?),
                None => return Err(CommandError::MissingTile),
            },
            "r" | "reset" => Command::Reset,
            "s" | "size" => Command::CycleSize,
            "m" | "mute" => Command::ToggleMute,
            "h" | "help" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            other if other.starts_with(|c: char| c.is_ascii_digit()) => {
                Command::Flip(parse_tile(other)?)
            }
            other => return Err(CommandError::Unknown(other.to_owned())),
        })
    }
}

fn parse_tile(word: &str) -> Result<TileId, CommandError> {
    word.parse()
        .map_err(|_| CommandError::InvalidTile(word.to_owned()))
}

pub(crate) const HELP: &str = "\
Commands:
  <n>, flip <n>   turn over tile n
  reset           deal a fresh board of the same size
  size            switch to the next board size (4, 16, 32)
  mute            toggle sound
  help            show this help
  quit            leave the game";
