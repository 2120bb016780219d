use std::fmt;
use std::io;

use crate::levels::MAX_LEVEL;

#[derive(Debug)]
pub enum GameError {
    /// A level index outside `1..=MAX_LEVEL` was requested.
    InvalidLevel(u8),
    Terminal(io::Error),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLevel(index) => {
                write!(f, "invalid level index {index} (allowed 1..={MAX_LEVEL})")
            }
            Self::Terminal(err) => write!(f, "terminal error: {err}"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Terminal(err) => Some(err),
            Self::InvalidLevel(_) => None,
        }
    }
}

impl From<io::Error> for GameError {
    fn from(err: io::Error) -> Self {
        Self::Terminal(err)
    }
}
