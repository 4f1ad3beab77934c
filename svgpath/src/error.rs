use thiserror::Error;

/// Failure to read a path description. Offsets are byte offsets into the
/// description text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown command '{found}' at offset {offset}")]
    UnknownCommand { found: char, offset: usize },

    #[error("command '{command}' is missing operands at offset {offset}")]
    MissingOperands { command: char, offset: usize },

    #[error("malformed number at offset {offset}")]
    InvalidNumber { offset: usize },

    #[error("arc flag must be 0 or 1 at offset {offset}")]
    InvalidFlag { offset: usize },

    #[error("expected a command letter at offset {offset}")]
    ExpectedCommand { offset: usize },
}

impl ParseError {
    pub fn offset(&self) -> usize {
	match *self {
	    ParseError::UnknownCommand { offset, .. }
	    | ParseError::MissingOperands { offset, .. }
	    | ParseError::InvalidNumber { offset }
	    | ParseError::InvalidFlag { offset }
	    | ParseError::ExpectedCommand { offset } => offset,
	}
    }
}
