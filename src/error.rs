use thiserror::Error;

use crate::circuit::bench::ParseError;

/// Exit status for a malformed command line.
pub const EXIT_USAGE: u8 = 1;
pub const EXIT_IO: u8 = 2;
pub const EXIT_PARSE: u8 = 3;
pub const EXIT_UNKNOWN: u8 = 4;

/// Every way a compile-and-solve run can fail. All of them are terminal.
#[derive(Debug, Error)]
pub enum CircuitError {
    #[error("i/o error")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("{backend} returned an unknown status")]
    OracleUnknown { backend: &'static str },
}

impl CircuitError {
    pub fn exit_code(&self) -> u8 {
        match self {
            CircuitError::Io(_) => EXIT_IO,
            CircuitError::Parse(_) => EXIT_PARSE,
            CircuitError::OracleUnknown { .. } => EXIT_UNKNOWN,
        }
    }
}

pub type Result<T, E = CircuitError> = std::result::Result<T, E>;
