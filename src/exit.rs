// src/exit.rs
//! Process exit codes for `ontorank`.

use crate::error::OntoRankError;
use std::process::Termination;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum OntoRankExit {
    /// Operation completed successfully.
    Success = 0,
    /// Generic error (IO, config).
    Error = 1,
    /// Malformed input: bad graph, bad vectors, unparsable files.
    InvalidInput = 2,
    /// Power iteration ran out of iterations in strict mode.
    ConvergenceFailure = 3,
}

impl OntoRankExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn exit(self) -> ! {
        std::process::exit(self.code())
    }

    /// Exit code for a library failure.
    #[must_use]
    pub fn for_error(error: &OntoRankError) -> Self {
        match error {
            OntoRankError::InvalidGraphKind(_)
            | OntoRankError::InvalidPersonalization(_)
            | OntoRankError::InvalidStartVector(_)
            | OntoRankError::Parse(_) => Self::InvalidInput,
            OntoRankError::ConvergenceFailure { .. } => Self::ConvergenceFailure,
            OntoRankError::Io { .. } | OntoRankError::Config(_) => Self::Error,
        }
    }
}

impl Termination for OntoRankExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}

impl From<&anyhow::Error> for OntoRankExit {
    fn from(error: &anyhow::Error) -> Self {
        error
            .downcast_ref::<OntoRankError>()
            .map_or(Self::Error, Self::for_error)
    }
}
