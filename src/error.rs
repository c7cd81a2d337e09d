//! Crate-wide error type.
//!
//! Every failure that reaches the binary carries the process exit code it should
//! produce:
//!
//! - `2`: input/config problems (unreadable file, missing column, unparsable value)
//! - `3`: output problems (stdout rendering or export write failures)

/// Exit code for unreadable or malformed inputs.
pub const EXIT_INPUT: u8 = 2;
/// Exit code for output/export failures.
pub const EXIT_OUTPUT: u8 = 3;

#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn input(message: impl Into<String>) -> Self {
        Self::new(EXIT_INPUT, message)
    }

    pub fn output(message: impl Into<String>) -> Self {
        Self::new(EXIT_OUTPUT, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}
