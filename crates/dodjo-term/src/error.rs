// SPDX-License-Identifier: MIT
//
// Errors raised while taking over the terminal.
//
// Everything here is fatal at startup: without raw, non-blocking input the
// loop cannot classify keys correctly, so the binary reports and exits
// rather than degrading.

use std::io;

use thiserror::Error;

/// Failure to configure or restore the controlling terminal.
#[derive(Debug, Error)]
pub enum TermError {
    /// `tcgetattr` / `tcsetattr` failed.
    #[error("cannot {op} terminal attributes: {source}")]
    Attributes {
        op: &'static str,
        #[source]
        source: io::Error,
    },

    /// `fcntl` could not read or change the descriptor's status flags.
    #[error("cannot {op} non-blocking mode on stdin: {source}")]
    NonBlocking {
        op: &'static str,
        #[source]
        source: io::Error,
    },

    /// Writing control sequences failed.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

impl TermError {
    /// Capture `errno` for a failed termios call.
    pub(crate) fn attributes(op: &'static str) -> Self {
        Self::Attributes {
            op,
            source: io::Error::last_os_error(),
        }
    }

    /// Capture `errno` for a failed fcntl call.
    pub(crate) fn non_blocking(op: &'static str) -> Self {
        Self::NonBlocking {
            op,
            source: io::Error::last_os_error(),
        }
    }
}

/// Convenience alias for terminal-layer results.
pub type Result<T> = std::result::Result<T, TermError>;

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn attributes_message_names_operation() {
        let err = TermError::Attributes {
            op: "query",
            source: io::Error::from_raw_os_error(25),
        };
        assert!(err.to_string().starts_with("cannot query terminal attributes"));
        assert!(err.source().is_some());
    }

    #[test]
    fn non_blocking_message_names_operation() {
        let err = TermError::NonBlocking {
            op: "enable",
            source: io::Error::other("nope"),
        };
        assert_eq!(err.to_string(), "cannot enable non-blocking mode on stdin: nope");
    }

    #[test]
    fn io_error_converts() {
        let err: TermError = io::Error::other("pipe closed").into();
        assert!(matches!(err, TermError::Io(_)));
        assert_eq!(err.to_string(), "terminal I/O failed: pipe closed");
    }
}
