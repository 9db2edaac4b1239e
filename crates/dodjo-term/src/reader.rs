// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Non-blocking stdin reads.
//
// The loop is single-threaded and never parks in read(): with VMIN = 0 and
// O_NONBLOCK set by the terminal guard, a read returns the bytes typed since
// the last tick, or nothing. "Nothing" shows up as 0, EAGAIN, EWOULDBLOCK or
// EINTR depending on platform and timing; all of them mean "no input this
// tick" and are folded into `Ok(0)`.
//
// `ByteSource` is the seam that lets tests feed scripted batches instead of
// a real keyboard.

use std::collections::VecDeque;
use std::io;

/// Maximum bytes consumed per tick. A keypress is 1 byte, an arrow 3.
pub const READ_BATCH: usize = 10;

/// Something the loop can poll for input bytes without blocking.
pub trait ByteSource {
    /// Read whatever is available into `buf`. `Ok(0)` means no input.
    ///
    /// # Errors
    ///
    /// Returns real read failures; "would block" is not an error.
    fn read_batch(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

/// Raw, non-blocking reads from file descriptor 0.
#[derive(Debug, Default)]
pub struct StdinSource;

impl StdinSource {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ByteSource for StdinSource {
    #[cfg(unix)]
    fn read_batch(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = unsafe { libc::read(libc::STDIN_FILENO, buf.as_mut_ptr().cast(), buf.len()) };

        if n >= 0 {
            #[allow(clippy::cast_sign_loss)] // n >= 0 checked above.
            return Ok(n as usize);
        }

        let err = io::Error::last_os_error();
        match err.kind() {
            io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted => Ok(0),
            _ => Err(err),
        }
    }

    #[cfg(not(unix))]
    fn read_batch(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Ok(0)
    }
}

/// Scripted input: each queued `Vec` is delivered as one batch, then the
/// source reports no input forever. Batches longer than the caller's buffer
/// are truncated, the way a real read would leave the rest for later.
impl ByteSource for VecDeque<Vec<u8>> {
    fn read_batch(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let Some(mut batch) = self.pop_front() else {
            return Ok(0);
        };
        let n = batch.len().min(buf.len());
        buf[..n].copy_from_slice(&batch[..n]);
        if n < batch.len() {
            batch.drain(..n);
            self.push_front(batch);
        }
        Ok(n)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_batch_is_small() {
        assert!(READ_BATCH >= 3, "must fit one arrow sequence");
        assert!(READ_BATCH <= 64);
    }

    #[test]
    fn scripted_batches_in_order() {
        let mut src: VecDeque<Vec<u8>> = VecDeque::from([b"z".to_vec(), b"\x1b[A".to_vec()]);
        let mut buf = [0u8; READ_BATCH];

        assert_eq!(src.read_batch(&mut buf).unwrap(), 1);
        assert_eq!(&buf[..1], b"z");
        assert_eq!(src.read_batch(&mut buf).unwrap(), 3);
        assert_eq!(&buf[..3], b"\x1b[A");
        assert_eq!(src.read_batch(&mut buf).unwrap(), 0);
    }

    #[test]
    fn scripted_long_batch_is_split() {
        let mut src: VecDeque<Vec<u8>> = VecDeque::from([b"abcdef".to_vec()]);
        let mut buf = [0u8; 4];

        assert_eq!(src.read_batch(&mut buf).unwrap(), 4);
        assert_eq!(&buf, b"abcd");
        assert_eq!(src.read_batch(&mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], b"ef");
    }

    #[test]
    fn empty_script_reads_nothing() {
        let mut src: VecDeque<Vec<u8>> = VecDeque::new();
        let mut buf = [0u8; READ_BATCH];
        assert_eq!(src.read_batch(&mut buf).unwrap(), 0);
    }
}
