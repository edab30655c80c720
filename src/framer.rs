//! Reassembles newline-delimited frames out of whatever chunks the serial
//! layer hands us. The device writes one JSON object per line, but reads
//! return at arbitrary byte boundaries, so a frame may arrive split across
//! several reads or bundled together with its neighbors.

use log::warn;

/// How many bytes we are willing to accumulate while waiting for a
/// delimiter. A frame from the device is a few dozen bytes; anything near
/// this limit means the line is garbage or the delimiter never came.
pub const MAX_FRAME_BYTES: usize = 10 * 1024;

/// Accumulates raw serial bytes and yields complete frames.
///
/// When the buffer outgrows its cap without seeing a delimiter, the whole
/// buffer is discarded and accumulation restarts from empty. Losing that
/// data is the intended trade against unbounded growth.
#[derive(Debug)]
pub struct FrameBuffer {
    buf: Vec<u8>,
    cap: usize,
}

impl FrameBuffer {
    /// A frame buffer with the default cap of [`MAX_FRAME_BYTES`].
    pub fn new() -> Self {
        Self::with_cap(MAX_FRAME_BYTES)
    }

    /// A frame buffer with a custom cap, for tests and unusual devices.
    pub fn with_cap(cap: usize) -> Self {
        FrameBuffer {
            buf: Vec::new(),
            cap,
        }
    }

    /// Feeds one read's worth of bytes in, and returns every frame that is
    /// now complete, delimiter stripped, in arrival order. A trailing `\r`
    /// is dropped from each frame since the device ends lines with `\r\n`.
    /// Blank lines are skipped. Leftover bytes stay buffered for the next
    /// call.
    pub fn extend(&mut self, bytes: &[u8]) -> Vec<Vec<u8>> {
        let mut frames = Vec::new();

        for &byte in bytes {
            if byte == b'\n' {
                let mut frame = std::mem::take(&mut self.buf);
                if frame.last() == Some(&b'\r') {
                    frame.pop();
                }
                if !frame.is_empty() {
                    frames.push(frame);
                }
            } else {
                self.buf.push(byte);
                if self.buf.len() > self.cap {
                    warn!(
                        "discarding {} buffered bytes with no line delimiter in sight",
                        self.buf.len()
                    );
                    self.buf.clear();
                }
            }
        }

        frames
    }

    /// Bytes currently held back waiting for a delimiter.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}
