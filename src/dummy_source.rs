//! A synthetic instruction source for running the pipeline without the
//! physical device plugged in. It implements [`std::io::Read`], so the
//! listener consumes it exactly the way it consumes a serial port.

use rand::prelude::*;
use std::{
    collections::VecDeque,
    io::{self, Read},
    thread,
    time::Duration,
};

/// Emits a well-formed `{"element": ...}` frame for a randomly chosen
/// symbol every `interval`, deliberately handing the bytes out in small
/// uneven chunks so frame reassembly gets exercised too.
#[derive(Debug)]
pub struct DummySource {
    symbols: Vec<String>,
    pending: VecDeque<u8>,
    interval: Duration,
}

impl DummySource {
    /// A source that picks uniformly from `symbols`. An empty symbol list
    /// produces immediate EOF.
    pub fn new(symbols: Vec<String>, interval: Duration) -> Self {
        DummySource {
            symbols,
            pending: VecDeque::new(),
            interval,
        }
    }

    fn refill(&mut self) {
        let mut rng = thread_rng();
        // `refill` is only called with a nonempty symbol list.
        let symbol = self.symbols.choose(&mut rng).unwrap();
        let frame = serde_json::json!({ "element": symbol }).to_string();
        self.pending.extend(frame.into_bytes());
        self.pending.push_back(b'\n');
    }
}

impl Read for DummySource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        if self.symbols.is_empty() {
            return Ok(0);
        }

        if self.pending.is_empty() {
            thread::sleep(self.interval);
            self.refill();
        }

        let available = self.pending.len().min(buf.len());
        let n = thread_rng().gen_range(1..=available);
        for slot in buf.iter_mut().take(n) {
            *slot = self.pending.pop_front().unwrap();
        }

        Ok(n)
    }
}
