//! The background loop that turns serial bytes into element selections.
//!
//! The loop is generic over [`std::io::Read`] so the same code runs against
//! a real [`serial2::SerialPort`], the synthetic source in
//! [`crate::dummy_source`], or an in-memory cursor in tests.

use crate::elements::ElementDirectory;
use crate::framer::FrameBuffer;
use crate::instruction::{decode_frame, FrameDecode};
use crate::selection::CurrentSelection;

use log::{debug, warn};
use std::{
    io::{ErrorKind, Read},
    sync::Arc,
    thread::{self, JoinHandle},
};

/// Reads `conn` until EOF or a connection error, updating `selection` with
/// every instruction that resolves against `directory`.
///
/// Per-frame failures never end the loop: malformed frames and frames with
/// no identifier are logged and dropped, and identifiers that match no
/// element are dropped quietly, leaving the previous selection in place.
/// Returns `Ok(())` on EOF (the device side closed cleanly) and the
/// underlying error on a connection failure.
pub fn run_reader<R: Read>(
    mut conn: R,
    directory: &ElementDirectory,
    selection: &CurrentSelection,
) -> std::io::Result<()> {
    let mut chunk = [0u8; 256];
    let mut framer = FrameBuffer::new();

    loop {
        let read_len = match conn.read(&mut chunk) {
            Ok(0) => return Ok(()),
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) if e.kind() == ErrorKind::TimedOut => continue,
            Err(e) => return Err(e),
        };

        for frame in framer.extend(&chunk[..read_len]) {
            match decode_frame(&frame) {
                FrameDecode::Instruction(instruction) => {
                    match directory.find(&instruction.identifier) {
                        Some(record) => {
                            debug!(
                                "instruction {:?} resolved to {} ({})",
                                instruction.identifier, record.name, record.symbol
                            );
                            selection.select(&record.symbol);
                        }
                        None => {
                            // Unknown elements are dropped without fanfare;
                            // the display just keeps showing the last one.
                            debug!("no element matches {:?}", instruction.identifier);
                        }
                    }
                }
                FrameDecode::MissingIdentifier => {
                    warn!("frame carried no element identifier, dropping it");
                }
                FrameDecode::Malformed(error) => {
                    warn!("could not decode frame: {}", error);
                }
            }
        }
    }
}

/// Handle to a reader loop running on its own thread.
pub struct ElementListener {
    handle: Option<JoinHandle<std::io::Result<()>>>,
}

impl ElementListener {
    /// Spawns [`run_reader`] over `conn` on a dedicated thread. A
    /// connection failure is reported once via the log and ends the thread;
    /// the rest of the process keeps running.
    pub fn spawn<R: Read + Send + 'static>(
        conn: R,
        directory: Arc<ElementDirectory>,
        selection: CurrentSelection,
    ) -> Self {
        let handle = thread::spawn(move || {
            let result = run_reader(conn, &directory, &selection);
            if let Err(ref error) = result {
                warn!("serial connection lost: {}", error);
            }
            result
        });

        ElementListener {
            handle: Some(handle),
        }
    }

    /// Whether the reader loop has exited.
    pub fn is_finished(&self) -> bool {
        self.handle
            .as_ref()
            .map(|h| h.is_finished())
            .unwrap_or(true)
    }

    /// Waits for the reader loop to exit and returns its result. The loop
    /// only exits when the byte source reaches EOF or fails, so this blocks
    /// until the device side goes away.
    pub fn join(mut self) -> std::io::Result<()> {
        match self.handle.take() {
            Some(handle) => handle.join().unwrap_or_else(|_| {
                Err(std::io::Error::new(
                    ErrorKind::Other,
                    "reader thread panicked",
                ))
            }),
            None => Ok(()),
        }
    }
}
