//! Line-delimited JSON message writer

use super::Message;
use crate::error::Result;
use std::io::{self, Stdout, Write};

/// Destination for protocol messages
pub trait MessageSink {
    /// Write one message
    fn emit(&mut self, message: &Message) -> Result<()>;
}

/// Writes each message as one JSON line and flushes immediately
#[derive(Debug)]
pub struct MessageWriter<W: Write> {
    writer: W,
    written: usize,
}

impl MessageWriter<Stdout> {
    /// Writer over the process's standard output
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> MessageWriter<W> {
    /// Wrap a writer
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Number of messages written so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Consume the writer and return the inner sink
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> MessageSink for MessageWriter<W> {
    fn emit(&mut self, message: &Message) -> Result<()> {
        let line = serde_json::to_string(message)?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        self.written += 1;
        Ok(())
    }
}
