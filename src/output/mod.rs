//! Output module
//!
//! Protocol messages and the writer that puts them on stdout.
//!
//! # Overview
//!
//! Every line written to stdout is one self-contained JSON message whose
//! `type` tag tells the orchestrator how to read the payload:
//! - `LOG` - diagnostics addressed to the orchestrator
//! - `CONNECTION_STATUS` - outcome of `check`
//! - `CATALOG` - streams offered by `discover`
//! - `SPEC` - configuration schema returned by `spec`
//! - `RECORD` - one extracted row

mod message;
mod writer;

pub use message::{LogMessage, Message, RecordMessage};
pub use writer::{MessageSink, MessageWriter};
