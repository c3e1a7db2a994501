//! # I/O Abstraction Layer
//!
//! Trait abstractions for console input and output so the controller can
//! be driven from a script in tests.
//!
//! ```text
//! Production:  AppController ──▶ StdinStream     ──▶ tokio::io::stdin()
//!                            ──▶ std::io::Stdout
//!
//! Testing:     AppController ──▶ ScriptedStream  ──▶ VecDeque<String>
//!                            ──▶ SharedBuffer    ──▶ Arc<Mutex<Vec<u8>>>
//! ```

use anyhow::Result;
use std::future::Future;
use std::io::Write;

pub mod mock;
pub mod stdio;

pub use mock::{ScriptedStream, SharedBuffer};
pub use stdio::StdinStream;

/// Source of command lines
pub trait InputStream: Send {
    /// Next line without its terminator, `None` at end of input.
    ///
    /// Must be cancel safe: the controller races it against backend
    /// responses.
    fn next_line(&mut self) -> impl Future<Output = Result<Option<String>>> + Send;

    /// Whether a prompt should be printed before reading
    fn is_interactive(&self) -> bool;
}

/// Sink for rendered output
pub trait RenderStream: Write + Send {}

impl<T: Write + Send> RenderStream for T {}
