//! Standard input implementation of [`InputStream`].

use super::InputStream;
use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

pub struct StdinStream {
    lines: Lines<BufReader<Stdin>>,
    interactive: bool,
}

impl StdinStream {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
            interactive: atty::is(atty::Stream::Stdin),
        }
    }
}

impl Default for StdinStream {
    fn default() -> Self {
        Self::new()
    }
}

impl InputStream for StdinStream {
    async fn next_line(&mut self) -> Result<Option<String>> {
        Ok(self.lines.next_line().await?)
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}
