//! # Console Commands
//!
//! Text commands typed at the console, parsed into [`CommandEvent`]s.

pub mod context;
pub mod events;
pub mod layer_commands;

pub use context::{CommandContext, ViewModelSnapshot};
pub use events::CommandEvent;
pub use layer_commands::{CommandRegistry, ConsoleCommand, HELP_TEXT};
