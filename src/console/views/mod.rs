//! # Views Module
//!
//! Contains the line-oriented renderer for the console panels.

pub mod console_renderer;

pub use console_renderer::{ConsoleRenderer, ViewRenderer};
