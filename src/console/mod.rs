//! # Layer Console
//!
//! The layer administration console, split along MVVM lines:
//!
//! - `models`: layers, features, connection profiles and the status line
//! - `view_models`: the single owner of UI state and its CRUD operations
//! - `views`: text rendering of the panels
//! - `controllers`: the event loop tying input, commands and backend together
//! - `services`: the HTTP client and the task-based service around it
//! - `widgets`: collapsible panels and their slide animation

pub mod commands;
pub mod controllers;
pub mod error;
pub mod events;
pub mod io;
pub mod models;
pub mod services;
pub mod view_models;
pub mod views;
pub mod widgets;

// Re-export main types for easy access
pub use controllers::AppController;
pub use error::LayerError;
pub use models::{Feature, Layer};
pub use services::{HttpLayerClient, LayerClient};
pub use view_models::ViewModel;
