//! # layerdesk - Console Admin Client for Map Layers
//!
//! Lists, creates, edits and deletes map layer records held by an
//! action-routed `layer-handler` HTTP endpoint. Edits happen on a staged
//! copy of a layer and only reach the list once the backend accepts them.
//!
//! ## Architecture
//!
//! This application follows the Model-View-ViewModel (MVVM) pattern:
//!
//! ```text
//! ┌─────────────┐    Events    ┌──────────────┐    Updates   ┌─────────┐
//! │    View     │◄─────────────│  ViewModel   │◄─────────────│ Models  │
//! │             │              │              │              │         │
//! │ - Panels    │              │ - Selection  │              │ - Layer │
//! │ - Status    │              │ - CRUD       │              │ - State │
//! └─────────────┘              └──────────────┘              └─────────┘
//!                                      ▲
//!                                      │ Commands
//!                                      ▼
//!                               ┌──────────────┐    Tasks    ┌──────────────┐
//!                               │  Controller  │────────────▶│ LayerService │
//!                               │              │◀────────────│  (reqwest)   │
//!                               │ - Event Loop │  Responses  └──────────────┘
//!                               └──────────────┘
//! ```

pub mod cmd_args;
pub mod config;
pub mod console;

// Re-export main types for easy access
pub use console::*;
