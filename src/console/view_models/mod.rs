//! # ViewModel Module
//!
//! The console's view state, split by responsibility:
//! selection staging and backend CRUD.

mod core;
mod layer_manager;
mod selection_manager;

pub use core::{PendingWrite, ViewModel, WriteKind};
