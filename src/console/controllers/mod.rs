//! # Controllers
//!
//! Controllers orchestrate the interaction between input, view models and views.

pub mod app_controller;

pub use app_controller::AppController;
