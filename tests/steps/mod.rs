//! Step definitions for Cucumber tests
//!
//! Steps are organized by feature domain:
//! - `layers` - backend setup, CRUD calls and list checks
//! - `selection` - staging a layer and its features
//! - `panels` - collapsible panels and the reload-on-reveal rule

pub mod layers;
pub mod panels;
pub mod selection;
