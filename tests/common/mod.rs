//! Common test utilities and infrastructure
//!
//! Provides the Cucumber world and the mock `layer-handler` backend it
//! drives.

pub mod world;

#[allow(unused_imports)]
pub use world::LayerWorld;
