//! # Services
//!
//! Backend access for the console.

pub mod layer_client;
pub mod layer_service;

#[cfg(test)]
pub mod testing;

pub use layer_client::{Action, HttpLayerClient, LayerClient, Payload, ReadAllResponse};
pub use layer_service::{LayerResponseMessage, LayerService, ReadTicket};
