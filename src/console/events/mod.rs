//! # Events Module
//!
//! Model events, view events and the bus that distributes them.

pub mod event_bus;
pub mod model_events;
pub mod view_events;

pub use event_bus::{EventBus, ModelEventHandler, SimpleEventBus, ViewEventHandler};
pub use model_events::ModelEvent;
pub use view_events::ViewEvent;
