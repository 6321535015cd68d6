// Map presentation boundary
pub mod controller;
pub mod events;

pub use controller::{MapController, Marker};
pub use events::{ActionHandler, MapAction, MapEvent, MarkerId};
