//! # Escrow Runtime
//!
//! Wires the escrow engine to the event bus and consumes its output.
//!
//! - `projection` - Open-offer view folded from the event stream
//! - `scenario` - The canonical swap / cancel walk-through

pub mod projection;
pub mod scenario;

pub use projection::{run_projection, Cursor, OfferProjection, OpenOffer};
pub use scenario::{run_scenario, Parties, ScenarioReport};
