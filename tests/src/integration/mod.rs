//! # Integration Tests
//!
//! The engine talking to the real bus, and the projection reading it.

pub mod e2e_projection;
pub mod flows;
