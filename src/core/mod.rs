//! Scheduling data model and the pure state it is reduced into.

pub mod metrics;
pub mod model;
pub mod reducer;
