//! Orbit catalog and the parametric trajectories it names.

pub mod catalog;
pub mod trajectory;
