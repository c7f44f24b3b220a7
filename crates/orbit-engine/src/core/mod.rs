pub mod simulation;
pub mod time;
