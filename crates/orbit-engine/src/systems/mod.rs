pub mod ribbon;
pub mod trail;
