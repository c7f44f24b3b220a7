pub mod api;
pub mod core;
pub mod input;
pub mod orbits;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::config::SimulationConfig;
pub use api::types::{FrameInfo, OrbitFamily, OrbitSelector, Rgb};
pub use core::simulation::{Frame, Simulation};
pub use core::time::FixedTimestep;
pub use input::queue::{ControlEvent, ControlQueue};
pub use orbits::catalog::{BodyAppearance, OrbitInfo, OrbitSpec};
pub use orbits::trajectory::{moon_position, position, position_by_name};
pub use systems::ribbon::{build_ribbon, RibbonGeometry, RibbonVertex};
pub use systems::trail::{TrailBuffer, TrailSample};
