use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::orbits::catalog;

/// Top-level trajectory category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrbitFamily {
    Lagrange,
    EarthSynchronous,
    MoonRelative,
}

impl OrbitFamily {
    pub const ALL: [OrbitFamily; 3] = [
        Self::Lagrange,
        Self::EarthSynchronous,
        Self::MoonRelative,
    ];

    /// Canonical wire name, as accepted by `from_name`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Lagrange => "lagrange",
            Self::EarthSynchronous => "earth_synchronous",
            Self::MoonRelative => "moon_relative",
        }
    }

    /// Parse a family name. Accepts the short UI aliases (`earth`, `moon`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "lagrange" => Some(Self::Lagrange),
            "earth_synchronous" | "earth" => Some(Self::EarthSynchronous),
            "moon_relative" | "moon" => Some(Self::MoonRelative),
            _ => None,
        }
    }
}

/// Which trajectory is active: a family plus a specific orbit id within it.
///
/// The id is not validated on construction. Ids the catalog does not know
/// resolve to fallback values downstream instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrbitSelector {
    pub family: OrbitFamily,
    pub specific_id: String,
}

impl OrbitSelector {
    pub fn new(family: OrbitFamily, specific_id: impl Into<String>) -> Self {
        Self {
            family,
            specific_id: specific_id.into(),
        }
    }

    /// The first orbit listed for `family` in the catalog.
    pub fn family_default(family: OrbitFamily) -> Self {
        Self::new(family, catalog::default_id(family))
    }

    /// True when the catalog lists this id under this family.
    pub fn is_known(&self) -> bool {
        catalog::find(self.family, &self.specific_id).is_some()
    }
}

impl Default for OrbitSelector {
    fn default() -> Self {
        Self::family_default(OrbitFamily::Lagrange)
    }
}

/// Linear RGB color, components in 0.0 - 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Multiply every channel by `factor`.
    pub fn scaled(self, factor: f32) -> Self {
        Self {
            r: self.r * factor,
            g: self.g * factor,
            b: self.b * factor,
        }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
}

/// Per-tick summary handed to the host alongside the body position.
/// Flat f32 layout so it can be read straight out of linear memory.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct FrameInfo {
    pub elapsed: f32,
    pub speed: f32,
    /// 1.0 while paused.
    pub paused: f32,
    pub sample_count: f32,
    pub vertex_count: f32,
    pub index_count: f32,
    pub body_scale: f32,
    /// Fixed tick count modulo `TICK_WRAP`, so every value is exact in f32.
    pub tick: f32,
}

impl FrameInfo {
    pub const FLOATS: usize = 8;
    /// 2^24, the first integer an f32 can no longer step past by one.
    pub const TICK_WRAP: u64 = 1 << 24;
}
