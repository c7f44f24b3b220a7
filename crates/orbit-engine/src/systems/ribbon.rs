//! Ribbon mesh generation for the fading orbit trail.
//!
//! Two vertices per sample, offset sideways in the orbital plane by the
//! sample's opacity times the trail width, joined by an explicit index list.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::api::types::Rgb;
use super::trail::TrailSample;

/// Interleaved per-vertex data for GPU upload.
/// 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RibbonVertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl RibbonVertex {
    /// Number of floats per vertex.
    pub const FLOATS: usize = 6;
    /// Stride in bytes.
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4; // 24
}

/// Trail mesh: parallel position and color buffers plus a triangle list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RibbonGeometry {
    pub positions: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl RibbonGeometry {
    fn with_capacity(samples: usize) -> Self {
        Self {
            positions: Vec::with_capacity(samples * 2),
            colors: Vec::with_capacity(samples * 2),
            indices: Vec::with_capacity(samples.saturating_sub(2) * 6),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Positions as a flat float slice (x, y, z per vertex).
    pub fn position_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Colors as a flat float slice (r, g, b per vertex).
    pub fn color_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.colors)
    }

    /// Replace `out` with positions and colors interleaved into one vertex
    /// stream. `out` keeps its allocation between frames.
    pub fn interleave_into(&self, out: &mut Vec<RibbonVertex>) {
        out.clear();
        out.extend(self.positions.iter().zip(&self.colors).map(|(p, c)| RibbonVertex {
            x: p[0],
            y: p[1],
            z: p[2],
            r: c[0],
            g: c[1],
            b: c[2],
        }));
    }
}

/// Unit vector perpendicular to `from → to` within the x-z plane.
/// Zero for coincident or vertically stacked points.
fn horizontal_perpendicular(from: Vec3, to: Vec3) -> Vec3 {
    let dir = (to - from).normalize_or_zero();
    Vec3::new(-dir.z, 0.0, dir.x).normalize_or_zero()
}

/// Build a ribbon from trail samples ordered oldest to newest.
///
/// Each sample gets a vertex pair offset by `± perpendicular * opacity * width`,
/// where the perpendicular follows the direction to the next sample (the
/// newest sample reuses the previous direction). Consecutive segments are
/// bridged by two triangles, so `n` samples yield `2n` vertices and
/// `6(n - 2)` indices. Fewer than two samples yield an empty ribbon.
pub fn build_ribbon(samples: &[TrailSample], base_color: Rgb, width: f32) -> RibbonGeometry {
    let n = samples.len();
    if n < 2 {
        return RibbonGeometry::default();
    }

    let mut geometry = RibbonGeometry::with_capacity(n);
    let mut perp = Vec3::ZERO;

    for (i, sample) in samples.iter().enumerate() {
        if let Some(next) = samples.get(i + 1) {
            perp = horizontal_perpendicular(sample.position, next.position);
        }
        let offset = perp * (sample.opacity * width);

        // Left vertex, then right vertex.
        geometry.positions.push((sample.position + offset).to_array());
        geometry.positions.push((sample.position - offset).to_array());

        let color = base_color.scaled(sample.opacity).to_array();
        geometry.colors.push(color);
        geometry.colors.push(color);

        if i + 2 < n {
            let base = (i * 2) as u32;
            geometry.indices.extend_from_slice(&[
                base, base + 1, base + 2,
                base + 1, base + 3, base + 2,
            ]);
        }
    }

    geometry
}
