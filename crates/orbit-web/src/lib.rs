//! Browser bridge for orbit-engine.
//!
//! One `SimRunner` lives in a `thread_local!`; the free functions below are
//! the `#[wasm_bindgen]` surface the page calls each animation frame.

pub mod runner;

pub use runner::SimRunner;

use std::cell::RefCell;

use js_sys::{Array, Float32Array};
use orbit_engine::orbits::catalog;
use orbit_engine::{ControlEvent, OrbitFamily};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<SimRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the runner. Before `sim_init` this logs and returns `R::default()`.
fn with_runner<R: Default>(f: impl FnOnce(&mut SimRunner) -> R) -> R {
    RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
        Some(runner) => f(runner),
        None => {
            log::warn!("simulation not initialized, call sim_init() first");
            R::default()
        }
    })
}

#[wasm_bindgen]
pub fn sim_init(config_json: Option<String>) {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let runner = SimRunner::from_json(config_json.as_deref());
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("orbit-engine: initialized");
}

#[wasm_bindgen]
pub fn sim_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

// ---- Controls ----

#[wasm_bindgen]
pub fn sim_select_orbit(family: &str, id: &str) -> bool {
    with_runner(|r| r.select_orbit(family, id))
}

#[wasm_bindgen]
pub fn sim_select_family(family: &str) -> bool {
    with_runner(|r| r.select_family(family))
}

#[wasm_bindgen]
pub fn sim_set_speed(speed: f64) {
    with_runner(|r| r.push_control(ControlEvent::SetSpeed(speed)));
}

#[wasm_bindgen]
pub fn sim_set_paused(paused: bool) {
    with_runner(|r| r.push_control(ControlEvent::SetPaused(paused)));
}

#[wasm_bindgen]
pub fn sim_toggle_pause() {
    with_runner(|r| r.push_control(ControlEvent::TogglePause));
}

#[wasm_bindgen]
pub fn sim_set_trail_enabled(enabled: bool) {
    with_runner(|r| r.push_control(ControlEvent::SetTrailEnabled(enabled)));
}

#[wasm_bindgen]
pub fn sim_set_body_scale(scale: f32) {
    with_runner(|r| r.push_control(ControlEvent::SetBodyScale(scale)));
}

#[wasm_bindgen]
pub fn sim_reset() {
    with_runner(|r| r.push_control(ControlEvent::Reset));
}

// ---- Catalog ----

/// Orbit ids for a family, in selection order. Empty for an unknown family.
#[wasm_bindgen]
pub fn get_orbit_ids(family: &str) -> Array {
    let ids = Array::new();
    if let Some(family) = OrbitFamily::from_name(family) {
        for id in catalog::ids(family) {
            ids.push(&JsValue::from_str(id));
        }
    }
    ids
}

/// Position of any orbit at an arbitrary time, independent of the running
/// simulation. Unknown names yield the fallback point.
#[wasm_bindgen]
pub fn orbit_position(family: &str, id: &str, elapsed: f64, speed: f64) -> Float32Array {
    let p = orbit_engine::position_by_name(family, id, elapsed, speed).as_vec3();
    Float32Array::from(&p.to_array()[..])
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_body_position() -> Float32Array {
    let body = with_runner(|r| r.body_position());
    Float32Array::from(&body[..])
}

/// Body color, emissive color, emissive intensity (7 floats).
#[wasm_bindgen]
pub fn get_body_appearance() -> Float32Array {
    let appearance = with_runner(|r| r.appearance());
    Float32Array::from(&appearance[..])
}

#[wasm_bindgen]
pub fn get_frame_info_ptr() -> *const f32 {
    RUNNER.with(|cell| {
        cell.borrow()
            .as_ref()
            .map_or(std::ptr::null(), |r| r.frame_info_ptr())
    })
}

#[wasm_bindgen]
pub fn get_ribbon_positions_ptr() -> *const f32 {
    RUNNER.with(|cell| {
        cell.borrow()
            .as_ref()
            .map_or(std::ptr::null(), |r| r.ribbon_positions_ptr())
    })
}

#[wasm_bindgen]
pub fn get_ribbon_colors_ptr() -> *const f32 {
    RUNNER.with(|cell| {
        cell.borrow()
            .as_ref()
            .map_or(std::ptr::null(), |r| r.ribbon_colors_ptr())
    })
}

/// Interleaved x, y, z, r, g, b per vertex.
#[wasm_bindgen]
pub fn get_ribbon_vertices_ptr() -> *const f32 {
    RUNNER.with(|cell| {
        cell.borrow()
            .as_ref()
            .map_or(std::ptr::null(), |r| r.ribbon_vertices_ptr())
    })
}

#[wasm_bindgen]
pub fn get_ribbon_indices_ptr() -> *const u32 {
    RUNNER.with(|cell| {
        cell.borrow()
            .as_ref()
            .map_or(std::ptr::null(), |r| r.ribbon_indices_ptr())
    })
}

#[wasm_bindgen]
pub fn get_ribbon_vertex_count() -> u32 {
    with_runner(|r| r.ribbon_vertex_count())
}

#[wasm_bindgen]
pub fn get_ribbon_index_count() -> u32 {
    with_runner(|r| r.ribbon_index_count())
}
