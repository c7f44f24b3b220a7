use orbit_engine::{
    ControlEvent, ControlQueue, FrameInfo, OrbitFamily, OrbitSelector,
    RibbonVertex, Simulation, SimulationConfig,
};

/// Owns the simulation and the host-facing copies of its per-frame output.
///
/// The browser side keeps one runner in a `thread_local!` and reads buffers
/// through the raw pointers below after each `tick`.
pub struct SimRunner {
    sim: Simulation,
    controls: ControlQueue,
    frame_info: FrameInfo,
    /// x, y, z of the moving body.
    body: [f32; 3],
    /// color rgb, emissive rgb, emissive intensity.
    appearance: [f32; 7],
    /// Interleaved ribbon vertices (x, y, z, r, g, b), rebuilt on publish.
    ribbon_vertices: Vec<RibbonVertex>,
}

impl SimRunner {
    pub fn new(config: SimulationConfig) -> Self {
        let mut runner = Self {
            sim: Simulation::new(config),
            controls: ControlQueue::new(),
            frame_info: FrameInfo::default(),
            body: [0.0; 3],
            appearance: [0.0; 7],
            ribbon_vertices: Vec::with_capacity(4096),
        };
        runner.publish();
        runner
    }

    /// Build from an optional JSON config. Bad JSON logs and falls back to defaults.
    pub fn from_json(json: Option<&str>) -> Self {
        let config = match json {
            Some(json) => SimulationConfig::from_json(json).unwrap_or_else(|err| {
                log::error!("invalid simulation config, using defaults: {err}");
                SimulationConfig::default()
            }),
            None => SimulationConfig::default(),
        };
        Self::new(config)
    }

    /// Queue a control event for the next tick.
    pub fn push_control(&mut self, event: ControlEvent) {
        self.controls.push(event);
    }

    /// Queue an orbit change by name. Returns false for an unknown family.
    pub fn select_orbit(&mut self, family: &str, id: &str) -> bool {
        match OrbitFamily::from_name(family) {
            Some(family) => {
                self.push_control(ControlEvent::SelectOrbit(OrbitSelector::new(family, id)));
                true
            }
            None => {
                log::warn!("unknown orbit family {family:?}, selection ignored");
                false
            }
        }
    }

    /// Queue a family change by name. Returns false for an unknown family.
    pub fn select_family(&mut self, family: &str) -> bool {
        match OrbitFamily::from_name(family) {
            Some(family) => {
                self.push_control(ControlEvent::SelectFamily(family));
                true
            }
            None => {
                log::warn!("unknown orbit family {family:?}, selection ignored");
                false
            }
        }
    }

    /// Run one host frame: apply controls, run fixed ticks, publish output.
    pub fn tick(&mut self, dt: f32) {
        self.sim.handle_controls(&mut self.controls);
        self.sim.advance(dt as f64);
        self.publish();
    }

    fn publish(&mut self) {
        let frame = self.sim.frame();
        self.body = frame.body_position.to_array();
        let a = frame.appearance;
        self.appearance = [
            a.color.r, a.color.g, a.color.b,
            a.emissive.r, a.emissive.g, a.emissive.b,
            a.emissive_intensity,
        ];
        self.frame_info = self.sim.frame_info();
        match self.sim.ribbon() {
            Some(ribbon) => ribbon.interleave_into(&mut self.ribbon_vertices),
            None => self.ribbon_vertices.clear(),
        }
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn body_position(&self) -> [f32; 3] {
        self.body
    }

    pub fn appearance(&self) -> [f32; 7] {
        self.appearance
    }

    // ---- Pointer accessors for linear-memory reads ----

    pub fn frame_info_ptr(&self) -> *const f32 {
        &self.frame_info as *const FrameInfo as *const f32
    }

    pub fn ribbon_positions_ptr(&self) -> *const f32 {
        self.sim
            .ribbon()
            .map_or(std::ptr::null(), |r| r.position_floats().as_ptr())
    }

    pub fn ribbon_colors_ptr(&self) -> *const f32 {
        self.sim
            .ribbon()
            .map_or(std::ptr::null(), |r| r.color_floats().as_ptr())
    }

    /// `RibbonVertex::FLOATS` floats per vertex, `ribbon_vertex_count` vertices.
    pub fn ribbon_vertices_ptr(&self) -> *const f32 {
        if self.ribbon_vertices.is_empty() {
            std::ptr::null()
        } else {
            self.ribbon_vertices.as_ptr() as *const f32
        }
    }

    pub fn ribbon_indices_ptr(&self) -> *const u32 {
        self.sim
            .ribbon()
            .map_or(std::ptr::null(), |r| r.indices.as_ptr())
    }

    pub fn ribbon_vertex_count(&self) -> u32 {
        self.sim.ribbon().map_or(0, |r| r.vertex_count() as u32)
    }

    pub fn ribbon_index_count(&self) -> u32 {
        self.sim.ribbon().map_or(0, |r| r.indices.len() as u32)
    }
}
