#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod geom;
pub mod motion;
pub mod scene;

use std::fmt;

use geom::{
    CatmullRomCurve3, CurveError, HelixError, HelixParams, MeshDiagnostics, Transform, TriMesh,
    TubeError, TubeOptions, TubeProfile, build_tube_mesh, helix_control_points,
};
use motion::{BodyState, BodyTransporter, DEFAULT_SMOOTHING, ProgressTracker};
use scene::{NodeId, SceneGraph};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use wasm_bindgen::JsError;
use wasm_bindgen::prelude::*;

cfg_if::cfg_if! {
    if #[cfg(all(feature = "console_error_panic_hook", target_arch = "wasm32"))] {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            console_error_panic_hook::set_once();
            init_logger();
        }
    } else {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            // no-op fallback when panic hook is disabled
            init_logger();
        }
    }
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    log::set_logger(&DEFAULT_LOGGER).expect("error initializing logger");
    log::set_max_level(LevelFilter::Debug);
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {
    // no-op fallback when debug logs are disabled
}

#[macro_export]
macro_rules! debug_log {
    ($($t:tt)*) => {{
        #[cfg(feature = "debug_logs")]
        {
            #[cfg(target_arch = "wasm32")]
            {
                ::web_sys::console::log_1(&::wasm_bindgen::JsValue::from_str(&format!($($t)*)));
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                println!("{}", format!($($t)*));
            }
        }
    }};
}

/// Scene construction parameters. Every field has a default matching the
/// reference slide, so consumers only override what they tune.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SlideConfig {
    pub slide_height: f64,
    pub slide_radius: f64,
    pub slide_turns: f64,
    pub curve_samples: usize,
    pub inner_radius: f64,
    pub wall_thickness: f64,
    pub tube_segments: usize,
    pub radial_segments: usize,
    pub body_radius: f64,
    pub roll_speed: f64,
    pub smoothing: f64,
}

impl Default for SlideConfig {
    fn default() -> Self {
        Self {
            slide_height: 40.0,
            slide_radius: 8.5,
            slide_turns: 4.125,
            curve_samples: 200,
            inner_radius: 1.25,
            wall_thickness: 0.15,
            tube_segments: 300,
            radial_segments: 32,
            body_radius: 1.1,
            roll_speed: 20.0,
            smoothing: DEFAULT_SMOOTHING,
        }
    }
}

#[derive(Debug, Error)]
pub enum SceneError {
    #[error(transparent)]
    Helix(#[from] HelixError),
    #[error(transparent)]
    Curve(#[from] CurveError),
    #[error(transparent)]
    Tube(#[from] TubeError),
    #[error("invalid scene configuration: {0}")]
    InvalidConfig(String),
}

/// Public entry point for consumers.
///
/// Owns the full pipeline: helical skeleton, spline, swept tube mesh, the
/// progress filter, and the body transporter. The mesh is built once in the
/// constructor; per-frame work is limited to one curve/frame query.
#[wasm_bindgen]
pub struct SlideScene {
    config: SlideConfig,
    curve: CatmullRomCurve3,
    mesh: TriMesh,
    diagnostics: MeshDiagnostics,
    tracker: ProgressTracker,
    transporter: BodyTransporter,
    body: BodyState,
    graph: SceneGraph,
    body_node: NodeId,
}

#[wasm_bindgen]
impl SlideScene {
    /// Builds the scene with the reference configuration.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<SlideScene, JsValue> {
        Self::from_config(&SlideConfig::default()).map_err(to_js_error)
    }

    /// Builds the scene from a configuration object; omitted fields take
    /// their defaults.
    #[wasm_bindgen]
    pub fn with_config(config: JsValue) -> Result<SlideScene, JsValue> {
        let config: SlideConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|err| JsError::new(&err.to_string()))?;
        Self::from_config(&config).map_err(to_js_error)
    }

    /// Flat position buffer: `[x0, y0, z0, x1, ...]`.
    #[wasm_bindgen]
    pub fn tube_positions(&self) -> Vec<f64> {
        self.mesh.positions_flat().to_vec()
    }

    /// Flat normal buffer, same layout as positions.
    #[wasm_bindgen]
    pub fn tube_normals(&self) -> Vec<f64> {
        self.mesh.normals_flat().to_vec()
    }

    #[wasm_bindgen]
    pub fn tube_indices(&self) -> Vec<u32> {
        self.mesh.indices.clone()
    }

    #[wasm_bindgen]
    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    #[wasm_bindgen]
    pub fn triangle_count(&self) -> usize {
        self.mesh.triangle_count()
    }

    #[wasm_bindgen]
    pub fn mesh_diagnostics(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.diagnostics)
            .map_err(|err| JsError::new(&err.to_string()).into())
    }

    /// Stores the latest raw progress value from the scroll source.
    #[wasm_bindgen]
    pub fn set_progress(&mut self, raw: f64) {
        self.tracker.set_raw(raw);
    }

    /// Advances one render tick: smooths progress and moves the body.
    ///
    /// The spin increment is proportional to the change in smoothed progress
    /// over this tick, so the body stops rolling when the scroll is idle and
    /// rolls faster the faster it travels. A failed frame query logs a
    /// warning and keeps the last pose rather than tearing down the scene
    /// mid-animation.
    #[wasm_bindgen]
    pub fn tick(&mut self) {
        self.tracker.tick();
        match self
            .transporter
            .update(&self.curve, self.tracker.smoothed(), self.tracker.delta())
        {
            Ok(state) => {
                self.body = state;
                self.sync_body_node();
            }
            Err(err) => {
                log::warn!("body transport failed ({err}), keeping last pose");
            }
        }
    }

    #[wasm_bindgen]
    pub fn raw_progress(&self) -> f64 {
        self.tracker.raw()
    }

    #[wasm_bindgen]
    pub fn smoothed_progress(&self) -> f64 {
        self.tracker.smoothed()
    }

    /// Change in smoothed progress over the last tick.
    #[wasm_bindgen]
    pub fn progress_delta(&self) -> f64 {
        self.tracker.delta()
    }

    #[wasm_bindgen]
    pub fn body_position(&self) -> Vec<f64> {
        self.body.position.to_array().to_vec()
    }

    /// Accumulated body rotation as XYZ Euler angles in radians.
    #[wasm_bindgen]
    pub fn body_rotation(&self) -> Vec<f64> {
        self.body.rotation.to_array().to_vec()
    }

    /// World matrix of the body node, column-major, 16 elements.
    #[wasm_bindgen]
    pub fn body_matrix(&self) -> Result<Vec<f64>, JsValue> {
        self.graph
            .world_transform(self.body_node)
            .map(|world| world.to_column_major().to_vec())
            .map_err(to_js_error)
    }
}

impl SlideScene {
    /// Native construction path; the wasm constructors delegate here.
    pub fn from_config(config: &SlideConfig) -> Result<Self, SceneError> {
        validate_motion_config(config)?;

        let params = HelixParams {
            height: config.slide_height,
            radius: config.slide_radius,
            turns: config.slide_turns,
            samples: config.curve_samples,
        };
        let curve = CatmullRomCurve3::new(helix_control_points(&params)?)?;

        let profile = TubeProfile {
            inner_radius: config.inner_radius,
            wall_thickness: config.wall_thickness,
        };
        let options = TubeOptions {
            segments: config.tube_segments,
            radial_segments: config.radial_segments,
        };
        let (mesh, diagnostics) = build_tube_mesh(&curve, profile, options)?;

        for warning in &diagnostics.warnings {
            log::warn!("tube mesh: {warning}");
        }
        debug_log!(
            "slide scene built: {} vertices, {} triangles",
            diagnostics.vertex_count,
            diagnostics.triangle_count
        );

        let mut graph = SceneGraph::new();
        let root = graph.add_root();
        let body_node = match graph.add_child(root) {
            Ok(id) => id,
            Err(err) => return Err(SceneError::InvalidConfig(err.to_string())),
        };

        let tracker = ProgressTracker::with_smoothing(config.smoothing);
        let transporter =
            BodyTransporter::new(config.body_radius, config.inner_radius, config.roll_speed);

        let mut scene = Self {
            config: *config,
            curve,
            mesh,
            diagnostics,
            tracker,
            transporter,
            body: BodyState::default(),
            graph,
            body_node,
        };

        // Seat the body at the top of the slide before the first tick.
        match scene.transporter.update(&scene.curve, 0.0, 0.0) {
            Ok(state) => {
                scene.body = state;
                scene.sync_body_node();
            }
            Err(err) => {
                log::warn!("initial body placement failed ({err}), starting at origin");
            }
        }

        Ok(scene)
    }

    #[must_use]
    pub fn config(&self) -> &SlideConfig {
        &self.config
    }

    #[must_use]
    pub fn curve(&self) -> &CatmullRomCurve3 {
        &self.curve
    }

    #[must_use]
    pub fn mesh(&self) -> &TriMesh {
        &self.mesh
    }

    #[must_use]
    pub fn diagnostics(&self) -> &MeshDiagnostics {
        &self.diagnostics
    }

    #[must_use]
    pub fn body_state(&self) -> BodyState {
        self.body
    }

    fn sync_body_node(&mut self) {
        let local = Transform::translate(self.body.position.to_vec3())
            .compose(Transform::from_euler_xyz(self.body.rotation));
        if self
            .graph
            .set_local_transform(self.body_node, local)
            .is_err()
        {
            log::warn!("scene graph rejected body node update");
        }
    }
}

fn validate_motion_config(config: &SlideConfig) -> Result<(), SceneError> {
    if !config.body_radius.is_finite() || config.body_radius <= 0.0 {
        return Err(SceneError::InvalidConfig(
            "body radius must be finite and > 0".to_string(),
        ));
    }
    if config.body_radius > config.inner_radius {
        return Err(SceneError::InvalidConfig(
            "body radius must not exceed the tube inner radius".to_string(),
        ));
    }
    if !config.roll_speed.is_finite() {
        return Err(SceneError::InvalidConfig(
            "roll speed must be finite".to_string(),
        ));
    }
    if !config.smoothing.is_finite() || config.smoothing <= 0.0 || config.smoothing > 1.0 {
        return Err(SceneError::InvalidConfig(
            "smoothing factor must be in (0, 1]".to_string(),
        ));
    }
    Ok(())
}

fn to_js_error<E: fmt::Display>(error: E) -> JsValue {
    js_error(&error.to_string())
}

fn js_error(message: &str) -> JsValue {
    #[cfg(target_arch = "wasm32")]
    {
        JsError::new(message).into()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
        JsValue::NULL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scene_builds_with_reference_buffers() {
        let scene = SlideScene::from_config(&SlideConfig::default()).expect("scene");

        // (segments + 1) * (radial + 1) * 2 vertices.
        assert_eq!(scene.vertex_count(), 301 * 33 * 2);
        assert_eq!(scene.mesh().indices.len(), 300 * 32 * 12);
        assert!(scene.diagnostics().is_clean());
    }

    #[test]
    fn config_validation_rejects_oversized_body() {
        let config = SlideConfig {
            body_radius: 2.0,
            inner_radius: 1.25,
            ..SlideConfig::default()
        };
        assert!(matches!(
            SlideScene::from_config(&config),
            Err(SceneError::InvalidConfig(_))
        ));
    }

    #[test]
    fn config_validation_rejects_bad_smoothing() {
        let config = SlideConfig {
            smoothing: 0.0,
            ..SlideConfig::default()
        };
        assert!(matches!(
            SlideScene::from_config(&config),
            Err(SceneError::InvalidConfig(_))
        ));
    }

    #[test]
    fn body_starts_seated_at_the_top() {
        let scene = SlideScene::from_config(&SlideConfig::default()).expect("scene");
        let state = scene.body_state();

        // Near the top of a 40-unit slide, below the curve center line.
        assert!(state.position.y > 18.0);
        assert_eq!(state.rotation, geom::Vec3::ZERO);
    }

    #[test]
    fn body_matrix_translation_matches_body_position() {
        let mut scene = SlideScene::from_config(&SlideConfig::default()).expect("scene");
        scene.set_progress(0.6);
        for _ in 0..10 {
            scene.tick();
        }

        let matrix = scene.body_matrix().expect("matrix");
        let position = scene.body_position();
        assert_eq!(&matrix[12..15], position.as_slice());
    }
}
