//! tripglobe-wasm: WebAssembly bindings for tripglobe-core
//!
//! This crate lets a JavaScript globe renderer (three.js, globe.gl, ...)
//! drive the clustering core. The renderer forwards its zoom, rotation,
//! click and camera-arrival events; every call returns the commands the
//! renderer has to carry out.
//!
//! What it provides
//! ----------------
//! - `WasmGlobe`: one session per globe view
//!   - `on_zoom_changed(altitude)`, `on_rotated(lat, lng)`,
//!     `on_cluster_clicked(id)`, `on_camera_complete(generation)`,
//!     `back()`, `reset()`, each returning an array of commands
//!   - `layout(project)` with a `(lat, lng) => {x, y} | null` callback
//!   - `visible_entries()`, `state()`, `stats()`
//! - `classify_country(code)` for quick lookups
//!
//! Quick start (browser)
//! ---------------------
//! ```javascript
//! import init, { WasmGlobe } from 'tripglobe-wasm';
//!
//! async function main() {
//!   await init();
//!   const globe = new WasmGlobe(JSON.stringify(trips), null);
//!   apply(globe.start());
//!
//!   renderer.onZoom(alt => apply(globe.on_zoom_changed(alt)));
//!   renderer.onClick(id => apply(globe.on_cluster_clicked(id)));
//!   renderer.onArrive(gen => apply(globe.on_camera_complete(gen)));
//! }
//!
//! function apply(commands) {
//!   for (const cmd of commands) {
//!     if (cmd.type === 'SetVisibleEntries') renderer.setMarkers(cmd.entries);
//!     if (cmd.type === 'MoveCamera') renderer.flyTo(cmd.pose, cmd.duration_ms, cmd.generation);
//!     if (cmd.type === 'NavigateToCityDetail') router.push(`/city/${cmd.location_id}`);
//!   }
//! }
//! main();
//! ```
//!
//! Notes
//! -----
//! - The `*_json` methods take and return JSON strings, handy for workers
//!   and for tests outside the browser.
//! - Each `WasmGlobe` owns its own state; nothing is shared between them.
use wasm_bindgen::prelude::*;

use js_sys::Function;
use serde::Serialize;
use serde_wasm_bindgen::{from_value, to_value};
use tripglobe_core::continent;
use tripglobe_core::loader::locations_from_json_str;
use tripglobe_core::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    web_sys::console::log_1(&"Initializing tripglobe WASM module...".into());
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    to_value(value).map_err(js_err)
}

/* --------------------------------------------------------------------------
   Projection callback
-------------------------------------------------------------------------- */

struct JsProjector<'a>(&'a Function);

impl Projector for JsProjector<'_> {
    fn project(&self, latitude: f64, longitude: f64) -> Option<ScreenPoint> {
        let out = self
            .0
            .call2(&JsValue::NULL, &latitude.into(), &longitude.into())
            .ok()?;
        if out.is_null() || out.is_undefined() {
            return None;
        }
        from_value::<ScreenPoint>(out).ok()
    }
}

/* --------------------------------------------------------------------------
   Session
-------------------------------------------------------------------------- */

#[wasm_bindgen]
pub struct WasmGlobe {
    session: GlobeSession,
}

#[wasm_bindgen]
impl WasmGlobe {
    /// `locations_json`: travel records; `config_json`: optional overrides.
    #[wasm_bindgen(constructor)]
    pub fn new(locations_json: &str, config_json: Option<String>) -> Result<WasmGlobe, JsValue> {
        let locations = locations_from_json_str(locations_json).map_err(js_err)?;
        let config = match config_json {
            Some(s) if !s.trim().is_empty() => GlobeConfig::from_json_str(&s).map_err(js_err)?,
            _ => GlobeConfig::default(),
        };
        let session = GlobeSession::new(locations, config).map_err(js_err)?;
        Ok(WasmGlobe { session })
    }

    /// Initial marker set.
    #[wasm_bindgen(js_name = start)]
    pub fn start_session(&mut self) -> Result<JsValue, JsValue> {
        let cmds = self.session.start();
        to_js(&cmds)
    }

    pub fn on_zoom_changed(&mut self, altitude: f64) -> Result<JsValue, JsValue> {
        self.dispatch(GlobeEvent::ZoomLevelChanged { altitude })
    }

    pub fn on_rotated(&mut self, latitude: f64, longitude: f64) -> Result<JsValue, JsValue> {
        self.dispatch(GlobeEvent::GlobeRotated {
            latitude,
            longitude,
        })
    }

    pub fn on_cluster_clicked(&mut self, entry_id: String) -> Result<JsValue, JsValue> {
        self.dispatch(GlobeEvent::ClusterClicked { entry_id })
    }

    pub fn on_camera_complete(&mut self, generation: u64) -> Result<JsValue, JsValue> {
        self.dispatch(GlobeEvent::CameraTransitionCompleted { generation })
    }

    pub fn back(&mut self) -> Result<JsValue, JsValue> {
        self.dispatch(GlobeEvent::BackRequested)
    }

    pub fn reset(&mut self) -> Result<JsValue, JsValue> {
        self.dispatch(GlobeEvent::ResetRequested)
    }

    /// Any event as JSON (`{"type": "...", ...}`); returns the commands as JSON.
    pub fn dispatch_json(&mut self, event_json: &str) -> Result<String, JsValue> {
        let event: GlobeEvent = serde_json::from_str(event_json).map_err(js_err)?;
        let cmds = self.session.dispatch(event);
        serde_json::to_string(&cmds).map_err(js_err)
    }

    /// Swap the trip shown on the globe; state is reset.
    pub fn replace_locations(&mut self, locations_json: &str) -> Result<JsValue, JsValue> {
        let locations = locations_from_json_str(locations_json).map_err(js_err)?;
        let cmds = self.session.replace_locations(locations);
        to_js(&cmds)
    }

    /// Label placement; `project(lat, lng)` returns `{x, y}` or `null`.
    pub fn layout(&mut self, project: &Function) -> Result<JsValue, JsValue> {
        let frame = self.session.layout(&JsProjector(project));
        to_js(&frame)
    }

    pub fn visible_entries(&self) -> Result<JsValue, JsValue> {
        to_js(self.session.visible_entries())
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        to_js(self.session.state())
    }

    pub fn stats(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.stats())
    }

    /// `"Continent"`, `"Country"` or `"City"`.
    pub fn display_mode(&self) -> String {
        format!("{:?}", self.session.state().display_mode)
    }

    pub fn visible_count(&self) -> usize {
        self.session.visible_entries().len()
    }

    /// Generation the renderer is expected to report, if a move is running.
    pub fn camera_in_flight(&self) -> Option<u64> {
        self.session.camera_in_flight()
    }
}

impl WasmGlobe {
    fn dispatch(&mut self, event: GlobeEvent) -> Result<JsValue, JsValue> {
        let cmds = self.session.dispatch(event);
        to_js(&cmds)
    }
}

/* --------------------------------------------------------------------------
   Lookups
-------------------------------------------------------------------------- */

/// Continent name for an ISO2/ISO3 code (`"Unknown"` when not recognized).
#[wasm_bindgen]
pub fn classify_country(code: &str) -> String {
    continent::classify(code).name().to_string()
}

#[wasm_bindgen]
pub fn country_name(code: &str) -> String {
    continent::country_name(code)
}
