use serde::{Deserialize, Serialize};
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use mascot_core::{
    AnimationState, Companion, CompanionConfig, PointerSample, PointerTracker, Pose, PoseSnapshot,
    Rect, RequestOptions, Rig, SceneSpec, Scheduler, SchedulerConfig, SchedulerEvent, Vec3,
};

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

/// Constructor options. Both sections are optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MascotOptions {
    scheduler: SchedulerConfig,
    companion: CompanionConfig,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Serialize)]
struct MascotFrame {
    state: AnimationState,
    now_ms: f64,
    pose: PoseSnapshot,
    light: Vec3,
    events: Vec<SchedulerEvent>,
}

#[wasm_bindgen]
pub struct MascotScheduler {
    core: Companion<Pose>,
    tracker: PointerTracker,
}

#[wasm_bindgen]
impl MascotScheduler {
    /// Create a mascot runtime. Pass `{ scheduler, companion }` or undefined/null for defaults.
    /// Example:
    ///   new MascotScheduler({ scheduler: { reduced_motion: true } })
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<MascotScheduler, JsError> {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();

        let opts: MascotOptions = if jsvalue_is_undefined_or_null(&options) {
            MascotOptions::default()
        } else {
            swb::from_value(options).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };
        let scheduler = Scheduler::try_new(Pose::default(), opts.scheduler)
            .map_err(|e| JsError::new(&format!("config error: {e}")))?;

        Ok(MascotScheduler {
            core: Companion::with_scheduler(scheduler, opts.companion),
            tracker: PointerTracker::new(),
        })
    }

    /// Request a state by tag (`"wave"`, `"look-at"`, ...). Unknown tags are ignored.
    #[wasm_bindgen(js_name = request_state)]
    pub fn request_state(&mut self, name: String, skip_queue: Option<bool>) {
        let opts = RequestOptions {
            skip_queue: skip_queue.unwrap_or(false),
        };
        self.core.scheduler_mut().request_named(&name, opts);
    }

    #[wasm_bindgen(js_name = current_state)]
    pub fn current_state(&self) -> String {
        self.core.scheduler().current_state().as_str().to_string()
    }

    /// Turn the head toward a world-space point.
    #[wasm_bindgen(js_name = look_at)]
    pub fn look_at(&mut self, x: f32, y: f32, z: f32) {
        self.core.scheduler_mut().look_at([x, y, z]);
    }

    #[wasm_bindgen(js_name = return_to_idle)]
    pub fn return_to_idle(&mut self) {
        self.core.scheduler_mut().return_to_idle();
    }

    /// Feed a pointer position in client pixels along with the canvas rect.
    /// Throttled on wall-clock time; returns true when the sample was taken
    /// immediately.
    #[wasm_bindgen]
    pub fn pointer(
        &mut self,
        client_x: f32,
        client_y: f32,
        left: f32,
        top: f32,
        width: f32,
        height: f32,
    ) -> bool {
        let sample = PointerSample::from_client(client_x, client_y, Rect::new(left, top, width, height));
        self.tracker.offer(sample, js_sys::Date::now()).is_some()
    }

    /// Step the runtime by `dt_ms` milliseconds. Returns the frame JSON:
    /// `{ state, now_ms, pose, light, events }`.
    #[wasm_bindgen]
    pub fn update(&mut self, dt_ms: f64) -> Result<JsValue, JsError> {
        if !(dt_ms.is_finite() && dt_ms >= 0.0) {
            return Err(JsError::new(&format!("update: invalid dt_ms {dt_ms}")));
        }
        self.tracker.poll(js_sys::Date::now());
        let light = self.core.frame(dt_ms, Some(self.tracker.latest()));

        let scheduler = self.core.scheduler_mut();
        let frame = MascotFrame {
            state: scheduler.current_state(),
            now_ms: scheduler.now_ms(),
            pose: scheduler.target().snapshot(),
            light,
            events: scheduler.drain_events(),
        };
        swb::to_value(&frame).map_err(|e| JsError::new(&format!("frame error: {e}")))
    }

    /// Drain pending scheduler events without stepping.
    #[wasm_bindgen]
    pub fn events(&mut self) -> Result<JsValue, JsError> {
        let events = self.core.scheduler_mut().drain_events();
        swb::to_value(&events).map_err(|e| JsError::new(&format!("events error: {e}")))
    }

    /// Current pose without stepping.
    #[wasm_bindgen]
    pub fn pose(&self) -> Result<JsValue, JsError> {
        swb::to_value(&self.core.scheduler().target().snapshot())
            .map_err(|e| JsError::new(&format!("pose error: {e}")))
    }

    /// Robot rig description for building meshes.
    #[wasm_bindgen]
    pub fn rig(&self) -> Result<JsValue, JsError> {
        swb::to_value(&Rig::robot()).map_err(|e| JsError::new(&format!("rig error: {e}")))
    }

    /// Camera, lights and ground for the stage.
    #[wasm_bindgen]
    pub fn scene(&self) -> Result<JsValue, JsError> {
        swb::to_value(&SceneSpec::default())
            .map_err(|e| JsError::new(&format!("scene error: {e}")))
    }

    #[wasm_bindgen]
    pub fn dispose(&mut self) {
        self.core.dispose();
    }

    #[wasm_bindgen(js_name = is_disposed)]
    pub fn is_disposed(&self) -> bool {
        self.core.scheduler().is_disposed()
    }
}

/// Validate a scheduler config without constructing anything. Returns the
/// normalized config.
#[wasm_bindgen(js_name = normalize_config)]
pub fn normalize_config(config: JsValue) -> Result<JsValue, JsError> {
    let cfg: SchedulerConfig = if jsvalue_is_undefined_or_null(&config) {
        SchedulerConfig::default()
    } else {
        swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
    };
    cfg.validate()
        .map_err(|e| JsError::new(&format!("config error: {e}")))?;
    swb::to_value(&cfg).map_err(|e| JsError::new(&format!("config error: {e}")))
}

#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
