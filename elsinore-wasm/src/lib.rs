//! WASM bindings for elsinore — powers the browser rendition of the duel.
//!
//! The page is a thin driver: it forwards clicks, animation callbacks and
//! elapsed timers as JSON inputs, and applies the JSON outputs each call
//! returns. All game logic stays on the Rust side.

use wasm_bindgen::prelude::*;

use elsinore::core::config::DuelConfig;
use elsinore::core::engine::DuelEngine;
use elsinore::schema::event::Input;

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Serialize)]
struct SessionInfo {
    seed: u64,
    phase: &'static str,
    turn_count: u32,
    input_locked: bool,
}

// ---------------------------------------------------------------------------
// DuelSession — the main exported struct
// ---------------------------------------------------------------------------
#[wasm_bindgen]
pub struct DuelSession {
    engine: DuelEngine,
    config: DuelConfig,
}

#[wasm_bindgen]
impl DuelSession {
    /// Create a new session with the staged scene numbers.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> Result<DuelSession, JsError> {
        Self::build(seed, DuelConfig::default())
    }

    /// Create a session with RON tuning overrides, e.g. `(turn_limit: 40)`.
    pub fn with_config(seed: u64, config_ron: &str) -> Result<DuelSession, JsError> {
        let config = DuelConfig::parse_ron(config_ron)
            .map_err(|e| JsError::new(&format!("Config parse error: {e}")))?;
        Self::build(seed, config)
    }

    /// Apply one input and return the outputs it produced.
    ///
    /// Expected JSON shapes:
    /// ```json
    /// {"kind": "start"}
    /// {"kind": "action", "action": "attack"}
    /// {"kind": "continue"}
    /// {"kind": "choose", "index": 0}
    /// {"kind": "animation_done", "signal": 3}
    /// {"kind": "timer_fired", "timer": 1}
    /// ```
    ///
    /// Returns a JSON array of outputs, each tagged with `"kind"`.
    pub fn dispatch(&mut self, input_json: &str) -> Result<String, JsError> {
        let input: Input = serde_json::from_str(input_json)
            .map_err(|e| JsError::new(&format!("Invalid input JSON: {e}")))?;
        let outputs = self.engine.handle(input);
        serde_json::to_string(&outputs)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Return a JSON snapshot of the scene, for drivers that render from
    /// state rather than from the output stream.
    pub fn snapshot(&self) -> Result<String, JsError> {
        serde_json::to_string(&self.engine.snapshot())
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Return a JSON summary of the session itself.
    pub fn info(&self) -> Result<String, JsError> {
        let info = SessionInfo {
            seed: self.engine.seed(),
            phase: self.engine.phase().tag(),
            turn_count: self.engine.turn_count(),
            input_locked: self.engine.is_input_locked(),
        };
        serde_json::to_string(&info)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Return JSON array of input kinds the engine accepts.
    pub fn input_kinds() -> String {
        serde_json::to_string(&[
            "start",
            "action",
            "continue",
            "choose",
            "animation_done",
            "timer_fired",
        ])
        .unwrap_or_else(|_| "[]".to_string())
    }

    /// Return JSON array of combat action names.
    pub fn actions() -> String {
        serde_json::to_string(&["attack", "defend", "speak", "decisive_strike"])
            .unwrap_or_else(|_| "[]".to_string())
    }

    /// Rebuild the engine with a new seed, keeping the tuning.
    ///
    /// This is a hard driver-level reset; the in-scene "Play Again" choice
    /// restarts without touching the seed and keeps completion tokens dead.
    pub fn reset(&mut self, seed: u64) -> Result<(), JsError> {
        let fresh = Self::build(seed, self.config.clone())?;
        self.engine = fresh.engine;
        Ok(())
    }
}

// Private helpers
impl DuelSession {
    fn build(seed: u64, config: DuelConfig) -> Result<DuelSession, JsError> {
        let engine = DuelEngine::builder()
            .seed(seed)
            .config(config.clone())
            .build()
            .map_err(|e| JsError::new(&format!("Engine build error: {e}")))?;
        Ok(DuelSession { engine, config })
    }
}
