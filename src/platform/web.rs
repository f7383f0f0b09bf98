//! Browser glue: `setInterval` tick sources and the JS-facing game wrapper
//!
//! The page owns all rendering. It constructs a `WebGame` with a callback
//! that receives `{"snapshot": ..., "events": [...]}` JSON whenever the round
//! changes, and forwards input and button presses to it.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::scheduler::{TickHandle, TickSchedule, TickScheduler};
use super::time::SystemClock;
use crate::settings::Settings;
use crate::sim::GameEngine;

type WebEngine = GameEngine<IntervalScheduler, SystemClock>;

struct Shared {
    engine: WebEngine,
    on_change: js_sys::Function,
}

/// Tick source backed by `window.setInterval`
pub struct IntervalScheduler {
    game: Weak<RefCell<Shared>>,
    next_id: u64,
    running: Vec<(TickHandle, i32)>,
}

impl IntervalScheduler {
    fn new() -> Self {
        Self {
            game: Weak::new(),
            next_id: 0,
            running: Vec::new(),
        }
    }
}

impl TickScheduler for IntervalScheduler {
    fn start(&mut self, schedule: TickSchedule) -> TickHandle {
        self.next_id += 1;
        let handle = TickHandle(self.next_id);

        let game = self.game.clone();
        // Ownership passes to JS; the function is collected after clearInterval
        let callback: js_sys::Function = Closure::<dyn FnMut()>::new(move || {
            if let Some(game) = game.upgrade() {
                pump(&game, |engine| engine.on_tick());
            }
        })
        .into_js_value()
        .unchecked_into();

        let Some(window) = web_sys::window() else {
            log::error!("No window; tick source {} not started", handle.0);
            return handle;
        };
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            &callback,
            schedule.period_ms as i32,
        ) {
            Ok(id) => self.running.push((handle, id)),
            Err(e) => log::error!("setInterval failed: {:?}", e),
        }
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        let Some(window) = web_sys::window() else {
            return;
        };
        self.running.retain(|&(h, id)| {
            if h == handle {
                window.clear_interval_with_handle(id);
                false
            } else {
                true
            }
        });
    }
}

/// Run an engine command, then push the new state to the page.
/// The borrow is released before calling into JS so the page may re-enter.
fn pump<R>(game: &Rc<RefCell<Shared>>, command: impl FnOnce(&mut WebEngine) -> R) -> R {
    let (result, payload, on_change) = {
        let mut shared = game.borrow_mut();
        let result = command(&mut shared.engine);
        let events = shared.engine.drain_events();
        let payload = if events.is_empty() {
            None
        } else {
            let json = serde_json::json!({
                "snapshot": shared.engine.snapshot(),
                "events": events,
            });
            Some(json.to_string())
        };
        (result, payload, shared.on_change.clone())
    };
    if let Some(payload) = payload {
        if let Err(e) = on_change.call1(&JsValue::NULL, &JsValue::from_str(&payload)) {
            log::warn!("State callback threw: {:?}", e);
        }
    }
    result
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Game handle exported to the page
#[wasm_bindgen]
pub struct WebGame {
    shared: Rc<RefCell<Shared>>,
}

#[wasm_bindgen]
impl WebGame {
    /// `settings_json` may be empty for defaults
    #[wasm_bindgen(constructor)]
    pub fn new(settings_json: &str, on_change: js_sys::Function) -> Result<WebGame, JsValue> {
        let settings = if settings_json.trim().is_empty() {
            Settings::default()
        } else {
            Settings::from_json(settings_json).map_err(to_js)?
        };
        let engine = GameEngine::with_defaults(settings, IntervalScheduler::new(), SystemClock)
            .map_err(to_js)?;
        let shared = Rc::new(RefCell::new(Shared { engine, on_change }));
        shared.borrow_mut().engine.scheduler_mut().game = Rc::downgrade(&shared);
        Ok(WebGame { shared })
    }

    pub fn start(&self, difficulty: &str) -> Result<(), JsValue> {
        pump(&self.shared, |engine| engine.start(difficulty)).map_err(to_js)
    }

    /// Confirm key pressed. Returns true when the input field should be cleared.
    pub fn submit(&self, text: &str) -> bool {
        pump(&self.shared, |engine| engine.submit_input(text)).clears_input()
    }

    /// Input field changed. Returns true when the input field should be cleared.
    pub fn input_changed(&self, text: &str) -> bool {
        pump(&self.shared, |engine| engine.input_changed(text)).clears_input()
    }

    pub fn request_hint(&self) -> Option<String> {
        pump(&self.shared, |engine| engine.request_hint())
    }

    pub fn return_to_menu(&self) {
        pump(&self.shared, |engine| engine.return_to_menu());
    }

    /// Current snapshot as JSON
    pub fn snapshot(&self) -> String {
        let snapshot = self.shared.borrow().engine.snapshot();
        serde_json::to_string(&snapshot).unwrap_or_default()
    }
}

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Word Dash starting...");
}
