//! Browser host adapter
//!
//! Registers keyboard, pointer, blur and resize listeners and feeds them into
//! an `InputLatch`. The page's render loop calls `frame` once per animation
//! frame and draws from the accessors. Every listener is removed when the
//! session is freed.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, KeyboardEvent, MouseEvent, Window};

use super::{InputLatch, KeyCode};
use crate::session::Session;
use crate::settings::Settings;
use crate::sim::{InputMode, RoundState, Viewport};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
}

/// A DOM listener that unregisters itself on drop
struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach<F>(target: &EventTarget, kind: &'static str, handler: F) -> Result<Self, JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

fn window_size(window: &Window) -> (f32, f32) {
    let read = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;
    (read(window.inner_width()), read(window.inner_height()))
}

#[wasm_bindgen]
pub struct WebSession {
    session: Session,
    latch: Rc<RefCell<InputLatch>>,
    pending_resize: Rc<Cell<Option<(f32, f32)>>>,
    events_json: String,
    _listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl WebSession {
    /// Create a session bound to the element with id `canvas_id`.
    ///
    /// Returning the instance is the ready signal.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, settings_json: Option<String>) -> Result<WebSession, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let settings = settings_json
            .as_deref()
            .map(Settings::load_or_default)
            .unwrap_or_default();
        let (width, height) = window_size(&window);
        let user_agent = window.navigator().user_agent().unwrap_or_default();
        let detected = InputMode::detect(&user_agent, width);
        let settings = Settings {
            seed: settings.seed.or(Some(js_sys::Date::now() as u64)),
            ..settings
        };

        let session = Session::new(&settings, Viewport::new(width, height), detected, |s| {
            log::info!("Web session ready ({:?})", s.state().mode);
        });

        let latch = Rc::new(RefCell::new(InputLatch::new()));
        let pending_resize = Rc::new(Cell::new(None));
        let window_target: EventTarget = window.clone().into();
        let pointer_target: EventTarget = match document.get_element_by_id(canvas_id) {
            Some(canvas) => canvas.into(),
            None => {
                log::warn!("No element #{}, listening on window", canvas_id);
                window_target.clone()
            }
        };

        let mut listeners = Vec::with_capacity(6);

        let l = latch.clone();
        listeners.push(Listener::attach(&window_target, "keydown", move |event| {
            if let Some(ev) = event.dyn_ref::<KeyboardEvent>() {
                if let Some(key) = KeyCode::from_key(&ev.key()) {
                    if matches!(key, KeyCode::Space | KeyCode::ArrowUp | KeyCode::ArrowDown) {
                        event.prevent_default();
                    }
                    l.borrow_mut().key_down(key);
                }
            }
        })?);

        let l = latch.clone();
        listeners.push(Listener::attach(&window_target, "keyup", move |event| {
            if let Some(ev) = event.dyn_ref::<KeyboardEvent>() {
                if let Some(key) = KeyCode::from_key(&ev.key()) {
                    l.borrow_mut().key_up(key);
                }
            }
        })?);

        let l = latch.clone();
        listeners.push(Listener::attach(&window_target, "blur", move |_| {
            l.borrow_mut().release_all();
        })?);

        let l = latch.clone();
        listeners.push(Listener::attach(&pointer_target, "pointerdown", move |event| {
            if let Some(ev) = event.dyn_ref::<MouseEvent>() {
                l.borrow_mut()
                    .pointer_down(ev.offset_x() as f32, ev.offset_y() as f32);
            }
        })?);

        let l = latch.clone();
        listeners.push(Listener::attach(&pointer_target, "pointermove", move |event| {
            if let Some(ev) = event.dyn_ref::<MouseEvent>() {
                l.borrow_mut()
                    .pointer_move(ev.offset_x() as f32, ev.offset_y() as f32);
            }
        })?);

        let pending = pending_resize.clone();
        let resize_window = window.clone();
        listeners.push(Listener::attach(&window_target, "resize", move |_| {
            pending.set(Some(window_size(&resize_window)));
        })?);

        Ok(WebSession {
            session,
            latch,
            pending_resize,
            events_json: String::from("[]"),
            _listeners: listeners,
        })
    }

    /// Apply any pending resize, then run one tick of `dt_ms` milliseconds
    pub fn frame(&mut self, dt_ms: f32) {
        let mut events = Vec::new();
        if let Some((w, h)) = self.pending_resize.take() {
            events.extend_from_slice(self.session.resize(w, h));
        }
        let input = self.latch.borrow_mut().take();
        events.extend_from_slice(self.session.frame(dt_ms, &input));
        self.events_json = serde_json::to_string(&events).unwrap_or_else(|_| "[]".into());
    }

    /// Events from the last `frame` as a JSON array
    pub fn events_json(&self) -> String {
        self.events_json.clone()
    }

    /// HUD text layout as JSON
    pub fn hud_json(&self) -> String {
        serde_json::to_string(&self.session.hud()).unwrap_or_else(|_| "{}".into())
    }

    pub fn is_mobile(&self) -> bool {
        self.session.state().mode.is_mobile()
    }

    pub fn is_waiting(&self) -> bool {
        self.session.state().round == RoundState::Waiting
    }

    pub fn ball_x(&self) -> f32 {
        self.session.state().ball.pos.x
    }

    pub fn ball_y(&self) -> f32 {
        self.session.state().ball.pos.y
    }

    pub fn ball_radius(&self) -> f32 {
        self.session.state().ball.radius
    }

    pub fn player_x(&self) -> f32 {
        self.session.state().player.x
    }

    pub fn player_y(&self) -> f32 {
        self.session.state().player.y
    }

    pub fn opponent_x(&self) -> f32 {
        self.session.state().opponent.x
    }

    pub fn opponent_y(&self) -> f32 {
        self.session.state().opponent.y
    }

    pub fn paddle_width(&self) -> f32 {
        self.session.state().layout.paddle_width
    }

    pub fn paddle_height(&self) -> f32 {
        self.session.state().layout.paddle_height
    }

    pub fn player_score(&self) -> u32 {
        self.session.state().score.player
    }

    pub fn opponent_score(&self) -> u32 {
        self.session.state().score.opponent
    }

    /// Start a new match; scores never reset on their own
    pub fn reset_scores(&mut self) {
        self.session.reset_scores();
    }

    pub fn get_ball_speed(&self) -> f32 {
        self.session.ball_speed()
    }

    pub fn set_ball_speed(&mut self, speed: f32) {
        self.session.set_ball_speed(speed);
    }

    pub fn increase_ball_speed(&mut self, amount: Option<f32>) {
        self.session.increase_ball_speed(amount);
    }

    pub fn decrease_ball_speed(&mut self, amount: Option<f32>) {
        self.session.decrease_ball_speed(amount);
    }

    pub fn get_ai_difficulty(&self) -> f32 {
        self.session.ai_difficulty()
    }

    pub fn set_ai_difficulty(&mut self, difficulty: f32) {
        self.session.set_ai_difficulty(difficulty);
    }

    pub fn increase_ai_difficulty(&mut self, amount: Option<f32>) {
        self.session.increase_ai_difficulty(amount);
    }

    pub fn decrease_ai_difficulty(&mut self, amount: Option<f32>) {
        self.session.decrease_ai_difficulty(amount);
    }

    pub fn get_touch_sensitivity(&self) -> f32 {
        self.session.touch_sensitivity()
    }

    pub fn set_touch_sensitivity(&mut self, sensitivity: f32) {
        self.session.set_touch_sensitivity(sensitivity);
    }

    pub fn increase_touch_sensitivity(&mut self, amount: Option<f32>) {
        self.session.increase_touch_sensitivity(amount);
    }

    pub fn decrease_touch_sensitivity(&mut self, amount: Option<f32>) {
        self.session.decrease_touch_sensitivity(amount);
    }
}
