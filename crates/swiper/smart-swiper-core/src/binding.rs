//! Attaching a registered swiper to a UI surface.
//!
//! A [`SwiperBinding`] is the UI-side half: it forwards dispatches to the
//! surface's listener, pushes configuration into the swiper only when it
//! changed, and turns touch sequences into `next()` / `prev()`.

use std::rc::Rc;

use log::warn;

use crate::cache::Transition;
use crate::config::{GestureConfig, DEFAULT_BINDING_DURATION_MS, DEFAULT_STAY_MS};
use crate::error::SwiperError;
use crate::gesture::{Direction, GestureTracker, MotionAxis};
use crate::ids::SwiperId;
use crate::registry::Registry;
use crate::step::{StepOverrides, TimingFunction};
use crate::swiper::{Items, SwiperOptions};

/// Listener receiving every state dispatch of the bound swiper.
pub type UpdateListener = Rc<dyn Fn(&[Transition])>;

/// Surface configuration. `state` and `on_update` are required.
#[derive(Clone)]
pub struct BindingConfig {
    pub state: Option<Items>,
    pub auto: bool,
    pub stay_ms: u32,
    pub duration_ms: u32,
    pub timing_function: TimingFunction,
    pub on_update: Option<UpdateListener>,
    pub motion: MotionAxis,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            state: None,
            auto: true,
            stay_ms: DEFAULT_STAY_MS,
            duration_ms: DEFAULT_BINDING_DURATION_MS,
            timing_function: TimingFunction::Linear,
            on_update: None,
            motion: MotionAxis::None,
        }
    }
}

impl std::fmt::Debug for BindingConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BindingConfig")
            .field("items", &self.state.as_ref().map(|s| s.len()))
            .field("auto", &self.auto)
            .field("stay_ms", &self.stay_ms)
            .field("duration_ms", &self.duration_ms)
            .field("timing_function", &self.timing_function)
            .field("on_update", &self.on_update.is_some())
            .field("motion", &self.motion)
            .finish()
    }
}

impl BindingConfig {
    fn required(&self) -> Result<(Items, UpdateListener), SwiperError> {
        let state = self
            .state
            .clone()
            .ok_or(SwiperError::MissingBinding { field: "state" })?;
        let listener = self
            .on_update
            .clone()
            .ok_or(SwiperError::MissingBinding { field: "on_update" })?;
        Ok((state, listener))
    }
}

/// Configuration last pushed into the swiper.
#[derive(Clone, Debug)]
struct Applied {
    state: Items,
    state_len: usize,
    auto: bool,
    stay_ms: u32,
    duration_ms: u32,
    timing_function: TimingFunction,
}

impl PartialEq for Applied {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
            && self.state_len == other.state_len
            && self.auto == other.auto
            && self.stay_ms == other.stay_ms
            && self.duration_ms == other.duration_ms
            && self.timing_function == other.timing_function
    }
}

#[derive(Debug, Default)]
pub struct SwiperBinding {
    attached: Option<SwiperId>,
    applied: Option<Applied>,
    motion: MotionAxis,
    gesture: GestureTracker,
}

impl SwiperBinding {
    pub fn new(gesture: GestureConfig) -> Self {
        Self {
            gesture: GestureTracker::new(gesture),
            ..Self::default()
        }
    }

    pub fn attached(&self) -> Option<SwiperId> {
        self.attached
    }

    /// Bind to `id` with `config`. Returns true when the binding is live.
    ///
    /// An unknown id detaches the current swiper. Missing `state` or
    /// `on_update` is logged and leaves everything untouched.
    pub fn update(&mut self, registry: &mut Registry, id: SwiperId, config: &BindingConfig) -> bool {
        if registry.lookup(id).is_none() {
            self.detach(registry);
            return false;
        }
        let (state, listener) = match config.required() {
            Ok(parts) => parts,
            Err(err) => {
                warn!("{id} binding skipped: {err}");
                return false;
            }
        };
        if self.attached != Some(id) {
            self.attached = Some(id);
            self.applied = None;
        }
        let Some(swiper) = registry.lookup_mut(id) else {
            return false;
        };
        swiper.on_update(move |s| listener(s));

        let next = Applied {
            state_len: state.len(),
            state,
            auto: config.auto,
            stay_ms: config.stay_ms,
            duration_ms: config.duration_ms,
            timing_function: config.timing_function,
        };
        if self.applied.as_ref() != Some(&next) {
            swiper.set(SwiperOptions {
                state: Some(Rc::clone(&next.state)),
                options: Some(StepOverrides {
                    duration: Some(next.duration_ms),
                    timing_function: Some(next.timing_function),
                    ..StepOverrides::default()
                }),
                auto: Some(next.auto),
                stay: Some(next.stay_ms),
            });
            self.applied = Some(next);
        }
        self.motion = config.motion;
        true
    }

    /// Destroy the attached swiper, hand the surface a style reset and
    /// forget the applied configuration.
    pub fn detach(&mut self, registry: &mut Registry) {
        if let Some(id) = self.attached.take() {
            if let Some(swiper) = registry.lookup_mut(id) {
                swiper.destroy();
                swiper.clear();
            }
        }
        self.applied = None;
        self.gesture.end();
    }

    fn gesture_target(&self) -> Option<SwiperId> {
        match self.motion {
            MotionAxis::None => None,
            _ => self.attached,
        }
    }

    /// Begin a drag: suspends auto-play for its duration.
    pub fn touch_start(&mut self, registry: &mut Registry, x: f32, y: f32) {
        let Some(swiper) = self.gesture_target().and_then(|id| registry.lookup_mut(id)) else {
            return;
        };
        self.gesture.start(x, y);
        swiper.set_auto(false);
    }

    /// Feed a drag position; triggers at most one advance per gesture.
    pub fn touch_move(&mut self, registry: &mut Registry, x: f32, y: f32) -> Option<Direction> {
        let swiper = self
            .gesture_target()
            .and_then(|id| registry.lookup_mut(id))?;
        let direction = self.gesture.movement(self.motion, x, y)?;
        match direction {
            Direction::Next => swiper.next(),
            Direction::Prev => swiper.prev(),
        }
        Some(direction)
    }

    /// Finish a drag and restore the configured auto-play.
    pub fn touch_end(&mut self, registry: &mut Registry) {
        let Some(swiper) = self.gesture_target().and_then(|id| registry.lookup_mut(id)) else {
            return;
        };
        self.gesture.end();
        let auto = self.applied.as_ref().map(|a| a.auto).unwrap_or(false);
        swiper.set_auto(auto);
    }

    pub fn touch_cancel(&mut self, registry: &mut Registry) {
        self.touch_end(registry);
    }
}
