//! Swiper: item permutation, transition computation and dispatch.
//!
//! Items are addressed by their index in the bound item list. `proxy` is the
//! current order of those indices: `proxy[0..count]` occupy the visible
//! slots, the rest rest at `sleep`. Advancing rotates `proxy` and recomputes
//! the transitions of the items whose position changed.

use std::fmt;
use std::rc::Rc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::cache::{Transition, TransitionCache};
use crate::config::Config;
use crate::controller::{Controller, Schedule, TimerHandle};
use crate::definition::{Runway, StepSequence};
use crate::ids::SwiperId;
use crate::port::{Port, TransitionKey};
use crate::step::{Step, StepBuilder, StepOptions, StepOverrides};

/// Bound item list. Only its identity and length matter to the engine.
pub type Items = Rc<[serde_json::Value]>;

/// Receives the full per-item state after every recompute.
pub type UpdateHandler = Box<dyn FnMut(&[Transition])>;

/// Lifecycle phase of a swiper.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Uninitialized,
    Active,
    Paused,
}

/// Arguments of [`Swiper::set`]; absent fields are left alone.
#[derive(Clone, Debug, Default)]
pub struct SwiperOptions {
    pub state: Option<Items>,
    pub options: Option<StepOverrides>,
    pub auto: Option<bool>,
    pub stay: Option<u32>,
}

#[derive(Copy, Clone, Debug)]
enum Advance {
    Initial,
    Next,
    Prev,
}

pub struct Swiper {
    id: SwiperId,
    runway: Runway,
    items: Items,
    state: Vec<Transition>,
    state_count: usize,
    proxy: Vec<usize>,
    count: usize,
    initialized: bool,
    computed: TransitionCache,
    controller: Controller,
    handler: Option<UpdateHandler>,
}

impl fmt::Debug for Swiper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Swiper")
            .field("id", &self.id)
            .field("runway_len", &self.runway.len())
            .field("state_count", &self.state_count)
            .field("count", &self.count)
            .field("proxy", &self.proxy)
            .field("cached", &self.computed.len())
            .field("controller", &self.controller)
            .finish_non_exhaustive()
    }
}

/// Half-built transition returned by [`Swiper::from`].
pub struct TransitionFrom<'a> {
    swiper: &'a mut Swiper,
    start: Port,
}

impl TransitionFrom<'_> {
    pub fn to(self, end: Port) -> Transition {
        self.swiper.transition(Some(self.start), end)
    }
}

/// Replay `steps` into `builder`, resolving each step's options with
/// `extra` applied last.
fn replay(builder: &mut StepBuilder, steps: &[Step], extra: &StepOverrides) {
    for step in steps {
        for op in &step.ops {
            builder.push(op.api, op.args.iter().cloned());
        }
        builder.step(step.resolve_with(extra).into());
    }
}

impl Swiper {
    pub fn new(id: SwiperId, runway: Runway, cfg: &Config) -> Self {
        Self {
            id,
            runway,
            items: Rc::from(Vec::new()),
            state: Vec::new(),
            state_count: 0,
            proxy: Vec::new(),
            count: 0,
            initialized: false,
            computed: TransitionCache::new(),
            controller: Controller::new(cfg.auto, cfg.stay_ms),
            handler: None,
        }
    }

    pub fn id(&self) -> SwiperId {
        self.id
    }

    pub fn runway_len(&self) -> usize {
        self.runway.len()
    }

    /// `[startPort] + runway + [endPort]`.
    pub fn chain(&self) -> impl Iterator<Item = &StepSequence> {
        self.runway.chain()
    }

    pub fn items(&self) -> &Items {
        &self.items
    }

    /// Current per-item transitions, indexed by item.
    pub fn state(&self) -> &[Transition] {
        &self.state
    }

    pub fn state_count(&self) -> usize {
        self.state_count
    }

    /// Item indices in runway order.
    pub fn proxy(&self) -> &[usize] {
        &self.proxy
    }

    /// Visible slot count: `min(runway length, item count)`.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_paused(&self) -> bool {
        self.controller.is_paused()
    }

    pub fn phase(&self) -> Phase {
        if !self.initialized {
            Phase::Uninitialized
        } else if self.controller.is_paused() {
            Phase::Paused
        } else {
            Phase::Active
        }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn cache(&self) -> &TransitionCache {
        &self.computed
    }

    /// Subscribe to state dispatches, replacing any previous handler.
    pub fn on_update<F>(&mut self, handler: F)
    where
        F: FnMut(&[Transition]) + 'static,
    {
        self.handler = Some(Box::new(handler));
    }

    fn dispatch(&mut self) {
        if let Some(handler) = self.handler.as_mut() {
            handler(&self.state);
        }
    }

    /// Transition moving an item from `from` (applied instantly) to `to`.
    /// Leaving through an access port parks the item at `sleep` afterwards;
    /// `Stick` holds the item at `from` without further motion.
    pub fn transition(&mut self, from: Option<Port>, to: Port) -> Transition {
        let key = TransitionKey::new(from, to);
        if let Some(hit) = self.computed.get(&key) {
            return hit;
        }

        let mut builder = StepBuilder::new(StepOptions::default());
        if let Some(from) = from {
            replay(&mut builder, self.runway.steps(from), &StepOverrides::instant());
        }
        if to != Port::Stick {
            replay(&mut builder, self.runway.steps(to), &StepOverrides::default());
        }
        if to.is_access() {
            replay(&mut builder, self.runway.steps(Port::Sleep), &StepOverrides::default());
        }

        let transition: Transition = builder.export().into();
        self.computed.insert(key, Rc::clone(&transition));
        transition
    }

    /// Transition into `end` from wherever the item currently is.
    pub fn to(&mut self, end: Port) -> Transition {
        self.transition(None, end)
    }

    pub fn from(&mut self, start: Port) -> TransitionFrom<'_> {
        TransitionFrom {
            swiper: self,
            start,
        }
    }

    /// Zero-motion hold at `position`.
    pub fn stick(&mut self, position: Port) -> Transition {
        self.from(position).to(Port::Stick)
    }

    /// Build the initial order, unpause and dispatch the initial holds.
    pub fn init(&mut self) {
        let n = self.items.len();
        let mut proxy: Vec<usize> = (0..n).collect();
        if n > 0 {
            proxy.rotate_left(self.runway.begin_from() % n);
        }
        self.proxy = proxy;
        self.state_count = n;
        self.count = self.runway.len().min(n);
        self.state = vec![Rc::from(Vec::new()); n];
        self.initialized = true;

        // Unpausing schedules on its own; an already running swiper restarts.
        if self.controller.is_paused() {
            self.controller.set_pause(false);
        } else if self.controller.is_auto() {
            self.controller.play();
        }
        debug!("{} init: {} items, {} visible", self.id, n, self.count);
        self.recompute(Advance::Initial);
    }

    /// Park every item at `sleep`, drop cached transitions and stop.
    pub fn destroy(&mut self) {
        let parked = self.stick(Port::Sleep);
        self.state.fill(parked);
        self.computed.clear();
        self.controller.set_pause(true);
        self.controller.cancel();
        self.state_count = 0;
        self.initialized = false;
    }

    /// Hand every item a transition that resets all animated properties
    /// at once, and dispatch it. Lets a surface drop its inline styles
    /// after `destroy()`.
    pub fn clear(&mut self) {
        let mut builder = StepBuilder::new(StepOptions::default());
        let cleared: Transition = builder.cancel().export().into();
        self.state.fill(cleared);
        self.dispatch();
    }

    pub fn reset(&mut self) {
        self.destroy();
        self.init();
    }

    /// Move every item one slot towards the head. Ignored unless active.
    pub fn next(&mut self) {
        self.advance(Advance::Next);
    }

    /// Move every item one slot towards the tail. Ignored unless active.
    pub fn prev(&mut self) {
        self.advance(Advance::Prev);
    }

    /// Rotate and recompute. Returns false when the swiper is not active or
    /// shows nothing.
    fn advance(&mut self, advance: Advance) -> bool {
        if self.phase() != Phase::Active || self.count == 0 {
            return false;
        }
        match advance {
            Advance::Next => self.proxy.rotate_left(1),
            Advance::Prev => self.proxy.rotate_right(1),
            Advance::Initial => {}
        }
        self.recompute(advance);
        true
    }

    fn recompute(&mut self, advance: Advance) {
        let count = self.count;
        match advance {
            Advance::Next if count > 0 => {
                let last = count - 1;
                for slot in 0..last {
                    let item = self.proxy[slot];
                    self.state[item] = self.to(Port::Slot(slot));
                }
                // Exit before entry: when both land on the same item, entry wins.
                let head = self.proxy[self.state_count - 1];
                self.state[head] = self.to(Port::StartPort);
                let tail = self.proxy[last];
                self.state[tail] = self.from(Port::EndPort).to(Port::Slot(last));
            }
            Advance::Prev if count > 0 => {
                let last = count - 1;
                for slot in 1..=last {
                    let item = self.proxy[slot];
                    self.state[item] = self.to(Port::Slot(slot));
                }
                let head = self.proxy[0];
                self.state[head] = self.from(Port::StartPort).to(Port::Slot(0));
                // With no sleepers the item leaving the tail is the head.
                if let Some(&tail) = self.proxy.get(count) {
                    self.state[tail] = self.to(Port::EndPort);
                }
            }
            Advance::Next | Advance::Prev => {}
            Advance::Initial => {
                for pos in 0..self.state_count {
                    let item = self.proxy[pos];
                    self.state[item] = if pos < count {
                        self.stick(Port::Slot(pos))
                    } else {
                        self.stick(Port::Sleep)
                    };
                }
            }
        }
        self.dispatch();
    }

    /// Rebind items, retime steps and reconfigure auto-play.
    ///
    /// A new item list (different allocation, or a length that no longer
    /// matches the live state) resets the swiper. New step options clear the
    /// transition cache only when they change at least one step.
    pub fn set(&mut self, options: SwiperOptions) -> &mut Self {
        if let Some(items) = options.state {
            if !Rc::ptr_eq(&items, &self.items) || items.len() != self.state_count {
                self.items = items;
                self.reset();
            }
        }
        if let Some(overrides) = options.options {
            if self.runway.apply_defaults(&overrides) {
                debug!("{} transition cache invalidated", self.id);
                self.computed.clear();
            }
        }
        if let Some(auto) = options.auto {
            self.controller.set_auto(auto);
        }
        if let Some(stay) = options.stay {
            self.controller.set_stay(stay);
        }
        self
    }

    pub fn set_auto(&mut self, auto: bool) -> Schedule {
        self.controller.set_auto(auto)
    }

    /// Pause or resume auto-play. An uninitialized swiper stays paused
    /// until `init()`.
    pub fn set_pause(&mut self, paused: bool) -> Schedule {
        if !self.initialized {
            return self.controller.schedule();
        }
        self.controller.set_pause(paused)
    }

    pub fn set_stay(&mut self, stay_ms: u32) -> Schedule {
        self.controller.set_stay(stay_ms)
    }

    /// Fire the auto-advance identified by `handle`, for hosts that run
    /// their own timers. Returns true when the items actually moved; stale
    /// handles are ignored.
    pub fn fire(&mut self, handle: TimerHandle) -> bool {
        if !self.controller.take(handle) {
            debug!("{} ignoring stale timer {:?}", self.id, handle);
            return false;
        }
        self.auto_advance()
    }

    /// Let `dt_ms` pass on the pending auto-advance, firing it each time it
    /// falls due. Returns the number of advances that moved the items. A
    /// zero period fires at most once per call.
    pub fn update(&mut self, dt_ms: u32) -> usize {
        let mut fired = 0;
        let mut budget = dt_ms;
        while let Some((handle, carry)) = self.controller.take_due(budget) {
            if self.auto_advance() {
                fired += 1;
            }
            if handle.delay_ms() == 0 {
                break;
            }
            budget = carry;
        }
        fired
    }

    fn auto_advance(&mut self) -> bool {
        let moved = self.advance(Advance::Next);
        if self.initialized && self.controller.keeps_running() {
            self.controller.play();
        }
        moved
    }
}
