//! Smart Swiper Core (renderer-agnostic)
//!
//! Carousel transition sequencing: a swiper shows `M` of `N` items on a
//! runway of slots, and every `next()` / `prev()` rotates the item order and
//! produces one step sequence per moved item for a renderer to apply.
//! Transitions are memoized per `(from, to)` port pair, auto-play is a
//! host-driven timer with at most one pending advance, and a [`Registry`]
//! owns the swipers created from declarative definitions.

pub mod binding;
pub mod cache;
pub mod config;
pub mod controller;
pub mod definition;
pub mod error;
pub mod gesture;
pub mod ids;
pub mod port;
pub mod registry;
pub mod step;
pub mod swiper;

// Re-exports for hosts and UI adapters
pub use binding::{BindingConfig, SwiperBinding, UpdateListener};
pub use cache::{Transition, TransitionCache};
pub use config::{Config, GestureConfig};
pub use controller::{Controller, Schedule, TimerHandle};
pub use definition::{Runway, StepSequence, SwiperDefinition};
pub use error::SwiperError;
pub use gesture::{Direction, GestureTracker, MotionAxis};
pub use ids::SwiperId;
pub use port::{Port, TransitionKey};
pub use registry::Registry;
pub use step::{
    Api, Op, Step, StepArg, StepBuilder, StepBuilderFactory, StepOptions, StepOverrides,
    TimingFunction,
};
pub use swiper::{Items, Phase, Swiper, SwiperOptions, UpdateHandler};
