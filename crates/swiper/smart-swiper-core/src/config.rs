//! Configuration for registries, UI bindings and gesture translation.

use serde::{Deserialize, Serialize};

/// Auto-advance period used by UI bindings when none is configured.
pub const DEFAULT_STAY_MS: u32 = 2000;
/// Transition duration used by UI bindings when none is configured.
pub const DEFAULT_BINDING_DURATION_MS: u32 = 600;

/// Registry-wide settings applied to every swiper it creates.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Initial auto-play flag of a new swiper's controller.
    pub auto: bool,
    /// Initial auto-advance period (ms) of a new swiper's controller.
    pub stay_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auto: false,
            stay_ms: DEFAULT_STAY_MS,
        }
    }
}

/// Drag-gesture translation settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// How far (px) the main-axis offset must exceed the cross-axis offset
    /// before a move counts as a swipe. Zero means any dominant move.
    pub threshold: f32,
}
