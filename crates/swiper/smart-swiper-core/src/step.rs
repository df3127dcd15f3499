//! Animation step recorder.
//!
//! A [`StepBuilder`] records property mutations (`translateX`, `opacity`, ...)
//! into a pending batch. [`StepBuilder::step`] closes the batch into a [`Step`]
//! together with its timing options, and [`StepBuilder::export`] drains every
//! recorded step. Nothing is interpreted here; renderers apply the ops.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Property mutations a step can carry.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Api {
    Matrix,
    Matrix3d,
    Rotate,
    Rotate3d,
    RotateX,
    RotateY,
    RotateZ,
    Scale,
    Scale3d,
    ScaleX,
    ScaleY,
    ScaleZ,
    Skew,
    SkewX,
    SkewY,
    Translate,
    Translate3d,
    TranslateX,
    TranslateY,
    TranslateZ,
    Opacity,
    BackgroundColor,
    Width,
    Height,
    Left,
    Right,
    Top,
    Bottom,
}

impl Api {
    pub const ALL: [Api; 28] = [
        Api::Matrix,
        Api::Matrix3d,
        Api::Rotate,
        Api::Rotate3d,
        Api::RotateX,
        Api::RotateY,
        Api::RotateZ,
        Api::Scale,
        Api::Scale3d,
        Api::ScaleX,
        Api::ScaleY,
        Api::ScaleZ,
        Api::Skew,
        Api::SkewX,
        Api::SkewY,
        Api::Translate,
        Api::Translate3d,
        Api::TranslateX,
        Api::TranslateY,
        Api::TranslateZ,
        Api::Opacity,
        Api::BackgroundColor,
        Api::Width,
        Api::Height,
        Api::Left,
        Api::Right,
        Api::Top,
        Api::Bottom,
    ];

    /// Name used by renderers (`translateX`, `backgroundColor`, ...).
    pub fn name(&self) -> &'static str {
        match self {
            Self::Matrix => "matrix",
            Self::Matrix3d => "matrix3d",
            Self::Rotate => "rotate",
            Self::Rotate3d => "rotate3d",
            Self::RotateX => "rotateX",
            Self::RotateY => "rotateY",
            Self::RotateZ => "rotateZ",
            Self::Scale => "scale",
            Self::Scale3d => "scale3d",
            Self::ScaleX => "scaleX",
            Self::ScaleY => "scaleY",
            Self::ScaleZ => "scaleZ",
            Self::Skew => "skew",
            Self::SkewX => "skewX",
            Self::SkewY => "skewY",
            Self::Translate => "translate",
            Self::Translate3d => "translate3d",
            Self::TranslateX => "translateX",
            Self::TranslateY => "translateY",
            Self::TranslateZ => "translateZ",
            Self::Opacity => "opacity",
            Self::BackgroundColor => "backgroundColor",
            Self::Width => "width",
            Self::Height => "height",
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }
}

impl fmt::Display for Api {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One argument of a recorded op: a number, a CSS-ish string, or null.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StepArg {
    Null,
    Number(f64),
    Text(String),
}

impl From<f64> for StepArg {
    fn from(v: f64) -> Self {
        StepArg::Number(v)
    }
}

impl From<f32> for StepArg {
    fn from(v: f32) -> Self {
        StepArg::Number(v as f64)
    }
}

impl From<i32> for StepArg {
    fn from(v: i32) -> Self {
        StepArg::Number(v as f64)
    }
}

impl From<&str> for StepArg {
    fn from(v: &str) -> Self {
        StepArg::Text(v.to_string())
    }
}

impl From<String> for StepArg {
    fn from(v: String) -> Self {
        StepArg::Text(v)
    }
}

/// A single recorded `(api, args)` call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Op {
    pub api: Api,
    #[serde(default)]
    pub args: Vec<StepArg>,
}

/// Easing curve of a step.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimingFunction {
    #[default]
    Linear,
    Ease,
    EaseIn,
    EaseOut,
    EaseInOut,
    StepStart,
    StepEnd,
}

impl TimingFunction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Ease => "ease",
            Self::EaseIn => "ease-in",
            Self::EaseOut => "ease-out",
            Self::EaseInOut => "ease-in-out",
            Self::StepStart => "step-start",
            Self::StepEnd => "step-end",
        }
    }
}

/// Fully resolved timing options of a step.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StepOptions {
    /// Milliseconds.
    pub duration: u32,
    /// Milliseconds.
    pub delay: u32,
    pub timing_function: TimingFunction,
    pub transform_origin: String,
}

impl Default for StepOptions {
    fn default() -> Self {
        Self {
            duration: 400,
            delay: 0,
            timing_function: TimingFunction::Linear,
            transform_origin: "50% 50% 0".to_string(),
        }
    }
}

impl StepOptions {
    /// Copy of `self` with every field present in `overrides` replaced.
    pub fn merged(&self, overrides: &StepOverrides) -> StepOptions {
        let mut out = self.clone();
        out.apply(overrides);
        out
    }

    /// Overwrite the fields present in `overrides`.
    pub fn apply(&mut self, overrides: &StepOverrides) {
        if let Some(duration) = overrides.duration {
            self.duration = duration;
        }
        if let Some(delay) = overrides.delay {
            self.delay = delay;
        }
        if let Some(tf) = overrides.timing_function {
            self.timing_function = tf;
        }
        if let Some(origin) = &overrides.transform_origin {
            self.transform_origin = origin.clone();
        }
    }
}

/// Partial timing options; absent fields fall back to the step defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StepOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timing_function: Option<TimingFunction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform_origin: Option<String>,
}

impl StepOverrides {
    /// Options that apply a step instantly: `duration = 1`, no delay, `step-start`.
    pub fn instant() -> Self {
        Self {
            duration: Some(1),
            delay: Some(0),
            timing_function: Some(TimingFunction::StepStart),
            transform_origin: None,
        }
    }

    /// True when any present field disagrees with `defaults`.
    pub fn differs_from(&self, defaults: &StepOptions) -> bool {
        self.duration.is_some_and(|d| d != defaults.duration)
            || self.delay.is_some_and(|d| d != defaults.delay)
            || self
                .timing_function
                .is_some_and(|tf| tf != defaults.timing_function)
            || self
                .transform_origin
                .as_ref()
                .is_some_and(|o| *o != defaults.transform_origin)
    }
}

impl From<StepOptions> for StepOverrides {
    fn from(o: StepOptions) -> Self {
        Self {
            duration: Some(o.duration),
            delay: Some(o.delay),
            timing_function: Some(o.timing_function),
            transform_origin: Some(o.transform_origin),
        }
    }
}

/// A batch of ops applied together, with its own options and the defaults
/// of the builder that recorded it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub ops: Vec<Op>,
    #[serde(default)]
    pub options: StepOverrides,
    #[serde(default)]
    pub defaults: StepOptions,
}

impl Step {
    /// Defaults overlaid with the step's own options.
    pub fn resolve(&self) -> StepOptions {
        self.defaults.merged(&self.options)
    }

    /// Like [`Step::resolve`], with `extra` applied last.
    pub fn resolve_with(&self, extra: &StepOverrides) -> StepOptions {
        let mut out = self.resolve();
        out.apply(extra);
        out
    }
}

/// Signature handed to definition factories for creating step builders.
pub type StepBuilderFactory = fn(StepOptions) -> StepBuilder;

macro_rules! unary_apis {
    ($($name:ident => $api:ident),* $(,)?) => {
        $(
            pub fn $name(&mut self, value: impl Into<StepArg>) -> &mut Self {
                self.push(Api::$api, [value.into()])
            }
        )*
    };
}

/// Chainable recorder of animation steps.
///
/// ```
/// use smart_swiper_core::step::{StepBuilder, StepOptions, StepOverrides};
///
/// let mut anim = StepBuilder::new(StepOptions::default());
/// anim.translate_x(120).opacity(0.5).step(StepOverrides::default());
/// let steps = anim.export();
/// assert_eq!(steps.len(), 1);
/// assert_eq!(steps[0].ops.len(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct StepBuilder {
    defaults: StepOptions,
    pending: Vec<Op>,
    steps: Vec<Step>,
}

impl StepBuilder {
    pub fn new(defaults: StepOptions) -> Self {
        Self {
            defaults,
            pending: Vec::new(),
            steps: Vec::new(),
        }
    }

    pub fn defaults(&self) -> &StepOptions {
        &self.defaults
    }

    /// Ops recorded since the last `step()`.
    pub fn pending(&self) -> &[Op] {
        &self.pending
    }

    /// Append an arbitrary op to the pending batch.
    pub fn push<I>(&mut self, api: Api, args: I) -> &mut Self
    where
        I: IntoIterator<Item = StepArg>,
    {
        self.pending.push(Op {
            api,
            args: args.into_iter().collect(),
        });
        self
    }

    pub fn matrix(&mut self, a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> &mut Self {
        self.push(Api::Matrix, [a, b, c, d, tx, ty].map(StepArg::Number))
    }

    pub fn matrix3d(&mut self, m: [f64; 16]) -> &mut Self {
        self.push(Api::Matrix3d, m.map(StepArg::Number))
    }

    pub fn rotate3d(&mut self, x: f64, y: f64, z: f64, angle: f64) -> &mut Self {
        self.push(Api::Rotate3d, [x, y, z, angle].map(StepArg::Number))
    }

    pub fn scale(&mut self, sx: f64, sy: f64) -> &mut Self {
        self.push(Api::Scale, [sx, sy].map(StepArg::Number))
    }

    pub fn scale3d(&mut self, sx: f64, sy: f64, sz: f64) -> &mut Self {
        self.push(Api::Scale3d, [sx, sy, sz].map(StepArg::Number))
    }

    pub fn skew(&mut self, ax: f64, ay: f64) -> &mut Self {
        self.push(Api::Skew, [ax, ay].map(StepArg::Number))
    }

    pub fn translate(&mut self, tx: impl Into<StepArg>, ty: impl Into<StepArg>) -> &mut Self {
        self.push(Api::Translate, [tx.into(), ty.into()])
    }

    pub fn translate3d(
        &mut self,
        tx: impl Into<StepArg>,
        ty: impl Into<StepArg>,
        tz: impl Into<StepArg>,
    ) -> &mut Self {
        self.push(Api::Translate3d, [tx.into(), ty.into(), tz.into()])
    }

    unary_apis! {
        rotate => Rotate,
        rotate_x => RotateX,
        rotate_y => RotateY,
        rotate_z => RotateZ,
        scale_x => ScaleX,
        scale_y => ScaleY,
        scale_z => ScaleZ,
        skew_x => SkewX,
        skew_y => SkewY,
        translate_x => TranslateX,
        translate_y => TranslateY,
        translate_z => TranslateZ,
        opacity => Opacity,
        background_color => BackgroundColor,
        width => Width,
        height => Height,
        left => Left,
        right => Right,
        top => Top,
        bottom => Bottom,
    }

    /// Close the pending batch into a step carrying `options` and the
    /// builder's defaults, then open a fresh batch.
    pub fn step(&mut self, options: StepOverrides) -> &mut Self {
        let ops = std::mem::take(&mut self.pending);
        self.steps.push(Step {
            ops,
            options,
            defaults: self.defaults.clone(),
        });
        self
    }

    /// Record a step resetting every property: each api with a null
    /// argument, applied immediately (`duration = 0`, `step-start`).
    pub fn cancel(&mut self) -> &mut Self {
        for api in Api::ALL {
            self.push(api, [StepArg::Null]);
        }
        self.step(StepOverrides {
            duration: Some(0),
            delay: Some(0),
            timing_function: Some(TimingFunction::StepStart),
            transform_origin: None,
        })
    }

    /// Drain the recorded steps. A second call returns only steps recorded
    /// after the first.
    pub fn export(&mut self) -> Vec<Step> {
        std::mem::take(&mut self.steps)
    }
}
