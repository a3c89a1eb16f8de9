//! scenereel sequences independent visual scenes into one continuous video.
//!
//! A [`Composition`] holds a [`Timeline`] of [`SceneSpec`] windows. For any
//! frame the host renderer asks for, [`active_scenes`] reports which scenes are
//! visible, each scene's local frame, and its crossfade opacity. Windows of
//! neighbouring scenes overlap on purpose so one fades out while the next fades in.
//!
//! The compositor is a pure function of `(timeline, frame)`: frames can be
//! requested in any order and from any number of threads.
//!
//! Scene layouts drive their own properties from the local frame with
//! [`Interpolation`] / [`interpolate`], an [`Ease`] curve, or [`spring`].
//! Prompt capture for the `create-video` tool lives in [`prompt`].
#![forbid(unsafe_code)]

mod animation;
mod composition;
mod foundation;
pub mod prompt;
mod timeline;

pub use animation::ease::{Ease, Easing};
pub use animation::interpolate::{
    Extrapolate, InterpolateOpts, Interpolation, Lerp, interpolate,
};
pub use animation::spring::{
    SETTLE_THRESHOLD, SpringConfig, SpringEasing, StretchedSpring, measure_spring, spring,
    spring_over,
};
pub use composition::model::{Composition, CompositionBuilder};
pub use composition::presets;
pub use foundation::core::{Canvas, Fps, FrameIndex, FrameRange, Vec2};
pub use foundation::error::{ReelError, ReelResult};
pub use foundation::logging::init_logging;
pub use timeline::compositor::{
    ActiveScene, FrameScenes, active_scenes, evaluate_frames, evaluate_frames_parallel,
};
pub use timeline::dsl::{SequenceBuilder, TimelineBuilder};
pub use timeline::envelope::FadeEnvelope;
pub use timeline::model::{Crossfade, DEFAULT_FADE_FRAMES, SceneSpec, Timeline};
