//! Built-in compositions and the property curves their layouts sample.
//!
//! Scene windows are data. Each layout only needs its local frame and the
//! composition fps to drive its own opacity, scale and position.

use crate::{
    animation::interpolate::{InterpolateOpts, interpolate},
    animation::spring::{SpringConfig, StretchedSpring},
    composition::model::{Composition, CompositionBuilder},
    foundation::core::{Canvas, Fps, FrameIndex, FrameRange},
    foundation::error::{ReelError, ReelResult},
    timeline::dsl::{SequenceBuilder, TimelineBuilder},
    timeline::model::SceneSpec,
};

pub const PROMPT_VIDEO: &str = "PromptVideo";
pub const HELLO_WORLD: &str = "HelloWorld";
pub const ICE_CUBE_PROMO: &str = "IceCubePromo";
pub const FLOWER_TOW_TRUCK: &str = "FlowerTowTruck";

pub const PRESET_IDS: [&str; 4] = [PROMPT_VIDEO, HELLO_WORLD, ICE_CUBE_PROMO, FLOWER_TOW_TRUCK];

/// Look up a preset by id (case-insensitive).
pub fn preset(id: &str) -> ReelResult<Composition> {
    let want = id.trim();
    match PRESET_IDS.iter().find(|p| p.eq_ignore_ascii_case(want)) {
        Some(&PROMPT_VIDEO) => prompt_video(),
        Some(&HELLO_WORLD) => hello_world(),
        Some(&ICE_CUBE_PROMO) => ice_cube_promo(),
        Some(&FLOWER_TOW_TRUCK) => flower_tow_truck(),
        _ => Err(ReelError::validation(format!(
            "unknown preset '{want}' (expected one of: {})",
            PRESET_IDS.join(", ")
        ))),
    }
}

fn fps30() -> ReelResult<Fps> {
    Fps::integer(30)
}

/// Single full-length scene that animates itself.
fn single_scene(id: &str, scene: &str, frames: u64) -> ReelResult<Composition> {
    let timeline = TimelineBuilder::new()
        .scene(
            SceneSpec::new(scene, 0, frames)
                .with_fade_in(0)
                .with_fade_out(0),
        )
        .build()?;
    CompositionBuilder::new(id, fps30()?, Canvas::FULL_HD)
        .duration(frames)
        .timeline(timeline)
        .build()
}

pub fn prompt_video() -> ReelResult<Composition> {
    single_scene(PROMPT_VIDEO, "title_card", 150)
}

pub fn hello_world() -> ReelResult<Composition> {
    single_scene(HELLO_WORLD, "greeting", 150)
}

pub fn flower_tow_truck() -> ReelResult<Composition> {
    single_scene(FLOWER_TOW_TRUCK, "bloom", 150)
}

/// Six-scene promo; neighbours crossfade over a 5-frame lead.
pub fn ice_cube_promo() -> ReelResult<Composition> {
    let timeline = SequenceBuilder::new()
        .lead(5)
        .tail(10)
        .scene("hook", 90)
        .scene("app_reveal", 90)
        .scene("phone_mockup", 105)
        .scene("features", 105)
        .scene("social_proof", 75)
        .scene("cta", 85)
        .build()?;
    CompositionBuilder::new(ICE_CUBE_PROMO, fps30()?, Canvas::FULL_HD)
        .timeline(timeline)
        .build()
}

/// Title and subtitle card of `PromptVideo`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TitleCard {
    pub title_opacity: f64,
    pub subtitle_opacity: f64,
    pub scale: f64,
}

impl TitleCard {
    pub fn at(frame: FrameIndex, fps: Fps) -> Self {
        let f = frame.0 as f64;
        let one_sec = fps.as_f64();
        let opts = InterpolateOpts::clamp_right();
        Self {
            title_opacity: interpolate(f, (0.0, one_sec), (0.0, 1.0), opts),
            subtitle_opacity: interpolate(f, (one_sec, 2.0 * one_sec), (0.0, 1.0), opts),
            scale: interpolate(f, (0.0, 0.5 * one_sec), (0.8, 1.0), opts),
        }
    }
}

/// Greeting opacity of `HelloWorld`: reaches 1 after half a second.
pub fn greeting_opacity(frame: FrameIndex, fps: Fps) -> f64 {
    (frame.0 as f64 / (fps.as_f64() * 0.5)).min(1.0)
}

/// Flower and truck properties of `FlowerTowTruck`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct BloomCard {
    /// Spring progress, settled by frame 90.
    pub bloom: f64,
    pub petal_scale: f64,
    pub petal_opacity: f64,
    pub petal_tilt_deg: f64,
    pub truck_scale: f64,
    pub truck_opacity: f64,
}

impl BloomCard {
    pub const BLOOM_FRAMES: u64 = 90;

    /// The bloom spring at `fps`; measure once and reuse across frames.
    pub fn bloom_spring(fps: Fps) -> StretchedSpring {
        let config = SpringConfig::default()
            .with_damping(25.0)
            .with_stiffness(80.0);
        StretchedSpring::new(fps, config, Self::BLOOM_FRAMES)
    }

    pub fn at(frame: FrameIndex, fps: Fps) -> Self {
        Self::sample(&Self::bloom_spring(fps), frame)
    }

    /// Cards for every frame of `range`, sharing one spring measurement.
    pub fn frames(range: FrameRange, fps: Fps) -> Vec<Self> {
        let spring = Self::bloom_spring(fps);
        range.frames().map(|f| Self::sample(&spring, f)).collect()
    }

    fn sample(spring: &StretchedSpring, frame: FrameIndex) -> Self {
        let frame = i64::try_from(frame.0).unwrap_or(i64::MAX);
        let bloom = spring.at(frame);

        let extend = InterpolateOpts::default();
        let clamp_right = InterpolateOpts::clamp_right();
        let truck_reveal = interpolate(bloom, (0.4, 0.9), (0.0, 1.0), clamp_right);

        Self {
            bloom,
            petal_scale: interpolate(bloom, (0.0, 1.0), (0.4, 1.15), extend),
            petal_opacity: interpolate(bloom, (0.0, 0.3), (0.0, 1.0), clamp_right),
            petal_tilt_deg: interpolate(bloom, (0.0, 1.0), (-35.0, 0.0), extend),
            truck_scale: interpolate(truck_reveal, (0.0, 1.0), (0.5, 1.0), extend),
            truck_opacity: interpolate(truck_reveal, (0.0, 0.5), (0.0, 1.0), clamp_right),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fps() -> Fps {
        Fps::new(30, 1).unwrap()
    }

    #[test]
    fn every_preset_builds_and_validates() {
        for id in PRESET_IDS {
            let comp = preset(id).unwrap();
            assert_eq!(comp.id, id);
            comp.validate().unwrap();
        }
        assert!(preset("icecubepromo").is_ok());
        assert!(preset("nope").is_err());
    }

    #[test]
    fn ice_cube_promo_windows() {
        let comp = ice_cube_promo().unwrap();
        let windows: Vec<_> = comp
            .timeline
            .scenes
            .iter()
            .map(|s| (s.name.as_str(), s.start_frame.0, s.duration_in_frames))
            .collect();
        assert_eq!(
            windows,
            vec![
                ("hook", 0, 105),
                ("app_reveal", 85, 105),
                ("phone_mockup", 175, 120),
                ("features", 280, 120),
                ("social_proof", 385, 90),
                ("cta", 460, 90),
            ]
        );
        assert_eq!(comp.duration, FrameIndex(550));
        assert_eq!(comp.timeline.scene("cta").unwrap().fade_out, 0);
    }

    #[test]
    fn title_card_curves() {
        let c0 = TitleCard::at(FrameIndex(0), fps());
        assert_eq!(c0.title_opacity, 0.0);
        assert_eq!(c0.subtitle_opacity, 0.0);
        assert_eq!(c0.scale, 0.8);

        let c15 = TitleCard::at(FrameIndex(15), fps());
        assert_eq!(c15.title_opacity, 0.5);
        assert_eq!(c15.scale, 1.0);

        let c45 = TitleCard::at(FrameIndex(45), fps());
        assert_eq!(c45.title_opacity, 1.0);
        assert_eq!(c45.subtitle_opacity, 0.5);

        let end = TitleCard::at(FrameIndex(149), fps());
        assert_eq!(end.subtitle_opacity, 1.0);
    }

    #[test]
    fn greeting_fades_in_over_half_a_second() {
        assert_eq!(greeting_opacity(FrameIndex(0), fps()), 0.0);
        assert_eq!(greeting_opacity(FrameIndex(5), fps()), 1.0 / 3.0);
        assert_eq!(greeting_opacity(FrameIndex(15), fps()), 1.0);
        assert_eq!(greeting_opacity(FrameIndex(100), fps()), 1.0);
    }

    #[test]
    fn bloom_opens_the_flower_before_the_truck() {
        let start = BloomCard::at(FrameIndex(0), fps());
        assert_eq!(start.bloom, 0.0);
        assert_eq!(start.petal_scale, 0.4);
        assert_eq!(start.petal_tilt_deg, -35.0);

        let done = BloomCard::at(FrameIndex(BloomCard::BLOOM_FRAMES), fps());
        assert!(done.bloom > 0.99);
        assert_eq!(done.petal_opacity, 1.0);
        assert_eq!(done.truck_opacity, 1.0);
        assert!((done.petal_scale - 1.15).abs() < 0.01);
    }

    #[test]
    fn bloom_frames_share_one_spring_and_match_single_samples() {
        let range = FrameRange::with_len(FrameIndex(0), 120);
        let cards = BloomCard::frames(range, fps());
        assert_eq!(cards.len(), 120);
        for (f, card) in range.frames().zip(&cards) {
            assert_eq!(*card, BloomCard::at(f, fps()));
        }
        assert!(BloomCard::bloom_spring(fps()).natural_frames() > 0);
    }
}
