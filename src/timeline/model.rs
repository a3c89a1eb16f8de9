use std::collections::BTreeSet;

use crate::{
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{ReelError, ReelResult},
    timeline::compositor::{ActiveScene, active_scenes},
    timeline::envelope::FadeEnvelope,
};

/// Fade length applied when a scene does not set one.
pub const DEFAULT_FADE_FRAMES: u64 = 12;

fn default_fade() -> u64 {
    DEFAULT_FADE_FRAMES
}

/// One scene window on the timeline.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SceneSpec {
    pub name: String,
    pub start_frame: FrameIndex,
    pub duration_in_frames: u64, // > 0
    #[serde(default = "default_fade")]
    pub fade_in: u64,
    #[serde(default = "default_fade")]
    pub fade_out: u64, // 0 = hold until the window ends
}

impl SceneSpec {
    pub fn new(name: impl Into<String>, start_frame: u64, duration_in_frames: u64) -> Self {
        Self {
            name: name.into(),
            start_frame: FrameIndex(start_frame),
            duration_in_frames,
            fade_in: DEFAULT_FADE_FRAMES,
            fade_out: DEFAULT_FADE_FRAMES,
        }
    }

    pub fn with_fade_in(mut self, frames: u64) -> Self {
        self.fade_in = frames;
        self
    }

    pub fn with_fade_out(mut self, frames: u64) -> Self {
        self.fade_out = frames;
        self
    }

    /// `[start_frame, start_frame + duration_in_frames)`
    pub fn window(&self) -> FrameRange {
        FrameRange::with_len(self.start_frame, self.duration_in_frames)
    }

    pub fn envelope(&self) -> FadeEnvelope {
        FadeEnvelope::new(self.duration_in_frames, self.fade_in, self.fade_out)
    }

    /// Frame relative to the scene start, if the scene is visible at `frame`.
    pub fn local_frame(&self, frame: FrameIndex) -> Option<FrameIndex> {
        self.window()
            .contains(frame)
            .then(|| FrameIndex(frame.0 - self.start_frame.0))
    }

    pub fn validate(&self) -> ReelResult<()> {
        if self.name.trim().is_empty() {
            return Err(ReelError::validation("scene name must be non-empty"));
        }
        if self.duration_in_frames == 0 {
            return Err(ReelError::validation(format!(
                "scene '{}' duration_in_frames must be > 0",
                self.name
            )));
        }
        Ok(())
    }
}

/// Scenes in declaration order. Later scenes draw above earlier ones.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Timeline {
    pub scenes: Vec<SceneSpec>,
}

/// Frames where one scene fades into the next.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Crossfade {
    pub outgoing: usize,
    pub incoming: usize,
    pub range: FrameRange,
}

impl Timeline {
    pub fn new(scenes: Vec<SceneSpec>) -> ReelResult<Self> {
        let timeline = Self { scenes };
        timeline.validate()?;
        Ok(timeline)
    }

    pub fn validate(&self) -> ReelResult<()> {
        let mut seen = BTreeSet::new();
        for scene in &self.scenes {
            scene.validate()?;
            if !seen.insert(scene.name.as_str()) {
                return Err(ReelError::validation(format!(
                    "duplicate scene name '{}'",
                    scene.name
                )));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn scene(&self, name: &str) -> Option<&SceneSpec> {
        self.scenes.iter().find(|s| s.name == name)
    }

    /// End of the last window, in frames.
    pub fn duration(&self) -> u64 {
        self.scenes
            .iter()
            .map(|s| s.window().end.0)
            .max()
            .unwrap_or(0)
    }

    /// Overlapping windows of consecutive scenes.
    pub fn overlaps(&self) -> Vec<Crossfade> {
        self.scenes
            .windows(2)
            .enumerate()
            .filter_map(|(i, pair)| {
                let range = pair[0].window().intersect(pair[1].window())?;
                Some(Crossfade {
                    outgoing: i,
                    incoming: i + 1,
                    range,
                })
            })
            .collect()
    }

    pub fn active_scenes(&self, frame: FrameIndex) -> Vec<ActiveScene<'_>> {
        active_scenes(self, frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fade_lengths_when_missing_from_json() {
        let s: SceneSpec = serde_json::from_value(serde_json::json!({
            "name": "hook",
            "start_frame": 0,
            "duration_in_frames": 105
        }))
        .unwrap();
        assert_eq!(s.fade_in, 12);
        assert_eq!(s.fade_out, 12);
    }

    #[test]
    fn validate_rejects_empty_and_duplicate_names() {
        assert!(Timeline::new(vec![SceneSpec::new(" ", 0, 10)]).is_err());
        assert!(Timeline::new(vec![SceneSpec::new("a", 0, 0)]).is_err());
        assert!(
            Timeline::new(vec![SceneSpec::new("a", 0, 10), SceneSpec::new("a", 5, 10)]).is_err()
        );
        assert!(Timeline::new(vec![]).is_ok());
    }

    #[test]
    fn local_frame_is_window_relative() {
        let s = SceneSpec::new("reveal", 85, 105);
        assert_eq!(s.local_frame(FrameIndex(84)), None);
        assert_eq!(s.local_frame(FrameIndex(85)), Some(FrameIndex(0)));
        assert_eq!(s.local_frame(FrameIndex(189)), Some(FrameIndex(104)));
        assert_eq!(s.local_frame(FrameIndex(190)), None);
    }

    #[test]
    fn duration_and_overlaps() {
        let t = Timeline::new(vec![
            SceneSpec::new("a", 0, 105),
            SceneSpec::new("b", 85, 105),
            SceneSpec::new("c", 190, 10).with_fade_out(0),
        ])
        .unwrap();
        assert_eq!(t.duration(), 200);
        assert_eq!(
            t.overlaps(),
            vec![Crossfade {
                outgoing: 0,
                incoming: 1,
                range: FrameRange::new(FrameIndex(85), FrameIndex(105)).unwrap(),
            }]
        );
        assert_eq!(t.scene("b").unwrap().start_frame, FrameIndex(85));
        assert!(t.scene("z").is_none());
    }
}
