use crate::{
    foundation::error::{ReelError, ReelResult},
    timeline::model::{DEFAULT_FADE_FRAMES, SceneSpec, Timeline},
};

/// Builder for a [`Timeline`] from explicit scene windows.
#[derive(Clone, Debug, Default)]
pub struct TimelineBuilder {
    scenes: Vec<SceneSpec>,
}

impl TimelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scene(mut self, scene: SceneSpec) -> Self {
        self.scenes.push(scene);
        self
    }

    pub fn build(self) -> ReelResult<Timeline> {
        Timeline::new(self.scenes)
    }
}

/// Lays scenes end to end by nominal length and overlaps neighbours so they
/// crossfade.
///
/// Nominal starts accumulate from frame 0. Each window opens `lead` frames
/// before its nominal start and stays open `lead + tail` frames past its
/// nominal length. The last scene closes exactly at the nominal total and has
/// no fade-out.
///
/// ```
/// use scenereel::SequenceBuilder;
///
/// let t = SequenceBuilder::new()
///     .lead(5)
///     .tail(10)
///     .scene("intro", 90)
///     .scene("outro", 60)
///     .build()
///     .unwrap();
/// assert_eq!(t.scenes[1].start_frame.0, 85);
/// assert_eq!(t.duration(), 150);
/// ```
#[derive(Clone, Debug)]
pub struct SequenceBuilder {
    lead: u64,
    tail: u64,
    fade_in: u64,
    fade_out: u64,
    entries: Vec<(String, u64)>,
}

impl Default for SequenceBuilder {
    fn default() -> Self {
        Self {
            lead: 5,
            tail: 10,
            fade_in: DEFAULT_FADE_FRAMES,
            fade_out: DEFAULT_FADE_FRAMES,
            entries: Vec::new(),
        }
    }
}

impl SequenceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lead(mut self, frames: u64) -> Self {
        self.lead = frames;
        self
    }

    pub fn tail(mut self, frames: u64) -> Self {
        self.tail = frames;
        self
    }

    pub fn fade_in(mut self, frames: u64) -> Self {
        self.fade_in = frames;
        self
    }

    /// Fade-out for every scene but the last.
    pub fn fade_out(mut self, frames: u64) -> Self {
        self.fade_out = frames;
        self
    }

    pub fn scene(mut self, name: impl Into<String>, nominal_frames: u64) -> Self {
        self.entries.push((name.into(), nominal_frames));
        self
    }

    pub fn build(self) -> ReelResult<Timeline> {
        let count = self.entries.len();
        let mut nominal_start = 0u64;
        let mut scenes = Vec::with_capacity(count);

        for (i, (name, nominal)) in self.entries.into_iter().enumerate() {
            if nominal == 0 {
                return Err(ReelError::validation(format!(
                    "scene '{name}' must have a nominal length > 0"
                )));
            }

            let nominal_end = nominal_start.saturating_add(nominal);
            let start = nominal_start.saturating_sub(self.lead);
            let is_last = i + 1 == count;
            let (end, fade_out) = if is_last {
                (nominal_end, 0)
            } else {
                (
                    start
                        .saturating_add(nominal)
                        .saturating_add(self.lead)
                        .saturating_add(self.tail),
                    self.fade_out,
                )
            };

            scenes.push(
                SceneSpec::new(name, start, end - start)
                    .with_fade_in(self.fade_in)
                    .with_fade_out(fade_out),
            );
            nominal_start = nominal_end;
        }

        tracing::debug!(scenes = scenes.len(), frames = nominal_start, "built sequence");
        Timeline::new(scenes)
    }
}
