use std::path::Path;

use crate::{
    foundation::core::{Canvas, Fps, FrameIndex},
    foundation::error::{ReelError, ReelResult},
    timeline::compositor::{ActiveScene, active_scenes},
    timeline::model::Timeline,
};

/// A renderable video: output format plus its scene timeline.
///
/// A composition is plain data. It can be built in code (see
/// [`crate::CompositionBuilder`]) or loaded from JSON, and hosts query it one
/// frame at a time with [`Composition::active_scenes`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Composition {
    /// Identifier the host registers the composition under.
    pub id: String,
    pub fps: Fps,
    pub canvas: Canvas,
    /// Total frames rendered by the host.
    pub duration: FrameIndex,
    pub timeline: Timeline,
}

impl Composition {
    pub fn validate(&self) -> ReelResult<()> {
        if self.id.trim().is_empty() {
            return Err(ReelError::validation("composition id must be non-empty"));
        }
        self.fps.validate()?;
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ReelError::validation("canvas width/height must be > 0"));
        }
        if self.duration.0 == 0 {
            return Err(ReelError::validation("composition duration must be > 0"));
        }
        self.timeline.validate()
    }

    pub fn active_scenes(&self, frame: FrameIndex) -> Vec<ActiveScene<'_>> {
        active_scenes(&self.timeline, frame)
    }

    pub fn duration_secs(&self) -> f64 {
        self.fps.frames_to_secs(self.duration.0)
    }

    pub fn from_json_str(s: &str) -> ReelResult<Self> {
        let comp: Self = serde_json::from_str(s)?;
        comp.validate()?;
        Ok(comp)
    }

    #[tracing::instrument]
    pub fn load(path: &Path) -> ReelResult<Self> {
        let s = std::fs::read_to_string(path)
            .map_err(|e| ReelError::io(format!("read composition '{}'", path.display()), e))?;
        Self::from_json_str(&s)
    }

    pub fn to_json_pretty(&self) -> ReelResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Builder for [`Composition`].
pub struct CompositionBuilder {
    id: String,
    fps: Fps,
    canvas: Canvas,
    duration: Option<FrameIndex>,
    timeline: Timeline,
}

impl CompositionBuilder {
    pub fn new(id: impl Into<String>, fps: Fps, canvas: Canvas) -> Self {
        Self {
            id: id.into(),
            fps,
            canvas,
            duration: None,
            timeline: Timeline::default(),
        }
    }

    /// Explicit duration; defaults to the timeline's end.
    pub fn duration(mut self, frames: u64) -> Self {
        self.duration = Some(FrameIndex(frames));
        self
    }

    pub fn timeline(mut self, timeline: Timeline) -> Self {
        self.timeline = timeline;
        self
    }

    pub fn build(self) -> ReelResult<Composition> {
        let duration = self
            .duration
            .unwrap_or(FrameIndex(self.timeline.duration()));
        let comp = Composition {
            id: self.id,
            fps: self.fps,
            canvas: self.canvas,
            duration,
            timeline: self.timeline,
        };
        comp.validate()?;
        Ok(comp)
    }
}
