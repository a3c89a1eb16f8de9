//! Maps a playback position to the scenes visible at it.
//!
//! Everything here is a pure function of `(timeline, frame)`. Hosts may request
//! frames in any order or from many threads at once.

use rayon::prelude::*;

use crate::{
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{ReelError, ReelResult},
    timeline::model::{SceneSpec, Timeline},
};

/// A scene visible at some global frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ActiveScene<'a> {
    /// Declaration index; also the layer order (higher draws on top).
    pub index: usize,
    pub scene: &'a SceneSpec,
    pub local_frame: FrameIndex,
    pub opacity: f64, // 0..1
}

/// Active scenes for one frame of a range evaluation.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameScenes<'a> {
    pub frame: FrameIndex,
    pub scenes: Vec<ActiveScene<'a>>,
}

/// Scenes whose window contains `frame`, in declaration order.
///
/// Never fails: a frame outside every window yields an empty list.
pub fn active_scenes(timeline: &Timeline, frame: FrameIndex) -> Vec<ActiveScene<'_>> {
    timeline
        .scenes
        .iter()
        .enumerate()
        .filter_map(|(index, scene)| {
            let local_frame = scene.local_frame(frame)?;
            Some(ActiveScene {
                index,
                scene,
                local_frame,
                opacity: scene.envelope().opacity(local_frame.0),
            })
        })
        .collect()
}

pub fn evaluate_frames(timeline: &Timeline, range: FrameRange) -> Vec<FrameScenes<'_>> {
    range
        .frames()
        .map(|frame| FrameScenes {
            frame,
            scenes: active_scenes(timeline, frame),
        })
        .collect()
}

/// Parallel [`evaluate_frames`]; output is in frame order and identical to it.
///
/// `threads` overrides the worker count of the dedicated pool.
#[tracing::instrument(skip(timeline), fields(scenes = timeline.len()))]
pub fn evaluate_frames_parallel(
    timeline: &Timeline,
    range: FrameRange,
    threads: Option<usize>,
) -> ReelResult<Vec<FrameScenes<'_>>> {
    let pool = build_thread_pool(threads)?;
    let len = usize::try_from(range.len_frames())
        .map_err(|_| ReelError::validation("frame range is too long for this platform"))?;

    let out = pool.install(|| {
        (0..len)
            .into_par_iter()
            .map(|offset| {
                let frame = FrameIndex(range.start.0 + offset as u64);
                FrameScenes {
                    frame,
                    scenes: active_scenes(timeline, frame),
                }
            })
            .collect::<Vec<_>>()
    });
    tracing::debug!(frames = out.len(), "evaluated frame range");
    Ok(out)
}

fn build_thread_pool(threads: Option<usize>) -> ReelResult<rayon::ThreadPool> {
    if threads == Some(0) {
        return Err(ReelError::validation("thread count must be > 0"));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ReelError::validation(format!("failed to build rayon thread pool: {e}")))
}
