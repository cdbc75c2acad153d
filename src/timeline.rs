use crate::core::{Fps, FrameIndex, FrameRange};
use crate::error::ReelResult;
use crate::script::{Scene, SceneTiming, Script};

/// Scene length used when a frame-duration scene leaves `durationInFrames`
/// unset or zero.
pub const DEFAULT_SCENE_FRAMES: u64 = 150;

/// A scene with resolved absolute placement on the output timeline.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct TimedScene {
    /// Position of the scene in the script, 0-based.
    pub scene_index: usize,
    pub scene: Scene,
    /// Timeline placement `[start, end)`.
    pub range: FrameRange,
}

impl TimedScene {
    /// Scene length in frames, always >= 1.
    pub fn duration_frames(&self) -> u64 {
        self.range.len_frames()
    }

    /// Frame offset within the scene for an absolute timeline frame.
    ///
    /// Frames before the scene start clamp to 0; frames past the end keep
    /// counting (motion styles decide whether to hold or extrapolate).
    pub fn local_frame(&self, frame: FrameIndex) -> FrameIndex {
        FrameIndex(frame.0.saturating_sub(self.range.start.0))
    }
}

/// Ordered scene placement plus the derived total output duration.
///
/// Frame-duration scripts accumulate scenes back to back with no gaps or
/// overlaps. Timestamped scripts place each scene independently, so gaps and
/// overlaps are possible and preserved. In both cases the total duration is
/// derived from the content end, never configured separately.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Timeline {
    scenes: Vec<TimedScene>,
    duration: FrameIndex,
}

impl Timeline {
    /// Place every script scene on the output timeline.
    pub fn build(script: &Script, fps: Fps) -> ReelResult<Self> {
        script.validate()?;

        let mut scenes = Vec::with_capacity(script.scenes.len());
        let mut cursor = 0u64;
        let mut content_end = 0u64;

        for (scene_index, scene) in script.scenes.iter().enumerate() {
            let range = match scene.timing {
                SceneTiming::Frames { duration_in_frames } => {
                    let duration = resolve_frame_duration(duration_in_frames);
                    let start = cursor;
                    cursor += duration;
                    FrameRange::new(FrameIndex(start), FrameIndex(start + duration))?
                }
                SceneTiming::Timestamps {
                    timestamp_start,
                    timestamp_end,
                } => {
                    let start = fps.secs_to_frames_round(timestamp_start);
                    // A zero-width scene still occupies one frame.
                    let duration = fps
                        .secs_to_frames_round(timestamp_end - timestamp_start)
                        .max(1);
                    FrameRange::new(FrameIndex(start), FrameIndex(start + duration))?
                }
            };

            content_end = content_end.max(range.end.0);
            scenes.push(TimedScene {
                scene_index,
                scene: scene.clone(),
                range,
            });
        }

        // For frame-duration scripts content_end equals the running counter,
        // so both variants end exactly when content ends.
        Ok(Self {
            scenes,
            duration: FrameIndex(content_end),
        })
    }

    /// Total output duration in frames.
    pub fn duration(&self) -> FrameIndex {
        self.duration
    }

    /// Return `true` when the timeline has no scenes.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// All placed scenes in script order.
    pub fn scenes(&self) -> &[TimedScene] {
        &self.scenes
    }

    /// Scenes whose range contains `frame`, in script order.
    pub fn active_at(&self, frame: FrameIndex) -> impl Iterator<Item = &TimedScene> {
        self.scenes.iter().filter(move |s| s.range.contains(frame))
    }
}

fn resolve_frame_duration(duration_in_frames: u64) -> u64 {
    if duration_in_frames == 0 {
        DEFAULT_SCENE_FRAMES
    } else {
        duration_in_frames
    }
}
