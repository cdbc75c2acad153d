use crate::caption::caption_opacity;
use crate::core::{Affine, FrameIndex};
use crate::error::{ReelError, ReelResult};
use crate::motion::{Motion, MotionStyle};
use crate::script::{FilterStyle, SceneTiming};
use crate::timeline::{TimedScene, Timeline};

/// Declarative draw graph for one output frame.
///
/// A pure function of the timeline and the frame index: recomputing the same
/// frame always yields the same graph, so the consumer is free to parallelize
/// across frames.
#[derive(Clone, Debug, serde::Serialize)]
pub struct FrameGraph {
    pub frame: FrameIndex,
    pub ops: Vec<DrawOp>,
}

/// One draw instruction for the compositor.
///
/// Ops are emitted in scene order, image below caption within a scene.
/// Overlapping scenes stack in scene order with no further z-order guarantee.
#[derive(Clone, Debug, serde::Serialize)]
pub enum DrawOp {
    Image {
        scene_index: usize,
        /// Image reference, resolved by the caller's asset layer.
        source: String,
        transform: Affine,
        /// The raw pan/zoom parameters behind `transform`, for consumers that
        /// build CSS-style transform lists instead of applying a matrix.
        motion: Motion,
        filter: FilterStyle,
    },
    Caption {
        scene_index: usize,
        text: String,
        /// Fade-in opacity in `[0, 1]`.
        opacity: f64,
    },
}

pub struct Evaluator;

impl Evaluator {
    /// Evaluate the draw graph for `frame`.
    ///
    /// Scenes without an image reference contribute a caption op only.
    #[tracing::instrument(skip(timeline, filter))]
    pub fn eval_frame(
        timeline: &Timeline,
        filter: FilterStyle,
        frame: FrameIndex,
    ) -> ReelResult<FrameGraph> {
        if frame.0 >= timeline.duration().0 {
            return Err(ReelError::evaluation("frame is out of bounds"));
        }

        let mut ops = Vec::new();
        for timed in timeline.active_at(frame) {
            let local = timed.local_frame(frame);
            let motion = scene_style(timed).sample(local, timed.duration_frames());

            if let Some(source) = &timed.scene.image_url {
                ops.push(DrawOp::Image {
                    scene_index: timed.scene_index,
                    source: source.clone(),
                    transform: motion.to_affine(),
                    motion,
                    filter,
                });
            }
            ops.push(DrawOp::Caption {
                scene_index: timed.scene_index,
                text: timed.scene.text.clone(),
                opacity: caption_opacity(local),
            });
        }

        Ok(FrameGraph { frame, ops })
    }
}

/// Resolve the motion style for a placed scene: explicit tag for timestamped
/// scenes, index cycling for frame-duration scenes.
fn scene_style(timed: &TimedScene) -> MotionStyle {
    match timed.scene.timing {
        SceneTiming::Timestamps { .. } => MotionStyle::from_tag(timed.scene.animation_style),
        SceneTiming::Frames { .. } => MotionStyle::for_scene_index(timed.scene_index),
    }
}
