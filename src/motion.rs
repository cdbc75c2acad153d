use crate::core::{Affine, FrameIndex};
use crate::script::MotionTag;

/// Ken Burns motion style resolved for one scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum MotionStyle {
    ZoomIn,
    ZoomOut,
    PanRight,
    PanLeft,
    /// Default fallback: a slow 1 -> 1.05 zoom.
    GentleZoom,
}

/// Cyclic style assignment for scripts with no per-scene motion tags.
pub const STYLE_CYCLE: [MotionStyle; 4] = [
    MotionStyle::ZoomIn,
    MotionStyle::PanRight,
    MotionStyle::ZoomOut,
    MotionStyle::PanLeft,
];

const ZOOM_IN_END: f64 = 1.15;
const GENTLE_ZOOM_END: f64 = 1.05;
const PAN_SCALE: f64 = 1.1;
const PAN_REACH_PX: f64 = 50.0;

/// Sampled motion parameters for one frame of one scene.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Motion {
    pub scale: f64,
    /// Horizontal offset in pixels, applied before scaling.
    pub translate_x: f64,
}

impl Motion {
    /// Affine equivalent of the `scale(s) translateX(t)` pair: the translate
    /// is applied first, then the scale.
    pub fn to_affine(self) -> Affine {
        Affine::scale(self.scale) * Affine::translate((self.translate_x, 0.0))
    }
}

impl MotionStyle {
    /// Style for a scene identified only by its index in the script.
    pub fn for_scene_index(index: usize) -> Self {
        STYLE_CYCLE[index % STYLE_CYCLE.len()]
    }

    /// Style for an explicit per-scene tag. Slow variants share the regular
    /// zoom ramps; absent or unrecognized tags fall back to the gentle zoom.
    pub fn from_tag(tag: Option<MotionTag>) -> Self {
        match tag {
            Some(MotionTag::ZoomIn | MotionTag::ZoomInSlow) => Self::ZoomIn,
            Some(MotionTag::ZoomOut | MotionTag::ZoomOutSlow) => Self::ZoomOut,
            Some(MotionTag::PanRight) => Self::PanRight,
            Some(MotionTag::PanLeft) => Self::PanLeft,
            Some(MotionTag::Unknown) | None => Self::GentleZoom,
        }
    }

    /// Sample the style `local` frames into a scene lasting `duration_frames`.
    ///
    /// Zoom ramps hold their extremum when sampled past the scene end; pan
    /// and gentle-zoom ramps keep extrapolating linearly.
    pub fn sample(self, local: FrameIndex, duration_frames: u64) -> Motion {
        let f = local.0;
        match self {
            Self::ZoomIn => Motion {
                scale: ramp_clamped(f, duration_frames, 1.0, ZOOM_IN_END),
                translate_x: 0.0,
            },
            Self::ZoomOut => Motion {
                scale: ramp_clamped(f, duration_frames, ZOOM_IN_END, 1.0),
                translate_x: 0.0,
            },
            Self::PanRight => Motion {
                scale: PAN_SCALE,
                translate_x: ramp(f, duration_frames, -PAN_REACH_PX, PAN_REACH_PX),
            },
            Self::PanLeft => Motion {
                scale: PAN_SCALE,
                translate_x: ramp(f, duration_frames, PAN_REACH_PX, -PAN_REACH_PX),
            },
            Self::GentleZoom => Motion {
                scale: ramp(f, duration_frames, 1.0, GENTLE_ZOOM_END),
                translate_x: 0.0,
            },
        }
    }
}

/// Linear ramp `[0, duration] -> [v0, v1]`, extrapolating past `duration`.
fn ramp(frame: u64, duration: u64, v0: f64, v1: f64) -> f64 {
    if duration == 0 {
        return v1;
    }
    let t = frame as f64 / duration as f64;
    v0 + (v1 - v0) * t
}

/// Linear ramp that holds `v1` from `duration` onward.
fn ramp_clamped(frame: u64, duration: u64, v0: f64, v1: f64) -> f64 {
    ramp(frame.min(duration), duration, v0, v1)
}
