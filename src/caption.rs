use crate::core::FrameIndex;

/// Frames over which a caption fades from transparent to fully opaque.
pub const CAPTION_FADE_FRAMES: u64 = 15;

/// Caption opacity `local` frames into a scene.
///
/// Linear fade over the first [`CAPTION_FADE_FRAMES`] frames, holding at 1.0
/// afterward regardless of scene length or motion style.
pub fn caption_opacity(local: FrameIndex) -> f64 {
    (local.0 as f64 / CAPTION_FADE_FRAMES as f64).clamp(0.0, 1.0)
}
