use crate::error::{ReelError, ReelResult};

pub use kurbo::Affine;

/// Absolute 0-based frame index in output timeline space.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Half-open frame range `[start, end)` in timeline space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    /// Inclusive range start.
    pub start: FrameIndex,
    /// Exclusive range end.
    pub end: FrameIndex,
}

impl FrameRange {
    /// Create a validated range with `start <= end`.
    pub fn new(start: FrameIndex, end: FrameIndex) -> ReelResult<Self> {
        if start.0 > end.0 {
            return Err(ReelError::validation("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Number of frames contained in the range.
    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    /// Return `true` when the range has no frames.
    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    /// Return `true` when `f` is inside `[start, end)`.
    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }
}

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> ReelResult<Self> {
        if den == 0 {
            return Err(ReelError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(ReelError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Convert seconds to a whole frame count, rounding to nearest.
    pub fn secs_to_frames_round(self, secs: f64) -> u64 {
        (secs * self.as_f64()).round().max(0.0) as u64
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_range_rejects_inverted_bounds() {
        assert!(FrameRange::new(FrameIndex(5), FrameIndex(4)).is_err());
        let r = FrameRange::new(FrameIndex(5), FrameIndex(5)).unwrap();
        assert!(r.is_empty());
        assert_eq!(r.len_frames(), 0);
    }

    #[test]
    fn frame_range_containment_is_half_open() {
        let r = FrameRange::new(FrameIndex(10), FrameIndex(20)).unwrap();
        assert!(!r.contains(FrameIndex(9)));
        assert!(r.contains(FrameIndex(10)));
        assert!(r.contains(FrameIndex(19)));
        assert!(!r.contains(FrameIndex(20)));
    }

    #[test]
    fn fps_rejects_zero_components() {
        assert!(Fps::new(0, 1).is_err());
        assert!(Fps::new(30, 0).is_err());
        assert_eq!(Fps::new(30, 1).unwrap().as_f64(), 30.0);
    }

    #[test]
    fn secs_to_frames_rounds_to_nearest() {
        let fps = Fps::new(30, 1).unwrap();
        assert_eq!(fps.secs_to_frames_round(2.0), 60);
        assert_eq!(fps.secs_to_frames_round(3.0), 90);
        assert_eq!(fps.secs_to_frames_round(0.016), 0);
        assert_eq!(fps.secs_to_frames_round(0.017), 1);
        assert_eq!(fps.secs_to_frames_round(-1.0), 0);
    }
}
