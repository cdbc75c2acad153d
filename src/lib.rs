//! Reelscript turns a JSON scene script into declarative draw graphs for
//! short vertical videos.
//!
//! A script is an ordered list of image scenes with captions and timing.
//! Reelscript places each scene on an output timeline, derives per-frame
//! pan/zoom ("Ken Burns") motion and caption fade parameters, and streams a
//! [`FrameGraph`] per output frame into a [`FrameCompositor`] — the external
//! engine that actually produces pixels and mixes audio.
//!
//! - Load and validate a [`Script`]
//! - Build a [`Timeline`] with a [`RenderSession`]
//! - Evaluate single frames or stream the full range into a compositor
#![forbid(unsafe_code)]

pub mod caption;
pub mod core;
pub mod dsl;
pub mod error;
pub mod eval;
pub mod motion;
pub mod pipeline;
pub mod script;
pub mod timeline;

pub use crate::caption::{CAPTION_FADE_FRAMES, caption_opacity};
pub use crate::core::{Affine, Canvas, Fps, FrameIndex, FrameRange};
pub use crate::dsl::ScriptBuilder;
pub use crate::error::{ReelError, ReelResult};
pub use crate::eval::{DrawOp, Evaluator, FrameGraph};
pub use crate::motion::{Motion, MotionStyle, STYLE_CYCLE};
pub use crate::pipeline::{
    AudioTrack, CompositorConfig, FrameCompositor, InMemoryCompositor, OutputSpec, RenderSession,
};
pub use crate::script::{FilterStyle, MotionTag, Scene, SceneTiming, Script};
pub use crate::timeline::{DEFAULT_SCENE_FRAMES, TimedScene, Timeline};
