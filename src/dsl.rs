use crate::error::ReelResult;
use crate::script::{FilterStyle, MotionTag, Scene, SceneTiming, Script};

/// Programmatic [`Script`] construction.
///
/// Scene helpers come in the two timing flavors; `build` validates the
/// assembled script, so mixing flavors fails there rather than at render
/// time.
#[derive(Debug, Default)]
pub struct ScriptBuilder {
    scenes: Vec<Scene>,
    audio_url: Option<String>,
    filter_style: Option<FilterStyle>,
}

impl ScriptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a frame-duration scene. Pass 0 to use the default scene length.
    pub fn scene_with_frames(
        mut self,
        image_url: impl Into<String>,
        text: impl Into<String>,
        duration_in_frames: u64,
    ) -> Self {
        self.scenes.push(Scene {
            image_url: Some(image_url.into()),
            text: text.into(),
            timing: SceneTiming::Frames { duration_in_frames },
            animation_style: None,
        });
        self
    }

    /// Append a timestamped scene with an optional explicit motion tag.
    pub fn scene_with_timestamps(
        mut self,
        image_url: impl Into<String>,
        text: impl Into<String>,
        timestamp_start: f64,
        timestamp_end: f64,
        animation_style: Option<MotionTag>,
    ) -> Self {
        self.scenes.push(Scene {
            image_url: Some(image_url.into()),
            text: text.into(),
            timing: SceneTiming::Timestamps {
                timestamp_start,
                timestamp_end,
            },
            animation_style,
        });
        self
    }

    /// Append a preassembled scene.
    pub fn scene(mut self, scene: Scene) -> Self {
        self.scenes.push(scene);
        self
    }

    pub fn audio(mut self, source: impl Into<String>) -> Self {
        self.audio_url = Some(source.into());
        self
    }

    pub fn filter(mut self, filter: FilterStyle) -> Self {
        self.filter_style = Some(filter);
        self
    }

    /// Assemble and validate the script.
    pub fn build(self) -> ReelResult<Script> {
        let script = Script {
            scenes: self.scenes,
            audio_url: self.audio_url,
            filter_style: self.filter_style,
        };
        script.validate()?;
        Ok(script)
    }
}
