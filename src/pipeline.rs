use crate::core::{Canvas, Fps, FrameIndex, FrameRange};
use crate::error::{ReelError, ReelResult};
use crate::eval::{Evaluator, FrameGraph};
use crate::script::{FilterStyle, Script};
use crate::timeline::Timeline;

/// Output geometry and frame rate of a render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputSpec {
    pub canvas: Canvas,
    pub fps: Fps,
}

impl Default for OutputSpec {
    /// Portrait 1080x1920 at 30 fps, the short-form vertical format.
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 1080,
                height: 1920,
            },
            fps: Fps { num: 30, den: 1 },
        }
    }
}

/// Background audio reference, resolved by the caller's asset layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AudioTrack {
    pub source: String,
}

/// Configuration handed to a [`FrameCompositor`] before any frames.
#[derive(Clone, Debug)]
pub struct CompositorConfig {
    pub canvas: Canvas,
    pub fps: Fps,
    /// Total output frame count.
    pub duration: FrameIndex,
    pub audio: Option<AudioTrack>,
    /// Color grade applied uniformly to every image layer.
    pub filter: FilterStyle,
}

/// External compositing collaborator: consumes per-frame draw graphs and
/// produces pixels plus mixed audio.
///
/// Ordering contract: `compose_frame` is called in strictly increasing frame
/// order within the requested render range.
pub trait FrameCompositor: Send {
    /// Called once before any frames are composed.
    fn begin(&mut self, config: CompositorConfig) -> ReelResult<()>;
    /// Compose one frame in strictly increasing timeline order.
    fn compose_frame(&mut self, graph: &FrameGraph) -> ReelResult<()>;
    /// Called once after the last frame.
    fn end(&mut self) -> ReelResult<()>;
}

/// Capture compositor for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemoryCompositor {
    config: Option<CompositorConfig>,
    graphs: Vec<FrameGraph>,
}

impl InMemoryCompositor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<&CompositorConfig> {
        self.config.as_ref()
    }

    /// Borrow the captured frame graphs.
    pub fn graphs(&self) -> &[FrameGraph] {
        &self.graphs
    }
}

impl FrameCompositor for InMemoryCompositor {
    fn begin(&mut self, config: CompositorConfig) -> ReelResult<()> {
        self.config = Some(config);
        self.graphs.clear();
        Ok(())
    }

    fn compose_frame(&mut self, graph: &FrameGraph) -> ReelResult<()> {
        self.graphs.push(graph.clone());
        Ok(())
    }

    fn end(&mut self) -> ReelResult<()> {
        Ok(())
    }
}

/// One loaded script, placed on the output timeline and ready to evaluate.
///
/// The script is read once at construction; the session is immutable
/// afterward and every frame evaluation is independent.
pub struct RenderSession {
    timeline: Timeline,
    filter: FilterStyle,
    audio: Option<AudioTrack>,
    output: OutputSpec,
}

impl RenderSession {
    /// Validate `script` and place its scenes on the output timeline.
    pub fn new(script: &Script, output: OutputSpec) -> ReelResult<Self> {
        let timeline = Timeline::build(script, output.fps)?;
        Ok(Self {
            timeline,
            filter: script.filter_style.unwrap_or_default(),
            audio: script
                .audio_url
                .clone()
                .map(|source| AudioTrack { source }),
            output,
        })
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Total output duration in frames.
    pub fn duration(&self) -> FrameIndex {
        self.timeline.duration()
    }

    pub fn output(&self) -> OutputSpec {
        self.output
    }

    /// The output contract handed to the compositor.
    pub fn compositor_config(&self) -> CompositorConfig {
        CompositorConfig {
            canvas: self.output.canvas,
            fps: self.output.fps,
            duration: self.duration(),
            audio: self.audio.clone(),
            filter: self.filter,
        }
    }

    /// Evaluate the draw graph for a single frame.
    pub fn eval_frame(&self, frame: FrameIndex) -> ReelResult<FrameGraph> {
        Evaluator::eval_frame(&self.timeline, self.filter, frame)
    }

    /// Render the full timeline into `compositor`.
    pub fn render(&self, compositor: &mut dyn FrameCompositor) -> ReelResult<()> {
        let range = FrameRange::new(FrameIndex(0), self.duration())?;
        self.render_range(range, compositor)
    }

    /// Render `range` into `compositor` in strictly increasing frame order.
    ///
    /// An empty range still runs `begin` and `end` with no frames between.
    #[tracing::instrument(skip(self, compositor))]
    pub fn render_range(
        &self,
        range: FrameRange,
        compositor: &mut dyn FrameCompositor,
    ) -> ReelResult<()> {
        if range.end.0 > self.duration().0 {
            return Err(ReelError::validation(
                "render range exceeds timeline duration",
            ));
        }

        compositor.begin(self.compositor_config())?;
        for f in range.start.0..range.end.0 {
            let graph = self.eval_frame(FrameIndex(f))?;
            compositor.compose_frame(&graph)?;
        }
        compositor.end()
    }
}
