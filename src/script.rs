use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;

use crate::error::{ReelError, ReelResult};

/// JSON-facing script document.
///
/// This is the human- or machine-edited representation of one short video:
/// an ordered list of scenes plus an optional background audio track and an
/// optional global color-grade override. Wire names are camelCase to match
/// the script documents produced by upstream tooling.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Script {
    pub scenes: Vec<Scene>,
    /// Background audio reference, resolved by the caller's asset layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    /// Color grade applied uniformly to every image layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_style: Option<FilterStyle>,
}

/// One scene: a still image, a caption, timing, and an optional motion tag.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    /// Image reference. Scenes without one render their caption only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Caption text overlaid on the scene.
    #[serde(default)]
    pub text: String,
    #[serde(flatten)]
    pub timing: SceneTiming,
    /// Explicit motion tag. Only honored by timestamped scenes; frame-duration
    /// scripts assign motion cyclically by scene index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation_style: Option<MotionTag>,
}

/// Scene timing, one of two mutually exclusive wire shapes.
///
/// Variant resolution happens at parse time: a scene carrying both
/// `timestampStart` and `timestampEnd` is timestamped, anything else is a
/// frame-duration scene (missing `durationInFrames` reads as 0 and resolves
/// to the default scene length when the timeline is built). A script must use
/// one shape throughout; [`Script::validate`] rejects mixtures.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum SceneTiming {
    /// Wall-clock placement in seconds, converted at the output frame rate.
    Timestamps {
        #[serde(rename = "timestampStart")]
        timestamp_start: f64,
        #[serde(rename = "timestampEnd")]
        timestamp_end: f64,
    },
    /// Explicit frame duration; 0 means "use the default scene length".
    Frames {
        #[serde(rename = "durationInFrames", default)]
        duration_in_frames: u64,
    },
}

/// Per-scene motion tag as written in timestamped scripts.
///
/// Unrecognized tags deserialize to [`MotionTag::Unknown`] and fall back to
/// the default gentle zoom instead of failing the whole script.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionTag {
    ZoomIn,
    ZoomInSlow,
    ZoomOut,
    ZoomOutSlow,
    PanRight,
    PanLeft,
    #[serde(other)]
    Unknown,
}

/// Cosmetic color grade applied uniformly to image layers.
///
/// Accepts two wire forms: a field object, or the CSS-ish string form used by
/// older scripts (`"sepia(0.3) contrast(1.1) brightness(0.9) grayscale(0.2)"`).
/// `Display` renders the string form for the compositor.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct FilterStyle {
    pub sepia: f64,
    pub contrast: f64,
    pub brightness: f64,
    pub grayscale: f64,
}

impl FilterStyle {
    /// The no-op grade: every component at its neutral value.
    pub fn identity() -> Self {
        Self {
            sepia: 0.0,
            contrast: 1.0,
            brightness: 1.0,
            grayscale: 0.0,
        }
    }
}

impl Default for FilterStyle {
    /// The house grade that harmonizes generated and real source imagery.
    fn default() -> Self {
        Self {
            sepia: 0.3,
            contrast: 1.1,
            brightness: 0.9,
            grayscale: 0.2,
        }
    }
}

impl fmt::Display for FilterStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sepia({}) contrast({}) brightness({}) grayscale({})",
            self.sepia, self.contrast, self.brightness, self.grayscale
        )
    }
}

impl FromStr for FilterStyle {
    type Err = ReelError;

    /// Parse the CSS-ish string form. Components not named keep their neutral
    /// value; unknown function names are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut style = Self::identity();
        for token in s.split_whitespace() {
            let Some((name, rest)) = token.split_once('(') else {
                return Err(ReelError::validation(format!(
                    "malformed filter component '{token}'"
                )));
            };
            let Some(value) = rest.strip_suffix(')') else {
                return Err(ReelError::validation(format!(
                    "malformed filter component '{token}'"
                )));
            };
            let value: f64 = value.trim().parse().map_err(|_| {
                ReelError::validation(format!("filter component '{name}' has a non-numeric value"))
            })?;
            match name {
                "sepia" => style.sepia = value,
                "contrast" => style.contrast = value,
                "brightness" => style.brightness = value,
                "grayscale" => style.grayscale = value,
                other => {
                    return Err(ReelError::validation(format!(
                        "unknown filter function '{other}'"
                    )));
                }
            }
        }
        Ok(style)
    }
}

impl<'de> serde::Deserialize<'de> for FilterStyle {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        fn neutral_one() -> f64 {
            1.0
        }

        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Css(String),
            Obj {
                #[serde(default)]
                sepia: f64,
                #[serde(default = "neutral_one")]
                contrast: f64,
                #[serde(default = "neutral_one")]
                brightness: f64,
                #[serde(default)]
                grayscale: f64,
            },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Css(s) => s.parse().map_err(serde::de::Error::custom),
            Repr::Obj {
                sepia,
                contrast,
                brightness,
                grayscale,
            } => Ok(Self {
                sepia,
                contrast,
                brightness,
                grayscale,
            }),
        }
    }
}

impl Script {
    /// Parse a script from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ReelResult<Self> {
        let script: Script = serde_json::from_reader(r)
            .map_err(|e| ReelError::validation(format!("parse script JSON: {e}")))?;
        Ok(script)
    }

    /// Parse a script from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ReelError::validation(format!("open script JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Parse a script from a JSON string.
    pub fn from_json_str(s: &str) -> ReelResult<Self> {
        serde_json::from_str(s).map_err(|e| ReelError::validation(format!("parse script JSON: {e}")))
    }

    /// Validate timing consistency.
    ///
    /// All scenes must use the same timing shape, and timestamped scenes need
    /// finite, non-negative, ordered timestamps. Everything else degrades at
    /// build or evaluation time instead of failing here.
    pub fn validate(&self) -> ReelResult<()> {
        let mut timestamped = 0usize;
        let mut framed = 0usize;

        for (index, scene) in self.scenes.iter().enumerate() {
            match scene.timing {
                SceneTiming::Timestamps {
                    timestamp_start,
                    timestamp_end,
                } => {
                    timestamped += 1;
                    if !timestamp_start.is_finite() || !timestamp_end.is_finite() {
                        return Err(ReelError::validation(format!(
                            "scene {index} has non-finite timestamps"
                        )));
                    }
                    if timestamp_start < 0.0 {
                        return Err(ReelError::validation(format!(
                            "scene {index} starts before 0s"
                        )));
                    }
                    if timestamp_end < timestamp_start {
                        return Err(ReelError::validation(format!(
                            "scene {index} ends before it starts"
                        )));
                    }
                }
                SceneTiming::Frames { .. } => framed += 1,
            }
        }

        if timestamped > 0 && framed > 0 {
            return Err(ReelError::validation(
                "script mixes frame-duration and timestamp scenes",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_frame_duration_scenes() {
        let s = r#"{
            "scenes": [
                { "imageUrl": "images/alto.png", "text": "Xerox Alto", "durationInFrames": 150 },
                { "text": "no image here" }
            ],
            "audioUrl": "audio/track.mp3"
        }"#;
        let script = Script::from_json_str(s).unwrap();
        script.validate().unwrap();

        assert_eq!(script.scenes.len(), 2);
        assert_eq!(
            script.scenes[0].timing,
            SceneTiming::Frames {
                duration_in_frames: 150
            }
        );
        // Missing durationInFrames reads as 0 (resolved to the default later).
        assert_eq!(
            script.scenes[1].timing,
            SceneTiming::Frames {
                duration_in_frames: 0
            }
        );
        assert_eq!(script.scenes[1].image_url, None);
        assert_eq!(script.audio_url.as_deref(), Some("audio/track.mp3"));
        assert_eq!(script.filter_style, None);
    }

    #[test]
    fn parses_timestamped_scenes_with_motion_tags() {
        let s = r#"{
            "scenes": [
                {
                    "imageUrl": "images/a.png",
                    "text": "a",
                    "timestampStart": 0.0,
                    "timestampEnd": 2.5,
                    "animationStyle": "zoom_in_slow"
                },
                {
                    "imageUrl": "images/b.png",
                    "text": "b",
                    "timestampStart": 2.5,
                    "timestampEnd": 5.0,
                    "animationStyle": "whirlwind"
                }
            ]
        }"#;
        let script = Script::from_json_str(s).unwrap();
        script.validate().unwrap();

        assert_eq!(
            script.scenes[0].timing,
            SceneTiming::Timestamps {
                timestamp_start: 0.0,
                timestamp_end: 2.5
            }
        );
        assert_eq!(script.scenes[0].animation_style, Some(MotionTag::ZoomInSlow));
        assert_eq!(script.scenes[1].animation_style, Some(MotionTag::Unknown));
    }

    #[test]
    fn validate_rejects_mixed_timing_shapes() {
        let s = r#"{
            "scenes": [
                { "text": "a", "durationInFrames": 90 },
                { "text": "b", "timestampStart": 0.0, "timestampEnd": 3.0 }
            ]
        }"#;
        let script = Script::from_json_str(s).unwrap();
        assert!(script.validate().is_err());
    }

    #[test]
    fn validate_rejects_inverted_and_negative_timestamps() {
        let inverted = Script {
            scenes: vec![Scene {
                image_url: None,
                text: String::new(),
                timing: SceneTiming::Timestamps {
                    timestamp_start: 5.0,
                    timestamp_end: 2.0,
                },
                animation_style: None,
            }],
            audio_url: None,
            filter_style: None,
        };
        assert!(inverted.validate().is_err());

        let negative = Script {
            scenes: vec![Scene {
                image_url: None,
                text: String::new(),
                timing: SceneTiming::Timestamps {
                    timestamp_start: -1.0,
                    timestamp_end: 2.0,
                },
                animation_style: None,
            }],
            audio_url: None,
            filter_style: None,
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn filter_style_accepts_both_wire_forms() {
        let from_obj: FilterStyle =
            serde_json::from_str(r#"{ "sepia": 0.5, "grayscale": 1.0 }"#).unwrap();
        assert_eq!(from_obj.sepia, 0.5);
        assert_eq!(from_obj.contrast, 1.0);
        assert_eq!(from_obj.brightness, 1.0);
        assert_eq!(from_obj.grayscale, 1.0);

        let from_str: FilterStyle =
            serde_json::from_str(r#""sepia(0.3) contrast(1.1) brightness(0.9) grayscale(0.2)""#)
                .unwrap();
        assert_eq!(from_str, FilterStyle::default());
    }

    #[test]
    fn filter_style_display_matches_css_form() {
        assert_eq!(
            FilterStyle::default().to_string(),
            "sepia(0.3) contrast(1.1) brightness(0.9) grayscale(0.2)"
        );
        let roundtrip: FilterStyle = FilterStyle::default().to_string().parse().unwrap();
        assert_eq!(roundtrip, FilterStyle::default());
    }

    #[test]
    fn filter_style_rejects_malformed_strings() {
        assert!("sepia".parse::<FilterStyle>().is_err());
        assert!("sepia(0.3".parse::<FilterStyle>().is_err());
        assert!("sepia(abc)".parse::<FilterStyle>().is_err());
        assert!("vignette(0.5)".parse::<FilterStyle>().is_err());
    }

    #[test]
    fn json_roundtrip() {
        let s = r#"{
            "scenes": [
                { "imageUrl": "images/a.png", "text": "a", "durationInFrames": 90 }
            ],
            "audioUrl": "audio/track.mp3",
            "filterStyle": "grayscale(1)"
        }"#;
        let script = Script::from_json_str(s).unwrap();
        let encoded = serde_json::to_string(&script).unwrap();
        let decoded = Script::from_json_str(&encoded).unwrap();
        assert_eq!(decoded.scenes.len(), 1);
        assert_eq!(
            decoded.scenes[0].timing,
            SceneTiming::Frames {
                duration_in_frames: 90
            }
        );
        assert_eq!(decoded.filter_style.unwrap().grayscale, 1.0);
    }
}
