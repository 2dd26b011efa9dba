use crate::models::launch::LogTarget;
use std::fmt;
use std::str::FromStr;

/// Output container for a movie-capture render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderOutputFormat {
    Jpg,
    Bmp,
    #[default]
    Png,
    Video,
}

impl RenderOutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jpg => "jpg",
            Self::Bmp => "bmp",
            Self::Png => "png",
            Self::Video => "video",
        }
    }
}

impl fmt::Display for RenderOutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenderOutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jpg" => Ok(Self::Jpg),
            "bmp" => Ok(Self::Bmp),
            "png" => Ok(Self::Png),
            "video" => Ok(Self::Video),
            other => Err(format!(
                "unknown render output format \"{other}\" (expected jpg, bmp, png or video)"
            )),
        }
    }
}

/// Parameters for a movie-capture render of one level sequence.
///
/// Frame numbers of zero mean "unset": no start/end frame token is emitted
/// and the sequence's own range applies.
#[derive(Debug, Clone)]
pub struct RenderSettings {
    pub map_path: String,
    pub sequence_path: String,
    pub output_folder: String,
    pub output_name: String,
    pub output_format: RenderOutputFormat,
    pub start_frame: u32,
    pub end_frame: u32,
    pub res_x: u32,
    pub res_y: u32,
    pub frame_rate: u32,
    pub quality: u32,
    pub warmup_frames: u32,
    pub delay_frames: u32,
    pub delay_before_shot_frames: u32,
    pub delay_every_frame_frames: u32,
    /// Preview renders drop vsync for speed.
    pub preview: bool,
    pub shot: Option<String>,
    pub use_burn_in: bool,
    pub write_edit_decision_list: Option<String>,
    pub write_final_cut_xml: Option<String>,
    pub log: LogTarget,
}

impl RenderSettings {
    pub fn new(map_path: impl Into<String>, sequence_path: impl Into<String>) -> Self {
        Self {
            map_path: map_path.into(),
            sequence_path: sequence_path.into(),
            output_folder: "render".to_string(),
            output_name: "Render.{frame}".to_string(),
            output_format: RenderOutputFormat::Png,
            start_frame: 0,
            end_frame: 0,
            res_x: 1920,
            res_y: 1080,
            frame_rate: 30,
            quality: 100,
            warmup_frames: 30,
            delay_frames: 30,
            delay_before_shot_frames: 0,
            delay_every_frame_frames: 0,
            preview: false,
            shot: None,
            use_burn_in: false,
            write_edit_decision_list: None,
            write_final_cut_xml: None,
            log: LogTarget::Window,
        }
    }
}
