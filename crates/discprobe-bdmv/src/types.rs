//! Stream descriptors and the small closed enums packed into ClipInfo records.

use crate::error::{BdmvError, Result};
use crate::language::iso6392_to_lcid;
use std::borrow::Cow;
use std::fmt;

/// BDMV file format version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub enum Version {
    V0100,
    V0200,
}

impl Version {
    pub fn from_tag(tag: [u8; 4]) -> Result<Self> {
        match &tag {
            b"0100" => Ok(Version::V0100),
            b"0200" => Ok(Version::V0200),
            _ => Err(BdmvError::UnsupportedVersion(
                String::from_utf8_lossy(&tag).into_owned(),
            )),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Version::V0100 => f.write_str("0100"),
            Version::V0200 => f.write_str("0200"),
        }
    }
}

/// Broad class of an elementary stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub enum StreamCategory {
    Video,
    Audio,
    Graphics,
    Subtitle,
    Unknown,
}

/// Stream coding type tag from the ClipInfo program table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub enum StreamType {
    VideoMpeg1,
    VideoMpeg2,
    VideoH264,
    VideoVc1,
    AudioMpeg1,
    AudioMpeg2,
    AudioLpcm,
    AudioAc3,
    AudioDts,
    AudioTrueHd,
    AudioAc3Plus,
    AudioDtsHd,
    AudioDtsHdMaster,
    AudioAc3PlusSecondary,
    AudioDtsHdSecondary,
    PresentationGraphics,
    InteractiveGraphics,
    TextSubtitle,
    Unknown(u8),
}

impl StreamType {
    pub fn tag(self) -> u8 {
        match self {
            StreamType::VideoMpeg1 => 0x01,
            StreamType::VideoMpeg2 => 0x02,
            StreamType::VideoH264 => 0x1B,
            StreamType::VideoVc1 => 0xEA,
            StreamType::AudioMpeg1 => 0x03,
            StreamType::AudioMpeg2 => 0x04,
            StreamType::AudioLpcm => 0x80,
            StreamType::AudioAc3 => 0x81,
            StreamType::AudioDts => 0x82,
            StreamType::AudioTrueHd => 0x83,
            StreamType::AudioAc3Plus => 0x84,
            StreamType::AudioDtsHd => 0x85,
            StreamType::AudioDtsHdMaster => 0x86,
            StreamType::AudioAc3PlusSecondary => 0xA1,
            StreamType::AudioDtsHdSecondary => 0xA2,
            StreamType::PresentationGraphics => 0x90,
            StreamType::InteractiveGraphics => 0x91,
            StreamType::TextSubtitle => 0x92,
            StreamType::Unknown(tag) => tag,
        }
    }

    pub fn category(self) -> StreamCategory {
        match self {
            StreamType::VideoMpeg1
            | StreamType::VideoMpeg2
            | StreamType::VideoH264
            | StreamType::VideoVc1 => StreamCategory::Video,
            StreamType::AudioMpeg1
            | StreamType::AudioMpeg2
            | StreamType::AudioLpcm
            | StreamType::AudioAc3
            | StreamType::AudioDts
            | StreamType::AudioTrueHd
            | StreamType::AudioAc3Plus
            | StreamType::AudioDtsHd
            | StreamType::AudioDtsHdMaster
            | StreamType::AudioAc3PlusSecondary
            | StreamType::AudioDtsHdSecondary => StreamCategory::Audio,
            StreamType::PresentationGraphics | StreamType::InteractiveGraphics => {
                StreamCategory::Graphics
            }
            StreamType::TextSubtitle => StreamCategory::Subtitle,
            StreamType::Unknown(_) => StreamCategory::Unknown,
        }
    }

    /// Human-readable codec name.
    pub fn name(self) -> &'static str {
        match self {
            StreamType::VideoMpeg1 => "MPEG-1 Video",
            StreamType::VideoMpeg2 => "MPEG-2 Video",
            StreamType::VideoH264 => "H.264",
            StreamType::VideoVc1 => "VC-1",
            StreamType::AudioMpeg1 => "MPEG-1 Audio",
            StreamType::AudioMpeg2 => "MPEG-2 Audio",
            StreamType::AudioLpcm => "LPCM",
            StreamType::AudioAc3 => "Dolby Digital",
            StreamType::AudioDts => "DTS",
            StreamType::AudioTrueHd => "Dolby TrueHD",
            StreamType::AudioAc3Plus => "Dolby Digital Plus",
            StreamType::AudioDtsHd => "DTS-HD High Resolution",
            StreamType::AudioDtsHdMaster => "DTS-HD Master Audio",
            StreamType::AudioAc3PlusSecondary => "Dolby Digital Plus (secondary)",
            StreamType::AudioDtsHdSecondary => "DTS-HD (secondary)",
            StreamType::PresentationGraphics => "Presentation Graphics",
            StreamType::InteractiveGraphics => "Interactive Graphics",
            StreamType::TextSubtitle => "Text Subtitle",
            StreamType::Unknown(_) => "Unknown",
        }
    }
}

impl From<u8> for StreamType {
    fn from(tag: u8) -> Self {
        match tag {
            0x01 => StreamType::VideoMpeg1,
            0x02 => StreamType::VideoMpeg2,
            0x1B => StreamType::VideoH264,
            0xEA => StreamType::VideoVc1,
            0x03 => StreamType::AudioMpeg1,
            0x04 => StreamType::AudioMpeg2,
            0x80 => StreamType::AudioLpcm,
            0x81 => StreamType::AudioAc3,
            0x82 => StreamType::AudioDts,
            0x83 => StreamType::AudioTrueHd,
            0x84 => StreamType::AudioAc3Plus,
            0x85 => StreamType::AudioDtsHd,
            0x86 => StreamType::AudioDtsHdMaster,
            0xA1 => StreamType::AudioAc3PlusSecondary,
            0xA2 => StreamType::AudioDtsHdSecondary,
            0x90 => StreamType::PresentationGraphics,
            0x91 => StreamType::InteractiveGraphics,
            0x92 => StreamType::TextSubtitle,
            other => StreamType::Unknown(other),
        }
    }
}

impl fmt::Display for StreamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamType::Unknown(tag) => write!(f, "Unknown (0x{:02X})", tag),
            other => f.write_str(other.name()),
        }
    }
}

/// Video format code (high nibble of the first video attribute byte).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub enum VideoFormat {
    Interlaced480,
    Interlaced576,
    Progressive480,
    Interlaced1080,
    Progressive720,
    Progressive1080,
    Progressive576,
    Unknown(u8),
}

impl VideoFormat {
    pub fn from_nibble(value: u8) -> Self {
        match value & 0x0F {
            1 => VideoFormat::Interlaced480,
            2 => VideoFormat::Interlaced576,
            3 => VideoFormat::Progressive480,
            4 => VideoFormat::Interlaced1080,
            5 => VideoFormat::Progressive720,
            6 => VideoFormat::Progressive1080,
            7 => VideoFormat::Progressive576,
            other => VideoFormat::Unknown(other),
        }
    }

    /// Frame height in lines.
    pub fn height(self) -> Option<u32> {
        match self {
            VideoFormat::Interlaced480 | VideoFormat::Progressive480 => Some(480),
            VideoFormat::Interlaced576 | VideoFormat::Progressive576 => Some(576),
            VideoFormat::Progressive720 => Some(720),
            VideoFormat::Interlaced1080 | VideoFormat::Progressive1080 => Some(1080),
            VideoFormat::Unknown(_) => None,
        }
    }

    pub fn is_interlaced(self) -> bool {
        matches!(
            self,
            VideoFormat::Interlaced480 | VideoFormat::Interlaced576 | VideoFormat::Interlaced1080
        )
    }
}

impl fmt::Display for VideoFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.height() {
            Some(h) => write!(f, "{}{}", h, if self.is_interlaced() { "i" } else { "p" }),
            None => f.write_str("unknown"),
        }
    }
}

/// Frame rate code (low nibble of the first video attribute byte).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub enum FrameRate {
    Fps23_976,
    Fps24,
    Fps25,
    Fps29_97,
    Fps50,
    Fps59_94,
    Unknown(u8),
}

impl FrameRate {
    pub fn from_nibble(value: u8) -> Self {
        match value & 0x0F {
            1 => FrameRate::Fps23_976,
            2 => FrameRate::Fps24,
            3 => FrameRate::Fps25,
            4 => FrameRate::Fps29_97,
            6 => FrameRate::Fps50,
            7 => FrameRate::Fps59_94,
            other => FrameRate::Unknown(other),
        }
    }

    pub fn as_f64(self) -> Option<f64> {
        match self {
            FrameRate::Fps23_976 => Some(24000.0 / 1001.0),
            FrameRate::Fps24 => Some(24.0),
            FrameRate::Fps25 => Some(25.0),
            FrameRate::Fps29_97 => Some(30000.0 / 1001.0),
            FrameRate::Fps50 => Some(50.0),
            FrameRate::Fps59_94 => Some(60000.0 / 1001.0),
            FrameRate::Unknown(_) => None,
        }
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_f64() {
            Some(fps) => write!(f, "{:.3} fps", fps),
            None => f.write_str("unknown"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub enum AspectRatio {
    Ratio4x3,
    Ratio16x9,
    Unknown(u8),
}

impl AspectRatio {
    pub fn from_nibble(value: u8) -> Self {
        match value & 0x0F {
            2 => AspectRatio::Ratio4x3,
            3 => AspectRatio::Ratio16x9,
            other => AspectRatio::Unknown(other),
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AspectRatio::Ratio4x3 => f.write_str("4:3"),
            AspectRatio::Ratio16x9 => f.write_str("16:9"),
            AspectRatio::Unknown(_) => f.write_str("unknown"),
        }
    }
}

/// Audio presentation type (high nibble of the audio attribute byte).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub enum ChannelLayout {
    Mono,
    Stereo,
    Multichannel,
    StereoAndMultichannel,
    Unknown(u8),
}

impl ChannelLayout {
    pub fn from_nibble(value: u8) -> Self {
        match value & 0x0F {
            1 => ChannelLayout::Mono,
            3 => ChannelLayout::Stereo,
            6 => ChannelLayout::Multichannel,
            12 => ChannelLayout::StereoAndMultichannel,
            other => ChannelLayout::Unknown(other),
        }
    }
}

impl fmt::Display for ChannelLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelLayout::Mono => f.write_str("mono"),
            ChannelLayout::Stereo => f.write_str("stereo"),
            ChannelLayout::Multichannel => f.write_str("multichannel"),
            ChannelLayout::StereoAndMultichannel => f.write_str("stereo + multichannel"),
            ChannelLayout::Unknown(_) => f.write_str("unknown"),
        }
    }
}

/// Audio sampling frequency (low nibble of the audio attribute byte).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub enum SampleRate {
    Hz48000,
    Hz96000,
    Hz192000,
    /// 48 kHz core with a 192 kHz extension
    Hz48000And192000,
    /// 48 kHz core with a 96 kHz extension
    Hz48000And96000,
    Unknown(u8),
}

impl SampleRate {
    pub fn from_nibble(value: u8) -> Self {
        match value & 0x0F {
            1 => SampleRate::Hz48000,
            4 => SampleRate::Hz96000,
            5 => SampleRate::Hz192000,
            12 => SampleRate::Hz48000And192000,
            14 => SampleRate::Hz48000And96000,
            other => SampleRate::Unknown(other),
        }
    }

    /// Highest rate carried by the stream.
    pub fn hz(self) -> Option<u32> {
        match self {
            SampleRate::Hz48000 => Some(48_000),
            SampleRate::Hz96000 | SampleRate::Hz48000And96000 => Some(96_000),
            SampleRate::Hz192000 | SampleRate::Hz48000And192000 => Some(192_000),
            SampleRate::Unknown(_) => None,
        }
    }
}

impl fmt::Display for SampleRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleRate::Hz48000And192000 => f.write_str("48/192 kHz"),
            SampleRate::Hz48000And96000 => f.write_str("48/96 kHz"),
            other => match other.hz() {
                Some(hz) => write!(f, "{} kHz", hz / 1000),
                None => f.write_str("unknown"),
            },
        }
    }
}

/// ISO 639-2 language code plus the matching Windows locale identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub code: [u8; 3],
    /// 0 when the code is not in the built-in table.
    pub lcid: u32,
}

impl Language {
    pub fn from_code(code: [u8; 3]) -> Self {
        Self {
            code,
            lcid: iso6392_to_lcid(&code),
        }
    }

    pub fn as_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.code)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str())
    }
}

#[cfg(feature = "serialize")]
impl serde::Serialize for Language {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("Language", 2)?;
        state.serialize_field("code", &self.as_str())?;
        state.serialize_field("lcid", &self.lcid)?;
        state.end()
    }
}

/// Type-specific fields of a stream record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
#[cfg_attr(feature = "serialize", serde(tag = "kind", rename_all = "snake_case"))]
pub enum StreamAttributes {
    Video {
        format: VideoFormat,
        frame_rate: FrameRate,
        aspect_ratio: AspectRatio,
    },
    Audio {
        channel_layout: ChannelLayout,
        sample_rate: SampleRate,
        language: Language,
    },
    Graphics {
        language: Language,
    },
    Subtitle {
        language: Language,
    },
    /// Unknown stream type; the record body was skipped.
    None,
}

/// One elementary stream listed in a ClipInfo program table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct StreamDescriptor {
    pub pid: u16,
    pub stream_type: StreamType,
    pub attributes: StreamAttributes,
}

impl StreamDescriptor {
    pub fn category(&self) -> StreamCategory {
        self.stream_type.category()
    }

    pub fn language(&self) -> Option<&Language> {
        match &self.attributes {
            StreamAttributes::Audio { language, .. }
            | StreamAttributes::Graphics { language }
            | StreamAttributes::Subtitle { language } => Some(language),
            StreamAttributes::Video { .. } | StreamAttributes::None => None,
        }
    }
}

impl fmt::Display for StreamDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PID 0x{:04X} {}", self.pid, self.stream_type)?;
        match &self.attributes {
            StreamAttributes::Video {
                format,
                frame_rate,
                aspect_ratio,
            } => write!(f, ", {} {} {}", format, frame_rate, aspect_ratio),
            StreamAttributes::Audio {
                channel_layout,
                sample_rate,
                language,
            } => write!(f, ", {} {} [{}]", channel_layout, sample_rate, language),
            StreamAttributes::Graphics { language } | StreamAttributes::Subtitle { language } => {
                write!(f, " [{}]", language)
            }
            StreamAttributes::None => Ok(()),
        }
    }
}
