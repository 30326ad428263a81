//! ClipInfo (`CLIPINF/*.clpi`) program table parsing.

use crate::error::Result;
use crate::reader::BinaryReader;
use crate::types::{
    AspectRatio, ChannelLayout, FrameRate, Language, SampleRate, StreamAttributes,
    StreamCategory, StreamDescriptor, StreamType, Version, VideoFormat,
};
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use tracing::{debug, trace};

const CLIPINFO_MAGIC: &str = "HDMV";

/// Parsed ClipInfo header and program table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct ClipInfo {
    pub version: Version,
    /// Offset of the SequenceInfo block (not parsed).
    pub sequence_info_addr: u32,
    pub program_info_addr: u32,
    /// Streams in on-disk order.
    pub streams: Vec<StreamDescriptor>,
}

impl ClipInfo {
    /// First stream with the given PID.
    pub fn find_stream(&self, pid: u16) -> Option<&StreamDescriptor> {
        self.streams.iter().find(|s| s.pid == pid)
    }

    pub fn streams_of(&self, category: StreamCategory) -> impl Iterator<Item = &StreamDescriptor> {
        self.streams.iter().filter(move |s| s.category() == category)
    }
}

/// Reader over a ClipInfo source positioned at its header.
pub struct ClipInfoReader<R> {
    reader: BinaryReader<R>,
}

impl<R: Read + Seek> ClipInfoReader<R> {
    pub fn new(source: R) -> Result<Self> {
        Ok(Self {
            reader: BinaryReader::new(source)?,
        })
    }

    /// Parse the header and every stream record of the program table.
    pub fn read_info(&mut self) -> Result<ClipInfo> {
        let r = &mut self.reader;

        r.expect_tag(CLIPINFO_MAGIC)?;
        let version = Version::from_tag(r.read_array()?)?;
        let sequence_info_addr = r.read_u32()?;
        let program_info_addr = r.read_u32()?;

        r.seek(u64::from(program_info_addr))?;
        let _length = r.read_u32()?;
        r.skip(1)?;
        let sequence_count = r.read_u8()?;

        let mut streams = Vec::new();
        for seq in 0..sequence_count {
            let _spn_program_sequence_start = r.read_u32()?;
            let _program_map_pid = r.read_u16()?;
            let stream_count = r.read_u8()?;
            r.skip(1)?;
            trace!("Program sequence {}: {} streams", seq, stream_count);

            for _ in 0..stream_count {
                let pid = r.read_u16()?;
                let stream = r.read_record(|body| read_stream_coding_info(body, pid))?;
                trace!("{}", stream);
                streams.push(stream);
            }
        }

        debug!(
            "ClipInfo {}: {} program sequences, {} streams",
            version,
            sequence_count,
            streams.len()
        );

        Ok(ClipInfo {
            version,
            sequence_info_addr,
            program_info_addr,
            streams,
        })
    }

    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }
}

/// Body of one StreamCodingInfo record; the caller skips whatever is left.
fn read_stream_coding_info<R: Read + Seek>(
    r: &mut BinaryReader<R>,
    pid: u16,
) -> Result<StreamDescriptor> {
    let stream_type = StreamType::from(r.read_u8()?);

    let attributes = match stream_type.category() {
        StreamCategory::Video => {
            let format_rate = r.read_u8()?;
            let aspect = r.read_u8()?;
            StreamAttributes::Video {
                format: VideoFormat::from_nibble(format_rate >> 4),
                frame_rate: FrameRate::from_nibble(format_rate),
                aspect_ratio: AspectRatio::from_nibble(aspect >> 4),
            }
        }
        StreamCategory::Audio => {
            let layout_rate = r.read_u8()?;
            let language = Language::from_code(r.read_array()?);
            StreamAttributes::Audio {
                channel_layout: ChannelLayout::from_nibble(layout_rate >> 4),
                sample_rate: SampleRate::from_nibble(layout_rate),
                language,
            }
        }
        StreamCategory::Graphics => StreamAttributes::Graphics {
            language: Language::from_code(r.read_array()?),
        },
        StreamCategory::Subtitle => {
            // character code
            r.skip(1)?;
            StreamAttributes::Subtitle {
                language: Language::from_code(r.read_array()?),
            }
        }
        StreamCategory::Unknown => StreamAttributes::None,
    };

    Ok(StreamDescriptor {
        pid,
        stream_type,
        attributes,
    })
}

/// Open and parse a ClipInfo file.
pub fn read_clip_info<P: AsRef<Path>>(path: P) -> Result<ClipInfo> {
    let path = path.as_ref();
    debug!("Reading ClipInfo {:?}", path);
    let file = File::open(path)?;
    ClipInfoReader::new(BufReader::new(file))?.read_info()
}
