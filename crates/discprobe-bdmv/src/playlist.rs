//! Movie playlist (`PLAYLIST/*.mpls`) parsing: play items, durations and
//! chapter marks.

use crate::error::{BdmvError, Result};
use crate::reader::BinaryReader;
use crate::time::ReferenceTime;
use crate::types::Version;
use std::borrow::Cow;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use tracing::{debug, trace, warn};

const PLAYLIST_MAGIC: &str = "MPLS";
const CLIP_CODEC_ID: &str = "M2TS";

/// Play items read per playlist when looking for the main movie.
pub const DEFAULT_MAX_PLAYLIST_ITEMS: usize = 5;

/// PlayListMark type for chapter entry points.
const ENTRY_MARK: u8 = 0x01;

/// Five-character clip stem, e.g. `00001` for `STREAM/00001.m2ts`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClipName(pub [u8; 5]);

impl ClipName {
    pub fn as_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }
}

impl fmt::Display for ClipName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str())
    }
}

#[cfg(feature = "serialize")]
impl serde::Serialize for ClipName {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One clip segment of a playlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct PlaylistItem {
    pub clip_name: ClipName,
    pub in_time: ReferenceTime,
    /// Never earlier than `in_time`.
    pub out_time: ReferenceTime,
}

impl PlaylistItem {
    pub fn duration(&self) -> ReferenceTime {
        self.out_time - self.in_time
    }
}

/// Chapter entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct PlaylistMark {
    /// Index of the play item the mark points into.
    pub item_index: u16,
    pub entry_pid: u16,
    /// Offset from the start of the playlist.
    pub time: ReferenceTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct Playlist {
    pub version: Version,
    /// Sum of the durations of `items`.
    pub duration: ReferenceTime,
    /// Item count stored in the file, before any cap.
    pub declared_items: u16,
    pub items: Vec<PlaylistItem>,
    /// Chapter marks; only filled by [`PlaylistReader::read_with_marks`].
    pub marks: Vec<PlaylistMark>,
}

impl Playlist {
    pub fn segments(&self) -> impl Iterator<Item = ClipName> + '_ {
        self.items.iter().map(|item| item.clip_name)
    }
}

struct Header {
    version: Version,
    playlist_start: u64,
    mark_start: u64,
}

/// Reader over a playlist source positioned at its header.
pub struct PlaylistReader<R> {
    reader: BinaryReader<R>,
    max_items: usize,
}

impl<R: Read + Seek> PlaylistReader<R> {
    pub fn new(source: R) -> Result<Self> {
        Ok(Self {
            reader: BinaryReader::new(source)?,
            max_items: DEFAULT_MAX_PLAYLIST_ITEMS,
        })
    }

    /// Cap on the number of play items read by [`read`](Self::read).
    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }

    /// Read up to `max_items` play items and their total duration.
    pub fn read(&mut self) -> Result<Playlist> {
        let header = self.read_header()?;
        let (declared_items, items) =
            self.read_items(header.playlist_start, Some(self.max_items))?;

        Ok(build_playlist(header.version, declared_items, items, Vec::new()))
    }

    /// Read every play item plus the chapter marks.
    pub fn read_with_marks(&mut self) -> Result<Playlist> {
        let header = self.read_header()?;
        let (declared_items, items) = self.read_items(header.playlist_start, None)?;
        let marks = self.read_marks(header.mark_start, &items)?;

        Ok(build_playlist(header.version, declared_items, items, marks))
    }

    fn read_header(&mut self) -> Result<Header> {
        let r = &mut self.reader;
        r.expect_tag(PLAYLIST_MAGIC)?;
        let version = Version::from_tag(r.read_array()?)?;
        let playlist_start = u64::from(r.read_u32()?);
        let mark_start = u64::from(r.read_u32()?);

        Ok(Header {
            version,
            playlist_start,
            mark_start,
        })
    }

    fn read_items(
        &mut self,
        playlist_start: u64,
        cap: Option<usize>,
    ) -> Result<(u16, Vec<PlaylistItem>)> {
        let r = &mut self.reader;
        r.seek(playlist_start)?;
        let _length = r.read_u32()?;
        r.skip(2)?;
        let declared = r.read_u16()?;
        let _sub_path_count = r.read_u16()?;

        let count = cap.map_or(usize::from(declared), |cap| usize::from(declared).min(cap));
        if count < usize::from(declared) {
            debug!("Playlist declares {} play items, reading {}", declared, count);
        }

        let mut offset = playlist_start + 10;
        let mut items = Vec::with_capacity(count);
        for index in 0..count {
            r.seek(offset)?;
            let item = r.read_long_record(|body| read_play_item(body, index))?;
            offset = r.position();
            trace!(
                "Play item {}: {} {} -> {}",
                index,
                item.clip_name,
                item.in_time,
                item.out_time
            );
            items.push(item);
        }

        Ok((declared, items))
    }

    fn read_marks(&mut self, mark_start: u64, items: &[PlaylistItem]) -> Result<Vec<PlaylistMark>> {
        let r = &mut self.reader;
        r.seek(mark_start)?;
        let _length = r.read_u32()?;
        let count = r.read_u16()?;

        let item_starts: Vec<ReferenceTime> = items
            .iter()
            .scan(ReferenceTime::ZERO, |start, item| {
                let this = *start;
                *start += item.duration();
                Some(this)
            })
            .collect();

        let mut marks = Vec::new();
        for _ in 0..count {
            r.skip(1)?;
            let mark_type = r.read_u8()?;
            let item_index = r.read_u16()?;
            let timestamp = ReferenceTime::from_clock(r.read_u32()?);
            let entry_pid = r.read_u16()?;
            let _duration = r.read_u32()?;

            if mark_type != ENTRY_MARK {
                continue;
            }
            let Some(item) = items.get(usize::from(item_index)) else {
                warn!("Playlist mark references missing play item {}", item_index);
                continue;
            };

            marks.push(PlaylistMark {
                item_index,
                entry_pid,
                time: item_starts[usize::from(item_index)] + timestamp.saturating_sub(item.in_time),
            });
        }

        debug!("Read {} chapter marks", marks.len());
        Ok(marks)
    }

    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }
}

fn build_playlist(
    version: Version,
    declared_items: u16,
    items: Vec<PlaylistItem>,
    marks: Vec<PlaylistMark>,
) -> Playlist {
    Playlist {
        version,
        duration: items.iter().map(PlaylistItem::duration).sum(),
        declared_items,
        items,
        marks,
    }
}

/// Body of one PlayItem record.
fn read_play_item<R: Read + Seek>(r: &mut BinaryReader<R>, index: usize) -> Result<PlaylistItem> {
    let clip_name = ClipName(r.read_array()?);
    r.expect_tag(CLIP_CODEC_ID)?;
    // multi-angle flag, connection condition, STC id
    r.skip(3)?;
    let in_time = ReferenceTime::from_clock(r.read_u32()?);
    let out_time = ReferenceTime::from_clock(r.read_u32()?);

    if out_time < in_time {
        return Err(BdmvError::InvalidPlayItem {
            index,
            reason: format!("out time {} precedes in time {}", out_time, in_time),
        });
    }

    Ok(PlaylistItem {
        clip_name,
        in_time,
        out_time,
    })
}

/// Open a playlist and read up to [`DEFAULT_MAX_PLAYLIST_ITEMS`] play items.
pub fn read_playlist<P: AsRef<Path>>(path: P) -> Result<Playlist> {
    read_playlist_with_limit(path, DEFAULT_MAX_PLAYLIST_ITEMS)
}

pub fn read_playlist_with_limit<P: AsRef<Path>>(path: P, max_items: usize) -> Result<Playlist> {
    let path = path.as_ref();
    trace!("Reading playlist {:?}", path);
    let file = File::open(path)?;
    PlaylistReader::new(BufReader::new(file))?
        .with_max_items(max_items)
        .read()
}

/// Open a playlist and read every play item plus its chapter marks.
pub fn read_chapters<P: AsRef<Path>>(path: P) -> Result<Playlist> {
    let file = File::open(path.as_ref())?;
    PlaylistReader::new(BufReader::new(file))?.read_with_marks()
}
