//! Discprobe-BDMV: Blu-ray ClipInfo and playlist parsing
//!
//! Reads the metadata a Blu-ray disc (or a folder copy of one) keeps next to
//! its transport streams and picks the playlist that holds the main movie.
//!
//! # Modules
//!
//! - `reader` - Big-endian reader with bounded length-prefixed records
//! - `clipinfo` - `CLIPINF/*.clpi` program table: PIDs, codecs, languages
//! - `playlist` - `PLAYLIST/*.mpls` play items, durations and chapter marks
//! - `layout` - `BDMV` folder normalization and playlist enumeration
//! - `main_movie` - Longest-playlist selection with a stop signal
//!
//! # Example
//!
//! ```no_run
//! use discprobe_bdmv::{find_main_movie, read_clip_info, DiscLayout};
//!
//! let movie = find_main_movie("/media/disc")?;
//! println!("{:?}: {}", movie.playlist_path, movie.total_duration);
//!
//! let layout = DiscLayout::from_folder("/media/disc");
//! for clip in &movie.segments {
//!     let info = read_clip_info(layout.clip_info_path(clip))?;
//!     for stream in &info.streams {
//!         println!("  {}", stream);
//!     }
//! }
//! # Ok::<(), discprobe_bdmv::BdmvError>(())
//! ```

pub mod clipinfo;
pub mod error;
pub mod language;
pub mod layout;
pub mod main_movie;
pub mod playlist;
pub mod reader;
pub mod time;
pub mod types;

pub use clipinfo::{read_clip_info, ClipInfo, ClipInfoReader};
pub use error::{BdmvError, Result};
pub use language::iso6392_to_lcid;
pub use layout::{is_playlist_file, DiscLayout};
pub use main_movie::{
    find_main_movie, scan_playlists, MainMovie, MainMovieFinder, PlaylistSummary,
    SelectionOptions, TieBreak,
};
pub use playlist::{
    read_chapters, read_playlist, read_playlist_with_limit, ClipName, Playlist, PlaylistItem,
    PlaylistMark, PlaylistReader, DEFAULT_MAX_PLAYLIST_ITEMS,
};
pub use time::ReferenceTime;
pub use types::{
    AspectRatio, ChannelLayout, FrameRate, Language, SampleRate, StreamAttributes,
    StreamCategory, StreamDescriptor, StreamType, Version, VideoFormat,
};
