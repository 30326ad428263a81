//! Text and JSON views of parsed disc and stream structures.

use discprobe_bdmv::{
    ClipInfo, ClipName, DiscLayout, MainMovie, Playlist, PlaylistSummary, StreamDescriptor,
};
use discprobe_nal::{Framing, NalScanner, NalUnit, NalUnitType};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Units of one elementary stream plus how often each type occurs.
#[derive(Debug, Clone, Serialize)]
pub struct NalReport {
    pub framing: Framing,
    pub units: Vec<NalUnit>,
    pub counts: Vec<TypeCount>,
    /// Error that stopped the scan; `units` holds everything before it.
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeCount {
    pub code: u8,
    pub name: String,
    pub count: usize,
}

impl NalReport {
    /// Scan `buffer` to the end or to the first malformed unit.
    pub fn scan(buffer: &[u8], framing: Framing) -> discprobe_nal::Result<Self> {
        let scanner = NalScanner::new(buffer, framing)?;

        let mut units = Vec::new();
        let mut error = None;
        for unit in scanner {
            match unit {
                Ok(unit) => units.push(unit),
                Err(e) => {
                    tracing::warn!("NAL scan stopped: {}", e);
                    error = Some(e.to_string());
                    break;
                }
            }
        }

        Ok(Self {
            framing,
            counts: count_types(&units),
            units,
            error,
        })
    }
}

impl fmt::Display for NalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.framing {
            Framing::AnnexB => writeln!(f, "Framing: Annex-B")?,
            Framing::LengthPrefixed(size) => {
                writeln!(f, "Framing: length-prefixed ({} bytes)", size)?
            }
        }
        writeln!(f, "Units: {}", self.units.len())?;

        for (i, unit) in self.units.iter().enumerate() {
            writeln!(
                f,
                "  [{}] offset {} size {} ref_idc {} {}{}",
                i,
                unit.start_offset,
                unit.data_len(),
                unit.nal_ref_idc,
                unit.nal_unit_type,
                if unit.forbidden_bit { " [forbidden bit]" } else { "" }
            )?;
        }

        if !self.counts.is_empty() {
            writeln!(f, "\nSummary:")?;
            for count in &self.counts {
                writeln!(f, "  {} ({}): {}", count.name, count.code, count.count)?;
            }
        }

        if let Some(ref error) = self.error {
            writeln!(f, "\nStopped: {}", error)?;
        }
        Ok(())
    }
}

fn count_types(units: &[NalUnit]) -> Vec<TypeCount> {
    let mut counts: BTreeMap<u8, (NalUnitType, usize)> = BTreeMap::new();
    for unit in units {
        counts
            .entry(unit.nal_unit_type.code())
            .or_insert((unit.nal_unit_type, 0))
            .1 += 1;
    }

    counts
        .into_iter()
        .map(|(code, (kind, count))| TypeCount {
            code,
            name: kind.to_string(),
            count,
        })
        .collect()
}

/// Text view of a ClipInfo program table.
pub struct ClipInfoView<'a>(pub &'a ClipInfo);

impl fmt::Display for ClipInfoView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let info = self.0;
        writeln!(f, "Version: {}", info.version)?;
        writeln!(f, "Streams: {}", info.streams.len())?;
        for stream in &info.streams {
            writeln!(f, "  {}", stream)?;
        }
        Ok(())
    }
}

/// Text view of a playlist, optionally with its chapter marks.
pub struct PlaylistView<'a> {
    pub playlist: &'a Playlist,
    pub chapters: bool,
}

impl fmt::Display for PlaylistView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let playlist = self.playlist;
        writeln!(f, "Version: {}", playlist.version)?;
        writeln!(f, "Duration: {}", playlist.duration)?;
        writeln!(
            f,
            "Items: {} of {} declared",
            playlist.items.len(),
            playlist.declared_items
        )?;
        for (i, item) in playlist.items.iter().enumerate() {
            writeln!(
                f,
                "  [{}] {} {} -> {} ({})",
                i,
                item.clip_name,
                item.in_time,
                item.out_time,
                item.duration()
            )?;
        }

        if self.chapters {
            writeln!(f, "\nChapters: {}", playlist.marks.len())?;
            for (i, mark) in playlist.marks.iter().enumerate() {
                writeln!(f, "  [{}] {} (item {})", i + 1, mark.time, mark.item_index)?;
            }
        }
        Ok(())
    }
}

/// One line per candidate playlist.
pub struct PlaylistsView<'a>(pub &'a [PlaylistSummary]);

impl fmt::Display for PlaylistsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for summary in self.0 {
            let name = summary
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| summary.path.display().to_string());

            match (&summary.duration, &summary.error) {
                (Some(duration), _) => {
                    writeln!(f, "{}  {}  {} items", name, duration, summary.items)?
                }
                (None, Some(error)) => writeln!(f, "{}  error: {}", name, error)?,
                (None, None) => writeln!(f, "{}", name)?,
            }
        }
        Ok(())
    }
}

/// Streams of one main-movie segment, read from its ClipInfo file.
#[derive(Debug, Clone, Serialize)]
pub struct SegmentStreams {
    pub clip: ClipName,
    pub streams: Vec<StreamDescriptor>,
    pub error: Option<String>,
}

impl SegmentStreams {
    /// Read the ClipInfo of every distinct segment, keeping play order.
    pub fn collect(layout: &DiscLayout, movie: &MainMovie) -> Vec<Self> {
        let mut seen = Vec::new();
        let mut segments = Vec::new();
        for clip in &movie.segments {
            if seen.contains(clip) {
                continue;
            }
            seen.push(*clip);

            let path = layout.clip_info_path(clip);
            let segment = match discprobe_bdmv::read_clip_info(&path) {
                Ok(info) => SegmentStreams {
                    clip: *clip,
                    streams: info.streams,
                    error: None,
                },
                Err(e) => {
                    tracing::warn!("Cannot read ClipInfo {:?}: {}", path, e);
                    SegmentStreams {
                        clip: *clip,
                        streams: Vec::new(),
                        error: Some(e.to_string()),
                    }
                }
            };
            segments.push(segment);
        }
        segments
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MainMovieReport {
    #[serde(flatten)]
    pub movie: MainMovie,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streams: Option<Vec<SegmentStreams>>,
}

impl fmt::Display for MainMovieReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let movie = &self.movie;
        writeln!(f, "Main movie: {}", movie.playlist_path.display())?;
        writeln!(f, "Duration: {}", movie.total_duration)?;
        let segments: Vec<String> = movie.segments.iter().map(|s| s.to_string()).collect();
        writeln!(f, "Segments: {}", segments.join(", "))?;

        if let Some(ref streams) = self.streams {
            for segment in streams {
                writeln!(f, "\n{}:", segment.clip)?;
                if let Some(ref error) = segment.error {
                    writeln!(f, "  unreadable: {}", error)?;
                }
                for stream in &segment.streams {
                    writeln!(f, "  {}", stream)?;
                }
            }
        }
        Ok(())
    }
}

/// Print a view under a `File:` header line.
pub fn print_with_file<T: fmt::Display>(path: &Path, view: T) {
    println!("File: {}", path.display());
    print!("{}", view);
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use discprobe_bdmv::{PlaylistItem, PlaylistMark, ReferenceTime, Version};
    use discprobe_nal::NalError;
    use std::path::PathBuf;

    #[test]
    fn test_nal_report_counts_types() {
        let data = [
            0x00, 0x00, 0x01, 0x67, 0x42, // SPS
            0x00, 0x00, 0x01, 0x68, 0xCE, // PPS
            0x00, 0x00, 0x01, 0x65, 0x88, // IDR
            0x00, 0x00, 0x01, 0x41, 0x9A, // slice
            0x00, 0x00, 0x01, 0x41, 0x9B, // slice
        ];
        let report = NalReport::scan(&data, Framing::AnnexB).unwrap();

        assert_eq!(report.units.len(), 5);
        assert!(report.error.is_none());
        let counts: Vec<(u8, usize)> = report.counts.iter().map(|c| (c.code, c.count)).collect();
        assert_eq!(counts, [(1, 2), (5, 1), (7, 1), (8, 1)]);

        let text = report.to_string();
        assert!(text.contains("Framing: Annex-B"));
        assert!(text.contains("SPS (7): 1"));
        assert!(text.contains("Slice (1): 2"));
    }

    #[test]
    fn test_nal_report_keeps_units_before_error() {
        // second length prefix overruns the buffer
        let data = [0x00, 0x02, 0x09, 0xF0, 0x00, 0x10, 0x67];
        let report = NalReport::scan(&data, Framing::LengthPrefixed(2)).unwrap();

        assert_eq!(report.units.len(), 1);
        assert!(report.error.is_some());
        assert!(report.to_string().contains("Stopped:"));
    }

    #[test]
    fn test_invalid_length_size() {
        assert_matches!(
            NalReport::scan(&[], Framing::LengthPrefixed(7)),
            Err(NalError::InvalidLengthSize(7))
        );
    }

    #[test]
    fn test_render_main_movie() {
        let item = PlaylistItem {
            clip_name: ClipName(*b"00020"),
            in_time: ReferenceTime::ZERO,
            out_time: ReferenceTime::from_secs(45),
        };
        let report = MainMovieReport {
            movie: MainMovie {
                playlist_path: PathBuf::from("/disc/BDMV/PLAYLIST/00002.mpls"),
                total_duration: item.duration(),
                segments: vec![item.clip_name],
                items: vec![item],
            },
            streams: None,
        };

        let text = report.to_string();
        assert!(text.contains("Main movie: /disc/BDMV/PLAYLIST/00002.mpls"));
        assert!(text.contains("Duration: 0:00:45.000"));
        assert!(text.contains("Segments: 00020"));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["total_duration"], 450_000_000u64);
        assert_eq!(json["segments"][0], "00020");
        assert!(json.get("streams").is_none());
    }

    #[test]
    fn test_render_playlists() {
        let summaries = vec![
            PlaylistSummary {
                path: PathBuf::from("/d/00001.mpls"),
                duration: Some(ReferenceTime::from_secs(10)),
                items: 1,
                error: None,
            },
            PlaylistSummary {
                path: PathBuf::from("/d/00002.mpls"),
                duration: None,
                items: 0,
                error: Some("Bad magic".to_string()),
            },
        ];
        let text = PlaylistsView(&summaries).to_string();
        assert!(text.contains("00001.mpls  0:00:10.000  1 items"));
        assert!(text.contains("00002.mpls  error: Bad magic"));
    }

    #[test]
    fn test_playlist_view_with_chapters() {
        let item = PlaylistItem {
            clip_name: ClipName(*b"00001"),
            in_time: ReferenceTime::from_secs(10),
            out_time: ReferenceTime::from_secs(70),
        };
        let playlist = Playlist {
            version: Version::V0200,
            duration: item.duration(),
            declared_items: 1,
            items: vec![item],
            marks: vec![PlaylistMark {
                item_index: 0,
                entry_pid: 0x1011,
                time: ReferenceTime::from_secs(30),
            }],
        };

        let text = PlaylistView {
            playlist: &playlist,
            chapters: true,
        }
        .to_string();
        assert!(text.contains("Duration: 0:01:00.000"));
        assert!(text.contains("[0] 00001 0:00:10.000 -> 0:01:10.000 (0:01:00.000)"));
        assert!(text.contains("[1] 0:00:30.000 (item 0)"));

        let without = PlaylistView {
            playlist: &playlist,
            chapters: false,
        }
        .to_string();
        assert!(!without.contains("Chapters"));
    }
}
