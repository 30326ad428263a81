//! Main-movie detection: the playlist with the longest total duration.

use crate::error::{BdmvError, Result};
use crate::layout::DiscLayout;
use crate::playlist::{read_playlist_with_limit, ClipName, PlaylistItem, DEFAULT_MAX_PLAYLIST_ITEMS};
use crate::time::ReferenceTime;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Which candidate wins when two playlists have the same duration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub enum TieBreak {
    /// Keep the earlier playlist (in file-name order).
    #[default]
    First,
    /// Replace with the later playlist.
    Last,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionOptions {
    /// Play items read per candidate.
    pub max_playlist_items: usize,
    pub tie_break: TieBreak,
}

impl Default for SelectionOptions {
    fn default() -> Self {
        Self {
            max_playlist_items: DEFAULT_MAX_PLAYLIST_ITEMS,
            tie_break: TieBreak::First,
        }
    }
}

/// The selected playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct MainMovie {
    pub playlist_path: PathBuf,
    pub total_duration: ReferenceTime,
    /// Clip stems in play order.
    pub segments: Vec<ClipName>,
    pub items: Vec<PlaylistItem>,
}

/// One candidate seen while scanning a disc.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct PlaylistSummary {
    pub path: PathBuf,
    pub duration: Option<ReferenceTime>,
    pub items: usize,
    /// Why the playlist could not be read.
    pub error: Option<String>,
}

/// Scans the playlists of a disc folder.
#[derive(Debug, Default)]
pub struct MainMovieFinder {
    options: SelectionOptions,
    stop: Arc<AtomicBool>,
}

impl MainMovieFinder {
    pub fn new(options: SelectionOptions) -> Self {
        Self {
            options,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn options(&self) -> &SelectionOptions {
        &self.options
    }

    /// Flag checked between candidates; set it to abort a running scan.
    pub fn stop_signal(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Pick the playlist with the greatest total duration.
    ///
    /// Unreadable playlists are skipped. Fails with `NotFound` when the
    /// `PLAYLIST` folder is missing or no candidate could be read.
    pub fn find<P: AsRef<Path>>(&self, folder: P) -> Result<MainMovie> {
        let folder = folder.as_ref();
        let candidates = self.candidates(folder)?;

        let mut best: Option<MainMovie> = None;
        for path in candidates {
            self.check_stop()?;

            let playlist = match read_playlist_with_limit(&path, self.options.max_playlist_items) {
                Ok(playlist) => playlist,
                Err(e) => {
                    warn!("Skipping playlist {:?}: {}", path, e);
                    continue;
                }
            };
            debug!(
                "Playlist {:?}: {} over {} items",
                path,
                playlist.duration,
                playlist.items.len()
            );

            if playlist.duration == ReferenceTime::ZERO {
                continue;
            }
            let replace = match &best {
                None => true,
                Some(current) => match self.options.tie_break {
                    TieBreak::First => playlist.duration > current.total_duration,
                    TieBreak::Last => playlist.duration >= current.total_duration,
                },
            };
            if replace {
                best = Some(MainMovie {
                    playlist_path: path,
                    total_duration: playlist.duration,
                    segments: playlist.segments().collect(),
                    items: playlist.items,
                });
            }
        }

        let best = best.ok_or_else(|| BdmvError::NotFound(folder.to_path_buf()))?;
        info!(
            "Main movie: {:?} ({}, {} segments)",
            best.playlist_path,
            best.total_duration,
            best.segments.len()
        );
        Ok(best)
    }

    /// Read every candidate playlist and report its duration or error.
    pub fn scan<P: AsRef<Path>>(&self, folder: P) -> Result<Vec<PlaylistSummary>> {
        let candidates = self.candidates(folder.as_ref())?;

        let mut summaries = Vec::with_capacity(candidates.len());
        for path in candidates {
            self.check_stop()?;

            let summary = match read_playlist_with_limit(&path, self.options.max_playlist_items) {
                Ok(playlist) => PlaylistSummary {
                    path,
                    duration: Some(playlist.duration),
                    items: playlist.items.len(),
                    error: None,
                },
                Err(e) => PlaylistSummary {
                    path,
                    duration: None,
                    items: 0,
                    error: Some(e.to_string()),
                },
            };
            summaries.push(summary);
        }
        Ok(summaries)
    }

    fn candidates(&self, folder: &Path) -> Result<Vec<PathBuf>> {
        let layout = DiscLayout::from_folder(folder);
        match layout.playlist_files() {
            Ok(files) => {
                debug!("Found {} playlists under {:?}", files.len(), layout.playlist_dir());
                Ok(files)
            }
            Err(e) => {
                debug!("Cannot list playlists under {:?}: {}", layout.playlist_dir(), e);
                Err(BdmvError::NotFound(folder.to_path_buf()))
            }
        }
    }

    fn check_stop(&self) -> Result<()> {
        if self.stop.load(Ordering::Relaxed) {
            return Err(BdmvError::Cancelled);
        }
        Ok(())
    }
}

/// Find the main movie with default options.
pub fn find_main_movie<P: AsRef<Path>>(folder: P) -> Result<MainMovie> {
    MainMovieFinder::default().find(folder)
}

/// List every playlist of a disc with default options.
pub fn scan_playlists<P: AsRef<Path>>(folder: P) -> Result<Vec<PlaylistSummary>> {
    MainMovieFinder::default().scan(folder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    /// Playlist with one play item per `(clip, seconds)`.
    fn mpls(items: &[(&[u8; 5], u32)]) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(b"MPLS0100");
        data.extend_from_slice(&20u32.to_be_bytes());
        data.extend_from_slice(&0u32.to_be_bytes());
        data.extend_from_slice(&[0u8; 4]);
        data.extend_from_slice(&0u32.to_be_bytes());
        data.extend_from_slice(&0u16.to_be_bytes());
        data.extend_from_slice(&(items.len() as u16).to_be_bytes());
        data.extend_from_slice(&0u16.to_be_bytes());
        for (name, secs) in items {
            data.extend_from_slice(&20u16.to_be_bytes());
            data.extend_from_slice(*name);
            data.extend_from_slice(b"M2TS");
            data.extend_from_slice(&[0, 1, 0]);
            data.extend_from_slice(&0u32.to_be_bytes());
            data.extend_from_slice(&(secs * 45_000).to_be_bytes());
        }
        data
    }

    fn disc(playlists: &[(&str, Vec<u8>)]) -> TempDir {
        let root = tempdir().unwrap();
        let dir = root.path().join("BDMV").join("PLAYLIST");
        fs::create_dir_all(&dir).unwrap();
        for (name, data) in playlists {
            fs::write(dir.join(name), data).unwrap();
        }
        root
    }

    #[test]
    fn test_longest_playlist_wins() {
        let root = disc(&[
            ("00001.mpls", mpls(&[(b"00010", 600)])),
            ("00002.mpls", mpls(&[(b"00020", 3000), (b"00021", 2400)])),
            ("00003.mpls", mpls(&[(b"00030", 1800)])),
        ]);

        let movie = find_main_movie(root.path()).unwrap();
        assert!(movie.playlist_path.ends_with("00002.mpls"));
        assert_eq!(movie.total_duration, ReferenceTime::from_secs(5400));
        assert_eq!(
            movie.segments,
            vec![ClipName(*b"00020"), ClipName(*b"00021")]
        );
    }

    #[test]
    fn test_tie_break() {
        let root = disc(&[
            ("00001.mpls", mpls(&[(b"00001", 100)])),
            ("00002.mpls", mpls(&[(b"00002", 100)])),
        ]);

        let first = MainMovieFinder::default().find(root.path()).unwrap();
        assert!(first.playlist_path.ends_with("00001.mpls"));

        let last = MainMovieFinder::new(SelectionOptions {
            tie_break: TieBreak::Last,
            ..Default::default()
        })
        .find(root.path())
        .unwrap();
        assert!(last.playlist_path.ends_with("00002.mpls"));
    }

    #[test]
    fn test_unreadable_and_empty_playlists_skipped() {
        let root = disc(&[
            ("00001.mpls", b"garbage".to_vec()),
            ("00002.mpls", mpls(&[])),
            ("00003.mpls", mpls(&[(b"00003", 30)])),
        ]);

        let movie = find_main_movie(root.path()).unwrap();
        assert!(movie.playlist_path.ends_with("00003.mpls"));

        let summaries = scan_playlists(root.path()).unwrap();
        assert_eq!(summaries.len(), 3);
        assert!(summaries[0].error.is_some());
        assert_eq!(summaries[1].duration, Some(ReferenceTime::ZERO));
        assert_eq!(summaries[2].items, 1);
    }

    #[test]
    fn test_only_empty_playlists() {
        let root = disc(&[("00001.mpls", mpls(&[]))]);
        assert_matches!(find_main_movie(root.path()), Err(BdmvError::NotFound(_)));
    }

    #[test]
    fn test_missing_playlist_folder() {
        let root = tempdir().unwrap();
        assert_matches!(
            find_main_movie(root.path()),
            Err(BdmvError::NotFound(ref p)) if p == root.path()
        );
    }

    #[test]
    fn test_stop_signal() {
        let root = disc(&[("00001.mpls", mpls(&[(b"00001", 10)]))]);
        let finder = MainMovieFinder::default();
        finder.stop_signal().store(true, Ordering::Relaxed);

        assert_matches!(finder.find(root.path()), Err(BdmvError::Cancelled));
        assert_matches!(finder.scan(root.path()), Err(BdmvError::Cancelled));
    }
}
