//! BDMV directory layout.
//!
//! A disc (or a copy of one) is laid out as
//!
//! ```text
//! <root>/BDMV/PLAYLIST/*.mpls
//! <root>/BDMV/CLIPINF/*.clpi
//! <root>/BDMV/STREAM/*.m2ts
//! ```
//!
//! Callers may point at any of these levels; [`DiscLayout::from_folder`]
//! normalizes to the `BDMV` directory.

use crate::error::{BdmvError, Result};
use crate::playlist::ClipName;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const BDMV_DIR: &str = "BDMV";
const PLAYLIST_DIR: &str = "PLAYLIST";
const STREAM_DIR: &str = "STREAM";
const CLIPINF_DIR: &str = "CLIPINF";

/// Subfolders that are stripped when normalizing.
const SUBFOLDERS: &[&str] = &[PLAYLIST_DIR, STREAM_DIR, CLIPINF_DIR];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscLayout {
    bdmv: PathBuf,
}

impl DiscLayout {
    /// Normalize a disc root, `BDMV` folder or one of its subfolders.
    pub fn from_folder<P: AsRef<Path>>(folder: P) -> Self {
        let mut path = folder.as_ref().to_path_buf();

        if last_component_is(&path, SUBFOLDERS) {
            path.pop();
        }
        if !last_component_is(&path, &[BDMV_DIR]) {
            path.push(BDMV_DIR);
        }

        Self { bdmv: path }
    }

    pub fn bdmv_dir(&self) -> &Path {
        &self.bdmv
    }

    pub fn playlist_dir(&self) -> PathBuf {
        self.bdmv.join(PLAYLIST_DIR)
    }

    pub fn stream_dir(&self) -> PathBuf {
        self.bdmv.join(STREAM_DIR)
    }

    pub fn clipinf_dir(&self) -> PathBuf {
        self.bdmv.join(CLIPINF_DIR)
    }

    /// Transport stream of a clip.
    pub fn clip_path(&self, clip: &ClipName) -> PathBuf {
        self.stream_dir().join(format!("{}.m2ts", clip))
    }

    /// ClipInfo file of a clip.
    pub fn clip_info_path(&self, clip: &ClipName) -> PathBuf {
        self.clipinf_dir().join(format!("{}.clpi", clip))
    }

    /// `*.mpls` files directly under `PLAYLIST`, sorted by file name.
    pub fn playlist_files(&self) -> Result<Vec<PathBuf>> {
        let dir = self.playlist_dir();
        if !dir.is_dir() {
            return Err(BdmvError::NotFound(dir));
        }

        let files = WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| is_playlist_file(p))
            .collect();

        Ok(files)
    }
}

/// Check if a path has an `.mpls` extension (any case).
pub fn is_playlist_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("mpls"))
        .unwrap_or(false)
}

fn last_component_is(path: &Path, names: &[&str]) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| names.iter().any(|n| n.eq_ignore_ascii_case(name)))
        .unwrap_or(false)
}
