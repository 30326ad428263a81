//! Shared fixtures for CLI tests.
//!
//! Builds a minimal `BDMV` tree in a temporary directory with playlists and
//! ClipInfo files synthesized byte by byte.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Disc clock ticks per second.
pub const CLOCK: u32 = 45_000;

pub struct TestDisc {
    dir: TempDir,
}

impl TestDisc {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        for sub in ["PLAYLIST", "CLIPINF", "STREAM"] {
            fs::create_dir_all(dir.path().join("BDMV").join(sub)).unwrap();
        }
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn playlist_path(&self, name: &str) -> PathBuf {
        self.root().join("BDMV").join("PLAYLIST").join(name)
    }

    pub fn clip_info_path(&self, name: &str) -> PathBuf {
        self.root().join("BDMV").join("CLIPINF").join(name)
    }

    /// Playlist of `(clip, seconds)` items.
    pub fn add_playlist(&self, name: &str, items: &[(&str, u32)]) -> PathBuf {
        let path = self.playlist_path(name);
        fs::write(&path, mpls(items, &[])).unwrap();
        path
    }

    pub fn add_clip_info(&self, name: &str, records: &[(u16, Vec<u8>)]) -> PathBuf {
        let path = self.clip_info_path(name);
        fs::write(&path, clpi(records)).unwrap();
        path
    }
}

/// MPLS file with one play item per `(clip, seconds)` and chapter marks at
/// `(item, clock)`.
pub fn mpls(items: &[(&str, u32)], marks: &[(u16, u32)]) -> Vec<u8> {
    let mut playlist = Vec::new();
    playlist.extend_from_slice(&0u16.to_be_bytes());
    playlist.extend_from_slice(&(items.len() as u16).to_be_bytes());
    playlist.extend_from_slice(&0u16.to_be_bytes());
    for (clip, secs) in items {
        playlist.extend_from_slice(&20u16.to_be_bytes());
        playlist.extend_from_slice(clip.as_bytes());
        playlist.extend_from_slice(b"M2TS");
        playlist.extend_from_slice(&[0x00, 0x01, 0x00]);
        playlist.extend_from_slice(&0u32.to_be_bytes());
        playlist.extend_from_slice(&(secs * CLOCK).to_be_bytes());
    }

    let mut mark_data = Vec::new();
    mark_data.extend_from_slice(&(marks.len() as u16).to_be_bytes());
    for (item, clock) in marks {
        mark_data.extend_from_slice(&[0x00, 0x01]);
        mark_data.extend_from_slice(&item.to_be_bytes());
        mark_data.extend_from_slice(&clock.to_be_bytes());
        mark_data.extend_from_slice(&0xFFFFu16.to_be_bytes());
        mark_data.extend_from_slice(&0u32.to_be_bytes());
    }

    let playlist_start = 20u32;
    let mark_start = playlist_start + 4 + playlist.len() as u32;

    let mut data = Vec::new();
    data.extend_from_slice(b"MPLS0200");
    data.extend_from_slice(&playlist_start.to_be_bytes());
    data.extend_from_slice(&mark_start.to_be_bytes());
    data.extend_from_slice(&0u32.to_be_bytes());
    data.extend_from_slice(&(playlist.len() as u32).to_be_bytes());
    data.extend_from_slice(&playlist);
    data.extend_from_slice(&(mark_data.len() as u32).to_be_bytes());
    data.extend_from_slice(&mark_data);
    data
}

/// ClipInfo file with one program sequence of `(pid, record body)`.
pub fn clpi(records: &[(u16, Vec<u8>)]) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(b"HDMV0200");
    data.extend_from_slice(&0u32.to_be_bytes());
    data.extend_from_slice(&16u32.to_be_bytes());
    data.extend_from_slice(&0u32.to_be_bytes());
    data.push(0);
    data.push(1);
    data.extend_from_slice(&0u32.to_be_bytes());
    data.extend_from_slice(&0x0100u16.to_be_bytes());
    data.push(records.len() as u8);
    data.push(0);
    for (pid, body) in records {
        data.extend_from_slice(&pid.to_be_bytes());
        data.push(body.len() as u8);
        data.extend_from_slice(body);
    }
    data
}
