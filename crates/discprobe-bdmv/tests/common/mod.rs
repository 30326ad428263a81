//! Fixture builders for BDMV integration tests.
//!
//! [`TestDisc`] lays out a `BDMV` tree in a temporary directory and writes
//! ClipInfo and playlist files assembled by [`clip_info`] and
//! [`PlaylistBuilder`].

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Disc clock ticks per second.
pub const CLOCK: u32 = 45_000;

/// Header length of both file types; the first section starts here.
const HEADER_LEN: u32 = 20;

/// Temporary disc root with `BDMV/{PLAYLIST,CLIPINF,STREAM}`.
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

    pub fn bdmv(&self) -> PathBuf {
        self.root().join("BDMV")
    }

    pub fn add_playlist(&self, name: &str, data: &[u8]) -> PathBuf {
        let path = self.bdmv().join("PLAYLIST").join(name);
        fs::write(&path, data).unwrap();
        path
    }

    pub fn add_clip_info(&self, name: &str, data: &[u8]) -> PathBuf {
        let path = self.bdmv().join("CLIPINF").join(name);
        fs::write(&path, data).unwrap();
        path
    }
}

/// ClipInfo file with one program sequence holding `records`.
///
/// Each record is `(pid, body)`; the 1-byte record length is added here.
pub fn clip_info(version: &[u8; 4], records: &[(u16, Vec<u8>)]) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(b"HDMV");
    data.extend_from_slice(version);
    data.extend_from_slice(&HEADER_LEN.to_be_bytes()); // sequence info
    data.extend_from_slice(&HEADER_LEN.to_be_bytes()); // program info
    data.extend_from_slice(&[0u8; 4]);

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

/// Chapter mark as stored on disc.
pub struct Mark {
    pub mark_type: u8,
    pub item: u16,
    pub clock: u32,
}

/// Assembles an MPLS file from play items and marks.
#[derive(Default)]
pub struct PlaylistBuilder {
    items: Vec<Vec<u8>>,
    declared: Option<u16>,
    marks: Vec<Mark>,
}

impl PlaylistBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Play item of `clip` from `in_clock` to `out_clock`.
    pub fn item(mut self, clip: &str, in_clock: u32, out_clock: u32) -> Self {
        let mut body = Vec::new();
        body.extend_from_slice(clip.as_bytes());
        body.extend_from_slice(b"M2TS");
        body.extend_from_slice(&[0x00, 0x01, 0x00]);
        body.extend_from_slice(&in_clock.to_be_bytes());
        body.extend_from_slice(&out_clock.to_be_bytes());
        // UO mask, random access flag, still mode and one stream table
        body.extend_from_slice(&[0u8; 8]);
        body.extend_from_slice(&[0x01, 0x00, 0x00, 0x00]);
        self.items.push(body);
        self
    }

    /// Play item starting at zero and lasting `secs` seconds.
    pub fn secs(self, clip: &str, secs: u32) -> Self {
        self.item(clip, 0, secs * CLOCK)
    }

    /// Override the item count written to the file.
    pub fn declared(mut self, count: u16) -> Self {
        self.declared = Some(count);
        self
    }

    pub fn mark(mut self, mark_type: u8, item: u16, clock: u32) -> Self {
        self.marks.push(Mark {
            mark_type,
            item,
            clock,
        });
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut playlist = Vec::new();
        playlist.extend_from_slice(&0u16.to_be_bytes());
        let declared = self.declared.unwrap_or(self.items.len() as u16);
        playlist.extend_from_slice(&declared.to_be_bytes());
        playlist.extend_from_slice(&0u16.to_be_bytes());
        for body in &self.items {
            playlist.extend_from_slice(&(body.len() as u16).to_be_bytes());
            playlist.extend_from_slice(body);
        }

        let mut marks = Vec::new();
        marks.extend_from_slice(&(self.marks.len() as u16).to_be_bytes());
        for mark in &self.marks {
            marks.push(0);
            marks.push(mark.mark_type);
            marks.extend_from_slice(&mark.item.to_be_bytes());
            marks.extend_from_slice(&mark.clock.to_be_bytes());
            marks.extend_from_slice(&0xFFFFu16.to_be_bytes());
            marks.extend_from_slice(&0u32.to_be_bytes());
        }

        let playlist_start = HEADER_LEN;
        let mark_start = playlist_start + 4 + playlist.len() as u32;

        let mut data = Vec::new();
        data.extend_from_slice(b"MPLS0200");
        data.extend_from_slice(&playlist_start.to_be_bytes());
        data.extend_from_slice(&mark_start.to_be_bytes());
        data.extend_from_slice(&0u32.to_be_bytes()); // extension data
        data.extend_from_slice(&(playlist.len() as u32).to_be_bytes());
        data.extend_from_slice(&playlist);
        data.extend_from_slice(&(marks.len() as u32).to_be_bytes());
        data.extend_from_slice(&marks);
        data
    }
}
