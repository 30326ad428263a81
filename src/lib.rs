//! Discprobe - Blu-ray playlist and H.264 stream inspection tool
//!
//! This library crate exposes the CLI's configuration and report rendering
//! for integration testing. Parsing lives in `discprobe-bdmv` and
//! `discprobe-nal`.

pub mod config;
pub mod report;
