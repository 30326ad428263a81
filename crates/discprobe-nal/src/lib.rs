//! # discprobe-nal
//!
//! Zero-copy scanner that splits a raw H.264/AVC elementary stream into NAL
//! units.
//!
//! Two framings are supported:
//!
//! - Annex-B: units delimited by `00 00 01` start codes
//! - Length-prefixed: each unit preceded by a 1 to 4 byte big-endian size
//!   (AVCC / RTP style). Annex-B start codes found inside a length-prefixed
//!   unit are honoured as well, which covers streams that mix both.
//!
//! Only the one-byte NAL header is decoded; payloads are left untouched.
//!
//! ## Example
//!
//! ```
//! use discprobe_nal::{Framing, NalScanner, NalUnitType};
//!
//! let stream = [0x00, 0x00, 0x01, 0x67, 0x42, 0x00, 0x00, 0x01, 0x68, 0xCE];
//! let mut scanner = NalScanner::new(&stream, Framing::AnnexB).unwrap();
//!
//! let sps = scanner.read_next().unwrap().unwrap();
//! assert_eq!(sps.nal_unit_type, NalUnitType::Sps);
//! assert_eq!(scanner.unit_data(&sps), &[0x67, 0x42]);
//!
//! let pps = scanner.read_next().unwrap().unwrap();
//! assert_eq!(pps.nal_unit_type, NalUnitType::Pps);
//! assert!(scanner.read_next().unwrap().is_none());
//! ```

pub mod error;
pub mod header;
pub mod scanner;

pub use error::{NalError, Result};
pub use header::{NalHeader, NalUnitType};
pub use scanner::{Framing, NalScanner, NalUnit, START_CODE};
