//! H.264 NAL unit header decoding.

use std::fmt;

/// H.264 NAL unit types (ITU-T H.264 table 7-1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub enum NalUnitType {
    /// Coded slice of a non-IDR picture
    Slice,
    /// Coded slice data partition A
    SliceDataA,
    /// Coded slice data partition B
    SliceDataB,
    /// Coded slice data partition C
    SliceDataC,
    /// Coded slice of an IDR picture
    Idr,
    /// Supplemental enhancement information
    Sei,
    /// Sequence parameter set
    Sps,
    /// Picture parameter set
    Pps,
    /// Access unit delimiter
    Aud,
    EndOfSequence,
    EndOfStream,
    FillerData,
    SpsExtension,
    /// Prefix NAL unit (SVC/MVC)
    Prefix,
    SubsetSps,
    /// Depth parameter set
    Dps,
    /// Coded slice of an auxiliary coded picture
    AuxiliarySlice,
    /// Coded slice extension (SVC/MVC)
    SliceExtension,
    /// Coded slice extension for a depth view component
    SliceExtensionDepth,
    /// Reserved codes: 17, 18, 22, 23
    Reserved(u8),
    /// Unspecified codes: 0, 24..=31
    Unspecified(u8),
}

impl NalUnitType {
    /// The 5-bit type code.
    pub fn code(self) -> u8 {
        match self {
            NalUnitType::Slice => 1,
            NalUnitType::SliceDataA => 2,
            NalUnitType::SliceDataB => 3,
            NalUnitType::SliceDataC => 4,
            NalUnitType::Idr => 5,
            NalUnitType::Sei => 6,
            NalUnitType::Sps => 7,
            NalUnitType::Pps => 8,
            NalUnitType::Aud => 9,
            NalUnitType::EndOfSequence => 10,
            NalUnitType::EndOfStream => 11,
            NalUnitType::FillerData => 12,
            NalUnitType::SpsExtension => 13,
            NalUnitType::Prefix => 14,
            NalUnitType::SubsetSps => 15,
            NalUnitType::Dps => 16,
            NalUnitType::AuxiliarySlice => 19,
            NalUnitType::SliceExtension => 20,
            NalUnitType::SliceExtensionDepth => 21,
            NalUnitType::Reserved(v) | NalUnitType::Unspecified(v) => v & 0x1F,
        }
    }

    /// Video coding layer units carry slice data.
    pub fn is_vcl(self) -> bool {
        matches!(self.code(), 1..=5)
    }

    pub fn is_parameter_set(self) -> bool {
        matches!(
            self,
            NalUnitType::Sps | NalUnitType::Pps | NalUnitType::SpsExtension | NalUnitType::SubsetSps
        )
    }
}

impl From<u8> for NalUnitType {
    /// Decodes the low five bits; higher bits are ignored.
    fn from(value: u8) -> Self {
        match value & 0x1F {
            1 => NalUnitType::Slice,
            2 => NalUnitType::SliceDataA,
            3 => NalUnitType::SliceDataB,
            4 => NalUnitType::SliceDataC,
            5 => NalUnitType::Idr,
            6 => NalUnitType::Sei,
            7 => NalUnitType::Sps,
            8 => NalUnitType::Pps,
            9 => NalUnitType::Aud,
            10 => NalUnitType::EndOfSequence,
            11 => NalUnitType::EndOfStream,
            12 => NalUnitType::FillerData,
            13 => NalUnitType::SpsExtension,
            14 => NalUnitType::Prefix,
            15 => NalUnitType::SubsetSps,
            16 => NalUnitType::Dps,
            19 => NalUnitType::AuxiliarySlice,
            20 => NalUnitType::SliceExtension,
            21 => NalUnitType::SliceExtensionDepth,
            v @ (17 | 18 | 22 | 23) => NalUnitType::Reserved(v),
            v => NalUnitType::Unspecified(v),
        }
    }
}

impl fmt::Display for NalUnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NalUnitType::Slice => "Slice",
            NalUnitType::SliceDataA => "Slice DPA",
            NalUnitType::SliceDataB => "Slice DPB",
            NalUnitType::SliceDataC => "Slice DPC",
            NalUnitType::Idr => "IDR",
            NalUnitType::Sei => "SEI",
            NalUnitType::Sps => "SPS",
            NalUnitType::Pps => "PPS",
            NalUnitType::Aud => "AUD",
            NalUnitType::EndOfSequence => "End of sequence",
            NalUnitType::EndOfStream => "End of stream",
            NalUnitType::FillerData => "Filler",
            NalUnitType::SpsExtension => "SPS extension",
            NalUnitType::Prefix => "Prefix",
            NalUnitType::SubsetSps => "Subset SPS",
            NalUnitType::Dps => "DPS",
            NalUnitType::AuxiliarySlice => "Auxiliary slice",
            NalUnitType::SliceExtension => "Slice extension",
            NalUnitType::SliceExtensionDepth => "Slice extension (depth)",
            NalUnitType::Reserved(v) => return write!(f, "Reserved({})", v),
            NalUnitType::Unspecified(v) => return write!(f, "Unspecified({})", v),
        };
        f.write_str(name)
    }
}

/// The single header byte that opens every H.264 NAL unit.
///
/// ```text
/// +---+-------+-----------+
/// | F |  NRI  |   Type    |
/// +---+-------+-----------+
///   7   6   5  4 3 2 1 0
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NalHeader {
    pub forbidden_bit: bool,
    /// 0..=3
    pub nal_ref_idc: u8,
    pub nal_unit_type: NalUnitType,
}

impl NalHeader {
    pub fn from_byte(byte: u8) -> Self {
        Self {
            forbidden_bit: byte & 0x80 != 0,
            nal_ref_idc: (byte >> 5) & 0x03,
            nal_unit_type: NalUnitType::from(byte),
        }
    }

    pub fn to_byte(self) -> u8 {
        (u8::from(self.forbidden_bit) << 7)
            | ((self.nal_ref_idc & 0x03) << 5)
            | self.nal_unit_type.code()
    }
}
