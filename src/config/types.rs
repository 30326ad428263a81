use discprobe_bdmv::{SelectionOptions, TieBreak, DEFAULT_MAX_PLAYLIST_ITEMS};
use discprobe_nal::Framing;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub selection: SelectionConfig,

    #[serde(default)]
    pub nal: NalConfig,
}

/// Main-movie selection settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SelectionConfig {
    /// Play items read per candidate playlist
    #[serde(default = "default_max_playlist_items")]
    pub max_playlist_items: usize,

    /// Winner among playlists of equal duration
    #[serde(default)]
    pub tie_break: TieBreakSetting,
}

fn default_max_playlist_items() -> usize {
    DEFAULT_MAX_PLAYLIST_ITEMS
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            max_playlist_items: default_max_playlist_items(),
            tie_break: TieBreakSetting::default(),
        }
    }
}

impl SelectionConfig {
    pub fn options(&self) -> SelectionOptions {
        SelectionOptions {
            max_playlist_items: self.max_playlist_items,
            tie_break: self.tie_break.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TieBreakSetting {
    #[default]
    First,
    Last,
}

impl From<TieBreakSetting> for TieBreak {
    fn from(setting: TieBreakSetting) -> Self {
        match setting {
            TieBreakSetting::First => TieBreak::First,
            TieBreakSetting::Last => TieBreak::Last,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct NalConfig {
    /// Length-prefix size for elementary streams; unset means Annex-B
    #[serde(default)]
    pub length_size: Option<u8>,
}

impl NalConfig {
    /// Framing to use, preferring `override_size` when given.
    pub fn framing(&self, override_size: Option<u8>) -> discprobe_nal::Result<Framing> {
        match override_size.or(self.length_size) {
            Some(size) => Framing::length_prefixed(size),
            None => Ok(Framing::AnnexB),
        }
    }
}
