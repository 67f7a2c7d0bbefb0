//! Media player feature flags

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

bitflags! {
    /// Bit set of supported media player features
    ///
    /// Values match the host's `MediaPlayerEntityFeature` flags so the
    /// `supported_features` attribute of a player can be read directly.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct PlayerFeatures: u32 {
        const PAUSE = 1;
        const SEEK = 1 << 1;
        const VOLUME_SET = 1 << 2;
        const VOLUME_MUTE = 1 << 3;
        const PREVIOUS_TRACK = 1 << 4;
        const NEXT_TRACK = 1 << 5;
        const TURN_ON = 1 << 7;
        const TURN_OFF = 1 << 8;
        const PLAY_MEDIA = 1 << 9;
        const VOLUME_STEP = 1 << 10;
        const SELECT_SOURCE = 1 << 11;
        const STOP = 1 << 12;
        const CLEAR_PLAYLIST = 1 << 13;
        const PLAY = 1 << 14;
        const SHUFFLE_SET = 1 << 15;
        const SELECT_SOUND_MODE = 1 << 16;
        const BROWSE_MEDIA = 1 << 17;
        const REPEAT_SET = 1 << 18;
        const GROUPING = 1 << 19;
        const MEDIA_ANNOUNCE = 1 << 20;
        const MEDIA_ENQUEUE = 1 << 21;
        const SEARCH_MEDIA = 1 << 22;
    }
}

impl Default for PlayerFeatures {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<u32> for PlayerFeatures {
    /// Unknown bits are kept so newer host flags survive a round trip
    fn from(bits: u32) -> Self {
        Self::from_bits_retain(bits)
    }
}

impl PlayerFeatures {
    /// Spoken names of the set flags in flag order, e.g. `play media`
    pub fn names(self) -> Vec<String> {
        self.iter_names()
            .map(|(name, _)| name.to_lowercase().replace('_', " "))
            .collect()
    }
}

impl fmt::Display for PlayerFeatures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.names().join(", "))
    }
}
