//! Script-wide audio player.

use serde_json::{Map, Value};

use super::object::{ObjectMeta, Record, Tagged};
use super::wire::RawObject;
use crate::error::Result;

/// Background audio player state. Playlists are kept as found.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioPlayer {
    /// Record identity
    pub meta: ObjectMeta,
    /// Playlist records
    pub play_lists: Vec<Value>,
}

impl AudioPlayer {
    /// A player with no playlists.
    pub fn new() -> Self {
        Self { meta: ObjectMeta::new(), play_lists: Vec::new() }
    }
}

impl Default for AudioPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tagged for AudioPlayer {
    const TYPE_ID: &'static str = "AudioPlayerModel";
}

impl Record for AudioPlayer {
    fn decode(raw: &RawObject<'_>) -> Result<Self> {
        if !raw.is_type(Self::TYPE_ID) {
            return Ok(Self::new());
        }
        Ok(Self {
            meta: ObjectMeta::decode(raw)?,
            play_lists: raw.values("AudioPlayLists")?.to_vec(),
        })
    }

    fn encode(&self) -> Value {
        let mut map = self.meta.envelope(Self::TYPE_ID, Map::new());
        map.insert("AudioPlayLists".into(), Value::Array(self.play_lists.clone()));
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use serde_json::json;

    #[test]
    fn test_playlists_are_preserved() {
        let value = json!({
            "Id": "a",
            "Version": "7.0.0.0",
            "TypeId": "AudioPlayerModel",
            "Properties": {},
            "AudioPlayLists": [{ "Name": "Prelude", "Tracks": [1, 2] }]
        });
        let player = AudioPlayer::from_value(&value, "AudioPlayer").unwrap();
        assert_eq!(player.play_lists.len(), 1);
        assert_eq!(player.encode(), value);
    }
}
