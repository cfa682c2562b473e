use crate::core::error::ArenaError;
use crate::core::state::ArenaTagSide;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Flat persisted record of one arena tag.
///
/// `data` holds the variant extension (`layers`, `maxLayers`, `neutralized`,
/// `targetIndex`, `sourceCount`, ...). Unknown fields anywhere are ignored so
/// newer saves still load.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArenaTagSnapshot {
    pub tag_type: String,
    #[serde(default)]
    pub turn_count: i32,
    #[serde(default)]
    pub source_move: Option<String>,
    #[serde(default)]
    pub source_id: Option<String>,
    #[serde(default)]
    pub side: ArenaTagSide,
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl ArenaTagSnapshot {
    pub fn to_json(&self) -> Result<String, ArenaError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, ArenaError> {
        Ok(serde_json::from_str(json)?)
    }
}

pub(crate) fn write_extension<T: Serialize>(extension: &T) -> Map<String, Value> {
    match serde_json::to_value(extension) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

/// Overwrites only the fields of `target` that `data` carries; anything
/// missing keeps the value the factory gave it.
pub(crate) fn overlay_extension<T: Serialize + DeserializeOwned>(target: &mut T, data: &Map<String, Value>) {
    let mut current = write_extension(&*target);
    for (key, slot) in current.iter_mut() {
        if let Some(value) = data.get(key) {
            *slot = value.clone();
        }
    }
    match serde_json::from_value(Value::Object(current)) {
        Ok(restored) => *target = restored,
        Err(err) => tracing::warn!(%err, "ignoring undecodable arena tag extension"),
    }
}
