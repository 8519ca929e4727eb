// Timezone module
// A timezone the user is tracking on the grid

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, stable identifier of a tracked timezone.
///
/// Older stores wrote numeric ids, so reading accepts numbers as well as
/// strings. Ids are always written back as strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawTimezoneId", into = "String")]
pub struct TrackedTimezoneId(String);

impl TrackedTimezoneId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackedTimezoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<TrackedTimezoneId> for String {
    fn from(id: TrackedTimezoneId) -> Self {
        id.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimezoneId {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl From<RawTimezoneId> for TrackedTimezoneId {
    fn from(raw: RawTimezoneId) -> Self {
        match raw {
            RawTimezoneId::Text(text) => Self(text),
            RawTimezoneId::Integer(number) => Self(number.to_string()),
            RawTimezoneId::Float(number) => Self(number.to_string()),
        }
    }
}

/// A row of the grid. `display_name` and `timezone_id` never change after
/// creation; editing is remove + re-add.
///
/// The JSON field names (`id`, `name`, `timezone`) are shared with stores
/// written by earlier versions and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedTimezone {
    pub id: TrackedTimezoneId,
    #[serde(rename = "name", alias = "displayName")]
    pub display_name: String,
    #[serde(rename = "timezone", alias = "timezoneId")]
    pub timezone_id: String,
}

impl TrackedTimezone {
    pub fn new(
        id: TrackedTimezoneId,
        display_name: impl Into<String>,
        timezone_id: impl Into<String>,
    ) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            timezone_id: timezone_id.into(),
        }
    }

    /// True when this entry shows the same label for the same zone.
    pub fn same_label_and_zone(&self, display_name: &str, timezone_id: &str) -> bool {
        self.display_name == display_name && self.timezone_id == timezone_id
    }
}
