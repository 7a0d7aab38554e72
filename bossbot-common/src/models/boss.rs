use serde::{Deserialize, Serialize};

/// The single tracked boss sighting.
///
/// Every field is free-form text. Keys missing from a stored `boss`
/// object load as empty strings; numbers and bools load as their text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossRecord {
    #[serde(deserialize_with = "lenient::string")]
    pub place: String,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    /// Individual values, stored under the short `iv` key.
    #[serde(rename = "iv", deserialize_with = "lenient::string")]
    pub individual_values: String,
    #[serde(deserialize_with = "lenient::string")]
    pub nature: String,
    #[serde(deserialize_with = "lenient::string")]
    pub feature: String,
    /// `YYYY/MM/DD-HH:MM`, local time.
    #[serde(deserialize_with = "lenient::string")]
    pub time: String,
}

/// Arguments of a set-record request, before the timestamp is resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BossUpdate {
    pub place: String,
    pub name: String,
    pub individual_values: String,
    pub nature: String,
    pub feature: String,
    pub time: Option<String>,
}

impl BossUpdate {
    pub fn new(
        place: impl Into<String>,
        name: impl Into<String>,
        individual_values: impl Into<String>,
        nature: impl Into<String>,
        feature: impl Into<String>,
    ) -> Self {
        Self {
            place: place.into(),
            name: name.into(),
            individual_values: individual_values.into(),
            nature: nature.into(),
            feature: feature.into(),
            time: None,
        }
    }

    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    /// Builds the record. `now` is only called when no usable time was given;
    /// an empty string counts as missing.
    pub fn into_record(self, now: impl FnOnce() -> String) -> BossRecord {
        let time = match self.time {
            Some(t) if !t.is_empty() => t,
            _ => now(),
        };
        BossRecord {
            place: self.place,
            name: self.name,
            individual_values: self.individual_values,
            nature: self.nature,
            feature: self.feature,
            time,
        }
    }
}

/// On-disk shape of the boss data file.
///
/// Field order here is the key order in the written JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossDataFile {
    #[serde(deserialize_with = "lenient::string_vec")]
    pub subscriptions: Vec<String>,
    #[serde(with = "boss_entry")]
    pub boss: Option<BossRecord>,
}

impl BossDataFile {
    /// Drops repeated subscriber ids, keeping the first occurrence.
    /// Returns how many were removed.
    pub fn dedup_subscriptions(&mut self) -> usize {
        let before = self.subscriptions.len();
        let mut seen = std::collections::HashSet::new();
        self.subscriptions.retain(|id| seen.insert(id.clone()));
        before - self.subscriptions.len()
    }
}

/// Reads scalar JSON values as text, so hand-edited files with `1001` or
/// `"iv": 29` keep their data.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(as_text(Value::deserialize(deserializer)?).unwrap_or_default())
    }

    /// `null` entries are skipped; a `null` list reads as empty.
    pub fn string_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let items = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
        Ok(items.into_iter().filter_map(as_text).collect())
    }

    fn as_text(value: Value) -> Option<String> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(s),
            other => Some(other.to_string()),
        }
    }
}

/// `None` is written as `{}`; `{}` and `null` both read back as `None`.
mod boss_entry {
    use super::BossRecord;
    use serde::de::Error as _;
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde_json::{Map, Value};

    pub fn serialize<S>(boss: &Option<BossRecord>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match boss {
            Some(record) => record.serialize(serializer),
            None => serializer.serialize_map(Some(0))?.end(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<BossRecord>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Map<String, Value>>::deserialize(deserializer)? {
            Some(map) if !map.is_empty() => BossRecord::deserialize(Value::Object(map))
                .map(Some)
                .map_err(D::Error::custom),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_record() -> BossRecord {
        BossUpdate::new("Zone-1", "Monster", "29", "Lonely", "Aura")
            .with_time("2025/08/29-10:00")
            .into_record(|| unreachable!("time was supplied"))
    }

    #[test]
    fn empty_file_writes_boss_as_empty_object() {
        let value = serde_json::to_value(BossDataFile::default()).unwrap();
        assert_eq!(value, json!({ "subscriptions": [], "boss": {} }));
    }

    #[test]
    fn keys_are_written_in_stable_order() {
        let data = BossDataFile {
            subscriptions: vec!["1001".into()],
            boss: Some(sample_record()),
        };
        let text = serde_json::to_string(&data).unwrap();
        let subs = text.find("\"subscriptions\"").unwrap();
        let boss = text.find("\"boss\"").unwrap();
        assert!(subs < boss);

        let keys = ["\"place\"", "\"name\"", "\"iv\"", "\"nature\"", "\"feature\"", "\"time\""];
        let positions: Vec<usize> = keys.iter().map(|k| text.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "got {}", text);
    }

    #[test]
    fn empty_or_null_boss_loads_as_none() {
        let parsed: BossDataFile =
            serde_json::from_str(r#"{"subscriptions":["1"],"boss":{}}"#).unwrap();
        assert_eq!(parsed.boss, None);

        let parsed: BossDataFile =
            serde_json::from_str(r#"{"subscriptions":[],"boss":null}"#).unwrap();
        assert_eq!(parsed.boss, None);

        let parsed: BossDataFile = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, BossDataFile::default());
    }

    #[test]
    fn partial_boss_object_fills_missing_fields_with_empty_strings() {
        let parsed: BossDataFile =
            serde_json::from_str(r#"{"boss":{"place":"Cave","iv":"31"}}"#).unwrap();
        let boss = parsed.boss.unwrap();
        assert_eq!(boss.place, "Cave");
        assert_eq!(boss.individual_values, "31");
        assert_eq!(boss.name, "");
        assert_eq!(boss.time, "");
    }

    #[test]
    fn scalar_values_load_as_text() {
        let parsed: BossDataFile = serde_json::from_str(
            r#"{"subscriptions":[1001,"2002",null,true],"boss":{"place":"Cave","iv":29,"time":null}}"#,
        )
        .unwrap();
        assert_eq!(parsed.subscriptions, vec!["1001", "2002", "true"]);
        let boss = parsed.boss.unwrap();
        assert_eq!(boss.individual_values, "29");
        assert_eq!(boss.place, "Cave");
        assert_eq!(boss.time, "");
    }

    #[test]
    fn empty_time_is_replaced_by_now() {
        let record = BossUpdate::new("a", "b", "c", "d", "e")
            .with_time("")
            .into_record(|| "2030/01/02-03:04".to_string());
        assert_eq!(record.time, "2030/01/02-03:04");
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let mut data = BossDataFile {
            subscriptions: vec!["b".into(), "a".into(), "b".into(), "c".into(), "a".into()],
            boss: None,
        };
        assert_eq!(data.dedup_subscriptions(), 2);
        assert_eq!(data.subscriptions, vec!["b", "a", "c"]);
    }
}
