//! Defines the change-event batch delivered by a DynamoDB stream.
//! Records are kept as raw JSON objects and read one at a time, so a
//! record with an unexpected shape only matters once the forwarder
//! reaches it. Item images are order-preserving JSON maps whose
//! type-tagged attribute values travel untouched.

use anyhow::{anyhow, Result};
use serde::Deserialize;
use serde_json::{Map, Value};

/// An item image: attribute names mapped to type-tagged values such
/// as `{"S": "42"}` or `{"M": {...}}`.
pub type Image = Map<String, Value>;

/// The `eventName` of records that describe an item insertion.
pub const INSERT: &str = "INSERT";

/// One entry of a change-event batch.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct ChangeRecord(Map<String, Value>);

impl ChangeRecord {
    /// The stream-assigned id of the record, when it is a string.
    pub fn event_id(&self) -> Option<&str> {
        self.0.get("eventID").and_then(Value::as_str)
    }

    /// The raw kind of change the record describes.
    pub fn event_name(&self) -> Result<&Value> {
        self.0
            .get("eventName")
            .ok_or_else(|| anyhow!("missing field eventName"))
    }

    /// Whether this record describes an item insertion. Only the
    /// exact string `INSERT` counts.
    pub fn is_insert(&self) -> Result<bool> {
        Ok(self.event_name()?.as_str() == Some(INSERT))
    }

    /// The image of the item after the change.
    pub fn new_image(&self) -> Result<&Image> {
        let stream = self
            .0
            .get("dynamodb")
            .ok_or_else(|| anyhow!("missing field dynamodb"))?
            .as_object()
            .ok_or_else(|| anyhow!("dynamodb is not a map"))?;
        stream
            .get("NewImage")
            .ok_or_else(|| anyhow!("missing field NewImage"))?
            .as_object()
            .ok_or_else(|| anyhow!("NewImage is not a map"))
    }
}

/// A batch of change records, in stream order.
#[derive(Debug, Deserialize)]
pub struct ChangeEvent {
    #[serde(rename = "Records")]
    pub records: Vec<ChangeRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(value: Value) -> Vec<ChangeRecord> {
        serde_json::from_value::<ChangeEvent>(value).unwrap().records
    }

    #[test]
    fn only_exact_insert_counts() {
        let records = records(json!({
            "Records": [
                {"eventName": "INSERT", "dynamodb": {"NewImage": {"id": {"S": "1"}}}},
                {"eventName": "MODIFY", "dynamodb": {}},
                {"eventName": "REMOVE"},
                {"eventName": "insert"},
                {"eventName": null},
                {"eventName": ["INSERT"]},
            ]
        }));
        let kinds: Vec<bool> = records.iter().map(|r| r.is_insert().unwrap()).collect();
        assert_eq!(kinds, vec![true, false, false, false, false, false]);
    }

    #[test]
    fn odd_shapes_parse_and_fail_only_when_read() {
        let records = records(json!({
            "Records": [
                {"dynamodb": {}},
                {"eventName": "MODIFY", "dynamodb": {"NewImage": ["x"]}},
                {"eventName": "INSERT", "dynamodb": "nope"},
                {"eventName": "INSERT"},
            ]
        }));
        assert_eq!(
            records[0].is_insert().unwrap_err().to_string(),
            "missing field eventName"
        );
        assert_eq!(
            records[1].new_image().unwrap_err().to_string(),
            "NewImage is not a map"
        );
        assert_eq!(
            records[2].new_image().unwrap_err().to_string(),
            "dynamodb is not a map"
        );
        assert_eq!(
            records[3].new_image().unwrap_err().to_string(),
            "missing field dynamodb"
        );
    }

    #[test]
    fn keeps_attribute_order_and_tags() {
        let raw = r#"{"Records":[{"eventID":"abc","eventName":"INSERT","dynamodb":{"NewImage":{"zeta":{"N":"1"},"alpha":{"L":[{"S":"x"},{"BOOL":true}]},"mid":{"NULL":true}}}}]}"#;
        let event: ChangeEvent = serde_json::from_str(raw).unwrap();
        let record = &event.records[0];
        assert_eq!(record.event_id(), Some("abc"));
        let image = record.new_image().unwrap();
        let keys: Vec<&str> = image.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        assert_eq!(image["alpha"], json!({"L": [{"S": "x"}, {"BOOL": true}]}));
    }

    #[test]
    fn missing_records_is_rejected() {
        let result: Result<ChangeEvent, _> = serde_json::from_value(json!({"records": []}));
        assert!(result.is_err());
    }
}
