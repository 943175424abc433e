use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Stable identifier for items (Unix time in milliseconds, as a string)
pub type ItemId = String;

/// Image used when no file was chosen for an item.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/50";

/// Core item in the inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub details: String,
    #[serde(with = "number")]
    pub quantity: f64,
    #[serde(with = "number")]
    pub price: f64,
    pub date: String, // YYYY-MM-DD
    #[serde(rename = "type")]
    pub kind: String,
    pub image: String, // placeholder URL or data URL
}

impl Item {
    /// Case-insensitive substring match against name or details.
    ///
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.details.to_lowercase().contains(needle)
    }
}

/// Stored numbers. Whole values are written without a fraction and
/// non-finite values as `null`, which reads back as NaN.
mod number {
    use super::*;

    // Largest integer an f64 holds exactly.
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.fract() == 0.0 && value.abs() <= MAX_EXACT {
            serializer.serialize_i64(*value as i64)
        } else if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> Item {
        Item {
            id: "1704067200000".to_string(),
            name: "Widget".to_string(),
            details: "Blue, small".to_string(),
            quantity: 5.0,
            price: 2.5,
            date: "2024-01-01".to_string(),
            kind: "tool".to_string(),
            image: PLACEHOLDER_IMAGE.to_string(),
        }
    }

    #[test]
    fn wire_field_names() {
        let json = serde_json::to_value(widget()).unwrap();
        let obj = json.as_object().unwrap();

        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            ["date", "details", "id", "image", "name", "price", "quantity", "type"]
        );
        assert_eq!(obj["type"], "tool");
        assert_eq!(obj["quantity"], 5);
        assert_eq!(obj["price"], 2.5);
    }

    #[test]
    fn decodes_stored_record() {
        let raw = r#"{"id":"1712000000000","name":"Lamp","details":"desk","quantity":2,
            "price":19.99,"date":"2024-04-01","type":"furniture",
            "image":"https://via.placeholder.com/50"}"#;
        let item: Item = serde_json::from_str(raw).unwrap();

        assert_eq!(item.id, "1712000000000");
        assert_eq!(item.kind, "furniture");
        assert_eq!(item.quantity, 2.0);
    }

    #[test]
    fn decodes_any_stored_number() {
        let raw = r#"{"id":"1","name":"Lamp","details":"","quantity":-1.5,
            "price":null,"date":"","type":"","image":""}"#;
        let item: Item = serde_json::from_str(raw).unwrap();

        assert_eq!(item.quantity, -1.5);
        assert!(item.price.is_nan());

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["quantity"], -1.5);
        assert!(json["price"].is_null());
    }

    #[test]
    fn whole_numbers_are_written_without_fraction() {
        let json = serde_json::to_string(&widget()).unwrap();

        assert!(json.contains(r#""quantity":5,"#));
        assert!(json.contains(r#""price":2.5,"#));
    }

    #[test]
    fn matches_name_or_details() {
        let item = widget();

        assert!(item.matches("widg"));
        assert!(item.matches("blue"));
        assert!(item.matches(""));
        assert!(!item.matches("lamp"));
    }
}
