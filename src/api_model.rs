use serde::de::Error as _;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

/// A stored item: the repository-assigned `id` plus whatever else the client sent.
///
/// On the wire this is a single flat JSON object, e.g. `{"id": 1, "name": "a"}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Item {
    pub id: i64,
    /// All other top-level fields. Never contains an `id` key.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Body of a PUT request. Fields present here overwrite the stored ones.
/// A supplied `id` replaces the item's own id.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ItemPatch {
    #[serde(default, deserialize_with = "integral_id")]
    pub id: Option<i64>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> MessageResponse {
        MessageResponse {
            message: message.to_string(),
        }
    }
}

/// Accept `1` and `1.0` alike, since JSON clients do not distinguish them.
/// `null` means "leave the id alone".
fn integral_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => {
            if let Some(id) = number.as_i64() {
                return Ok(Some(id));
            }
            match number.as_f64() {
                Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                    Ok(Some(f as i64))
                }
                _ => Err(D::Error::custom(format!("id {} is not an integer", number))),
            }
        }
        Some(other) => Err(D::Error::custom(format!("id {} is not an integer", other))),
    }
}
