//! Wire types for the outfit generation API.
//!
//! Field names follow the original surface (`tipo`, `nombre`, `razon`,
//! `descripcion`, `dayName`, `generatedAt`); unknown item fields are carried
//! through untouched so they survive into the enriched response.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

/// One clothing item as supplied by the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClothingItem {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tipo: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub nombre: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub color: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Weather {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One outfit generation request. Lives only for the duration of the request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// Anything that is not a JSON array deserializes as empty so validation
    /// can report a received count of zero.
    #[serde(default, deserialize_with = "lenient_wardrobe")]
    pub wardrobe: Vec<ClothingItem>,
    #[serde(default)]
    pub weather: Option<Weather>,
    #[serde(default = "default_occasion")]
    #[validate(length(max = 200, message = "occasion is too long"))]
    pub occasion: String,
    #[serde(default)]
    #[validate(length(max = 100, message = "dayName is too long"))]
    pub day_name: Option<String>,
}

fn default_occasion() -> String {
    "casual".to_string()
}

fn lenient_wardrobe<'de, D>(deserializer: D) -> Result<Vec<ClothingItem>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .map(|item| serde_json::from_value(item).unwrap_or_default())
        .collect())
}

/// One slot of the model's selection: a wardrobe id plus a short
/// justification. Extra keys the model emitted ride along and lose to item
/// fields during enrichment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlotChoice {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub razon: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The three slots of an outfit. All three are required; a reply missing one
/// is treated as unparseable and handled by the fallback rule.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutfitSelection {
    pub top: SlotChoice,
    pub bottom: SlotChoice,
    pub shoes: SlotChoice,
}

/// The structured reply expected from the model.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutfitReply {
    pub outfit: OutfitSelection,
    #[serde(default)]
    pub descripcion: String,
    #[serde(default)]
    pub tips: Vec<String>,
}

/// Enriched outfit: per slot, the selection fields merged with the full
/// matching wardrobe item record.
#[derive(Debug, Serialize)]
pub struct EnrichedOutfit {
    pub top: Map<String, Value>,
    pub bottom: Map<String, Value>,
    pub shoes: Map<String, Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfitResponse {
    pub success: bool,
    pub outfit: EnrichedOutfit,
    pub descripcion: String,
    pub tips: Vec<String>,
    pub day: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<Weather>,
    pub generated_at: DateTime<Utc>,
    pub source: String,
}
