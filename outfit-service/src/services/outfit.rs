//! Parsing, fallback selection, and enrichment of outfit replies.

use crate::models::{ClothingItem, OutfitReply, OutfitSelection, SlotChoice};
use serde_json::{Map, Value};

/// Parse raw model output into an [`OutfitReply`].
///
/// Code-fence markers are stripped, then the text is sliced from the first
/// `{` to the last `}` before parsing. Returns `None` on any failure so the
/// caller can fall back to the deterministic rule (graceful degradation).
pub fn parse_reply(raw: &str) -> Option<OutfitReply> {
    let cleaned = strip_code_fences(raw);
    let start = cleaned.find('{')?;
    let end = cleaned.rfind('}')?;
    if end < start {
        return None;
    }
    serde_json::from_str(&cleaned[start..=end]).ok()
}

fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "")
}

/// Deterministic selection used when the model's reply cannot be parsed:
/// the first wardrobe item of each slot's type, or the item at index 0/1/2
/// when no item of that type exists. Never fails for a wardrobe of three or
/// more items.
pub fn fallback_reply(wardrobe: &[ClothingItem]) -> OutfitReply {
    let pick = |tipo: &str, index: usize| -> SlotChoice {
        let item = wardrobe
            .iter()
            .find(|item| item.tipo.eq_ignore_ascii_case(tipo))
            .or_else(|| wardrobe.get(index));

        SlotChoice {
            id: item.map(|item| item.id.clone()).unwrap_or_default(),
            razon: format!("Opción disponible para {}", tipo),
            extra: Map::new(),
        }
    };

    OutfitReply {
        outfit: OutfitSelection {
            top: pick("top", 0),
            bottom: pick("bottom", 1),
            shoes: pick("shoes", 2),
        },
        descripcion: "Outfit seleccionado de tu guardarropa según la ocasión.".to_string(),
        tips: vec![
            "Ajusta las capas según el clima.".to_string(),
            "Añade un accesorio para completar el look.".to_string(),
        ],
    }
}

/// Merge a slot selection with its wardrobe item. Selection fields go in
/// first and the matched item's fields are written over them, so item fields
/// win on key collisions. Without a matching id the slot keeps only the
/// selection's own fields.
pub fn enrich(selection: &SlotChoice, wardrobe: &[ClothingItem]) -> Map<String, Value> {
    let mut merged = match serde_json::to_value(selection) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    };

    let matched = wardrobe.iter().find(|item| item.id == selection.id);
    if let Some(item) = matched {
        if let Ok(Value::Object(fields)) = serde_json::to_value(item) {
            for (key, value) in fields {
                merged.insert(key, value);
            }
        }
    }

    merged
}
