//! Prompt construction for the outfit generation call.

use crate::models::{ClothingItem, Weather};

pub const DEFAULT_DAY: &str = "hoy";
pub const DEFAULT_TEMP: f64 = 22.0;
pub const DEFAULT_WEATHER_DESCRIPTION: &str = "agradable";

/// Build the instruction sent to the model. At most `item_cap` wardrobe
/// items are listed, one per line as `id: tipo - nombre (color)`.
pub fn build_prompt(
    wardrobe: &[ClothingItem],
    weather: Option<&Weather>,
    occasion: &str,
    day: &str,
    item_cap: usize,
) -> String {
    let items = wardrobe
        .iter()
        .take(item_cap)
        .map(|item| {
            format!(
                "{}: {} - {} ({})",
                item.id, item.tipo, item.nombre, item.color
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let temp = weather.and_then(|w| w.temp).unwrap_or(DEFAULT_TEMP);
    let description = weather
        .and_then(|w| w.description.as_deref())
        .unwrap_or(DEFAULT_WEATHER_DESCRIPTION);

    format!(
        "Eres un estilista personal. Elige un outfit para {day} con esta ropa disponible:\n\n\
         {items}\n\n\
         Ocasión: {occasion}\n\
         Clima: {temp}°C, {description}\n\n\
         Responde ÚNICAMENTE con un objeto JSON, sin texto adicional ni marcas de código, \
         con esta forma exacta:\n\
         {{\"outfit\":{{\"top\":{{\"id\":\"...\",\"razon\":\"...\"}},\
         \"bottom\":{{\"id\":\"...\",\"razon\":\"...\"}},\
         \"shoes\":{{\"id\":\"...\",\"razon\":\"...\"}}}},\
         \"descripcion\":\"...\",\"tips\":[\"...\"]}}\n\
         Usa solo ids de la lista."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, tipo: &str, nombre: &str, color: &str) -> ClothingItem {
        ClothingItem {
            id: id.to_string(),
            tipo: tipo.to_string(),
            nombre: nombre.to_string(),
            color: color.to_string(),
            extra: Default::default(),
        }
    }

    #[test]
    fn lists_items_in_expected_format() {
        let wardrobe = vec![item("w1", "top", "Camisa", "blanco")];
        let prompt = build_prompt(&wardrobe, None, "trabajo", "lunes", 8);

        assert!(prompt.contains("w1: top - Camisa (blanco)"));
        assert!(prompt.contains("Ocasión: trabajo"));
        assert!(prompt.contains("lunes"));
    }

    #[test]
    fn caps_listed_items() {
        let wardrobe: Vec<ClothingItem> = (0..12)
            .map(|i| item(&format!("w{}", i), "top", "Prenda", "negro"))
            .collect();
        let prompt = build_prompt(&wardrobe, None, "casual", DEFAULT_DAY, 8);

        assert!(prompt.contains("w7: "));
        assert!(!prompt.contains("w8: "));
    }

    #[test]
    fn applies_weather_defaults() {
        let prompt = build_prompt(&[], None, "casual", DEFAULT_DAY, 8);
        assert!(prompt.contains("22°C, agradable"));
    }

    #[test]
    fn uses_supplied_weather() {
        let weather = Weather {
            temp: Some(9.0),
            description: Some("lluvioso".to_string()),
        };
        let prompt = build_prompt(&[], Some(&weather), "casual", DEFAULT_DAY, 8);
        assert!(prompt.contains("9°C, lluvioso"));
    }

    #[test]
    fn demands_a_bare_json_object() {
        let prompt = build_prompt(&[], None, "casual", DEFAULT_DAY, 8);
        assert!(prompt.contains("{\"outfit\":{\"top\":{\"id\""));
        assert!(prompt.contains("sin texto adicional"));
    }
}
