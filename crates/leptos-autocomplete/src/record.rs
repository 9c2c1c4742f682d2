//! Suggestion record helpers

use serde_json::{Number, Value};

/// Text form of a JSON scalar, the way the browser stringifies it into an
/// input value. Null, arrays and objects become empty.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number_text(number),
        Value::Bool(flag) => flag.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// Shortest text for a float; integral values print without a fraction
pub fn float_text(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn number_text(number: &Number) -> String {
    if let Some(int) = number.as_i64() {
        return int.to_string();
    }
    if let Some(uint) = number.as_u64() {
        return uint.to_string();
    }
    float_text(number.as_f64().unwrap_or_default())
}

/// Value of `field` in a record, empty when missing
pub fn field_text(record: &Value, field: &str) -> String {
    record.get(field).map(value_text).unwrap_or_default()
}

/// Primary and optional secondary line for a suggestion row.
///
/// Stock records (carrying quantity or price) lead with the configured field,
/// followed by name, stock and price. Other records with `display_text`
/// show it verbatim.
pub fn suggestion_label(record: &Value, field: &str) -> (String, Option<String>) {
    let is_stock = record.get("quantity").is_some() || record.get("purchase_price").is_some();
    let display = field_text(record, "display_text");
    if !is_stock && !display.is_empty() {
        return (display, None);
    }

    let primary = field_text(record, field);
    let mut details = Vec::new();
    if field != "name" {
        let name = field_text(record, "name");
        if !name.is_empty() {
            details.push(name);
        }
    }
    let stock = format!("{} {}", field_text(record, "quantity"), field_text(record, "unit"));
    if !stock.trim().is_empty() {
        details.push(stock.trim().to_string());
    }
    if let Some(price) = record.get("purchase_price").and_then(Value::as_f64) {
        details.push(format!("{:.2}", price));
    }

    let secondary = (!details.is_empty()).then(|| details.join(" · "));
    (primary, secondary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_text() {
        assert_eq!(value_text(&json!("WVW123")), "WVW123");
        assert_eq!(value_text(&json!(42)), "42");
        assert_eq!(value_text(&json!(2.0)), "2");
        assert_eq!(value_text(&json!(12.5)), "12.5");
        assert_eq!(value_text(&json!(null)), "");
        assert_eq!(value_text(&json!([1])), "");
    }

    #[test]
    fn test_field_text_missing() {
        assert_eq!(field_text(&json!({ "vin": "X" }), "plate_number"), "");
    }

    #[test]
    fn test_label_prefers_display_text() {
        let record = json!({ "display_text": "CA1234AB - Иван", "plate_number": "CA1234AB" });
        assert_eq!(suggestion_label(&record, "plate_number"), ("CA1234AB - Иван".to_string(), None));
    }

    #[test]
    fn test_label_for_stock_record() {
        let record = json!({
            "article_number": "FLT-01",
            "name": "Маслен филтър",
            "unit": "бр.",
            "quantity": 4.0,
            "purchase_price": 12.5,
        });
        let (primary, secondary) = suggestion_label(&record, "article_number");
        assert_eq!(primary, "FLT-01");
        assert_eq!(secondary.as_deref(), Some("Маслен филтър · 4 бр. · 12.50"));
    }

    #[test]
    fn test_stock_record_keeps_details_despite_display_text() {
        let record = json!({
            "id": 5,
            "article_number": "FLT-01",
            "name": "Филтър",
            "unit": "бр.",
            "quantity": 3.0,
            "purchase_price": 8.0,
            "display_text": "FLT-01 - Филтър",
        });
        let (primary, secondary) = suggestion_label(&record, "article_number");
        assert_eq!(primary, "FLT-01");
        assert_eq!(secondary.as_deref(), Some("Филтър · 3 бр. · 8.00"));
    }

    #[test]
    fn test_label_without_details() {
        let (primary, secondary) = suggestion_label(&json!({ "name": "Гуми" }), "name");
        assert_eq!(primary, "Гуми");
        assert_eq!(secondary, None);
    }
}
