//! Month abbreviations and date-range formatting.

use serde_json::Value;

use super::scalar_text;
use crate::model::Translations;

const MONTHS_PT: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

const MONTHS_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Built-in month abbreviations for a language.
///
/// Languages without a built-in table use the Portuguese one.
pub fn builtin_months(language: &str) -> &'static [&'static str; 12] {
    match language {
        "en" => &MONTHS_EN,
        _ => &MONTHS_PT,
    }
}

/// Map a month number (1-12) to its abbreviation.
///
/// Accepts JSON numbers and numeric strings. Anything else, including
/// out-of-range numbers, yields an empty string and a warning.
pub fn month_abbreviation(raw: &Value, language: &str, translations: &Translations) -> String {
    let Some(number) = month_number(raw) else {
        log::warn!("Malformed month value {} ignored", raw);
        return String::new();
    };

    let index = (number - 1) as usize;
    match translations.months(language) {
        Some(months) => months[index].clone(),
        None => builtin_months(language)[index].to_string(),
    }
}

fn month_number(raw: &Value) -> Option<i64> {
    let number = match raw {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))?,
        Value::String(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    (1..=12).contains(&number).then_some(number)
}

/// Format the date range of a timeline item.
///
/// Reads `start_month`, `start_year`, `end_month` and `end_year`. The range
/// is closed only when both `end_month` and `end_year` are set; otherwise
/// the end renders as the localized "present" label. A set but malformed
/// month is omitted from its side of the range.
pub fn format_period(item: &Value, language: &str, translations: &Translations) -> String {
    let start = point_in_time(item, "start", language, translations);
    let has_end = is_set(item.get("end_month")) && is_set(item.get("end_year"));

    let end = if has_end {
        point_in_time(item, "end", language, translations)
    } else {
        if start.is_empty() {
            return String::new();
        }
        translations.present_label(language)
    };

    match (start.is_empty(), end.is_empty()) {
        (false, false) => format!("{} - {}", start, end),
        (true, false) => end,
        (false, true) => start,
        (true, true) => String::new(),
    }
}

// Zero, blank strings, `false` and empty containers count as unset.
fn is_set(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64() != Some(0.0),
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
    }
}

fn point_in_time(item: &Value, prefix: &str, language: &str, translations: &Translations) -> String {
    let month = match item.get(format!("{}_month", prefix)) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) if s.trim().is_empty() => String::new(),
        Some(raw) => month_abbreviation(raw, language, translations),
    };
    let year = item
        .get(format!("{}_year", prefix))
        .and_then(scalar_text)
        .unwrap_or_default();

    format!("{} {}", month, year).trim().to_string()
}
