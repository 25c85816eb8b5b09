// ==========================================
// Labstock - value normalizers
// ==========================================
// Pure functions from raw cell text to typed values. Source sheets
// use inconsistent locale formatting: comma decimals, embedded units
// ("10 stk", "1 234,50 kr"), two-digit years with trailing initials
// ("18.06.25 ILK"), free-text supplier roles. Malformed input maps
// to None, never to an error.
// ==========================================

use crate::domain::types::SupplierRole;
use chrono::NaiveDate;
use regex::Regex;
use uuid::Uuid;

/// Parse a price cell. Keeps digits/comma/dot/minus, maps the comma
/// decimal separator to a dot. Non-positive and unparseable values
/// are None.
///
/// "1 234,50 kr" → 1234.50
pub fn normalize_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.' || *c == '-')
        .collect();
    let value: f64 = cleaned.replace(',', ".").parse().ok()?;
    if value > 0.0 {
        Some(value)
    } else {
        None
    }
}

/// Parse a quantity cell with an optional trailing unit. The first
/// numeric token wins; trailing unit text is ignored.
///
/// "10 stk" → 10, "5stk/eske" → 5
pub fn normalize_quantity(raw: &str) -> Option<f64> {
    let pattern = Regex::new(r"(\d+(?:[.,]\d+)?)").unwrap();
    let token = pattern.captures(raw)?.get(1)?.as_str();
    let value: f64 = token.replace(',', ".").parse().ok()?;
    if value > 0.0 {
        Some(value)
    } else {
        None
    }
}

/// Parse a day.month.two-digit-year date anywhere in the string,
/// interpreting the year as in the 2000s. Signature-style cells
/// ("18.06.25 ILK") carry free text after the date.
pub fn parse_short_date(raw: &str) -> Option<NaiveDate> {
    let pattern = Regex::new(r"\b(\d{1,2})\.(\d{1,2})\.(\d{2})\b").unwrap();
    let captures = pattern.captures(raw)?;
    let day: u32 = captures.get(1)?.as_str().parse().ok()?;
    let month: u32 = captures.get(2)?.as_str().parse().ok()?;
    let year: i32 = captures.get(3)?.as_str().parse().ok()?;
    NaiveDate::from_ymd_opt(2000 + year, month, day)
}

/// Parse a percentage cell. Valid only in [0, 100].
///
/// "38,12 %" → 38.12
pub fn normalize_percentage(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.' || *c == '-')
        .collect();
    let value: f64 = cleaned.replace(',', ".").parse().ok()?;
    if (0.0..=100.0).contains(&value) {
        Some(value)
    } else {
        None
    }
}

/// Map a free-text supplier role to the enum by substring match
/// against a small vocabulary. Blank and unrecognized input defaults
/// to PRIMARY.
pub fn parse_supplier_role(raw: &str) -> SupplierRole {
    let lowered = raw.trim().to_lowercase();

    const SECONDARY_WORDS: [&str; 4] = ["sekundær", "secondary", "reserve", "alternativ"];
    const BACKUP_WORDS: [&str; 1] = ["backup"];
    const PRIMARY_WORDS: [&str; 4] = ["primær", "primary", "hoved", "main"];

    if SECONDARY_WORDS.iter().any(|w| lowered.contains(w)) {
        SupplierRole::Secondary
    } else if BACKUP_WORDS.iter().any(|w| lowered.contains(w)) {
        SupplierRole::Backup
    } else if PRIMARY_WORDS.iter().any(|w| lowered.contains(w)) {
        SupplierRole::Primary
    } else {
        SupplierRole::Primary
    }
}

/// Extract 2-4 trailing uppercase letters from a signature-style
/// cell: "18.06.25 ILK" → "ILK".
pub fn extract_initials(raw: &str) -> Option<String> {
    let pattern = Regex::new(r"(?:^|\s)([A-ZÆØÅ]{2,4})$").unwrap();
    let trimmed = raw.trim();
    pattern
        .captures(trimmed)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Build a default internal identifier from the item name, an
/// optional manufacturer fragment and a random suffix. Used only when
/// the row supplied neither an external id nor an explicit reference.
pub fn generate_item_code(name: &str, manufacturer: Option<&str>) -> String {
    let name_part = alphanumeric_prefix(name, 6);
    let name_part = if name_part.is_empty() {
        "VARE".to_string()
    } else {
        name_part
    };

    let manufacturer_part = manufacturer
        .map(|m| alphanumeric_prefix(m, 3))
        .filter(|p| !p.is_empty());

    let suffix = short_unique_suffix();
    match manufacturer_part {
        Some(part) => format!("{}-{}-{}", name_part, part, suffix),
        None => format!("{}-{}", name_part, suffix),
    }
}

/// Base for reference-entity codes: the alphanumeric-stripped
/// uppercase name, truncated. The resolver appends a uniqueness
/// suffix when the base collides.
pub fn reference_code_base(name: &str, max_len: usize) -> String {
    alphanumeric_prefix(name, max_len)
}

/// Short random fragment for generated codes. A uuid fragment rather
/// than a clock value, so rapid imports cannot collide on the same
/// timestamp.
pub fn short_unique_suffix() -> String {
    Uuid::new_v4().simple().to_string()[..4].to_string()
}

fn alphanumeric_prefix(raw: &str, max_len: usize) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric())
        .take(max_len)
        .collect::<String>()
        .to_uppercase()
}
