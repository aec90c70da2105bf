use serde::{Deserialize, Deserializer};

/// Parse numeric text the way program sheets and record exports write it.
///
/// Surrounding whitespace, a trailing `%` and `,` thousands separators are
/// ignored. Anything that still fails to parse, or is not finite, becomes `0`.
pub fn parse_lenient(value: &str) -> f64 {
    let trimmed = value.trim();
    let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
    let cleaned: String = trimmed.chars().filter(|ch| *ch != ',').collect();

    cleaned
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite())
        .unwrap_or(0.0)
}

/// Rank text accepted only when it names a rank between 1 and 9.
pub fn parse_rank(value: &str) -> Option<u8> {
    value
        .trim()
        .parse::<u8>()
        .ok()
        .filter(|rank| (1..=9).contains(rank))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

/// Deserialize a field that may arrive as a JSON number or as numeric text.
pub(crate) fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(number) if number.is_finite() => number,
        NumberOrText::Number(_) => 0.0,
        NumberOrText::Text(text) => parse_lenient(&text),
    };
    Ok(value)
}
