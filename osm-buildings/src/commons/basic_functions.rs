use once_cell::sync::Lazy;
use regex::Regex;

static NUMERIC_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[-+]?[0-9]*\.?[0-9]+").expect("valid numeric token pattern"));

/// Extract the first signed decimal number from a free-form tag value
///
/// OSM values often carry units or prose ("12.5 m", "approx. 20", "3;4").
/// The first substring shaped like `[-+]?[0-9]*\.?[0-9]+` is parsed as f64;
/// when nothing matches the value is treated as absent.
pub fn parse_numeric_token(value: &str) -> Option<f64> {
    NUMERIC_TOKEN
        .find(value)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}
