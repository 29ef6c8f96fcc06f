use crate::commons::basic_functions::parse_numeric_token;
use crate::geometric::element::{non_empty_tag, Tags};

/// Address tags, in output order
pub const ADDRESS_FIELDS: [&str; 8] = [
    "addr:housenumber",
    "addr:houseletter",
    "addr:street",
    "addr:suburb",
    "addr:city",
    "addr:state",
    "addr:postcode",
    "addr:country",
];

/// One step of the height chain: tags + storey height -> meters
pub type HeightRule = fn(&Tags, f64) -> Option<f64>;

/// Tried in order, first value wins
pub const HEIGHT_RULES: [HeightRule; 3] = [height_tag, building_height_tag, levels_tag];

fn numeric_tag(tags: &Tags, key: &str) -> Option<f64> {
    non_empty_tag(tags, key).and_then(parse_numeric_token)
}

pub fn height_tag(tags: &Tags, _storey_height: f64) -> Option<f64> {
    numeric_tag(tags, "height")
}

pub fn building_height_tag(tags: &Tags, _storey_height: f64) -> Option<f64> {
    numeric_tag(tags, "building:height")
}

pub fn levels_tag(tags: &Tags, storey_height: f64) -> Option<f64> {
    numeric_tag(tags, "building:levels").map(|levels| levels * storey_height)
}

/// Height in meters, or None when no rule yields a number
/// Extracted values are passed through, including zero and negatives
pub fn resolve_height(tags: &Tags, storey_height: f64) -> Option<f64> {
    HEIGHT_RULES
        .iter()
        .find_map(|rule| rule(tags, storey_height))
}

/// Comma-joined address, or None when no address tag is set
pub fn format_address(tags: &Tags) -> Option<String> {
    let parts: Vec<&str> = ADDRESS_FIELDS
        .iter()
        .filter_map(|key| non_empty_tag(tags, key))
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}
