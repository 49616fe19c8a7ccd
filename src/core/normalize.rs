use regex::Regex;
use std::sync::OnceLock;

/// Strips `.`, `-` and whitespace, then upper-cases what remains.
pub fn normalize(input: &str) -> String {
    input
        .chars()
        .filter(|c| !matches!(c, '.' | '-') && !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

fn shape_regex() -> &'static Regex {
    static SHAPE: OnceLock<Regex> = OnceLock::new();
    SHAPE.get_or_init(|| Regex::new(r"^([0-9]{7,8})([0-9K])$").expect("static RUT shape pattern"))
}

/// Splits a normalized RUT into `(body, check_char)` when it has the
/// "7-8 digits followed by a digit or `K`" shape.
pub fn split_normalized(normalized: &str) -> Option<(&str, char)> {
    let caps = shape_regex().captures(normalized)?;
    let body = caps.get(1)?.as_str();
    let check = caps.get(2)?.as_str().chars().next()?;
    Some((body, check))
}
