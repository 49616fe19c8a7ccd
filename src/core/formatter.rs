use crate::core::normalize::{normalize, split_normalized};

/// Inserts `.` every three digits counting from the right.
pub fn group_thousands(digits: &str) -> String {
    let len = digits.chars().count();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

/// Renders a RUT as `XX.XXX.XXX-D`.
///
/// Only the shape is checked, not the check digit: input that is not
/// "7-8 digits plus a digit or `K`" after normalization is returned unchanged.
pub fn format(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    let normalized = normalize(input);
    match split_normalized(&normalized) {
        Some((body, check)) => format!("{}-{}", group_thousands(body), check),
        None => input.to_string(),
    }
}
