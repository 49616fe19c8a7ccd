use crate::domain::model::CheckDigit;

const WEIGHTS: [u32; 6] = [2, 3, 4, 5, 6, 7];

/// Modulo-11 check digit over a string of decimal digits.
///
/// Digits are weighted right to left with the cycle `2..=7`; the digit is
/// `11 - (sum % 11)` with 11 mapped to `0` and 10 mapped to `K`.
/// Returns `None` for an empty body or any non-digit character.
pub fn compute_check_digit(body: &str) -> Option<CheckDigit> {
    if body.is_empty() {
        return None;
    }

    let mut sum = 0u32;
    for (position, c) in body.chars().rev().enumerate() {
        let digit = c.to_digit(10)?;
        sum = (sum + digit * WEIGHTS[position % WEIGHTS.len()]) % 11;
    }

    Some(match 11 - sum {
        11 => CheckDigit::Digit(0),
        10 => CheckDigit::K,
        raw => CheckDigit::Digit(raw as u8),
    })
}
