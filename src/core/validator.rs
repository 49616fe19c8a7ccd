use crate::core::checksum::compute_check_digit;
use crate::core::normalize::{normalize, split_normalized};
use crate::domain::model::{CheckDigit, RangePolicy, Rut};
use crate::utils::error::{Result, RutError};

/// Validates RUTs under a configurable body range policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RutValidator {
    policy: RangePolicy,
}

impl RutValidator {
    pub fn new(policy: RangePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> RangePolicy {
        self.policy
    }

    /// Parses `input` into a [`Rut`], reporting why it was rejected.
    pub fn parse(&self, input: &str) -> Result<Rut> {
        let normalized = normalize(input);
        if normalized.is_empty() {
            return Err(RutError::Empty);
        }

        let (body_str, check) = split_normalized(&normalized).ok_or_else(|| RutError::Malformed {
            value: input.to_string(),
        })?;

        // shape guarantees at most 8 digits
        let body: u32 = body_str.parse().map_err(|_| RutError::Malformed {
            value: input.to_string(),
        })?;

        if let RangePolicy::Registry { min, max } = self.policy {
            if !self.policy.contains(body) {
                return Err(RutError::OutOfRange { body, min, max });
            }
        }

        let supplied = CheckDigit::from_char(check).ok_or_else(|| RutError::Malformed {
            value: input.to_string(),
        })?;
        let expected = compute_check_digit(body_str).ok_or_else(|| RutError::Malformed {
            value: input.to_string(),
        })?;

        if supplied != expected {
            return Err(RutError::CheckDigitMismatch {
                expected: expected.as_char(),
                supplied: supplied.as_char(),
            });
        }

        Ok(Rut {
            body,
            check_digit: supplied,
        })
    }

    pub fn is_valid(&self, input: &str) -> bool {
        match self.parse(input) {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!("Rejected RUT {:?}: {}", input, e);
                false
            }
        }
    }
}

/// Validates under the default registry range.
pub fn is_valid(input: &str) -> bool {
    RutValidator::default().is_valid(input)
}

pub fn parse(input: &str) -> Result<Rut> {
    RutValidator::default().parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_in_any_notation() {
        assert!(is_valid("12.345.678-5"));
        assert!(is_valid("123456785"));
        assert!(is_valid("12345678-5"));
        assert!(is_valid(" 12 345 678 5 "));
        assert!(is_valid("8.765.432-k"));
        assert!(is_valid("8765432K"));
        assert!(is_valid("19.876.543-0"));
    }

    #[test]
    fn test_wrong_check_digit() {
        assert!(!is_valid("12.345.678-6"));
        assert!(!is_valid("8765432-0"));
        match parse("12345678-6") {
            Err(RutError::CheckDigitMismatch { expected, supplied }) => {
                assert_eq!(expected, '5');
                assert_eq!(supplied, '6');
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_empty_and_malformed() {
        assert!(matches!(parse(""), Err(RutError::Empty)));
        assert!(matches!(parse(" .- "), Err(RutError::Empty)));
        assert!(matches!(parse("12A45678-5"), Err(RutError::Malformed { .. })));
        assert!(matches!(parse("123456-0"), Err(RutError::Malformed { .. })));
        assert!(matches!(parse("123456789-0"), Err(RutError::Malformed { .. })));
        assert!(matches!(parse("12345678-X"), Err(RutError::Malformed { .. })));
    }

    #[test]
    fn test_registry_range_is_inclusive() {
        assert!(is_valid("1.000.000-9"));
        assert!(is_valid("25.000.000-6"));
        assert!(matches!(
            parse("25.000.001-4"),
            Err(RutError::OutOfRange { body: 25_000_001, .. })
        ));
        // leading zero keeps the 7-digit shape but drops the body below the registry floor
        assert!(matches!(parse("0999999-4"), Err(RutError::OutOfRange { .. })));
    }

    #[test]
    fn test_any_length_policy_skips_range() {
        let validator = RutValidator::new(RangePolicy::AnyLength);
        assert!(validator.is_valid("25.000.001-4"));
        assert!(validator.is_valid("99.999.999-9"));
        assert!(!validator.is_valid("25.000.001-5"));
    }

    #[test]
    fn test_parse_returns_rut() {
        let rut = parse("8.765.432-k").unwrap();
        assert_eq!(rut.body, 8_765_432);
        assert_eq!(rut.check_digit, CheckDigit::K);
        assert_eq!(rut.to_string(), "8.765.432-K");
    }
}
