use crate::utils::error::RutError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Trailing character of a RUT: a decimal digit or `K`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckDigit {
    Digit(u8),
    K,
}

impl CheckDigit {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'K' | 'k' => Some(CheckDigit::K),
            '0'..='9' => c.to_digit(10).map(|d| CheckDigit::Digit(d as u8)),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            CheckDigit::K => 'K',
            CheckDigit::Digit(d) => char::from(b'0' + d),
        }
    }
}

impl fmt::Display for CheckDigit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A RUT that passed shape, range and check-digit validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rut {
    pub body: u32,
    pub check_digit: CheckDigit,
}

impl Rut {
    /// Raw form without separators, e.g. `12345678K`.
    pub fn to_raw(&self) -> String {
        format!("{}{}", self.body, self.check_digit)
    }
}

impl fmt::Display for Rut {
    /// Formatted form, e.g. `12.345.678-K`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            crate::core::formatter::group_thousands(&self.body.to_string()),
            self.check_digit
        )
    }
}

/// Bound applied to the numeric body before the check digit is compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangePolicy {
    /// Realistic registry range, inclusive on both ends.
    Registry { min: u32, max: u32 },
    /// Only the 7-8 digit shape is enforced.
    AnyLength,
}

pub const REGISTRY_MIN_BODY: u32 = 1_000_000;
pub const REGISTRY_MAX_BODY: u32 = 25_000_000;

impl Default for RangePolicy {
    fn default() -> Self {
        RangePolicy::Registry {
            min: REGISTRY_MIN_BODY,
            max: REGISTRY_MAX_BODY,
        }
    }
}

impl RangePolicy {
    pub fn contains(&self, body: u32) -> bool {
        match *self {
            RangePolicy::Registry { min, max } => (min..=max).contains(&body),
            RangePolicy::AnyLength => true,
        }
    }
}

/// Host document types whose `tax_id` field carries a RUT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocType {
    Customer,
    Supplier,
    Company,
}

impl DocType {
    pub const ALL: [DocType; 3] = [DocType::Customer, DocType::Supplier, DocType::Company];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocType::Customer => "Customer",
            DocType::Supplier => "Supplier",
            DocType::Company => "Company",
        }
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocType {
    type Err = RutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocType::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RutError::UnknownDocType {
                value: s.to_string(),
            })
    }
}

/// Minimal party document: Customer, Supplier or Company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyRecord {
    pub doctype: DocType,
    pub name: String,
    pub tax_id: Option<String>,
}

impl PartyRecord {
    pub fn new(doctype: DocType, name: impl Into<String>, tax_id: Option<&str>) -> Self {
        Self {
            doctype,
            name: name.into(),
            tax_id: tax_id.map(str::to_string),
        }
    }
}

/// One row of a sales or purchase taxes table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxRow {
    pub description: Option<String>,
    pub account_head: String,
    pub tax_amount: f64,
    #[serde(default)]
    pub round_up: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundingDetail {
    pub tax_name: String,
    pub original: f64,
    pub rounded: f64,
    pub difference: f64,
}
