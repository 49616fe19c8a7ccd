//! Host-neutral handlers for the `tax_id` field of party documents.
//!
//! `validate_tax_id` runs when a document is saved and rejects it on an invalid
//! RUT. `on_tax_id_change` runs when the field is edited and clears it instead.

use crate::core::formatter::format;
use crate::core::validator::RutValidator;
use crate::domain::model::DocType;
use crate::domain::ports::TaxIdField;
use crate::utils::error::{Result, RutError, RUT_FORMAT_HINT};
use std::collections::HashSet;

/// Result of editing a `tax_id` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    /// Field empty, or doctype not handled.
    Unchanged,
    /// Field rewritten to the formatted RUT.
    Formatted(String),
    /// Field cleared; `message` should be shown to the user.
    Cleared { title: String, message: String },
}

#[derive(Debug, Clone)]
pub struct TaxIdHooks {
    validator: RutValidator,
    doctypes: HashSet<DocType>,
}

impl Default for TaxIdHooks {
    fn default() -> Self {
        Self::new(RutValidator::default(), DocType::ALL)
    }
}

impl TaxIdHooks {
    pub fn new(validator: RutValidator, doctypes: impl IntoIterator<Item = DocType>) -> Self {
        Self {
            validator,
            doctypes: doctypes.into_iter().collect(),
        }
    }

    pub fn handles(&self, doctype: DocType) -> bool {
        self.doctypes.contains(&doctype)
    }

    fn present_tax_id<D: TaxIdField>(&self, doc: &D) -> Option<String> {
        if !self.handles(doc.doctype()) {
            return None;
        }
        doc.tax_id().filter(|v| !v.is_empty()).map(str::to_string)
    }

    /// Save-time validation. Returns `true` when the field was present and rewritten.
    pub fn validate_tax_id<D: TaxIdField>(&self, doc: &mut D) -> Result<bool> {
        let Some(value) = self.present_tax_id(doc) else {
            return Ok(false);
        };

        if !self.validator.is_valid(&value) {
            tracing::warn!("Invalid RUT on {}: {}", doc.doctype(), value);
            return Err(RutError::InvalidTaxId { value });
        }

        doc.set_tax_id(Some(format(&value)));
        Ok(true)
    }

    pub fn on_tax_id_change<D: TaxIdField>(&self, doc: &mut D) -> FieldChange {
        let Some(value) = self.present_tax_id(doc) else {
            return FieldChange::Unchanged;
        };

        if !self.validator.is_valid(&value) {
            doc.set_tax_id(Some(String::new()));
            return FieldChange::Cleared {
                title: "RUT Inválido".to_string(),
                message: format!(
                    "El RUT \"{}\" no es válido. Por favor ingrese un RUT chileno válido ({})",
                    value, RUT_FORMAT_HINT
                ),
            };
        }

        let formatted = format(&value);
        doc.set_tax_id(Some(formatted.clone()));
        FieldChange::Formatted(formatted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::PartyRecord;

    #[test]
    fn test_validate_formats_valid_tax_id() {
        let hooks = TaxIdHooks::default();
        let mut doc = PartyRecord::new(DocType::Customer, "ACME", Some("123456785"));
        assert!(hooks.validate_tax_id(&mut doc).unwrap());
        assert_eq!(doc.tax_id.as_deref(), Some("12.345.678-5"));
    }

    #[test]
    fn test_validate_rejects_invalid_tax_id_and_keeps_value() {
        let hooks = TaxIdHooks::default();
        let mut doc = PartyRecord::new(DocType::Supplier, "Proveedor", Some("12.345.678-6"));
        let err = hooks.validate_tax_id(&mut doc).unwrap_err();
        assert!(matches!(err, RutError::InvalidTaxId { ref value } if value == "12.345.678-6"));
        assert_eq!(doc.tax_id.as_deref(), Some("12.345.678-6"));
    }

    #[test]
    fn test_validate_skips_empty_and_disabled() {
        let hooks = TaxIdHooks::new(RutValidator::default(), [DocType::Customer]);
        let mut empty = PartyRecord::new(DocType::Customer, "Sin RUT", Some(""));
        assert!(!hooks.validate_tax_id(&mut empty).unwrap());

        let mut company = PartyRecord::new(DocType::Company, "Empresa", Some("garbage"));
        assert!(!hooks.validate_tax_id(&mut company).unwrap());
        assert_eq!(company.tax_id.as_deref(), Some("garbage"));
    }

    #[test]
    fn test_change_clears_invalid_value() {
        let hooks = TaxIdHooks::default();
        let mut doc = PartyRecord::new(DocType::Company, "Empresa", Some("1234"));
        match hooks.on_tax_id_change(&mut doc) {
            FieldChange::Cleared { title, message } => {
                assert_eq!(title, "RUT Inválido");
                assert!(message.starts_with("El RUT \"1234\" no es válido."));
            }
            other => panic!("unexpected change: {:?}", other),
        }
        assert_eq!(doc.tax_id.as_deref(), Some(""));
    }

    #[test]
    fn test_change_formats_valid_value() {
        let hooks = TaxIdHooks::default();
        let mut doc = PartyRecord::new(DocType::Customer, "Cliente", Some("8765432k"));
        assert_eq!(
            hooks.on_tax_id_change(&mut doc),
            FieldChange::Formatted("8.765.432-K".to_string())
        );
        assert_eq!(doc.tax_id.as_deref(), Some("8.765.432-K"));

        let mut none = PartyRecord::new(DocType::Customer, "Cliente", None);
        assert_eq!(hooks.on_tax_id_change(&mut none), FieldChange::Unchanged);
    }
}
