use crate::domain::model::{DocType, PartyRecord};

/// A host document that stores a RUT in a `tax_id` field.
pub trait TaxIdField {
    fn doctype(&self) -> DocType;
    fn tax_id(&self) -> Option<&str>;
    fn set_tax_id(&mut self, value: Option<String>);
}

impl TaxIdField for PartyRecord {
    fn doctype(&self) -> DocType {
        self.doctype
    }

    fn tax_id(&self) -> Option<&str> {
        self.tax_id.as_deref()
    }

    fn set_tax_id(&mut self, value: Option<String>) {
        self.tax_id = value;
    }
}
