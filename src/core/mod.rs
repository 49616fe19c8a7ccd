pub mod checksum;
pub mod formatter;
pub mod hooks;
pub mod normalize;
pub mod tax_rounding;
pub mod validator;

pub use crate::domain::model::{CheckDigit, DocType, PartyRecord, RangePolicy, Rut, TaxRow};
pub use crate::domain::ports::TaxIdField;
pub use crate::utils::error::Result;
