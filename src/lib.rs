//! Validation and formatting of Chilean RUT (Rol Único Tributario) numbers.
//!
//! ```
//! assert!(chile_rut::is_valid("12.345.678-5"));
//! assert_eq!(chile_rut::format("123456785"), "12.345.678-5");
//! ```

pub mod adapters;
#[cfg(feature = "cli")]
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::app::commands::run_command;
#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, Command};
pub use crate::config::RutConfig;

pub use crate::core::checksum::compute_check_digit;
pub use crate::core::formatter::format;
pub use crate::core::hooks::{FieldChange, TaxIdHooks};
pub use crate::core::normalize::normalize;
pub use crate::core::tax_rounding::{apply_row_level_tax_rounding, RoundingSummary};
pub use crate::core::validator::{is_valid, parse, RutValidator};
pub use crate::domain::model::{CheckDigit, DocType, PartyRecord, RangePolicy, Rut, TaxRow};
pub use crate::domain::ports::TaxIdField;
pub use crate::utils::error::{Result, RutError};
