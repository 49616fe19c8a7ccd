use thiserror::Error;

pub const RUT_FORMAT_HINT: &str = "formato: XX.XXX.XXX-X";

#[derive(Error, Debug)]
pub enum RutError {
    #[error("RUT is empty")]
    Empty,

    #[error("Malformed RUT: {value}")]
    Malformed { value: String },

    #[error("RUT body {body} outside accepted range {min}..={max}")]
    OutOfRange { body: u32, min: u32, max: u32 },

    #[error("Check digit mismatch: expected {expected}, got {supplied}")]
    CheckDigitMismatch { expected: char, supplied: char },

    #[error("RUT inválido: {value}. Por favor ingrese un RUT chileno válido (formato: XX.XXX.XXX-X)")]
    InvalidTaxId { value: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unknown document type: {value}")]
    UnknownDocType { value: String },
}

impl RutError {
    /// Dialog title shown by hosts alongside the error message.
    pub fn title(&self) -> &'static str {
        match self {
            RutError::InvalidTaxId { .. } => "Error de validación de RUT",
            RutError::ConfigValidationError { .. } | RutError::InvalidConfigValueError { .. } => {
                "Error de configuración"
            }
            _ => "Error",
        }
    }

    /// True for the rejection reasons produced while checking a single RUT.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            RutError::Empty
                | RutError::Malformed { .. }
                | RutError::OutOfRange { .. }
                | RutError::CheckDigitMismatch { .. }
                | RutError::InvalidTaxId { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, RutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_tax_id_message_is_localized() {
        let err = RutError::InvalidTaxId {
            value: "1234".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "RUT inválido: 1234. Por favor ingrese un RUT chileno válido (formato: XX.XXX.XXX-X)"
        );
        assert_eq!(err.title(), "Error de validación de RUT");
        assert!(err.is_rejection());
    }

    #[test]
    fn test_io_error_is_not_a_rejection() {
        let err: RutError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(!err.is_rejection());
        assert_eq!(err.title(), "Error");
    }
}
