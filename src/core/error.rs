use std::error::Error;
use std::fmt;

/// Failures while producing quotation documents or loading settings.
#[derive(Debug)]
pub enum DocumentError {
    Io(String),
    Spreadsheet(String),
    Typesetting(String),
    Config(String),
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentError::Io(msg) => write!(f, "I/O error: {}", msg),
            DocumentError::Spreadsheet(msg) => write!(f, "spreadsheet error: {}", msg),
            DocumentError::Typesetting(msg) => write!(f, "PDF error: {}", msg),
            DocumentError::Config(msg) => write!(f, "configuration error: {}", msg),
        }
    }
}

impl Error for DocumentError {}

impl From<std::io::Error> for DocumentError {
    fn from(error: std::io::Error) -> Self {
        DocumentError::Io(error.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for DocumentError {
    fn from(error: rust_xlsxwriter::XlsxError) -> Self {
        DocumentError::Spreadsheet(error.to_string())
    }
}

pub type DocumentResult<T> = Result<T, DocumentError>;
