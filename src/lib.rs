pub mod api;
pub mod core;
pub mod excel;
pub mod export;
pub mod models;
pub mod pdf;
pub mod store;
pub mod templates;

// Re-export commonly used types
pub use crate::core::{compute_quotation, AppConfig, DocumentError, DocumentResult};
pub use export::{ExportedFiles, QuotationExporter};
pub use models::{ComputedQuotation, Quotation, QuotationForm, SaveQuotationRequest};
pub use store::{QuotationRepository, StoreError};
