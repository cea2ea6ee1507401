#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use quotation_generator::api::ApiState;
use quotation_generator::core::{AppConfig, DocumentResult};
use quotation_generator::export::QuotationExporter;
use quotation_generator::pdf::PdfCompiler;
use quotation_generator::store::InMemoryQuotationRepository;
use tempfile::TempDir;

/// Writes a placeholder PDF so tests do not need the typst binary.
pub struct StubCompiler;

impl PdfCompiler for StubCompiler {
    fn compile(&self, markup: &str, output_path: &Path) -> DocumentResult<()> {
        std::fs::write(output_path, format!("%PDF-stub\n{}", markup))?;
        Ok(())
    }
}

/// State backed by the in-memory repository and a scratch output directory.
pub fn test_state() -> (TempDir, ApiState) {
    let dir = tempfile::tempdir().expect("tempdir");
    let writable = dir.path().to_string_lossy().to_string();
    let config = AppConfig::from_lookup(|key| match key {
        "WRITABLE_DIR" => Some(writable.clone()),
        _ => None,
    })
    .expect("config");
    config.prepare_dirs().expect("dirs");

    let exporter = QuotationExporter::new(
        config.output_dir(),
        config.output_naming,
        config.pdf_config(),
        Arc::new(StubCompiler),
    );
    let state = ApiState::from_parts(Arc::new(InMemoryQuotationRepository::new()), exporter)
        .expect("state");
    (dir, state)
}

pub fn quotation_form(quotation_no: &str) -> Vec<(&'static str, String)> {
    vec![
        ("company_name", "Acme Trading".to_string()),
        ("company_address", "1 Harbour Road".to_string()),
        ("company_phone", "2345 6789".to_string()),
        ("company_email", "sales@acme.test".to_string()),
        ("quotation_no", quotation_no.to_string()),
        ("date", "2024-05-01".to_string()),
        ("client_name", "Globex".to_string()),
        ("client_address", "9 Side Street".to_string()),
        ("item_name[]", "Widget".to_string()),
        ("quantity[]", "2".to_string()),
        ("price[]", "10".to_string()),
        ("item_name[]", "".to_string()),
        ("quantity[]", "5".to_string()),
        ("price[]", "3".to_string()),
        ("item_name[]", "Gadget".to_string()),
        ("quantity[]", "1".to_string()),
        ("price[]", "25".to_string()),
        ("received", "20".to_string()),
        ("deposit_info", "Paid by transfer".to_string()),
    ]
}
