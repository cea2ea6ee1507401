use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, instrument};

use crate::core::{DocumentResult, OutputNaming, PdfConfig};
use crate::excel::write_quotation_workbook;
use crate::models::ComputedQuotation;
use crate::pdf::{quotation_markup, PdfCompiler};

pub mod layout;

pub use layout::{labels, MetaRow, QuotationLayout, SummaryRow};

const FILE_STEM: &str = "Quotation";

/// Names of the files written for one export, relative to the output
/// directory.
#[derive(Debug, Clone, Serialize)]
pub struct ExportedFiles {
    pub excel_file: String,
    pub pdf_file: String,
    pub generated_at: DateTime<Utc>,
}

/// Writes the spreadsheet and PDF for a computed quotation.
pub struct QuotationExporter {
    output_dir: PathBuf,
    naming: OutputNaming,
    pdf_config: PdfConfig,
    compiler: Arc<dyn PdfCompiler>,
}

impl QuotationExporter {
    pub fn new(
        output_dir: impl Into<PathBuf>,
        naming: OutputNaming,
        pdf_config: PdfConfig,
        compiler: Arc<dyn PdfCompiler>,
    ) -> Self {
        QuotationExporter {
            output_dir: output_dir.into(),
            naming,
            pdf_config,
            compiler,
        }
    }

    pub fn output_dir(&self) -> &PathBuf {
        &self.output_dir
    }

    /// Blocking: writes two files. Call from `web::block` inside handlers.
    #[instrument(skip(self, quotation), fields(quotation_no = %quotation.header.quotation_no))]
    pub fn export(&self, quotation: &ComputedQuotation) -> DocumentResult<ExportedFiles> {
        let start = Instant::now();
        std::fs::create_dir_all(&self.output_dir)?;

        let (excel_file, pdf_file) = file_names(&quotation.header.quotation_no, self.naming);
        let layout = QuotationLayout::new(quotation);

        write_quotation_workbook(&layout, &self.output_dir.join(&excel_file))?;

        let markup = quotation_markup(&layout, &self.pdf_config);
        self.compiler
            .compile(&markup, &self.output_dir.join(&pdf_file))?;

        info!(
            excel = %excel_file,
            pdf = %pdf_file,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "quotation exported"
        );

        Ok(ExportedFiles {
            excel_file,
            pdf_file,
            generated_at: Utc::now(),
        })
    }
}

/// Output file names for a quotation number.
pub fn file_names(quotation_no: &str, naming: OutputNaming) -> (String, String) {
    let stem = match naming {
        OutputNaming::Fixed => FILE_STEM.to_string(),
        OutputNaming::QuotationNo => {
            let component = sanitize_file_component(quotation_no);
            // A trailing dot would touch the extension separator.
            let component = component.trim_end_matches('.');
            if component.is_empty() {
                FILE_STEM.to_string()
            } else {
                format!("{}_{}", FILE_STEM, component)
            }
        }
    };
    (format!("{}.xlsx", stem), format!("{}.pdf", stem))
}

/// Keeps a user-supplied value from escaping the output directory.
pub fn sanitize_file_component(value: &str) -> String {
    value
        .trim()
        .replace("..", "_")
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}
