use minijinja::{context, Environment};

use crate::export::ExportedFiles;
use crate::models::ComputedQuotation;

pub mod helpers;

const INDEX: &str = "index.html";
const PREVIEW: &str = "preview.html";
const RESULT: &str = "result.html";

/// HTML pages served by the form UI. Templates are compiled into the
/// binary and registered once at startup.
pub struct PageRenderer {
    env: Environment<'static>,
}

impl PageRenderer {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();

        env.add_template(INDEX, include_str!("pages/index.html"))?;
        env.add_template(PREVIEW, include_str!("pages/preview.html"))?;
        env.add_template(RESULT, include_str!("pages/result.html"))?;

        env.add_filter("money", helpers::money_filter);
        env.add_filter("quantity", helpers::quantity_filter);

        Ok(PageRenderer { env })
    }

    pub fn render_index(&self) -> Result<String, minijinja::Error> {
        self.env.get_template(INDEX)?.render(context! {})
    }

    /// Confirmation page: shows the computed quotation and carries the
    /// original inputs forward as hidden fields.
    pub fn render_preview(&self, quotation: &ComputedQuotation) -> Result<String, minijinja::Error> {
        self.env.get_template(PREVIEW)?.render(context! {
            data => &quotation.header,
            items => &quotation.items,
            total_amount => quotation.total_amount,
            received => quotation.received,
            balance => quotation.balance,
        })
    }

    pub fn render_result(&self, files: &ExportedFiles) -> Result<String, minijinja::Error> {
        self.env.get_template(RESULT)?.render(context! {
            excel_file => &files.excel_file,
            pdf_file => &files.pdf_file,
            generated_at => files.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::compute_quotation;
    use crate::models::{ItemRow, QuotationHeader};
    use chrono::{TimeZone, Utc};

    #[test]
    fn index_contains_form_and_api_calls() {
        let html = PageRenderer::new().unwrap().render_index().unwrap();
        assert!(html.contains("action=\"/generate\""));
        assert!(html.contains("name=\"item_name[]\""));
        assert!(html.contains("/api/save_quotation"));
    }

    #[test]
    fn preview_shows_totals_and_escapes_input() {
        let computed = compute_quotation(
            QuotationHeader {
                company_name: "<b>Acme</b>".to_string(),
                quotation_no: "Q-1".to_string(),
                ..Default::default()
            },
            vec![ItemRow::new("Widget", 3.0, 1500.0)],
            500.0,
        );
        let html = PageRenderer::new().unwrap().render_preview(&computed).unwrap();

        assert!(html.contains("4,500.00"));
        assert!(html.contains("4,000.00"));
        assert!(html.contains("&lt;b&gt;Acme&lt;/b&gt;"));
        assert!(!html.contains("<b>Acme</b>"));
        assert!(html.contains("action=\"/create_files\""));
        assert!(html.contains("name=\"item_name[]\" value=\"Widget\""));
    }

    #[test]
    fn result_links_are_url_encoded() {
        let files = ExportedFiles {
            excel_file: "Quotation_報價 1.xlsx".to_string(),
            pdf_file: "Quotation_報價 1.pdf".to_string(),
            generated_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap(),
        };
        let html = PageRenderer::new().unwrap().render_result(&files).unwrap();
        assert!(html.contains("2024-05-01 09:30:00 UTC"));
        assert!(html.contains("/download/Quotation_%E5%A0%B1%E5%83%B9%201.xlsx"));
        assert!(html.contains("/download/Quotation_%E5%A0%B1%E5%83%B9%201.pdf"));
    }
}
