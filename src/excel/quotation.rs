use std::path::Path;

use crate::core::DocumentResult;
use crate::excel::ExcelBuilder;
use crate::export::QuotationLayout;

const SHEET_NAME: &str = "Quotation";
const BANNER_COLS: u16 = 5;
// Totals sit under the unit price / amount columns.
const SUMMARY_LABEL_COL: u16 = 2;

/// Writes the quotation workbook to `path`.
pub fn write_quotation_workbook(layout: &QuotationLayout, path: &Path) -> DocumentResult<()> {
    let mut builder = ExcelBuilder::new(SHEET_NAME)?;

    builder
        .add_banner(&layout.company_name, BANNER_COLS, 16.0, true)?
        .add_banner(&layout.company_address, BANNER_COLS, 11.0, false)?
        .add_banner(&layout.contact_line, BANNER_COLS, 11.0, false)?
        .add_banner(layout.title, BANNER_COLS, 14.0, true)?
        .skip_rows(1);

    for meta in &layout.meta {
        builder.add_label_row(&[
            (0, meta.label, meta.value.as_str()),
            (3, meta.side_label, meta.side_value.as_str()),
        ])?;
    }

    builder.skip_rows(1).add_table(&layout.items)?;

    for line in &layout.summary {
        builder.add_summary_row(SUMMARY_LABEL_COL, line.label, line.amount)?;
    }

    builder
        .skip_rows(1)
        .add_note(&layout.deposit_line)?
        .set_column_widths(&[(0, 40.0), (1, 10.0), (2, 14.0), (3, 16.0), (4, 18.0)])?;

    tracing::debug!(path = %path.display(), rows = builder.current_row(), "writing workbook");
    builder.save(path)
}
