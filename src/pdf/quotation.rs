use crate::core::{Cell, ColumnAlign, PdfConfig, TableData};
use crate::export::QuotationLayout;
use crate::pdf::{PdfBuilder, TableStyle};

// Grey header band with near-white text.
const HEADER_FILL: &str = "luma(128)";
const HEADER_TEXT: &str = "rgb(\"#f5f5f5\")";

/// Typst source for the quotation PDF.
pub fn quotation_markup(layout: &QuotationLayout, config: &PdfConfig) -> String {
    let mut builder = PdfBuilder::new().with_config(config.clone());

    let meta_no = layout
        .meta
        .iter()
        .find(|m| m.side_label == crate::export::labels::QUOTATION_NO)
        .map(|m| m.side_value.as_str())
        .unwrap_or_default();
    let title = format!("{} {}", layout.title, meta_no);
    builder.set_title(title.trim_end());

    builder
        .add_centered_text(&layout.company_name, 16.0, true)
        .add_centered_text(&layout.company_address, 12.0, false)
        .add_centered_text(&layout.contact_line, 12.0, false)
        .add_spacing(0.5)
        .add_centered_text(layout.title, 16.0, true)
        .add_spacing(1.0);

    let mut meta = TableData::new(Vec::new()).with_column_widths(vec![10.0, 6.0]);
    for row in &layout.meta {
        meta.add_row(vec![
            Cell::text(format!("{} {}", row.label, row.value)),
            Cell::text(format!("{} {}", row.side_label, row.side_value)),
        ]);
    }
    builder
        .add_table(
            &meta,
            &TableStyle {
                stroke: "1pt + black".to_string(),
                ..Default::default()
            },
        )
        .add_spacing(1.0);

    builder.add_table(
        &layout.items,
        &TableStyle {
            header_fill: Some(HEADER_FILL.to_string()),
            header_text: Some(HEADER_TEXT.to_string()),
            stroke: "1pt + black".to_string(),
            ..Default::default()
        },
    );

    // Same column grid as the items table so amounts line up.
    let mut summary = TableData::new(Vec::new())
        .with_alignment(vec![
            ColumnAlign::Left,
            ColumnAlign::Left,
            ColumnAlign::Right,
            ColumnAlign::Right,
        ]);
    summary.column_widths = layout.items.column_widths.clone();
    for line in &layout.summary {
        summary.add_row(vec![
            Cell::Empty,
            Cell::Empty,
            Cell::text(line.label),
            Cell::Amount(line.amount),
        ]);
    }
    builder
        .add_table(
            &summary,
            &TableStyle {
                stroke_from_col: 2,
                stroke: "1pt + black".to_string(),
                ..Default::default()
            },
        )
        .add_spacing(1.0)
        .add_paragraph(&layout.deposit_line)
        .add_spacing(0.5)
        .add_aligned_text(layout.closing, ColumnAlign::Right);

    builder.build()
}
