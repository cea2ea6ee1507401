use crate::core::{Cell, ColumnAlign, DocumentResult, TableData, AMOUNT_NUM_FORMAT};
use crate::excel::SheetWriter;
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder};
use std::path::Path;

/// Writes a document top to bottom, tracking the next free row.
pub struct ExcelBuilder {
    writer: SheetWriter,
    current_row: u32,
}

impl ExcelBuilder {
    pub fn new(sheet_name: &str) -> DocumentResult<Self> {
        Ok(ExcelBuilder {
            writer: SheetWriter::new(sheet_name)?,
            current_row: 0,
        })
    }

    pub fn current_row(&self) -> u32 {
        self.current_row
    }

    /// Centered text merged across `cols` columns.
    pub fn add_banner(&mut self, text: &str, cols: u16, font_size: f64, bold: bool) -> DocumentResult<&mut Self> {
        let mut format = Format::new()
            .set_font_size(font_size)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter);
        if bold {
            format = format.set_bold();
        }

        self.writer
            .merged(self.current_row, 0, cols.saturating_sub(1), text, &format)?;
        self.current_row += 1;
        Ok(self)
    }

    /// Label/value pairs written left to right starting at the given columns.
    pub fn add_label_row(&mut self, cells: &[(u16, &str, &str)]) -> DocumentResult<&mut Self> {
        let label_format = Format::new().set_bold();
        let value_format = Format::new();

        for (col, label, value) in cells {
            self.writer
                .text(self.current_row, *col, label, &label_format)?;
            self.writer
                .text(self.current_row, *col + 1, value, &value_format)?;
        }

        self.current_row += 1;
        Ok(self)
    }

    pub fn add_table(&mut self, table: &TableData) -> DocumentResult<&mut Self> {
        if !table.headers.is_empty() {
            let header_format = self.writer.formats.header.clone();
            for (col, header) in table.headers.iter().enumerate() {
                self.writer
                    .text(self.current_row, col as u16, header, &header_format)?;
            }
            self.current_row += 1;
        }

        let text_format = self.writer.formats.cell.clone();
        let amount_format = self.writer.formats.amount.clone();

        for row in &table.rows {
            for (col, cell) in row.iter().enumerate() {
                let col = col as u16;
                let align = table
                    .alignment
                    .as_ref()
                    .and_then(|a| a.get(col as usize).copied())
                    .unwrap_or(ColumnAlign::Left);

                match cell {
                    Cell::Text(text) => self.writer.text(
                        self.current_row,
                        col,
                        text,
                        &aligned(text_format.clone(), align),
                    )?,
                    Cell::Quantity(quantity) => self.writer.number(
                        self.current_row,
                        col,
                        *quantity,
                        &aligned(text_format.clone(), align),
                    )?,
                    Cell::Amount(amount) => self.writer.number(
                        self.current_row,
                        col,
                        *amount,
                        &aligned(amount_format.clone(), align),
                    )?,
                    Cell::Empty => {
                        self.writer
                            .blank(self.current_row, col, &text_format)?
                    }
                }
            }
            self.current_row += 1;
        }

        Ok(self)
    }

    /// Bold label in `label_col`, bold amount in the column after it.
    pub fn add_summary_row(&mut self, label_col: u16, label: &str, amount: f64) -> DocumentResult<&mut Self> {
        let label_format = Format::new()
            .set_bold()
            .set_border(FormatBorder::Thin);
        let amount_format = Format::new()
            .set_bold()
            .set_num_format(AMOUNT_NUM_FORMAT)
            .set_border(FormatBorder::Thin);

        self.writer
            .text(self.current_row, label_col, label, &label_format)?;
        self.writer
            .number(self.current_row, label_col + 1, amount, &amount_format)?;

        self.current_row += 1;
        Ok(self)
    }

    pub fn add_note(&mut self, text: &str) -> DocumentResult<&mut Self> {
        self.writer
            .text(self.current_row, 0, text, &Format::new())?;
        self.current_row += 1;
        Ok(self)
    }

    pub fn set_column_widths(&mut self, widths: &[(u16, f64)]) -> DocumentResult<&mut Self> {
        for (col, width) in widths {
            self.writer.column_width(*col, *width)?;
        }
        Ok(self)
    }

    pub fn skip_rows(&mut self, rows: u32) -> &mut Self {
        self.current_row += rows;
        self
    }

    pub fn save(self, path: &Path) -> DocumentResult<()> {
        self.writer.save(path)
    }
}

fn aligned(format: Format, align: ColumnAlign) -> Format {
    match align {
        ColumnAlign::Left => format.set_align(FormatAlign::Left),
        ColumnAlign::Center => format.set_align(FormatAlign::Center),
        ColumnAlign::Right => format.set_align(FormatAlign::Right),
    }
}
