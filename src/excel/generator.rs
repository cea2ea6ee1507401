use crate::core::{DocumentError, DocumentResult, AMOUNT_NUM_FORMAT};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use std::path::Path;

/// Formats shared by every table on the sheet.
pub struct CellFormats {
    pub header: Format,
    pub cell: Format,
    pub amount: Format,
}

impl Default for CellFormats {
    fn default() -> Self {
        CellFormats {
            header: Format::new()
                .set_bold()
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
                .set_background_color(Color::RGB(0xE0E0E0))
                .set_border(FormatBorder::Thin),
            cell: Format::new().set_border(FormatBorder::Thin),
            amount: Format::new()
                .set_num_format(AMOUNT_NUM_FORMAT)
                .set_border(FormatBorder::Thin),
        }
    }
}

/// One named worksheet, written cell by cell and saved as its own workbook.
pub struct SheetWriter {
    sheet: Worksheet,
    pub formats: CellFormats,
}

impl SheetWriter {
    pub fn new(name: &str) -> DocumentResult<Self> {
        let mut sheet = Worksheet::new();
        sheet.set_name(name)?;
        Ok(SheetWriter {
            sheet,
            formats: CellFormats::default(),
        })
    }

    pub fn text(&mut self, row: u32, col: u16, text: &str, format: &Format) -> DocumentResult<()> {
        self.sheet.write_string_with_format(row, col, text, format)?;
        Ok(())
    }

    pub fn number(&mut self, row: u32, col: u16, number: f64, format: &Format) -> DocumentResult<()> {
        self.sheet.write_number_with_format(row, col, number, format)?;
        Ok(())
    }

    pub fn blank(&mut self, row: u32, col: u16, format: &Format) -> DocumentResult<()> {
        self.sheet.write_blank(row, col, format)?;
        Ok(())
    }

    /// Merges `first_col..=last_col` on a single row.
    pub fn merged(
        &mut self,
        row: u32,
        first_col: u16,
        last_col: u16,
        text: &str,
        format: &Format,
    ) -> DocumentResult<()> {
        self.sheet
            .merge_range(row, first_col, row, last_col, text, format)?;
        Ok(())
    }

    pub fn column_width(&mut self, col: u16, width: f64) -> DocumentResult<()> {
        self.sheet.set_column_width(col, width)?;
        Ok(())
    }

    pub fn save(self, path: &Path) -> DocumentResult<()> {
        let mut workbook = Workbook::new();
        workbook.push_worksheet(self.sheet);
        workbook.save(path).map_err(|e| {
            DocumentError::Spreadsheet(format!(
                "failed to save workbook {}: {}",
                path.display(),
                e
            ))
        })
    }
}
