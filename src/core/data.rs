/// Spreadsheet number format matching [`format_amount`].
pub const AMOUNT_NUM_FORMAT: &str = "#,##0.00";

/// A single table cell. Amounts and quantities keep their numeric value so
/// the spreadsheet can store real numbers while the PDF prints text.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Quantity(f64),
    Amount(f64),
    Empty,
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn display(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Quantity(q) => format_quantity(*q),
            Cell::Amount(a) => format_amount(*a),
            Cell::Empty => String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone)]
pub struct TableData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
    /// Column widths in centimetres.
    pub column_widths: Option<Vec<f32>>,
    pub alignment: Option<Vec<ColumnAlign>>,
}

impl TableData {
    pub fn new(headers: Vec<String>) -> Self {
        TableData {
            headers,
            rows: Vec::new(),
            column_widths: None,
            alignment: None,
        }
    }

    pub fn add_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    pub fn with_column_widths(mut self, widths: Vec<f32>) -> Self {
        self.column_widths = Some(widths);
        self
    }

    pub fn with_alignment(mut self, alignment: Vec<ColumnAlign>) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn column_count(&self) -> usize {
        self.headers
            .len()
            .max(self.rows.iter().map(Vec::len).max().unwrap_or(0))
    }
}

/// Formats a currency value with two decimals and thousands separators,
/// e.g. `1234.5` -> `1,234.50`, `-25` -> `-25.00`.
pub fn format_amount(amount: f64) -> String {
    let formatted = format!("{:.2}", amount.abs());
    let (integer, decimal) = formatted.split_once('.').unwrap_or((&formatted, "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    // -0.001 rounds to 0.00 and should not print a sign
    let negative = amount < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0');
    if negative {
        format!("-{}.{}", grouped, decimal)
    } else {
        format!("{}.{}", grouped, decimal)
    }
}

/// Whole quantities print without decimals; fractional ones keep the
/// digits they need.
pub fn format_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 && quantity.abs() < 1e15 {
        format!("{}", quantity as i64)
    } else {
        format!("{}", quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_get_two_decimals_and_separators() {
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(45.0), "45.00");
        assert_eq!(format_amount(999.999), "1,000.00");
        assert_eq!(format_amount(1234.5), "1,234.50");
        assert_eq!(format_amount(1_234_567.891), "1,234,567.89");
        assert_eq!(format_amount(-25.0), "-25.00");
        assert_eq!(format_amount(-1234.5), "-1,234.50");
        assert_eq!(format_amount(-0.001), "0.00");
    }

    #[test]
    fn quantities_drop_trailing_zero_fraction() {
        assert_eq!(format_quantity(2.0), "2");
        assert_eq!(format_quantity(1.5), "1.5");
        assert_eq!(format_quantity(0.25), "0.25");
    }

    #[test]
    fn cells_display_with_shared_formatting() {
        assert_eq!(Cell::Amount(1500.0).display(), "1,500.00");
        assert_eq!(Cell::Quantity(3.0).display(), "3");
        assert_eq!(Cell::text("Widget").display(), "Widget");
        assert_eq!(Cell::Empty.display(), "");
    }

    #[test]
    fn column_count_covers_headerless_tables() {
        let mut table = TableData::new(Vec::new());
        table.add_row(vec![Cell::Empty, Cell::text("a"), Cell::Amount(1.0)]);
        assert_eq!(table.column_count(), 3);
    }
}
