use crate::core::{Cell, ColumnAlign, PdfConfig, TableData};

/// Quotes text as a Typst string literal so user input is never parsed as
/// markup.
pub fn typst_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Content block holding literal text: `[#"..."]`.
pub fn text_content(text: &str) -> String {
    format!("[#{}]", typst_string(text))
}

#[derive(Debug, Clone)]
pub struct TableStyle {
    pub header_fill: Option<String>,
    /// Text colour of the header row; Typst's default when unset.
    pub header_text: Option<String>,
    pub body_fill: Option<String>,
    pub stroke: String,
    /// Columns before this index are drawn without borders.
    pub stroke_from_col: usize,
    pub inset: String,
}

impl Default for TableStyle {
    fn default() -> Self {
        TableStyle {
            header_fill: None,
            header_text: None,
            body_fill: None,
            stroke: "0.5pt + black".to_string(),
            stroke_from_col: 0,
            inset: "6pt".to_string(),
        }
    }
}

pub struct PdfBuilder {
    sections: Vec<String>,
    config: PdfConfig,
}

impl PdfBuilder {
    pub fn new() -> Self {
        PdfBuilder {
            sections: Vec::new(),
            config: PdfConfig::default(),
        }
    }

    pub fn with_config(mut self, config: PdfConfig) -> Self {
        self.config = config;
        self
    }

    pub fn set_title(&mut self, title: &str) -> &mut Self {
        self.sections
            .push(format!("#set document(title: {})", typst_string(title)));
        self
    }

    pub fn add_centered_text(&mut self, text: &str, size_pt: f32, bold: bool) -> &mut Self {
        let weight = if bold { "bold" } else { "regular" };
        self.sections.push(format!(
            "#align(center)[#text(size: {}pt, weight: \"{}\"){}]",
            size_pt,
            weight,
            text_content(text)
        ));
        self
    }

    pub fn add_paragraph(&mut self, text: &str) -> &mut Self {
        self.sections.push(format!("#{}", typst_string(text)));
        self
    }

    pub fn add_aligned_text(&mut self, text: &str, align: ColumnAlign) -> &mut Self {
        self.sections.push(format!(
            "#align({}){}",
            align_name(align),
            text_content(text)
        ));
        self
    }

    pub fn add_spacing(&mut self, cm: f32) -> &mut Self {
        self.sections.push(format!("#v({}cm)", cm));
        self
    }

    pub fn add_table(&mut self, table: &TableData, style: &TableStyle) -> &mut Self {
        let mut typst = String::from("#table(\n");

        match &table.column_widths {
            Some(widths) => {
                let width_str: Vec<String> = widths.iter().map(|w| format!("{}cm", w)).collect();
                typst.push_str(&format!("  columns: ({}),\n", width_str.join(", ")));
            }
            None => typst.push_str(&format!("  columns: {},\n", table.column_count())),
        }

        if let Some(alignment) = &table.alignment {
            let align_str: Vec<String> = alignment
                .iter()
                .map(|a| format!("{} + horizon", align_name(*a)))
                .collect();
            typst.push_str(&format!("  align: ({}),\n", align_str.join(", ")));
        } else {
            typst.push_str("  align: left + horizon,\n");
        }

        if style.stroke_from_col == 0 {
            typst.push_str(&format!("  stroke: {},\n", style.stroke));
        } else {
            typst.push_str(&format!(
                "  stroke: (x, y) => if x >= {} {{ {} }} else {{ none }},\n",
                style.stroke_from_col, style.stroke
            ));
        }

        let has_header = !table.headers.is_empty();
        match (&style.header_fill, &style.body_fill) {
            (None, None) => {}
            (header, body) => {
                let header = header.as_deref().unwrap_or("none");
                let body = body.as_deref().unwrap_or("none");
                if has_header {
                    typst.push_str(&format!(
                        "  fill: (x, y) => if y == 0 {{ {} }} else {{ {} }},\n",
                        header, body
                    ));
                } else {
                    typst.push_str(&format!("  fill: {},\n", body));
                }
            }
        }

        typst.push_str(&format!("  inset: {},\n\n", style.inset));

        if has_header {
            let text_args = match &style.header_text {
                Some(color) => format!("weight: \"bold\", fill: {}", color),
                None => "weight: \"bold\"".to_string(),
            };
            let headers: Vec<String> = table
                .headers
                .iter()
                .map(|h| format!("[#text({}){}]", text_args, text_content(h)))
                .collect();
            typst.push_str(&format!("  {},\n", headers.join(", ")));
        }

        for row in &table.rows {
            let cells: Vec<String> = row.iter().map(cell_content).collect();
            typst.push_str(&format!("  {},\n", cells.join(", ")));
        }

        typst.push(')');
        self.sections.push(typst);
        self
    }

    pub fn build(&self) -> String {
        let mut document = vec![self.config.to_typst_header()];
        document.extend(self.sections.iter().cloned());
        document.join("\n\n")
    }
}

impl Default for PdfBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn cell_content(cell: &Cell) -> String {
    match cell {
        Cell::Empty => "[]".to_string(),
        other => text_content(&other.display()),
    }
}

fn align_name(align: ColumnAlign) -> &'static str {
    match align {
        ColumnAlign::Left => "left",
        ColumnAlign::Center => "center",
        ColumnAlign::Right => "right",
    }
}
