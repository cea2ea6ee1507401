pub mod builder;
pub mod generator;
pub mod quotation;

pub use builder::ExcelBuilder;
pub use generator::{CellFormats, SheetWriter};
pub use quotation::write_quotation_workbook;

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::HashMap;
    use std::io::Read;
    use std::path::Path;

    /// Cell values of the first worksheet, keyed by reference ("D12"),
    /// with shared strings resolved.
    pub(crate) struct SheetCells {
        cells: HashMap<String, String>,
    }

    impl SheetCells {
        pub(crate) fn open(path: &Path) -> Self {
            let file = std::fs::File::open(path).unwrap();
            let mut archive = zip::ZipArchive::new(file).unwrap();
            let sheet = read_entry(&mut archive, "xl/worksheets/sheet1.xml");
            let shared = read_entry(&mut archive, "xl/sharedStrings.xml");

            let strings: Vec<String> = shared
                .split("<si>")
                .skip(1)
                .map(|si| {
                    let start = si.find("<t").unwrap();
                    let body = &si[start..];
                    let open = body.find('>').unwrap() + 1;
                    let close = body.find("</t>").unwrap();
                    body[open..close].to_string()
                })
                .collect();

            let mut cells = HashMap::new();
            for chunk in sheet.split("<c r=\"").skip(1) {
                let reference = &chunk[..chunk.find('"').unwrap()];
                let end = chunk.find("</c>").unwrap_or(chunk.len());
                if chunk.find("/>").map_or(false, |self_closing| self_closing < end) {
                    continue;
                }
                let cell = &chunk[..end];
                let Some(v) = cell.find("<v>") else { continue };
                let raw = &cell[v + 3..cell.find("</v>").unwrap()];
                let value = if cell.contains("t=\"s\"") {
                    strings[raw.parse::<usize>().unwrap()].clone()
                } else {
                    raw.to_string()
                };
                cells.insert(reference.to_string(), value);
            }
            SheetCells { cells }
        }

        pub(crate) fn get(&self, reference: &str) -> Option<&str> {
            self.cells.get(reference).map(String::as_str)
        }

        /// Numeric value in column D on the row whose column C holds `label`.
        pub(crate) fn amount_beside(&self, label: &str) -> Option<f64> {
            let row = self.cells.iter().find_map(|(reference, value)| {
                (value == label && reference.starts_with('C')).then(|| reference[1..].to_string())
            })?;
            self.get(&format!("D{}", row))?.parse().ok()
        }
    }

    fn read_entry(archive: &mut zip::ZipArchive<std::fs::File>, name: &str) -> String {
        let mut xml = String::new();
        archive.by_name(name).unwrap().read_to_string(&mut xml).unwrap();
        xml
    }
}
