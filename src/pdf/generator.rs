use crate::core::{font_dir, DocumentError, DocumentResult};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Turns Typst markup into a PDF file.
pub trait PdfCompiler: Send + Sync {
    fn compile(&self, markup: &str, output_path: &Path) -> DocumentResult<()>;
}

/// Runs the `typst` CLI. Fonts are loaded from the directory holding the
/// configured font file, which Typst embeds in the output.
pub struct TypstCompiler {
    typst_bin: String,
    font_path: PathBuf,
}

impl TypstCompiler {
    pub fn new(typst_bin: impl Into<String>, font_path: impl Into<PathBuf>) -> Self {
        TypstCompiler {
            typst_bin: typst_bin.into(),
            font_path: font_path.into(),
        }
    }
}

impl PdfCompiler for TypstCompiler {
    fn compile(&self, markup: &str, output_path: &Path) -> DocumentResult<()> {
        let fonts = font_dir(&self.font_path)?;

        let work_dir = output_path.parent().unwrap_or_else(|| Path::new("."));
        let temp_file = work_dir.join(format!(".quotation_{}.typ", uuid::Uuid::new_v4().simple()));
        fs::write(&temp_file, markup)?;

        let output = Command::new(&self.typst_bin)
            .arg("compile")
            .arg("--font-path")
            .arg(&fonts)
            .arg(&temp_file)
            .arg(output_path)
            .output();

        let _ = fs::remove_file(&temp_file);

        let output = output.map_err(|e| {
            DocumentError::Typesetting(format!("failed to run {}: {}", self.typst_bin, e))
        })?;

        if !output.status.success() {
            return Err(DocumentError::Typesetting(format!(
                "typst compilation failed: {}",
                String::from_utf8_lossy(&output.stderr)
            )));
        }

        Ok(())
    }
}
