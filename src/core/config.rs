use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::error::{DocumentError, DocumentResult};

/// How exported files are named inside the output directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputNaming {
    /// `Quotation_<quotation_no>.xlsx` / `.pdf`
    QuotationNo,
    /// `Quotation.xlsx` / `Quotation.pdf`, overwritten on every export
    Fixed,
}

impl FromStr for OutputNaming {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "quotation_no" => Ok(OutputNaming::QuotationNo),
            "fixed" => Ok(OutputNaming::Fixed),
            other => Err(DocumentError::Config(format!(
                "unknown OUTPUT_NAMING value: {}",
                other
            ))),
        }
    }
}

/// Storage backend selected by the `DATABASE_URL` scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseKind {
    Sqlite,
    Postgres,
}

impl DatabaseKind {
    pub fn from_url(url: &str) -> DocumentResult<Self> {
        if url.starts_with("sqlite:") {
            Ok(DatabaseKind::Sqlite)
        } else if url.starts_with("postgresql://") || url.starts_with("postgres://") {
            Ok(DatabaseKind::Postgres)
        } else {
            Err(DocumentError::Config(format!(
                "unsupported database url scheme: {}",
                url.split(':').next().unwrap_or_default()
            )))
        }
    }
}

/// Process-wide settings, resolved once at startup and handed to the
/// application state. Nothing below the binary reads the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub writable_dir: PathBuf,
    pub database_url: String,
    pub db_max_connections: u32,
    pub assets_dir: PathBuf,
    pub font_file: String,
    pub font_family: String,
    pub output_naming: OutputNaming,
    pub typst_bin: String,
}

impl AppConfig {
    pub fn from_env() -> DocumentResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> DocumentResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let writable_dir = resolve_writable_dir(&get)?;

        let database_url = match get("DATABASE_URL") {
            Some(url) => url,
            None => format!(
                "sqlite://{}",
                writable_dir.join("instance").join("quotations.db").display()
            ),
        };
        // Hosted Postgres providers hand out postgres:// URLs.
        let database_url = match database_url.strip_prefix("postgres://") {
            Some(rest) => format!("postgresql://{}", rest),
            None => database_url,
        };
        DatabaseKind::from_url(&database_url)?;

        Ok(AppConfig {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_var(&get, "PORT", 8080)?,
            writable_dir,
            database_url,
            db_max_connections: parse_var(&get, "DB_MAX_CONNECTIONS", 5)?,
            assets_dir: PathBuf::from(get("ASSETS_DIR").unwrap_or_else(|| "static".to_string())),
            font_file: get("PDF_FONT_FILE").unwrap_or_else(|| "SimSun.ttf".to_string()),
            font_family: get("PDF_FONT_FAMILY").unwrap_or_else(|| "SimSun".to_string()),
            output_naming: get("OUTPUT_NAMING")
                .map(|v| v.parse::<OutputNaming>())
                .transpose()?
                .unwrap_or(OutputNaming::QuotationNo),
            typst_bin: get("TYPST_BIN").unwrap_or_else(|| "typst".to_string()),
        })
    }

    pub fn database_kind(&self) -> DocumentResult<DatabaseKind> {
        DatabaseKind::from_url(&self.database_url)
    }

    pub fn instance_dir(&self) -> PathBuf {
        self.writable_dir.join("instance")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.writable_dir.join("output")
    }

    pub fn font_path(&self) -> PathBuf {
        self.assets_dir.join(&self.font_file)
    }

    /// Creates the instance and output directories if they are missing.
    pub fn prepare_dirs(&self) -> DocumentResult<()> {
        std::fs::create_dir_all(self.instance_dir())?;
        std::fs::create_dir_all(self.output_dir())?;
        Ok(())
    }

    pub fn pdf_config(&self) -> PdfConfig {
        PdfConfig::with_font_family(self.font_family.clone())
    }
}

// Serverless platforms only allow writes under /tmp.
fn resolve_writable_dir<F>(get: &F) -> DocumentResult<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(dir) = get("WRITABLE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if get("VERCEL").is_some() || get("CF_PAGES").is_some() {
        return Ok(PathBuf::from("/tmp"));
    }
    Ok(env::current_dir()?)
}

fn parse_var<F, T>(get: &F, key: &str, default: T) -> DocumentResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match get(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| {
            DocumentError::Config(format!("invalid {}: {}", key, e))
        }),
        None => Ok(default),
    }
}

/// Page and font settings written into the Typst preamble.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfConfig {
    /// Typst paper name.
    pub paper: String,
    pub margin_cm: f32,
    pub font_family: String,
    pub font_size_pt: f32,
}

impl Default for PdfConfig {
    fn default() -> Self {
        PdfConfig {
            paper: "a4".to_string(),
            margin_cm: 2.0,
            font_family: "SimSun".to_string(),
            font_size_pt: 10.0,
        }
    }
}

impl PdfConfig {
    pub fn with_font_family(font_family: impl Into<String>) -> Self {
        PdfConfig {
            font_family: font_family.into(),
            ..Default::default()
        }
    }

    pub fn to_typst_header(&self) -> String {
        let quote = |s: &str| format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""));
        format!(
            "#set page(paper: {}, margin: {}cm)\n#set text(font: ({},), size: {}pt, lang: \"zh\", region: \"tw\")",
            quote(&self.paper),
            self.margin_cm,
            quote(&self.font_family),
            self.font_size_pt
        )
    }
}

/// Checks that a font file exists before handing its directory to the
/// typesetter.
pub fn font_dir(font_path: &Path) -> DocumentResult<PathBuf> {
    if !font_path.is_file() {
        return Err(DocumentError::Config(format!(
            "font file not found: {}",
            font_path.display()
        )));
    }
    Ok(font_path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(".")))
}
