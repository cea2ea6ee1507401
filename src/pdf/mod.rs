pub mod builder;
pub mod generator;
pub mod quotation;

pub use builder::{typst_string, PdfBuilder, TableStyle};
pub use generator::{PdfCompiler, TypstCompiler};
pub use quotation::quotation_markup;
