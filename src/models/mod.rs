pub mod computed;
pub mod form;
pub mod quotation;

pub use computed::*;
pub use form::*;
pub use quotation::*;
