pub mod calculator;
pub mod config;
pub mod data;
pub mod error;

pub use calculator::*;
pub use config::*;
pub use data::*;
pub use error::*;
