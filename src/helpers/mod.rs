//! Helper functions shared by the generator and templates

mod date;
mod reading;
mod toc;
mod url;

pub use date::*;
pub use reading::*;
pub use toc::*;
pub use url::*;
