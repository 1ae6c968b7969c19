mod converter;
pub use converter::*;

mod result;
pub use result::*;
