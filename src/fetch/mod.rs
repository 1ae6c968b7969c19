mod fetch_typed;
pub use fetch_typed::*;

mod query;
pub use query::*;
