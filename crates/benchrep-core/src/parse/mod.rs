//! Input readers producing [`crate::Record`] sequences.

mod delimited;
mod tagged;

pub use delimited::DelimitedReader;
pub use tagged::read_query_records;
