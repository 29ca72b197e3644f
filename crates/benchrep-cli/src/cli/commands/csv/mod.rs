pub mod ghbench;
pub mod query;
pub mod summary;
pub mod wins;
pub mod xml;
