pub mod aggregate;
pub mod clear;
pub mod errors;
pub mod ignore;
pub mod logger;
pub mod reporting;
pub mod trie;
pub mod utils;

pub use aggregate::{aggregate_files, AggregatorConfig, CopyRecord};
pub use errors::HeapError;
pub use ignore::IgnoreRules;
