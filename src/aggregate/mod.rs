pub mod aggregator;
pub mod error;
pub mod merged_table;
