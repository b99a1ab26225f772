use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AggregateError {
    #[error("Column '{0}' would appear twice in the merged table")]
    ColumnCollision(String),
}
