use thiserror::Error;

/// Failures while answering a single query.
/// The HTTP layer collapses all of them into one generic message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("query is empty")]
    EmptyQuery,
}
