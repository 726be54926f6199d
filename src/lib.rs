// Financial Chat - Core Library
// Exposes all modules for use in CLI, API server, and tests

pub mod config;
pub mod dataset;
pub mod error;
pub mod format;
pub mod resolver;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use dataset::{load_csv, CompanySeries, CompanySummary, FinancialRecord, FinancialTable, Metric};
pub use error::ResolveError;
pub use format::{format_currency, format_percent, percent_change};
pub use resolver::{
    match_topic, QueryResolver, Topic, TopicMatching, DEFAULT_COMPANY, FALLBACK_RESPONSE,
    GREETING_RESPONSE, TRIGGERS,
};
pub use config::{DataArgs, ServerConfig};

#[cfg(feature = "server")]
pub use api::{router, AppState, ChatRequest, ChatResponse, ERROR_RESPONSE};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
