// ⚙️ Configuration - command-line flags with environment fallbacks

use crate::dataset::load_csv;
use crate::resolver::{QueryResolver, TopicMatching};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

pub const DEFAULT_DATA_PATH: &str = "data/financial_data.csv";
pub const DEFAULT_ADDR: &str = "127.0.0.1:5000";

/// Where the dataset lives and how queries are matched
#[derive(Debug, Clone, Args)]
pub struct DataArgs {
    /// Path to the financial dataset CSV
    #[arg(long, env = "FIN_CHAT_DATA", default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// Match trigger phrases regardless of case ("Total Revenue" works too)
    #[arg(long, env = "FIN_CHAT_CASE_INSENSITIVE")]
    pub case_insensitive_topics: bool,
}

impl DataArgs {
    pub fn topic_matching(&self) -> TopicMatching {
        if self.case_insensitive_topics {
            TopicMatching::CaseInsensitive
        } else {
            TopicMatching::CaseSensitive
        }
    }

    /// Load the dataset once and wrap it in a resolver
    pub fn build_resolver(&self) -> Result<QueryResolver> {
        let table = load_csv(&self.data)?;
        Ok(QueryResolver::new(Arc::new(table)).with_matching(self.topic_matching()))
    }
}

/// HTTP server settings
#[derive(Debug, Clone, clap::Parser)]
#[command(name = "fin-chat-server")]
#[command(about = "Financial chatbot HTTP server")]
pub struct ServerConfig {
    #[command(flatten)]
    pub data: DataArgs,

    /// Address to listen on
    #[arg(long, env = "FIN_CHAT_ADDR", default_value = DEFAULT_ADDR)]
    pub addr: String,
}

/// Install the tracing subscriber. RUST_LOG overrides the default filter.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fin_chat=info,fin_chat_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
