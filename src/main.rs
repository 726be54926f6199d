use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::Path;

use fin_chat::{DataArgs, FinancialTable, QueryResolver, DEFAULT_COMPANY};

#[derive(Parser)]
#[command(name = "fin-chat")]
#[command(about = "Ask questions about a company's financials", version)]
struct Cli {
    #[command(flatten)]
    data: DataArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Answer a single question
    Ask {
        /// The question, e.g. "what is the total revenue?"
        query: String,

        /// Company to ask about (case-insensitive)
        #[arg(short, long, default_value = DEFAULT_COMPANY)]
        company: String,
    },
    /// List the companies in the dataset with their year ranges
    Companies,
}

fn main() -> Result<()> {
    fin_chat::config::init_tracing();
    let cli = Cli::parse();
    let resolver = cli.data.build_resolver()?;

    match cli.command {
        Command::Ask { query, company } => println!("{}", run_ask(&resolver, &query, &company)?),
        Command::Companies => print!("{}", render_companies(resolver.table(), &cli.data.data)),
    }

    Ok(())
}

fn run_ask(resolver: &QueryResolver, query: &str, company: &str) -> Result<String> {
    Ok(resolver.resolve(query, company)?)
}

fn render_companies(table: &FinancialTable, source: &Path) -> String {
    let mut out = format!("📊 {} records loaded from {:?}\n", table.len(), source);
    out.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");

    for summary in table.summaries() {
        out.push_str(&format!(
            "  {:<20} {}–{} ({} years)\n",
            summary.company, summary.first_year, summary.last_year, summary.years
        ));
    }

    out
}
