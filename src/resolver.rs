// 💬 Query Resolver - trigger phrases → templated answers
// First matching trigger wins; greetings are checked before everything else

use crate::dataset::{CompanySeries, FinancialTable, Metric};
use crate::error::ResolveError;
use crate::format::{format_currency, format_percent, percent_change};
use std::sync::Arc;

pub const DEFAULT_COMPANY: &str = "Apple";

pub const GREETING_RESPONSE: &str = "Hello! How can I help you today?";

pub const FALLBACK_RESPONSE: &str =
    "Sorry, I can only provide information on revenue, net income, liabilities, assets, and growth metrics.";

const GREETINGS: &[&str] = &["hello", "hi", "hey"];

// ============================================================================
// TOPICS
// ============================================================================

/// What a query is asking about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    TotalRevenue,
    NetIncomeChange,
    RevenueGrowth,
    TotalLiabilities,
    TotalAssets,
    LiabilitiesChange,
    AssetsGrowth,
}

/// Trigger phrases in evaluation order. Order is significant.
pub const TRIGGERS: &[(&str, Topic)] = &[
    ("total revenue", Topic::TotalRevenue),
    ("net income change", Topic::NetIncomeChange),
    ("revenue growth", Topic::RevenueGrowth),
    ("total liabilities", Topic::TotalLiabilities),
    ("total assets", Topic::TotalAssets),
    ("liabilities change", Topic::LiabilitiesChange),
    ("assets growth", Topic::AssetsGrowth),
];

/// How trigger phrases are compared against the query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TopicMatching {
    /// Substring match on the query as typed. Triggers are lowercase,
    /// so "Total Revenue" does not match.
    #[default]
    CaseSensitive,
    /// Lowercase the query first
    CaseInsensitive,
}

/// Map a query to the first topic whose trigger it contains
pub fn match_topic(query: &str, matching: TopicMatching) -> Option<Topic> {
    let haystack = match matching {
        TopicMatching::CaseSensitive => query.to_string(),
        TopicMatching::CaseInsensitive => query.to_lowercase(),
    };

    TRIGGERS
        .iter()
        .find(|(trigger, _)| haystack.contains(*trigger))
        .map(|(_, topic)| *topic)
}

/// Greetings always use a lowercased comparison, whatever the topic matching mode
pub fn is_greeting(query: &str) -> bool {
    let lowered = query.to_lowercase();
    GREETINGS.iter().any(|g| lowered.contains(*g))
}

// ============================================================================
// RESOLVER
// ============================================================================

/// Answers free-text questions from a shared, read-only table
#[derive(Debug, Clone)]
pub struct QueryResolver {
    table: Arc<FinancialTable>,
    matching: TopicMatching,
}

impl QueryResolver {
    pub fn new(table: Arc<FinancialTable>) -> Self {
        QueryResolver {
            table,
            matching: TopicMatching::default(),
        }
    }

    pub fn with_matching(mut self, matching: TopicMatching) -> Self {
        self.matching = matching;
        self
    }

    pub fn table(&self) -> &FinancialTable {
        &self.table
    }

    pub fn matching(&self) -> TopicMatching {
        self.matching
    }

    /// Resolve one query for one company.
    /// Insufficient data is an ordinary answer, not an error.
    pub fn resolve(&self, query: &str, company: &str) -> Result<String, ResolveError> {
        if query.is_empty() {
            return Err(ResolveError::EmptyQuery);
        }

        let series = self.table.series(company);

        if is_greeting(query) {
            return Ok(GREETING_RESPONSE.to_string());
        }

        let answer = match match_topic(query, self.matching) {
            Some(topic) => answer_topic(topic, &series, company),
            None => FALLBACK_RESPONSE.to_string(),
        };

        tracing::debug!(company, records = series.len(), "Resolved query");
        Ok(answer)
    }
}

fn answer_topic(topic: Topic, series: &CompanySeries<'_>, company: &str) -> String {
    match topic {
        Topic::TotalRevenue => latest_amount(series, Metric::TotalRevenue, company, |amount| {
            format!(
                "The total revenue for {} in the most recent year is {}.",
                company, amount
            )
        }),
        Topic::NetIncomeChange => yearly_change(
            series,
            Metric::NetIncome,
            "Not enough data to calculate net income change over the last year.",
            |direction, magnitude| {
                format!(
                    "The net income for {} has {} by {} over the last year.",
                    company, direction, magnitude
                )
            },
        ),
        Topic::RevenueGrowth => latest_growth(series, Metric::RevenueGrowth, company, |pct| {
            format!(
                "The revenue growth percentage for {} in the most recent year is {}.",
                company, pct
            )
        }),
        Topic::TotalLiabilities => {
            latest_amount(series, Metric::TotalLiabilities, company, |amount| {
                format!(
                    "The total liabilities for {} in the most recent year are {}.",
                    company, amount
                )
            })
        }
        Topic::TotalAssets => latest_amount(series, Metric::TotalAssets, company, |amount| {
            format!(
                "The total assets for {} in the most recent year are {}.",
                company, amount
            )
        }),
        Topic::LiabilitiesChange => yearly_change(
            series,
            Metric::TotalLiabilities,
            "Not enough data to calculate liabilities change over the last year.",
            |direction, magnitude| {
                format!(
                    "The liabilities for {} have {} by {} over the last year.",
                    company, direction, magnitude
                )
            },
        ),
        Topic::AssetsGrowth => latest_growth(series, Metric::AssetsGrowth, company, |pct| {
            format!(
                "The assets growth percentage for {} in the most recent year is {}.",
                company, pct
            )
        }),
    }
}

fn not_enough_data(metric: Metric, company: &str) -> String {
    format!("Not enough data to report {} for {}.", metric.label(), company)
}

/// Most-recent-year currency figure
fn latest_amount(
    series: &CompanySeries<'_>,
    metric: Metric,
    company: &str,
    render: impl FnOnce(String) -> String,
) -> String {
    match series.latest().and_then(|r| metric.value(r)) {
        Some(amount) => render(format_currency(amount)),
        None => not_enough_data(metric, company),
    }
}

/// Most-recent-year growth column, already a percentage
fn latest_growth(
    series: &CompanySeries<'_>,
    metric: Metric,
    company: &str,
    render: impl FnOnce(String) -> String,
) -> String {
    match series.latest().and_then(|r| metric.value(r)) {
        Some(pct) if pct.is_finite() => render(format_percent(pct)),
        _ => not_enough_data(metric, company),
    }
}

/// Change between the two most recent years
fn yearly_change(
    series: &CompanySeries<'_>,
    metric: Metric,
    insufficient: &str,
    render: impl FnOnce(&str, String) -> String,
) -> String {
    let change = series.last_two().and_then(|(previous, latest)| {
        percent_change(metric.value(previous)?, metric.value(latest)?)
    });

    match change {
        Some(change) => {
            let direction = if change > 0.0 { "increased" } else { "decreased" };
            render(direction, format_percent(change.abs()))
        }
        None => insufficient.to_string(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
