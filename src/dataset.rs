// 📂 Dataset Loader - CSV → in-memory table
// Loaded once at startup, shared read-only afterwards

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io;
use std::path::Path;

// ============================================================================
// RECORD
// ============================================================================

/// One row of the dataset: a company's figures for a single fiscal year.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FinancialRecord {
    #[serde(rename = "Company")]
    pub company: String,

    #[serde(rename = "Year")]
    pub year: i32,

    #[serde(rename = "Total Revenue")]
    pub total_revenue: f64,

    #[serde(rename = "Net Income")]
    pub net_income: f64,

    #[serde(rename = "Total Liabilities")]
    pub total_liabilities: f64,

    #[serde(rename = "Total Assets")]
    pub total_assets: f64,

    /// Empty for a company's first year (nothing to grow from)
    #[serde(rename = "Revenue Growth (%)", default)]
    pub revenue_growth: Option<f64>,

    #[serde(rename = "Assets Growth (%)", default)]
    pub assets_growth: Option<f64>,
}

// ============================================================================
// METRICS
// ============================================================================

/// The numeric columns a query can ask about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    TotalRevenue,
    NetIncome,
    TotalLiabilities,
    TotalAssets,
    RevenueGrowth,
    AssetsGrowth,
}

impl Metric {
    /// Read this metric from a record. Growth columns may be absent.
    pub fn value(&self, record: &FinancialRecord) -> Option<f64> {
        match self {
            Metric::TotalRevenue => Some(record.total_revenue),
            Metric::NetIncome => Some(record.net_income),
            Metric::TotalLiabilities => Some(record.total_liabilities),
            Metric::TotalAssets => Some(record.total_assets),
            Metric::RevenueGrowth => record.revenue_growth,
            Metric::AssetsGrowth => record.assets_growth,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Metric::TotalRevenue => "total revenue",
            Metric::NetIncome => "net income",
            Metric::TotalLiabilities => "total liabilities",
            Metric::TotalAssets => "total assets",
            Metric::RevenueGrowth => "revenue growth",
            Metric::AssetsGrowth => "assets growth",
        }
    }
}

// ============================================================================
// COMPANY SERIES
// ============================================================================

/// One company's records, ascending by year. Built per query, never stored.
#[derive(Debug, Clone)]
pub struct CompanySeries<'a> {
    records: Vec<&'a FinancialRecord>,
}

impl<'a> CompanySeries<'a> {
    fn new(mut records: Vec<&'a FinancialRecord>) -> Self {
        records.sort_by_key(|r| r.year);
        CompanySeries { records }
    }

    /// Record with the minimum year
    pub fn first(&self) -> Option<&'a FinancialRecord> {
        self.records.first().copied()
    }

    /// Record with the maximum year
    pub fn latest(&self) -> Option<&'a FinancialRecord> {
        self.records.last().copied()
    }

    /// (previous, latest) - None when fewer than two years are on file
    pub fn last_two(&self) -> Option<(&'a FinancialRecord, &'a FinancialRecord)> {
        match self.records.as_slice() {
            [.., previous, latest] => Some((*previous, *latest)),
            _ => None,
        }
    }

    pub fn years(&self) -> Vec<i32> {
        self.records.iter().map(|r| r.year).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ============================================================================
// TABLE
// ============================================================================

/// Year coverage for one company, as listed by the CLI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanySummary {
    pub company: String,
    pub first_year: i32,
    pub last_year: i32,
    pub years: usize,
}

/// Every record in the dataset. Immutable after load.
#[derive(Debug, Clone, Default)]
pub struct FinancialTable {
    records: Vec<FinancialRecord>,
}

impl FinancialTable {
    /// Build a table from already-parsed records, enforcing one row per (company, year).
    pub fn from_records(records: Vec<FinancialRecord>) -> Result<Self> {
        let mut seen = HashSet::new();

        for record in &records {
            if record.company.trim().is_empty() {
                bail!("Record for year {} has an empty company name", record.year);
            }
            if !seen.insert((record.company.to_lowercase(), record.year)) {
                bail!(
                    "Duplicate record for company {:?} in year {}",
                    record.company,
                    record.year
                );
            }
        }

        Ok(FinancialTable { records })
    }

    /// Parse CSV from any reader (header row required)
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for (index, result) in rdr.deserialize().enumerate() {
            // +2: one for the header, one for 1-based line numbers
            let record: FinancialRecord = result
                .with_context(|| format!("Failed to deserialize record on line {}", index + 2))?;
            records.push(record);
        }

        Self::from_records(records)
    }

    /// Case-insensitive filter on company name, sorted by year
    pub fn series(&self, company: &str) -> CompanySeries<'_> {
        let wanted = company.to_lowercase();
        CompanySeries::new(
            self.records
                .iter()
                .filter(|r| r.company.to_lowercase() == wanted)
                .collect(),
        )
    }

    /// Distinct company names in the order they first appear
    pub fn companies(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter(|r| seen.insert(r.company.to_lowercase()))
            .map(|r| r.company.as_str())
            .collect()
    }

    /// One summary per company, in first-seen order
    pub fn summaries(&self) -> Vec<CompanySummary> {
        self.companies()
            .into_iter()
            .filter_map(|company| {
                let series = self.series(company);
                Some(CompanySummary {
                    company: company.to_string(),
                    first_year: series.first()?.year,
                    last_year: series.latest()?.year,
                    years: series.len(),
                })
            })
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn records(&self) -> &[FinancialRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Load the dataset from disk. Any failure here is fatal for the caller.
pub fn load_csv(csv_path: &Path) -> Result<FinancialTable> {
    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("Failed to open CSV file: {:?}", csv_path))?;

    let table = FinancialTable::from_reader(file)
        .with_context(|| format!("Failed to load financial data from {:?}", csv_path))?;

    if table.is_empty() {
        tracing::warn!(path = ?csv_path, "Dataset contains no records");
    }
    tracing::info!(
        path = ?csv_path,
        records = table.len(),
        companies = table.companies().len(),
        "Financial dataset loaded"
    );

    Ok(table)
}

// ============================================================================
// TESTS
// ============================================================================
