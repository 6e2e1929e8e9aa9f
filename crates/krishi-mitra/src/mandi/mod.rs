//! Mandi (wholesale market) price board built from open-data price reports.

mod parser;

use crate::schemes::title_case;
use chrono::NaiveDate;
use parser::{parse_arrival_date, MarketReport};
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum MandiImportError {
    #[error("failed to read price report: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid price CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid price JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A market with a positive modal price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MandiPrice {
    pub district: String,
    pub market_name: String,
    pub modal_price: i64,
    pub arrival_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MandiPriceReport {
    pub summary: String,
    pub prices: Vec<MandiPrice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_arrival: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MandiPriceOutcome {
    Prices(MandiPriceReport),
    NoRecords { message: String },
    NoValidPrices { message: String },
}

impl MandiPriceOutcome {
    pub fn summary(&self) -> &str {
        match self {
            Self::Prices(report) => &report.summary,
            Self::NoRecords { message } | Self::NoValidPrices { message } => message,
        }
    }
}

/// Price reports for one import, filtered per query.
#[derive(Debug, Clone, Default)]
pub struct MandiPriceBoard {
    reports: Vec<MarketReport>,
}

impl MandiPriceBoard {
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, MandiImportError> {
        Ok(Self {
            reports: parser::parse_csv(reader)?,
        })
    }

    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, MandiImportError> {
        let file = File::open(path)?;
        Self::from_csv_reader(file)
    }

    /// Accepts the `{"records": [...]}` envelope of the open-data API or a
    /// bare array of records.
    pub fn from_json_str(raw: &str) -> Result<Self, MandiImportError> {
        Ok(Self {
            reports: parser::parse_json(raw)?,
        })
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// Reports missing a state or commodity column are assumed to belong to
    /// the query, matching pre-filtered API responses.
    pub fn prices_for(&self, state: &str, commodity: &str) -> MandiPriceOutcome {
        let state = title_case(state);
        let commodity = title_case(commodity);

        let matching: Vec<&MarketReport> = self
            .reports
            .iter()
            .filter(|report| field_matches(report.state.as_deref(), &state))
            .filter(|report| field_matches(report.commodity.as_deref(), &commodity))
            .collect();

        if matching.is_empty() {
            return MandiPriceOutcome::NoRecords {
                message: format!(
                    "No live prices found for {commodity} in {state}. The market may be closed or data not reported today."
                ),
            };
        }

        let mut prices: Vec<MandiPrice> = matching
            .iter()
            .filter(|report| report.modal_price > 0)
            .map(|report| MandiPrice {
                district: report.district.clone().unwrap_or_else(|| "N/A".to_string()),
                market_name: report.market.clone().unwrap_or_else(|| "N/A".to_string()),
                modal_price: report.modal_price,
                arrival_date: report
                    .arrival_date
                    .clone()
                    .unwrap_or_else(|| "N/A".to_string()),
            })
            .collect();

        if prices.is_empty() {
            return MandiPriceOutcome::NoValidPrices {
                message: format!(
                    "Price data for {commodity} in {state} is currently not available (all prices reported as 0)."
                ),
            };
        }

        // Stable sort keeps report order among equal prices.
        prices.sort_by(|a, b| b.modal_price.cmp(&a.modal_price));

        let best = &prices[0];
        let summary = format!(
            "📈 Best rate for {commodity} in {state} today is ₹{}/quintal at {}.",
            best.modal_price, best.market_name
        );
        let latest_arrival = prices
            .iter()
            .filter_map(|price| parse_arrival_date(&price.arrival_date))
            .max();

        debug!(
            %state,
            %commodity,
            markets = prices.len(),
            best_price = best.modal_price,
            "mandi prices ranked"
        );

        MandiPriceOutcome::Prices(MandiPriceReport {
            summary,
            prices,
            latest_arrival,
        })
    }
}

fn field_matches(value: Option<&str>, expected: &str) -> bool {
    value.map_or(true, |value| value.trim().eq_ignore_ascii_case(expected))
}
