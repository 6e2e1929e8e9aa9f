use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::io::Read;

/// One market report, whichever format it arrived in.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MarketReport {
    pub(crate) state: Option<String>,
    pub(crate) commodity: Option<String>,
    pub(crate) district: Option<String>,
    pub(crate) market: Option<String>,
    pub(crate) modal_price: i64,
    pub(crate) arrival_date: Option<String>,
}

pub(crate) fn parse_csv<R: Read>(reader: R) -> Result<Vec<MarketReport>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut reports = Vec::new();

    for row in csv_reader.deserialize::<CsvRow>() {
        let row = row?;
        reports.push(MarketReport {
            state: row.state,
            commodity: row.commodity,
            district: row.district,
            market: row.market,
            modal_price: row.modal_price.as_deref().map(price_from_text).unwrap_or(0),
            arrival_date: row.arrival_date,
        });
    }

    Ok(reports)
}

pub(crate) fn parse_json(raw: &str) -> Result<Vec<MarketReport>, serde_json::Error> {
    let records = match serde_json::from_str(raw)? {
        JsonPayload::Envelope { records } => records,
        JsonPayload::Records(records) => records,
    };
    Ok(records
        .into_iter()
        .map(|record| MarketReport {
            state: record.state,
            commodity: record.commodity,
            district: record.district,
            market: record.market,
            modal_price: price_from_value(&record.modal_price),
            arrival_date: record.arrival_date,
        })
        .collect())
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(alias = "State", default, deserialize_with = "empty_string_as_none")]
    state: Option<String>,
    #[serde(alias = "Commodity", default, deserialize_with = "empty_string_as_none")]
    commodity: Option<String>,
    #[serde(alias = "District", default, deserialize_with = "empty_string_as_none")]
    district: Option<String>,
    #[serde(alias = "Market", default, deserialize_with = "empty_string_as_none")]
    market: Option<String>,
    #[serde(
        alias = "Modal_x0020_Price",
        alias = "Modal Price",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    modal_price: Option<String>,
    #[serde(
        alias = "Arrival_Date",
        alias = "Arrival Date",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    arrival_date: Option<String>,
}

/// The open-data API wraps rows in `records`; exports may be a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonPayload {
    Envelope { records: Vec<JsonRecord> },
    Records(Vec<JsonRecord>),
}

#[derive(Debug, Deserialize)]
struct JsonRecord {
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    commodity: Option<String>,
    #[serde(default)]
    district: Option<String>,
    #[serde(default)]
    market: Option<String>,
    #[serde(default)]
    modal_price: Value,
    #[serde(default)]
    arrival_date: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Whole rupees from a reported price; anything unparseable counts as 0.
pub(crate) fn price_from_text(raw: &str) -> i64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite())
        .map(|price| price.trunc() as i64)
        .unwrap_or(0)
}

pub(crate) fn price_from_value(value: &Value) -> i64 {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|price| price.trunc() as i64))
            .unwrap_or(0),
        Value::String(text) => price_from_text(text),
        _ => 0,
    }
}

/// Arrival dates come as `dd/mm/yyyy` from the open-data feed.
pub(crate) fn parse_arrival_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y-%m-%d"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Cursor;

    #[test]
    fn prices_parse_leniently() {
        assert_eq!(price_from_text("2250.00"), 2250);
        assert_eq!(price_from_text(" 1999.9 "), 1999);
        assert_eq!(price_from_text("NR"), 0);
        assert_eq!(price_from_value(&json!(2100)), 2100);
        assert_eq!(price_from_value(&json!("2300")), 2300);
        assert_eq!(price_from_value(&Value::Null), 0);
    }

    #[test]
    fn arrival_dates_accept_feed_and_iso_formats() {
        let expected = NaiveDate::from_ymd_opt(2026, 10, 17).expect("valid date");
        assert_eq!(parse_arrival_date("17/10/2026"), Some(expected));
        assert_eq!(parse_arrival_date("2026-10-17"), Some(expected));
        assert_eq!(parse_arrival_date("N/A"), None);
    }

    #[test]
    fn csv_accepts_open_data_headers() {
        let csv = "State,District,Market,Commodity,Arrival_Date,Modal_x0020_Price\n\
Rajasthan,Udaipur,Udaipur (Grain),Wheat,17/10/2026,2450\n\
Rajasthan,Pali,Sojat Road,Wheat,17/10/2026,\n";
        let reports = parse_csv(Cursor::new(csv)).expect("csv parses");

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].market.as_deref(), Some("Udaipur (Grain)"));
        assert_eq!(reports[0].modal_price, 2450);
        assert_eq!(reports[1].modal_price, 0);
    }

    #[test]
    fn json_reads_records_envelope() {
        let raw = r#"{"records": [{"district": "Kota", "market": "Kota", "modal_price": "2380", "arrival_date": "16/10/2026"}]}"#;
        let reports = parse_json(raw).expect("json parses");
        assert_eq!(reports[0].modal_price, 2380);
        assert!(reports[0].state.is_none());
    }

    #[test]
    fn json_accepts_bare_record_array() {
        let raw = r#"[{"market": "Kota", "modal_price": 2380}]"#;
        let reports = parse_json(raw).expect("json parses");
        assert_eq!(reports[0].market.as_deref(), Some("Kota"));
    }
}
