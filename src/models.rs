use crate::dates::{DateError, parse_mdy};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One row of the source file, keyed the way the export writes it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSalesRecord {
    pub storname: String,
    #[serde(default)]
    pub storegrp: Option<String>,
    pub netsales: f64,
    pub datesale: String,
    pub begindte: String,
    pub targdate: String,
    pub targsale: f64,
    pub runtotal: f64,
    pub run_targ: f64,
    pub pctachvd: f64,
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("missing or mistyped field: {0}")]
    Shape(#[from] serde_json::Error),
    #[error("bad {field}: {source}")]
    Date {
        field: &'static str,
        #[source]
        source: DateError,
    },
}

/// A store's sales for one day, within one target period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesRecord {
    pub store_name: String,
    pub category: String,
    pub net_sales: f64,
    pub sale_date: NaiveDate,
    pub period_start: NaiveDate,
    /// Opaque period identifier; also shown as-is.
    pub target_date: String,
    pub projected_sale: f64,
    pub running_total: f64,
    pub daily_target_cumulative: f64,
    pub percent_achieved: f64,
}

impl TryFrom<RawSalesRecord> for SalesRecord {
    type Error = RecordError;

    fn try_from(raw: RawSalesRecord) -> Result<Self, Self::Error> {
        let sale_date = parse_mdy(&raw.datesale).map_err(|source| RecordError::Date {
            field: "datesale",
            source,
        })?;
        let period_start = parse_mdy(&raw.begindte).map_err(|source| RecordError::Date {
            field: "begindte",
            source,
        })?;

        Ok(Self {
            store_name: raw.storname,
            category: raw.storegrp.unwrap_or_default(),
            net_sales: raw.netsales,
            sale_date,
            period_start,
            target_date: raw.targdate,
            projected_sale: raw.targsale,
            running_total: raw.runtotal,
            daily_target_cumulative: raw.run_targ,
            percent_achieved: raw.pctachvd,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PeriodKey {
    pub store_name: String,
    pub target_date: String,
}

impl PeriodKey {
    pub fn of(record: &SalesRecord) -> Self {
        Self {
            store_name: record.store_name.clone(),
            target_date: record.target_date.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodSummary {
    pub store_name: String,
    pub category: String,
    pub projected_sale: f64,
    pub period_start: NaiveDate,
    pub target_date: String,
    pub as_of_date: NaiveDate,
    pub max_running_total: f64,
    pub total_net_sales: f64,
    /// `None` when the projected amount makes the ratio non-finite.
    pub percent_achieved: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub running_total: Vec<Option<f64>>,
    pub daily_target: Vec<f64>,
    pub percent_achieved: Vec<f64>,
    pub net_sales: Vec<f64>,
    pub target_line: Vec<f64>,
    pub projected_sale: f64,
    pub period_end: Option<NaiveDate>,
}

impl ChartSeries {
    pub fn has_data(&self) -> bool {
        !self.labels.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailRow {
    pub sale_date: NaiveDate,
    pub net_sales: f64,
    pub daily_target_cumulative: f64,
    pub running_total: f64,
    pub percent_achieved: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DetailTotals {
    pub net_sales: f64,
    pub daily_target_cumulative: f64,
    pub running_total: f64,
    pub percent_achieved: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DetailTable {
    pub rows: Vec<DetailRow>,
    pub totals: DetailTotals,
}

#[derive(Debug, Default, Deserialize)]
pub struct SummaryQuery {
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub order: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SalesQuery {
    #[serde(default)]
    pub store: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryRowResponse {
    pub rank: usize,
    pub store_name: String,
    pub category: String,
    pub projected_sale: f64,
    pub projected_label: String,
    pub period_start: String,
    pub target_date: String,
    pub as_of_date: String,
    pub total_net_sales: f64,
    pub total_net_label: String,
    pub percent_achieved: Option<f64>,
    pub percent_label: String,
    pub exceeded: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DetailRowResponse {
    pub date_label: String,
    pub net_sales: String,
    pub daily_target: String,
    pub running_total: String,
    pub percent: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SalesSeriesResponse {
    pub labels: Vec<String>,
    pub running_total: Vec<Option<f64>>,
    pub daily_target: Vec<f64>,
    pub percent_achieved: Vec<f64>,
    pub net_sales: Vec<f64>,
    pub target_line: Vec<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SalesResponse {
    pub store_name: String,
    pub target_date: String,
    pub period_end_label: String,
    pub projected_sale: f64,
    pub projected_label: String,
    pub has_data: bool,
    pub series: SalesSeriesResponse,
    pub rows: Vec<DetailRowResponse>,
    pub totals: DetailRowResponse,
}
