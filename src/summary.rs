use crate::categories::ALL_CATEGORIES;
use crate::dates::parse_mdy;
use crate::format::percent_of;
use crate::models::{PeriodKey, PeriodSummary, SalesRecord};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SummaryOrder {
    /// Newest period start first, then store name.
    #[default]
    Recent,
    /// Store name, then target date.
    Store,
}

impl FromStr for SummaryOrder {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "" | "recent" => Ok(Self::Recent),
            "store" => Ok(Self::Store),
            other => Err(format!("order must be 'recent' or 'store', got '{other}'")),
        }
    }
}

/// `None`, an empty label and the "all" sentinel all disable the filter.
pub fn category_matches(category: Option<&str>, record: &SalesRecord) -> bool {
    match category {
        None => true,
        Some(value) if value.is_empty() || value == ALL_CATEGORIES => true,
        Some(value) => record.category == value,
    }
}

/// One summary per (store, target date), in first-seen order.
///
/// The as-of date follows the first record that reaches the group's highest
/// running total; later records with an equal total do not move it.
pub fn summarize_periods(records: &[SalesRecord], category: Option<&str>) -> Vec<PeriodSummary> {
    let mut index: HashMap<PeriodKey, usize> = HashMap::new();
    let mut summaries: Vec<PeriodSummary> = Vec::new();

    for record in records.iter().filter(|record| category_matches(category, record)) {
        let key = PeriodKey::of(record);
        match index.get(&key).copied() {
            Some(position) => {
                let summary = &mut summaries[position];
                summary.total_net_sales += record.net_sales;
                if record.running_total > summary.max_running_total {
                    summary.max_running_total = record.running_total;
                    summary.as_of_date = record.sale_date;
                }
            }
            None => {
                index.insert(key, summaries.len());
                summaries.push(PeriodSummary {
                    store_name: record.store_name.clone(),
                    category: record.category.clone(),
                    projected_sale: record.projected_sale,
                    period_start: record.period_start,
                    target_date: record.target_date.clone(),
                    as_of_date: record.sale_date,
                    max_running_total: record.running_total,
                    total_net_sales: record.net_sales,
                    percent_achieved: None,
                });
            }
        }
    }

    for summary in &mut summaries {
        summary.percent_achieved = percent_of(summary.total_net_sales, summary.projected_sale);
    }

    summaries
}

/// Stable sort, so equal keys keep their first-seen order.
pub fn sort_summaries(summaries: &mut [PeriodSummary], order: SummaryOrder) {
    match order {
        SummaryOrder::Recent => summaries.sort_by(|a, b| {
            b.period_start
                .cmp(&a.period_start)
                .then_with(|| a.store_name.cmp(&b.store_name))
        }),
        SummaryOrder::Store => summaries.sort_by(|a, b| {
            a.store_name
                .cmp(&b.store_name)
                .then_with(|| target_date_key(&a.target_date).cmp(&target_date_key(&b.target_date)))
        }),
    }
}

/// Parseable target dates sort first, in calendar order; the rest follow as text.
fn target_date_key(value: &str) -> (bool, Option<NaiveDate>, &str) {
    let date = parse_mdy(value).ok();
    (date.is_none(), date, value)
}
