use crate::dates::parse_mdy;
use crate::models::SalesRecord;
use chrono::Datelike;

/// A record in a 1000.00 period starting on the first of the sale month.
pub fn record(
    store: &str,
    target_date: &str,
    sale_date: &str,
    net_sales: f64,
    running_total: f64,
) -> SalesRecord {
    let sale_date = parse_mdy(sale_date).unwrap();
    SalesRecord {
        store_name: store.to_string(),
        category: "Retail".to_string(),
        net_sales,
        sale_date,
        period_start: sale_date.with_day(1).unwrap(),
        target_date: target_date.to_string(),
        projected_sale: 1000.0,
        running_total,
        daily_target_cumulative: f64::from(sale_date.day()) * 10.0,
        percent_achieved: running_total / 10.0,
    }
}
