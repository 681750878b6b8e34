use crate::format::finite;
use crate::models::{DetailRow, DetailTable, DetailTotals, SalesRecord};

/// Per-day rows for days with sales activity, plus a totals row: the net sales
/// are summed, the cumulative columns come from the last visible row.
pub fn build_detail(records: &[SalesRecord]) -> DetailTable {
    let rows: Vec<DetailRow> = records
        .iter()
        .filter(|record| record.net_sales != 0.0)
        .map(|record| DetailRow {
            sale_date: record.sale_date,
            net_sales: record.net_sales,
            daily_target_cumulative: record.daily_target_cumulative,
            running_total: record.running_total,
            // A zero stored percent is shown as unavailable, like a missing one.
            percent_achieved: finite(record.percent_achieved).filter(|percent| *percent != 0.0),
        })
        .collect();

    let mut totals = DetailTotals {
        net_sales: rows.iter().map(|row| row.net_sales).sum(),
        ..DetailTotals::default()
    };
    if let Some(last) = rows.last() {
        totals.daily_target_cumulative = last.daily_target_cumulative;
        totals.running_total = last.running_total;
        totals.percent_achieved = last.percent_achieved;
    }

    DetailTable { rows, totals }
}
