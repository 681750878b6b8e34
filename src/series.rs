use crate::dates::short_label;
use crate::models::{ChartSeries, SalesRecord};

/// Builds the chart series for one store's period.
///
/// Every record gets a label. Records whose period has no positive projected
/// amount contribute nothing else. A day without positive net sales leaves a
/// gap in the running total instead of a zero. `period_end` looks at all
/// records, skipped ones included.
pub fn build_series(records: &[SalesRecord]) -> ChartSeries {
    let projected_sale = records.first().map_or(0.0, |record| record.projected_sale);

    let mut series = ChartSeries {
        projected_sale,
        period_end: records.iter().map(|record| record.sale_date).max(),
        ..ChartSeries::default()
    };

    for record in records {
        series.labels.push(short_label(record.sale_date));
        series.target_line.push(projected_sale);

        if record.projected_sale <= 0.0 {
            continue;
        }

        series.daily_target.push(record.daily_target_cumulative);
        series.percent_achieved.push(record.percent_achieved);
        series.net_sales.push(record.net_sales);
        series
            .running_total
            .push((record.net_sales > 0.0).then_some(record.running_total));
    }

    series
}
