use crate::categories::{ALL_CATEGORIES, list_categories};
use crate::dates::{detail_label, us_date};
use crate::detail::build_detail;
use crate::errors::AppError;
use crate::format::{format_amount, format_percent};
use crate::models::{
    DetailRowResponse, DetailTotals, PeriodSummary, SalesQuery, SalesRecord, SalesResponse,
    SalesSeriesResponse, SummaryQuery, SummaryRowResponse,
};
use crate::select::select_records;
use crate::series::build_series;
use crate::source::load_records;
use crate::state::AppState;
use crate::summary::{SummaryOrder, sort_summaries, summarize_periods};
use crate::ui::render_index;
use axum::{
    Json,
    extract::{Query, State},
    response::Html,
};
use tracing::{error, info};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let categories = match load_records(&state.source_path).await {
        Ok(records) => list_categories(&records),
        Err(err) => {
            error!("rendering dashboard without categories: {err}");
            vec![ALL_CATEGORIES.to_string()]
        }
    };
    Html(render_index(&categories))
}

pub async fn get_categories(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    let records = load_records(&state.source_path).await?;
    Ok(Json(list_categories(&records)))
}

pub async fn get_summaries(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<Vec<SummaryRowResponse>>, AppError> {
    let order = query
        .order
        .as_deref()
        .unwrap_or_default()
        .parse::<SummaryOrder>()
        .map_err(AppError::bad_request)?;

    let records = load_records(&state.source_path).await?;
    Ok(Json(summary_rows(&records, query.group.as_deref(), order)))
}

pub async fn get_sales(
    State(state): State<AppState>,
    Query(query): Query<SalesQuery>,
) -> Result<Json<SalesResponse>, AppError> {
    let records = load_records(&state.source_path).await?;
    let response = sales_view(&records, query.store.as_deref(), query.target.as_deref());
    if !response.has_data {
        info!(store = ?query.store, target = ?query.target, "no sales data for selection");
    }
    Ok(Json(response))
}

pub fn summary_rows(
    records: &[SalesRecord],
    category: Option<&str>,
    order: SummaryOrder,
) -> Vec<SummaryRowResponse> {
    let mut summaries = summarize_periods(records, category);
    sort_summaries(&mut summaries, order);
    summaries
        .iter()
        .enumerate()
        .map(|(index, summary)| to_summary_row(index + 1, summary))
        .collect()
}

pub fn sales_view(records: &[SalesRecord], store: Option<&str>, target: Option<&str>) -> SalesResponse {
    let selected = select_records(records, store, target);
    let series = build_series(&selected);
    let detail = build_detail(&selected);

    SalesResponse {
        store_name: store.unwrap_or_default().trim().to_string(),
        target_date: target.unwrap_or_default().to_string(),
        period_end_label: series.period_end.map(us_date).unwrap_or_default(),
        projected_sale: series.projected_sale,
        projected_label: format_amount(series.projected_sale),
        has_data: series.has_data(),
        rows: detail
            .rows
            .iter()
            .map(|row| DetailRowResponse {
                date_label: detail_label(row.sale_date),
                net_sales: format_amount(row.net_sales),
                daily_target: format_amount(row.daily_target_cumulative),
                running_total: format_amount(row.running_total),
                percent: format_percent(row.percent_achieved),
            })
            .collect(),
        totals: to_totals_row(&detail.totals),
        series: SalesSeriesResponse {
            labels: series.labels,
            running_total: series.running_total,
            daily_target: series.daily_target,
            percent_achieved: series.percent_achieved,
            net_sales: series.net_sales,
            target_line: series.target_line,
        },
    }
}

fn to_summary_row(rank: usize, summary: &PeriodSummary) -> SummaryRowResponse {
    SummaryRowResponse {
        rank,
        store_name: summary.store_name.clone(),
        category: summary.category.clone(),
        projected_sale: summary.projected_sale,
        projected_label: format_amount(summary.projected_sale),
        period_start: summary.period_start.format("%m/%d/%Y").to_string(),
        target_date: summary.target_date.clone(),
        as_of_date: summary.as_of_date.format("%m/%d/%Y").to_string(),
        total_net_sales: summary.total_net_sales,
        total_net_label: format_amount(summary.total_net_sales),
        percent_achieved: summary.percent_achieved,
        percent_label: format_percent(summary.percent_achieved),
        exceeded: summary.total_net_sales > summary.projected_sale,
    }
}

fn to_totals_row(totals: &DetailTotals) -> DetailRowResponse {
    DetailRowResponse {
        date_label: "Total".to_string(),
        net_sales: format_amount(totals.net_sales),
        daily_target: format_amount(totals.daily_target_cumulative),
        running_total: format_amount(totals.running_total),
        percent: format_percent(totals.percent_achieved),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::record;

    fn sample() -> Vec<SalesRecord> {
        let mut beta = record("Beta", "11/30/2024", "11/03/2024", 1500.0, 1500.0);
        beta.category = "Food".to_string();
        vec![
            record("Alpha", "12/31/2024", "12/01/2024", 300.0, 300.0),
            beta,
            record("Alpha", "12/31/2024", "12/02/2024", 0.0, 300.0),
            record("Alpha", "12/31/2024", "12/03/2024", 400.0, 700.0),
        ]
    }

    #[test]
    fn summary_rows_are_ranked_and_formatted() {
        let rows = summary_rows(&sample(), None, SummaryOrder::Recent);
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[0].store_name, "Alpha");
        assert_eq!(rows[0].projected_label, "1,000.00");
        assert_eq!(rows[0].as_of_date, "12/03/2024");
        assert_eq!(rows[0].total_net_label, "700.00");
        assert_eq!(rows[0].percent_label, "70.00%");
        assert!(!rows[0].exceeded);

        assert_eq!(rows[1].rank, 2);
        assert_eq!(rows[1].store_name, "Beta");
        assert!(rows[1].exceeded);
    }

    #[test]
    fn summary_rows_respect_the_category() {
        let rows = summary_rows(&sample(), Some("Food"), SummaryOrder::Store);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].store_name, "Beta");
        assert_eq!(rows[0].rank, 1);
    }

    #[test]
    fn sales_view_for_one_period() {
        let view = sales_view(&sample(), Some("Alpha"), Some("12/31/2024"));
        assert!(view.has_data);
        assert_eq!(view.store_name, "Alpha");
        assert_eq!(view.period_end_label, "12/3/2024");
        assert_eq!(view.projected_label, "1,000.00");
        assert_eq!(view.series.labels.len(), 3);
        assert_eq!(view.series.running_total, vec![Some(300.0), None, Some(700.0)]);
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.rows[1].date_label, "12/03/2024 -Tue");
        assert_eq!(view.totals.net_sales, "700.00");
        assert_eq!(view.totals.percent, "70.00%");
    }

    #[test]
    fn store_filter_is_exact_but_label_is_trimmed() {
        let view = sales_view(&sample(), Some("Alpha "), Some("12/31/2024"));
        assert!(!view.has_data);
        assert_eq!(view.store_name, "Alpha");
    }

    #[test]
    fn sales_view_without_matches_is_empty() {
        let view = sales_view(&sample(), Some("Omega"), None);
        assert!(!view.has_data);
        assert_eq!(view.projected_sale, 0.0);
        assert!(view.series.labels.is_empty());
        assert!(view.rows.is_empty());
        assert_eq!(view.period_end_label, "");
        assert_eq!(view.totals.net_sales, "0.00");
    }
}
