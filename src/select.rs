use crate::models::SalesRecord;

/// Records matching both filters, in input order. `None` or an empty
/// string matches everything.
pub fn select_records(
    records: &[SalesRecord],
    store: Option<&str>,
    target_date: Option<&str>,
) -> Vec<SalesRecord> {
    let store = store.filter(|value| !value.is_empty());
    let target_date = target_date.filter(|value| !value.is_empty());

    records
        .iter()
        .filter(|record| store.is_none_or(|store| record.store_name == store))
        .filter(|record| target_date.is_none_or(|target| record.target_date == target))
        .cloned()
        .collect()
}
