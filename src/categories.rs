use crate::models::SalesRecord;
use std::collections::HashSet;

/// Selector entry that turns the category filter off.
pub const ALL_CATEGORIES: &str = "All Business Group";

/// The sentinel, then each distinct category in the order it first appears.
pub fn list_categories(records: &[SalesRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut categories = vec![ALL_CATEGORIES.to_string()];
    for record in records {
        if seen.insert(record.category.as_str()) {
            categories.push(record.category.clone());
        }
    }
    categories
}
