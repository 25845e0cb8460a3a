use crate::models::FeedFilter;

/// Build the upstream search query for a filter.
///
/// Clause order is fixed and load-bearing: scope, then the optional label
/// and language clauses, then the quality clauses. Downstream tests and
/// cached upstream results both key on the exact string.
pub fn build_search_query(filter: &FeedFilter) -> String {
    let mut query = String::from("is:open is:issue ");

    if filter.good_first_only {
        query.push_str("label:\"good first issue\" ");
    }

    // Blank language means no language clause at all
    if let Some(lang) = filter.language.as_deref() {
        if !lang.is_empty() {
            query.push_str(&format!("language:{} ", lang));
        }
    }

    // Unassigned and already-discussed issues make better matches
    query.push_str("no:assignee comments:>0");
    query
}
