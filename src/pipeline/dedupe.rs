use std::collections::HashSet;

use crate::model::RecommendationItem;

pub(super) fn dedupe_items(items: Vec<RecommendationItem>) -> Vec<RecommendationItem> {
    let mut seen = HashSet::<String>::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.name.to_lowercase()))
        .collect()
}
