use serde::{Deserialize, Serialize};

use crate::models::review::ReviewSummary;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Item {
    pub id: i64,             // Assigned by the store on insert
    pub title: String,       // 1..=64 chars
    pub description: String, // 1..=1024 chars
    pub price: i64,          // 1..=1_000_000
}

/// Response shape for item retrieval: the item's public fields plus its
/// latest reviews, newest first. `reviews` is always present, `[]` when the
/// item has none.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ItemWithReviews {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub price: i64,
    pub reviews: Vec<ReviewSummary>,
}

impl ItemWithReviews {
    pub fn new(item: Item, reviews: Vec<ReviewSummary>) -> Self {
        Self {
            id: item.id,
            title: item.title,
            description: item.description,
            price: item.price,
            reviews,
        }
    }
}
