// src/models/review.rs
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Review {
    pub id: i64,      // Assigned by the store on insert
    pub item_id: i64, // ID of the item the review is attached to
    pub text: String, // 1..=1024 chars
    pub grade: i64,   // 1..=10
}

/// Review as it appears inside an item response: no `item_id`, the caller
/// already knows which item they asked for.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ReviewSummary {
    pub id: i64,
    pub text: String,
    pub grade: i64,
}
