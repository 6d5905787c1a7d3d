//! Product record types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Product information as held by the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub price: f64,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Price formatted for display
    pub fn price_label(&self) -> String {
        format!("${:.2}", self.price)
    }
}
