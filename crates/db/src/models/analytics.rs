//! Analytics event models and DTOs.

use cardfolio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `business_card_analytics` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AnalyticsEvent {
    pub id: DbId,
    pub card_id: DbId,
    pub event_type: String,
    pub referrer: Option<String>,
    pub occurred_at: Timestamp,
}

/// Event types accepted from the public event endpoint.
///
/// `view` and `wallet_save` are recorded server-side by their own
/// operations and cannot be posted directly.
pub const PUBLIC_EVENT_TYPES: &[&str] = &["qr_scan", "share", "contact_click"];

/// DTO for recording a public event against a shared card.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordEvent {
    pub event_type: String,
    pub referrer: Option<String>,
}

/// Per-event-type count, one row of the summary.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EventCount {
    pub event_type: String,
    pub count: i64,
}

/// Daily view count for the trailing window.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DailyViews {
    pub day: chrono::NaiveDate,
    pub count: i64,
}

/// Owner-facing analytics summary for one card.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsSummary {
    /// Lifetime view counter from the card row.
    pub total_views: i64,
    pub events: Vec<EventCount>,
    /// Daily `view` counts over the last 30 days, oldest first.
    pub daily_views: Vec<DailyViews>,
}
