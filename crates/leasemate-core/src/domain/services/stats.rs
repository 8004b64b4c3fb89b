//! Dashboard stats projection.

use crate::domain::models::AgreementStatus;
use crate::domain::models::DashboardStats;
use crate::domain::services::AppState;

/// Recomputes the dashboard counts from scratch.
///
/// Called after every state-mutating operation. A full rescan is fine at the
/// collection sizes a single user accumulates; this is not built for reuse at
/// larger scale.
pub fn project(state: &AppState) -> DashboardStats {
    return DashboardStats {
        total: state.agreements.len(),
        active: state
            .agreements
            .iter()
            .filter(|a| a.status == AgreementStatus::Active)
            .count(),
        expiring_soon: state
            .agreements
            .iter()
            .filter(|a| a.status == AgreementStatus::ExpiringSoon)
            .count(),
        alerts: state.reminders.len(),
    };
}
