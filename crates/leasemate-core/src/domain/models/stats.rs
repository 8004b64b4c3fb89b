use serde::Deserialize;
use serde::Serialize;

/// Dashboard counts, fully recomputed from current state after every
/// mutating operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total: usize,
    pub active: usize,
    pub expiring_soon: usize,
    pub alerts: usize,
}
