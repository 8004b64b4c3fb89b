use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Sentinel the extraction service emits for fields it could not find.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgreementStatus {
    Active,
    ExpiringSoon,
    Expired,
}

/// Key facts extracted from one rental agreement. Every field is optional;
/// the service may also send the literal "N/A" for fields it could not read,
/// which callers must treat the same as absent via [`StructuredInfo::known`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredInfo {
    pub tenant_name: Option<String>,
    pub landlord_name: Option<String>,
    pub property_address: Option<String>,
    pub rent_amount: Option<String>,
    pub due_date: Option<String>,
    pub duration: Option<String>,
    pub security_deposit_amount: Option<String>,
}

impl StructuredInfo {
    /// Returns the field value only when it is present, non-blank, and not
    /// the "N/A" sentinel.
    pub fn known(field: &Option<String>) -> Option<&str> {
        match field {
            Some(value) if !value.trim().is_empty() && value != NOT_AVAILABLE => {
                Some(value.as_str())
            }
            _ => None,
        }
    }
}

/// One processed rental-agreement record held client-side.
///
/// Agreements are immutable once created and are never deleted individually;
/// the collection is only bulk-cleared when the session identity changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agreement {
    pub id: String,
    pub filename: String,
    pub upload_date: DateTime<Utc>,
    pub parties: String,
    pub rent_display: String,
    pub status: AgreementStatus,
    pub structured_info: StructuredInfo,
    pub summary: String,
}
