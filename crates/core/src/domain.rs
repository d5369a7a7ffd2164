//! Gateway domain model.
//!
//! Flat, stable organisation shape produced by [`crate::mapper`]. Values are built per request
//! and never mutated afterwards.

use chrono::{DateTime, NaiveDate, Utc};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Organisation {
    /// Upstream-assigned resource id.
    pub id: String,

    /// ODS business code; falls back to `id` when the identifier is not an ODS code.
    pub ods_code: String,

    pub name: String,

    pub is_active: bool,

    pub metadata: OrganisationMetadata,

    pub address: Address,

    /// First upstream window tagged `Operational`, if any.
    pub operational_period: Option<OperationalPeriod>,

    /// Record classification code, empty when absent upstream.
    pub record_class: String,

    /// Roles in upstream discovery order. Never contains a role with an empty code.
    pub roles: Vec<OrganisationRole>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrganisationMetadata {
    pub last_updated: Option<DateTime<Utc>>,
}

/// Postal address. `lines: None` means upstream sent no line list; `Some(vec![])` means it
/// sent an empty one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Address {
    pub city: Option<String>,
    pub country: Option<String>,
    pub lines: Option<Vec<String>>,
    pub postal_code: Option<String>,
}

/// Validity window qualified by its date type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OperationalPeriod {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
    pub date_type: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrganisationRole {
    pub code: String,
    pub display: String,
    pub primary: bool,
    pub status: String,
    pub operational_period: Option<OperationalPeriod>,
}
