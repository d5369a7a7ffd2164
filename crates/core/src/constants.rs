//! Fixed upstream identifiers consumed by the mapper.
//!
//! These are part of the ODS FHIR contract.

/// Organisation-level validity window extension.
pub const ACTIVE_PERIOD_URL: &str =
    "https://fhir.nhs.uk/STU3/StructureDefinition/Extension-ODSAPI-ActivePeriod-1";

/// Date-type qualifier nested inside a `valuePeriod`.
pub const DATE_TYPE_URL: &str =
    "https://fhir.nhs.uk/STU3/StructureDefinition/Extension-ODSAPI-DateType-1";

/// Organisation role extension; carries the role tag vocabulary below.
pub const ORGANISATION_ROLE_URL: &str =
    "https://fhir.nhs.uk/STU3/StructureDefinition/Extension-ODSAPI-OrganizationRole-1";

/// Identifier system whose value is the ODS code.
pub const ODS_CODE_SYSTEM: &str = "https://fhir.nhs.uk/Id/ods-organization-code";

pub const ROLE_TAG: &str = "role";
pub const PRIMARY_ROLE_TAG: &str = "primaryRole";
pub const STATUS_TAG: &str = "status";
pub const ACTIVE_PERIOD_TAG: &str = "activePeriod";

/// The only date type ever surfaced in mapped output.
pub const OPERATIONAL_DATE_TYPE: &str = "Operational";
