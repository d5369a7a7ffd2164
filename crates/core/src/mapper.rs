//! Translation of ODS organisation resources into the domain model.
//!
//! The upstream record is mostly a list of URL-keyed extensions. Each extension is first
//! decoded into a typed variant ([`OrganisationExtension`], [`RoleTag`]); the selection rules
//! then work on those variants only:
//! - a period is surfaced only if its date type is `Operational`, first match wins
//! - a role is kept only if it has a non-empty code
//!
//! Nothing here fails. Missing or malformed upstream pieces become defaults or `None`.

use crate::constants::{
    ACTIVE_PERIOD_TAG, ACTIVE_PERIOD_URL, DATE_TYPE_URL, ODS_CODE_SYSTEM, OPERATIONAL_DATE_TYPE,
    ORGANISATION_ROLE_URL, PRIMARY_ROLE_TAG, ROLE_TAG, STATUS_TAG,
};
use crate::domain::{
    Address, OperationalPeriod, Organisation, OrganisationMetadata, OrganisationRole,
};
use fhir::{Coding, Extension, OrganizationResource, Period};

/// Map one upstream organisation resource to an [`Organisation`].
pub fn map_organisation(org: &OrganizationResource) -> Organisation {
    let extensions: Vec<OrganisationExtension<'_>> = org
        .extensions()
        .iter()
        .filter_map(OrganisationExtension::decode)
        .collect();

    let operational_period = select_operational_period(extensions.iter().filter_map(|ext| {
        match ext {
            OrganisationExtension::ActivePeriod(period) => Some(*period),
            OrganisationExtension::Role(_) => None,
        }
    }));

    let roles = extensions
        .iter()
        .filter_map(|ext| match ext {
            OrganisationExtension::Role(tags) => map_role(tags),
            OrganisationExtension::ActivePeriod(_) => None,
        })
        .collect();

    Organisation {
        id: org.id.clone(),
        ods_code: resolve_ods_code(org),
        name: org.name.clone().unwrap_or_default(),
        is_active: org.active.unwrap_or(false),
        metadata: OrganisationMetadata {
            last_updated: org.meta.as_ref().and_then(|m| m.last_updated_at()),
        },
        address: map_address(org.address.as_ref()),
        operational_period,
        record_class: record_class_code(org),
        roles,
    }
}

/// Organisation-level extensions the mapper understands.
enum OrganisationExtension<'a> {
    ActivePeriod(&'a Period),
    Role(&'a [Extension]),
}

impl<'a> OrganisationExtension<'a> {
    fn decode(ext: &'a Extension) -> Option<Self> {
        match ext.url.as_deref()? {
            ACTIVE_PERIOD_URL => ext.value_period.as_ref().map(Self::ActivePeriod),
            ORGANISATION_ROLE_URL => Some(Self::Role(ext.children())),
            _ => None,
        }
    }
}

/// Tags nested inside an organisation role extension.
enum RoleTag<'a> {
    Role(&'a Coding),
    PrimaryRole(bool),
    Status(&'a str),
    ActivePeriod(&'a Period),
}

impl<'a> RoleTag<'a> {
    fn decode(ext: &'a Extension) -> Option<Self> {
        match ext.url.as_deref()? {
            ROLE_TAG => ext.value_coding.as_ref().map(Self::Role),
            PRIMARY_ROLE_TAG => ext.value_boolean.map(Self::PrimaryRole),
            STATUS_TAG => Some(Self::Status(ext.value_string.as_deref().unwrap_or_default())),
            ACTIVE_PERIOD_TAG => ext.value_period.as_ref().map(Self::ActivePeriod),
            _ => None,
        }
    }
}

fn map_role(tags: &[Extension]) -> Option<OrganisationRole> {
    let mut role = OrganisationRole::default();
    let mut periods = Vec::new();

    for tag in tags.iter().filter_map(RoleTag::decode) {
        match tag {
            RoleTag::Role(coding) => {
                role.code = coding.code.clone().unwrap_or_default();
                role.display = coding.display.clone().unwrap_or_default();
            }
            RoleTag::PrimaryRole(primary) => role.primary = primary,
            RoleTag::Status(status) => role.status = status.to_owned(),
            RoleTag::ActivePeriod(period) => periods.push(period),
        }
    }

    if role.code.is_empty() {
        return None;
    }
    role.operational_period = select_operational_period(periods);
    Some(role)
}

/// The first `Operational` candidate decides; later ones are never consulted, even when the
/// first has no usable start.
fn select_operational_period<'a>(
    candidates: impl IntoIterator<Item = &'a Period>,
) -> Option<OperationalPeriod> {
    let period = candidates
        .into_iter()
        .find(|period| date_type(period) == Some(OPERATIONAL_DATE_TYPE))?;

    Some(OperationalPeriod {
        start: period.start_date()?,
        end: period.end_date(),
        date_type: OPERATIONAL_DATE_TYPE.to_owned(),
    })
}

fn date_type(period: &Period) -> Option<&str> {
    period
        .extensions()
        .iter()
        .filter(|ext| ext.url.as_deref() == Some(DATE_TYPE_URL))
        .find_map(|ext| ext.value_string.as_deref().filter(|s| !s.is_empty()))
}

fn resolve_ods_code(org: &OrganizationResource) -> String {
    org.identifier
        .as_ref()
        .filter(|identifier| identifier.system.as_deref() == Some(ODS_CODE_SYSTEM))
        .and_then(|identifier| identifier.value.clone())
        .unwrap_or_else(|| org.id.clone())
}

fn record_class_code(org: &OrganizationResource) -> String {
    org.type_
        .as_ref()
        .and_then(|t| t.coding.as_ref())
        .and_then(|c| c.code.clone())
        .unwrap_or_default()
}

fn map_address(address: Option<&fhir::Address>) -> Address {
    let Some(address) = address else {
        return Address::default();
    };

    Address {
        city: address.city.clone(),
        country: address.country.clone(),
        lines: address.line.clone(),
        postal_code: address.postal_code.clone(),
    }
}
