//! Domain → response body translation.

use api_shared::{
    AddressRes, OperationalPeriodRes, OrganisationMetadataRes, OrganisationRes,
    OrganisationRoleRes,
};
use ods_core::{Address, OperationalPeriod, Organisation, OrganisationRole};

pub fn organisation_res(org: Organisation) -> OrganisationRes {
    OrganisationRes {
        id: org.id,
        ods_code: org.ods_code,
        name: org.name,
        is_active: org.is_active,
        metadata: OrganisationMetadataRes {
            last_updated: org.metadata.last_updated,
        },
        address: address_res(org.address),
        operational_period: org.operational_period.map(operational_period_res),
        record_class: org.record_class,
        roles: org.roles.into_iter().map(role_res).collect(),
    }
}

fn address_res(address: Address) -> AddressRes {
    AddressRes {
        city: address.city,
        country: address.country,
        lines: address.lines,
        postal_code: address.postal_code,
    }
}

fn operational_period_res(period: OperationalPeriod) -> OperationalPeriodRes {
    OperationalPeriodRes {
        date_type: period.date_type,
        start: period.start,
        end: period.end,
    }
}

fn role_res(role: OrganisationRole) -> OrganisationRoleRes {
    OrganisationRoleRes {
        code: role.code,
        display: role.display,
        primary: role.primary,
        status: role.status,
        operational_period: role.operational_period.map(operational_period_res),
    }
}
