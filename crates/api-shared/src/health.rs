use crate::dto::HealthRes;

/// Liveness and readiness answers for probes.
///
/// The gateway holds no state of its own, so both probes report healthy as long as the
/// process can serve requests.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    pub fn liveness() -> HealthRes {
        HealthRes {
            ok: true,
            message: "ODS gateway is alive".into(),
        }
    }

    pub fn readiness() -> HealthRes {
        HealthRes {
            ok: true,
            message: "ODS gateway is ready".into(),
        }
    }
}
