use crate::wire::HealthRes;

/// Health check shared by the server entry points.
///
/// The service holds no state: the notetaker is healthy as soon as its context has been built,
/// because the sentiment model is loaded before the server starts listening.
pub struct HealthService;

impl HealthService {
    /// Returns a `HealthRes` reporting the service as alive.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "Notetaker is alive".into(),
        }
    }
}
