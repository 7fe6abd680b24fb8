use metrics::counter;

/// Metrics collector for authentication and admin operations
#[derive(Clone)]
pub struct Metrics {
    prefix: &'static str,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            prefix: "id_server",
        }
    }

    /// Record completed sign-up (self-service or admin-created)
    pub fn signup_completed(&self) {
        counter!(format!("{}.auth.signups", self.prefix)).increment(1);
    }

    /// Record successful credential check
    pub fn login_succeeded(&self) {
        counter!(format!("{}.auth.logins.succeeded", self.prefix)).increment(1);
    }

    /// Record failed credential check
    pub fn login_failed(&self, reason: &str) {
        counter!(format!("{}.auth.logins.failed", self.prefix)).increment(1);
        counter!(format!("{}.auth.logins.failed.{}", self.prefix, reason)).increment(1);
    }

    /// Record session cookie minted
    pub fn session_issued(&self) {
        counter!(format!("{}.sessions.issued", self.prefix)).increment(1);
    }

    /// Record session verification rejected
    pub fn session_rejected(&self, reason: &str) {
        counter!(format!("{}.sessions.rejected", self.prefix)).increment(1);
        counter!(format!("{}.sessions.rejected.{}", self.prefix, reason)).increment(1);
    }

    /// Record admin console mutation (role change, disable, delete, ...)
    pub fn admin_mutation(&self, kind: &str) {
        counter!(format!("{}.admin.mutations", self.prefix)).increment(1);
        counter!(format!("{}.admin.mutations.{}", self.prefix, kind)).increment(1);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
