use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    /// One of: user, customer, admin, super_admin
    pub role: String,
}
