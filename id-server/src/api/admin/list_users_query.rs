use serde::Deserialize;

/// Query parameters for GET /api/v1/admin/users
#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    /// Page size, defaults to 50
    #[serde(default)]
    pub limit: Option<i64>,

    /// uid of the last user on the previous page
    #[serde(default)]
    pub page_token: Option<String>,
}
