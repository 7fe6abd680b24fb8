pub mod error;
pub mod models;

pub use error::{CoreError, Result};
pub use models::auth_account::AuthAccount;
pub use models::federated_identity::{FederatedIdentity, Provider};
pub use models::role::Role;
pub use models::user_profile::UserProfile;

#[cfg(test)]
mod tests;
