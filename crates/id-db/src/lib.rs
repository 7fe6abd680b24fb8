pub mod error;
pub mod repositories;

pub use error::{DbError, Result};
pub use repositories::account_repository::AccountRepository;
pub use repositories::federated_identity_repository::FederatedIdentityRepository;
pub use repositories::profile_repository::ProfileRepository;
