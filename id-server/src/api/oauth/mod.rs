pub mod callback_query;
#[allow(clippy::module_inception)]
pub mod oauth;
