use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct UpdateDisabledRequest {
    pub disabled: bool,
}
