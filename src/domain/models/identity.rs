use serde::{Deserialize, Serialize};

/// Caller identity as asserted by the external identity provider. The
/// service consumes these values verbatim and never authenticates itself.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "business-owner")]
    BusinessOwner,
    #[serde(rename = "client")]
    Client,
}

impl Role {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "business-owner" => Some(Role::BusinessOwner),
            "client" => Some(Role::Client),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Identity {
    pub user_id: String,
    pub display_name: String,
    pub email: String,
    pub role: Role,
}
