use serde::{Deserialize, Serialize};

use crate::OwnerId;

/// Caller identity supplied by the authenticating gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    owner_id: OwnerId,
    display_name: Option<String>,
}

impl UserIdentity {
    /// Creates an identity for one resolved owner.
    #[must_use]
    pub fn new(owner_id: OwnerId, display_name: Option<String>) -> Self {
        Self {
            owner_id,
            display_name: display_name.filter(|value| !value.trim().is_empty()),
        }
    }

    /// Returns the owner identifier audits are recorded against.
    #[must_use]
    pub fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }

    /// Returns the display name, if the gateway forwarded one.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }
}
