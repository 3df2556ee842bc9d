use serde::{Deserialize, Serialize};

/// The authenticated user acting on a call.
///
/// Supplied by the identity collaborator and trusted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    pub user_id: String,
    pub display_name: String,
}

impl Caller {
    pub fn new(user_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: display_name.into(),
        }
    }
}
