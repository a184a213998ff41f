use std::fmt;

use serde::{Deserialize, Serialize};

/// A signed-in user and the bearer token every API call is made with.
///
/// Sessions are built by a login and handed to clients explicitly; nothing reads one from
/// ambient state.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub subject_id: String,
    pub display_name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    pub username: String,
    pub token: String,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("subject_id", &self.subject_id)
            .field("display_name", &self.display_name)
            .field("avatar_url", &self.avatar_url)
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .finish()
    }
}
