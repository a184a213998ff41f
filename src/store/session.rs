use anyhow::Result;

use crate::model::{Session, StoredSession};

use super::LocalStore;

impl LocalStore {
    pub fn stored_session(&self) -> Result<Option<StoredSession>> {
        let st = self.read_state()?;
        if st.version != 1 {
            anyhow::bail!("unsupported state version {}", st.version);
        }
        Ok(st.session)
    }

    /// The persisted session, if one exists and still carries a token.
    pub fn load_session(&self) -> Result<Option<Session>> {
        let Some(stored) = self.stored_session()? else {
            return Ok(None);
        };
        let session = stored.to_session();
        if session.is_none() {
            tracing::debug!(user = %stored.username, "stored identity has no token");
        }
        Ok(session)
    }

    pub fn save_session(&self, session: &Session, signed_in_at: String) -> Result<()> {
        let mut st = self.read_state()?;
        if st.version != 1 {
            anyhow::bail!("unsupported state version {}", st.version);
        }
        st.session = Some(StoredSession::from_session(session, signed_in_at));
        self.write_state(&st)
    }

    /// Returns whether a session was stored.
    pub fn clear_session(&self) -> Result<bool> {
        let mut st = self.read_state()?;
        if st.version != 1 {
            anyhow::bail!("unsupported state version {}", st.version);
        }
        let had = st.session.take().is_some();
        self.write_state(&st)?;
        Ok(had)
    }
}
