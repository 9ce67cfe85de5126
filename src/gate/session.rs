use crate::utils::constants::SESSION_FLAG_KEY;
use anyhow::{Context, Error};
use std::path::{Path, PathBuf};

/// Where the authentication flag is kept: one file named after the flag key.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn flag_path(&self) -> PathBuf {
        self.dir.join(SESSION_FLAG_KEY)
    }

    fn read_flag(&self) -> bool {
        std::fs::read_to_string(self.flag_path())
            .map(|raw| raw.trim() == "true")
            .unwrap_or(false)
    }

    fn write_flag(&self) -> Result<(), Error> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating session dir {}", self.dir.display()))?;
        std::fs::write(self.flag_path(), "true").context("writing session flag")?;
        Ok(())
    }

    fn clear_flag(&self) -> Result<(), Error> {
        match std::fs::remove_file(self.flag_path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::new(e).context("removing session flag")),
        }
    }
}

/// Handle on the authentication flag. Read once in [`SessionState::load`];
/// the only writer is [`SessionState::mark_authenticated`].
#[derive(Debug)]
pub struct SessionState {
    store: SessionStore,
    authenticated: bool,
}

impl SessionState {
    pub fn load(store: SessionStore) -> Self {
        let authenticated = store.read_flag();
        tracing::debug!(
            "session at {} authenticated={}",
            store.dir().display(),
            authenticated
        );
        Self {
            store,
            authenticated,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn mark_authenticated(&mut self) -> Result<(), Error> {
        self.store.write_flag()?;
        self.authenticated = true;
        Ok(())
    }

    /// Ends the session early, as closing the browser would.
    pub fn end(&mut self) -> Result<(), Error> {
        self.store.clear_flag()?;
        self.authenticated = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{SessionState, SessionStore};

    #[test]
    fn flag_survives_reload_until_ended() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session"));

        let mut session = SessionState::load(store.clone());
        assert!(!session.is_authenticated());

        session.mark_authenticated().unwrap();
        assert!(session.is_authenticated());
        assert!(SessionState::load(store.clone()).is_authenticated());

        session.end().unwrap();
        assert!(!session.is_authenticated());
        assert!(!SessionState::load(store.clone()).is_authenticated());

        // ending twice is fine
        session.end().unwrap();
    }

    #[test]
    fn unexpected_flag_contents_read_as_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("isAuthenticated"), "maybe").unwrap();
        assert!(!SessionState::load(SessionStore::new(dir.path())).is_authenticated());
    }
}
