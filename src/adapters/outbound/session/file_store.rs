use crate::entity_mediation::domain::{Credentials, Session};
use crate::ports::outbound::SessionStore;
use crate::shared::error::HyperionError;
use crate::shared::security::{is_well_formed_session_id, validate_not_symlink};
use crate::shared::Result;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::sync::Mutex;
use uuid::Uuid;

/// FileSessionStore keeps one JSON document per session in a directory.
///
/// Sessions survive restarts. Files are written through a temporary file
/// in the same directory and renamed into place.
pub struct FileSessionStore {
    directory: PathBuf,
    cookie_age: Duration,
    /// Held across renew's read and rewrite, and across remove, so a
    /// renewal never writes back a session that was just removed
    rewrites: Mutex<()>,
}

impl FileSessionStore {
    /// Opens (and creates if needed) the session directory.
    ///
    /// # Errors
    /// Fails when the directory cannot be created or is a symbolic link.
    pub fn open(directory: impl Into<PathBuf>, cookie_age: Duration) -> Result<Self> {
        let directory = directory.into();
        std::fs::create_dir_all(&directory).map_err(|e| HyperionError::SessionStore {
            path: directory.clone(),
            details: e.to_string(),
        })?;
        validate_not_symlink(&directory, "session storage")?;

        Ok(Self {
            directory,
            cookie_age,
            rewrites: Mutex::new(()),
        })
    }

    fn session_path(&self, id: &str) -> PathBuf {
        self.directory.join(format!("{}.json", id))
    }

    fn store_error(&self, path: &Path, details: impl ToString) -> anyhow::Error {
        HyperionError::SessionStore {
            path: path.to_path_buf(),
            details: details.to_string(),
        }
        .into()
    }

    async fn write(&self, session: &Session) -> Result<()> {
        let directory = self.directory.clone();
        let target = self.session_path(&session.id);
        let json = serde_json::to_vec(session)?;

        tokio::task::spawn_blocking(move || -> std::io::Result<()> {
            let mut file = NamedTempFile::new_in(&directory)?;
            file.write_all(&json)?;
            file.as_file().sync_all()?;
            file.persist(&target).map_err(|e| e.error)?;
            Ok(())
        })
        .await?
        .map_err(|e| self.store_error(&self.directory, e))
    }

    async fn read(&self, id: &str) -> Result<Option<Session>> {
        if !is_well_formed_session_id(id) {
            return Ok(None);
        }
        let path = self.session_path(id);
        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.store_error(&path, e)),
        };

        match serde_json::from_str::<Session>(&contents) {
            Ok(session) if session.is_expired(Utc::now()) => {
                self.delete_file(&path).await?;
                Ok(None)
            }
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                tracing::warn!(path = %path.display(), "Discarding unreadable session file: {}", e);
                self.delete_file(&path).await?;
                Ok(None)
            }
        }
    }

    async fn delete_file(&self, path: &Path) -> Result<()> {
        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.store_error(path, e)),
        }
    }

    /// Deletes every expired session file.
    async fn purge_expired(&self) -> Result<()> {
        let mut entries = tokio::fs::read_dir(&self.directory)
            .await
            .map_err(|e| self.store_error(&self.directory, e))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| self.store_error(&self.directory, e))?
        {
            let file_name = entry.file_name();
            let Some(id) = file_name
                .to_str()
                .and_then(|name| name.strip_suffix(".json"))
            else {
                continue;
            };
            // read() removes the file when the session has expired
            self.read(id).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn create(&self, credentials: Credentials, timezone: Option<String>) -> Result<Session> {
        self.purge_expired().await?;

        let session = Session {
            id: Uuid::new_v4().to_string(),
            credentials,
            expires_at: Utc::now() + self.cookie_age,
            timezone,
        };
        self.write(&session).await?;
        Ok(session)
    }

    async fn load(&self, id: &str) -> Result<Option<Session>> {
        self.read(id).await
    }

    async fn renew(&self, id: &str) -> Result<Option<Session>> {
        let _guard = self.rewrites.lock().await;
        let Some(mut session) = self.read(id).await? else {
            return Ok(None);
        };
        session.expires_at = Utc::now() + self.cookie_age;
        self.write(&session).await?;
        Ok(Some(session))
    }

    async fn remove(&self, id: &str) -> Result<()> {
        if !is_well_formed_session_id(id) {
            return Ok(());
        }
        let _guard = self.rewrites.lock().await;
        self.delete_file(&self.session_path(id)).await
    }
}
