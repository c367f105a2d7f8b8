//! Session token persistence.
//!
//! The token is the only state that outlives a session: on start the
//! [`Session`](crate::session::Session) asks its store for a previously saved
//! token and, if one exists, resumes with the server's cart.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use secrecy::{ExposeSecret, SecretString};

/// Storage for the session token.
pub trait TokenStore: Send + Sync {
    /// Load the saved token, if any.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the backing storage cannot be read.
    fn load(&self) -> io::Result<Option<SecretString>>;

    /// Persist `token`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the backing storage cannot be written.
    fn save(&self, token: &SecretString) -> io::Result<()>;

    /// Forget the saved token.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the backing storage cannot be modified.
    fn clear(&self) -> io::Result<()>;
}

/// In-process token store. Nothing survives the process.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<SecretString>>,
}

impl MemoryTokenStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `token`.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(SecretString::from(token.into()))),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<SecretString>> {
        // A poisoned lock still holds a valid Option.
        self.token
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> io::Result<Option<SecretString>> {
        Ok(self.slot().clone())
    }

    fn save(&self, token: &SecretString) -> io::Result<()> {
        *self.slot() = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> io::Result<()> {
        *self.slot() = None;
        Ok(())
    }
}

/// Token store backed by a single file holding the raw token.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Create a store at `path`. The file is created on first save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the token file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> io::Result<Option<SecretString>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                Ok((!token.is_empty()).then(|| SecretString::from(token.to_owned())))
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn save(&self, token: &SecretString) -> io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, token.expose_secret())?;
        restrict_permissions(&self.path)
    }

    fn clear(&self) -> io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err),
            _ => Ok(()),
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}
