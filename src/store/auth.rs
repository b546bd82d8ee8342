use log::info;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("username '{0}' already exists")]
    UserExists(String),
    #[error("invalid username or password: must be non-empty without whitespace")]
    InvalidCredentials,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Plain `username password` pairs, one per line.
///
/// Credentials are stored in clear text; this is a session gate, not a
/// security boundary.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
    accounts: BTreeMap<String, String>,
}

impl CredentialStore {
    /// Load accounts; a missing file means no accounts yet.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, AuthError> {
        let path = path.into();
        let accounts = match fs::read_to_string(&path) {
            Ok(content) => {
                let mut tokens = content.split_whitespace();
                let mut accounts = BTreeMap::new();
                while let (Some(user), Some(pass)) = (tokens.next(), tokens.next()) {
                    accounts.insert(user.to_string(), pass.to_string());
                }
                accounts
            }
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, accounts })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// The login gate: true only for a known user with a matching password.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.accounts.get(username).is_some_and(|p| p == password)
    }

    /// Add an account and rewrite the credential file.
    pub fn create_account(&mut self, username: &str, password: &str) -> Result<(), AuthError> {
        let valid = |s: &str| !s.is_empty() && !s.chars().any(char::is_whitespace);
        if !valid(username) || !valid(password) {
            return Err(AuthError::InvalidCredentials);
        }
        if self.accounts.contains_key(username) {
            return Err(AuthError::UserExists(username.to_string()));
        }
        self.accounts
            .insert(username.to_string(), password.to_string());

        let content: String = self
            .accounts
            .iter()
            .map(|(user, pass)| format!("{user} {pass}\n"))
            .collect();
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        if let Err(e) = fs::write(&self.path, content) {
            self.accounts.remove(username);
            return Err(e.into());
        }
        info!("created account {username}");
        Ok(())
    }
}
