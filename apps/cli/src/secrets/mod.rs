//! Token file for the terminal client.
//!
//! Tokens are kept in a small JSON document. When `TUNI_SECRET_KEY` is set
//! the document is sealed with ChaCha20-Poly1305 and only the nonce and
//! ciphertext are written to disk.

use std::{
    collections::HashMap,
    fs,
    io::Write,
    path::{Path, PathBuf},
    sync::Mutex,
};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Key, Nonce,
};
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use tunicoin_core::{
    errors::Error,
    secrets::{format_service_id, SecretStore},
    Result,
};

const FORMAT_VERSION: u32 = 1;
const KEY_LEN: usize = 32;
const NONCE_LEN: usize = 12;

#[derive(Serialize, Deserialize, Default)]
struct TokenTable {
    version: u32,
    secrets: HashMap<String, String>,
}

#[derive(Serialize, Deserialize)]
struct SealedTable {
    version: u32,
    nonce: String,
    ciphertext: String,
}

/// On-disk shape. A sealed file is recognised by its `ciphertext` field.
#[derive(Deserialize)]
#[serde(untagged)]
enum TokenFileContents {
    Sealed(SealedTable),
    Plain(TokenTable),
}

/// Symmetric key for sealing the token table.
struct TokenCipher(ChaCha20Poly1305);

impl std::fmt::Debug for TokenCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("TokenCipher(..)")
    }
}

impl TokenCipher {
    fn from_config(raw: &str) -> Result<Self> {
        let key = decode_secret_key(raw)?;
        Ok(Self(ChaCha20Poly1305::new(Key::from_slice(&key))))
    }

    fn seal(&self, table: &TokenTable) -> Result<SealedTable> {
        let plaintext = serde_json::to_vec(table)?;
        let mut nonce = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce);
        let ciphertext = self
            .0
            .encrypt(Nonce::from_slice(&nonce), plaintext.as_ref())
            .map_err(|_| Error::Secret("Failed to encrypt token file".into()))?;
        Ok(SealedTable {
            version: FORMAT_VERSION,
            nonce: BASE64.encode(nonce),
            ciphertext: BASE64.encode(ciphertext),
        })
    }

    fn open(&self, sealed: &SealedTable) -> Result<TokenTable> {
        let nonce = BASE64
            .decode(&sealed.nonce)
            .map_err(|e| Error::Secret(format!("Token file nonce is not base64: {e}")))?;
        if nonce.len() != NONCE_LEN {
            return Err(Error::Secret("Token file nonce has the wrong length".into()));
        }
        let ciphertext = BASE64
            .decode(&sealed.ciphertext)
            .map_err(|e| Error::Secret(format!("Token file ciphertext is not base64: {e}")))?;
        let plaintext = self
            .0
            .decrypt(Nonce::from_slice(&nonce), ciphertext.as_ref())
            .map_err(|_| {
                Error::Secret("Failed to decrypt token file (wrong TUNI_SECRET_KEY?)".into())
            })?;
        Ok(serde_json::from_slice(&plaintext)?)
    }
}

/// [`SecretStore`] backed by a single JSON file, optionally encrypted.
#[derive(Debug)]
pub struct FileSecretStore {
    path: PathBuf,
    cipher: Option<TokenCipher>,
    lock: Mutex<()>,
}

impl FileSecretStore {
    /// `secret_key` is base64 for 32 bytes, or 32 ASCII characters. Blank means plaintext.
    pub fn open(path: PathBuf, secret_key: Option<&str>) -> Result<Self> {
        let cipher = secret_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(TokenCipher::from_config)
            .transpose()?;
        if cipher.is_none() {
            tracing::debug!(
                "TUNI_SECRET_KEY not set, {} is stored unencrypted",
                path.display()
            );
        }
        Ok(Self {
            path,
            cipher,
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn guard(&self) -> Result<std::sync::MutexGuard<'_, ()>> {
        self.lock
            .lock()
            .map_err(|_| Error::Secret("Token file lock poisoned".into()))
    }

    fn load(&self) -> Result<HashMap<String, String>> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => return Err(e.into()),
        };
        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(HashMap::new());
        }

        match serde_json::from_slice::<TokenFileContents>(&raw)? {
            TokenFileContents::Sealed(sealed) => {
                let cipher = self.cipher.as_ref().ok_or_else(|| {
                    Error::Secret("TUNI_SECRET_KEY must be set to read the encrypted token file".into())
                })?;
                Ok(cipher.open(&sealed)?.secrets)
            }
            TokenFileContents::Plain(table) => Ok(table.secrets),
        }
    }

    fn save(&self, secrets: HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let table = TokenTable {
            version: FORMAT_VERSION,
            secrets,
        };
        let json = match &self.cipher {
            Some(cipher) => serde_json::to_string_pretty(&cipher.seal(&table)?)?,
            None => serde_json::to_string_pretty(&table)?,
        };

        // Staged beside the target (owner-only from creation) and renamed over
        // it; a failed write or rename drops the staging file.
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut staging = NamedTempFile::new_in(dir)?;
        staging.write_all(json.as_bytes())?;
        staging.as_file().sync_all()?;
        staging.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    fn update<F>(&self, op: F) -> Result<()>
    where
        F: FnOnce(&mut HashMap<String, String>),
    {
        let _guard = self.guard()?;
        let mut secrets = self.load()?;
        op(&mut secrets);
        self.save(secrets)
    }
}

impl SecretStore for FileSecretStore {
    fn set_secret(&self, service: &str, secret: &str) -> Result<()> {
        let key = format_service_id(service);
        self.update(|secrets| {
            secrets.insert(key, secret.to_string());
        })
    }

    fn get_secret(&self, service: &str) -> Result<Option<String>> {
        let key = format_service_id(service);
        let _guard = self.guard()?;
        Ok(self.load()?.remove(&key))
    }

    fn delete_secret(&self, service: &str) -> Result<()> {
        let key = format_service_id(service);
        self.update(|secrets| {
            secrets.remove(&key);
        })
    }
}

fn decode_secret_key(raw: &str) -> Result<[u8; KEY_LEN]> {
    // 32 ASCII characters can also be valid base64 (24 bytes), so the
    // decoded length decides which reading applies.
    match BASE64.decode(raw) {
        Ok(bytes) if bytes.len() == KEY_LEN => Ok(to_key(&bytes)),
        _ if raw.len() == KEY_LEN => Ok(to_key(raw.as_bytes())),
        Ok(_) => Err(Error::Secret(
            "TUNI_SECRET_KEY must decode to exactly 32 bytes".into(),
        )),
        Err(_) => Err(Error::Secret(
            "TUNI_SECRET_KEY must be base64 or exactly 32 ASCII characters".into(),
        )),
    }
}

fn to_key(bytes: &[u8]) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    key.copy_from_slice(bytes);
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use tunicoin_core::secrets::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};

    fn key(byte: u8) -> String {
        BASE64.encode([byte; KEY_LEN])
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempdir().unwrap();
        let store = FileSecretStore::open(dir.path().join("none.json"), None).unwrap();
        assert!(store.get_secret(ACCESS_TOKEN_KEY).unwrap().is_none());
    }

    #[test]
    fn plaintext_round_trip() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("nested").join("secrets.json");
        let store = FileSecretStore::open(file.clone(), None).unwrap();

        store.set_secret(ACCESS_TOKEN_KEY, "access-1").unwrap();
        store.set_secret(REFRESH_TOKEN_KEY, "refresh-1").unwrap();
        assert_eq!(
            store.get_secret(ACCESS_TOKEN_KEY).unwrap().as_deref(),
            Some("access-1")
        );

        store.delete_secret(ACCESS_TOKEN_KEY).unwrap();
        assert!(store.get_secret(ACCESS_TOKEN_KEY).unwrap().is_none());
        assert_eq!(
            store.get_secret(REFRESH_TOKEN_KEY).unwrap().as_deref(),
            Some("refresh-1")
        );

        let raw = fs::read_to_string(&file).unwrap();
        assert!(raw.contains("tunicoin_refresh_token"));
    }

    #[test]
    fn encrypted_file_hides_tokens() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("secrets.json");
        let store = FileSecretStore::open(file.clone(), Some(&key(7))).unwrap();

        store.set_secret(ACCESS_TOKEN_KEY, "very-secret-token").unwrap();
        let raw = fs::read_to_string(&file).unwrap();
        assert!(raw.contains("ciphertext"));
        assert!(!raw.contains("very-secret-token"));

        let reopened = FileSecretStore::open(file, Some(&key(7))).unwrap();
        assert_eq!(
            reopened.get_secret(ACCESS_TOKEN_KEY).unwrap().as_deref(),
            Some("very-secret-token")
        );
    }

    #[test]
    fn wrong_key_fails_to_decrypt() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("secrets.json");
        FileSecretStore::open(file.clone(), Some(&key(1)))
            .unwrap()
            .set_secret(ACCESS_TOKEN_KEY, "token")
            .unwrap();

        let other = FileSecretStore::open(file, Some(&key(2))).unwrap();
        let err = other.get_secret(ACCESS_TOKEN_KEY).unwrap_err();
        assert!(err.to_string().contains("decrypt"));
    }

    #[test]
    fn encrypted_file_without_key_is_an_error() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("secrets.json");
        FileSecretStore::open(file.clone(), Some(&key(3)))
            .unwrap()
            .set_secret(ACCESS_TOKEN_KEY, "token")
            .unwrap();

        let plain = FileSecretStore::open(file, None).unwrap();
        let err = plain.get_secret(ACCESS_TOKEN_KEY).unwrap_err();
        assert!(err.to_string().contains("TUNI_SECRET_KEY"));
    }

    #[test]
    fn accepts_ascii_key_and_rejects_short_key() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("secrets.json");
        assert!(FileSecretStore::open(file.clone(), Some("0123456789abcdef0123456789abcdef")).is_ok());
        assert!(FileSecretStore::open(file.clone(), Some("short")).is_err());
        assert!(FileSecretStore::open(file, Some(&BASE64.encode([1u8; 16]))).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn token_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let file = dir.path().join("secrets.json");
        let store = FileSecretStore::open(file.clone(), None).unwrap();
        store.set_secret(ACCESS_TOKEN_KEY, "token").unwrap();

        let mode = fs::metadata(file).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn writes_leave_only_the_token_file_behind() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("secrets.json");
        let store = FileSecretStore::open(file.clone(), None).unwrap();
        store.set_secret(ACCESS_TOKEN_KEY, "first").unwrap();
        store.set_secret(ACCESS_TOKEN_KEY, "second").unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("secrets.json")]);
        assert_eq!(store.get_secret(ACCESS_TOKEN_KEY).unwrap().as_deref(), Some("second"));
    }
}
