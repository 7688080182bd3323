use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;

use crate::error::ShowcaseError;

const MAX_CONFIG_FILE_SIZE: u64 = 64 * 1024; // 64 KiB

pub const DEFAULT_CONFIG_PATH: &str = "showcase.toml";
const DEFAULT_AUTH_API_URL: &str = "https://api.clerk.com";
const DEFAULT_TABLE: &str = "events";

pub const CLERK_SECRET_KEY: &str = "CLERK_SECRET_KEY";
pub const SUPABASE_ANON_KEY: &str = "SUPABASE_ANON_KEY";
pub const SUPABASE_URL: &str = "SUPABASE_URL";

/// Values shipped in `.env.example`. Treated the same as a missing key.
const PLACEHOLDERS: &[&str] = &[
    "sk_test_your_key_here",
    "your_supabase_anon_key",
    "your_supabase_url",
];

// --- TOML deserialization structs (private, map 1:1 to the file schema) ---

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    auth: AuthSection,
    #[serde(default)]
    store: StoreSection,
    #[serde(default)]
    fetch: FetchSection,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct AuthSection {
    api_url: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct StoreSection {
    url: Option<String>,
    table: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct FetchSection {
    timeout_secs: Option<u64>,
}

// --- Validated configuration ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    auth_api_url: String,
    store_url: Option<String>,
    table: String,
    fetch_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auth_api_url: DEFAULT_AUTH_API_URL.to_owned(),
            store_url: None,
            table: DEFAULT_TABLE.to_owned(),
            fetch_timeout: None,
        }
    }
}

impl FromStr for Config {
    type Err = ShowcaseError;

    /// Parse and validate a config from a TOML string.
    fn from_str(content: &str) -> Result<Self, ShowcaseError> {
        let file: ConfigFile =
            toml::from_str(content).map_err(|e| ShowcaseError::ConfigLoad(e.to_string()))?;

        let auth_api_url = file
            .auth
            .api_url
            .unwrap_or_else(|| DEFAULT_AUTH_API_URL.to_owned());
        check_http_url("auth.api_url", &auth_api_url)?;

        if let Some(url) = &file.store.url {
            check_http_url("store.url", url)?;
        }

        let table = file.store.table.unwrap_or_else(|| DEFAULT_TABLE.to_owned());
        if table.is_empty()
            || !table
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        {
            return Err(ShowcaseError::ConfigLoad(format!(
                "store.table '{table}': only lowercase letters, digits and '_' allowed"
            )));
        }

        let fetch_timeout = match file.fetch.timeout_secs {
            Some(0) => {
                return Err(ShowcaseError::ConfigLoad(
                    "fetch.timeout_secs must be greater than zero".to_owned(),
                ));
            }
            other => other.map(Duration::from_secs),
        };

        Ok(Self {
            auth_api_url,
            store_url: file.store.url,
            table,
            fetch_timeout,
        })
    }
}

impl Config {
    /// Load a config from a TOML file. Reads at most one byte past the limit,
    /// so an oversized file is refused without buffering all of it. Every
    /// error names the file.
    pub fn load(path: &Path) -> Result<Self, ShowcaseError> {
        let at_path =
            |msg: String| ShowcaseError::ConfigLoad(format!("{}: {msg}", path.display()));

        let file = File::open(path).map_err(|e| at_path(format!("cannot open: {e}")))?;
        let mut content = String::new();
        file.take(MAX_CONFIG_FILE_SIZE + 1)
            .read_to_string(&mut content)
            .map_err(|e| at_path(format!("cannot read: {e}")))?;

        if content.len() as u64 > MAX_CONFIG_FILE_SIZE {
            return Err(at_path(format!(
                "larger than the {MAX_CONFIG_FILE_SIZE} byte config limit"
            )));
        }

        content.parse::<Self>().map_err(|e| match e {
            ShowcaseError::ConfigLoad(msg) => at_path(msg),
            other => other,
        })
    }

    /// Like `load`, but a missing file means defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ShowcaseError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn auth_api_url(&self) -> &str {
        &self.auth_api_url
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout
    }

    /// `SUPABASE_URL` from the environment wins over `store.url`.
    pub fn store_url(&self, credentials: &Credentials) -> Result<String, ShowcaseError> {
        credentials
            .supabase_url
            .clone()
            .or_else(|| self.store_url.clone())
            .ok_or_else(|| ShowcaseError::SetupRequired(format!("{SUPABASE_URL} is not set")))
    }
}

fn check_http_url(field: &str, url: &str) -> Result<(), ShowcaseError> {
    if url.starts_with("https://") || url.starts_with("http://") {
        Ok(())
    } else {
        Err(ShowcaseError::ConfigLoad(format!(
            "{field} '{url}': must be an http(s) URL"
        )))
    }
}

/// Collaborator credentials. Only ever read from the environment.
pub struct Credentials {
    pub clerk_secret_key: SecretString,
    pub supabase_anon_key: SecretString,
    pub supabase_url: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("supabase_url", &self.supabase_url)
            .finish_non_exhaustive()
    }
}

impl Credentials {
    pub fn from_env() -> Result<Self, ShowcaseError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve credentials through `lookup`. Missing, blank or placeholder
    /// keys mean setup is not finished.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ShowcaseError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| -> Result<SecretString, ShowcaseError> {
            configured(lookup(name))
                .map(SecretString::from)
                .ok_or_else(|| ShowcaseError::SetupRequired(format!("{name} is not set")))
        };

        let supabase_url = configured(lookup(SUPABASE_URL));
        if let Some(url) = &supabase_url {
            check_http_url(SUPABASE_URL, url)?;
        }

        Ok(Self {
            clerk_secret_key: required(CLERK_SECRET_KEY)?,
            supabase_anon_key: required(SUPABASE_ANON_KEY)?,
            supabase_url,
        })
    }
}

fn configured(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty() && !PLACEHOLDERS.contains(&v.as_str()))
}
