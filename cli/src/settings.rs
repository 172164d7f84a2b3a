use std::path::PathBuf;

use anyhow::{bail, Context};
use serde::Deserialize;

const DEFAULT_CONFIG_FILE: &str = "bookshelf.toml";
const ENV_PREFIX: &str = "BOOKSHELF";
const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";
const DEFAULT_PAGE_SIZE: u32 = 10;
const MAX_PAGE_SIZE: u32 = 100;

/// Values given on the command line; they win over every other source.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config_path: Option<PathBuf>,
    pub api_url: Option<String>,
    pub page_size: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub page_size: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Settings {
    /// Layer defaults, the config file, `BOOKSHELF_*` variables (including
    /// ones from `.env`) and finally `overrides`.
    pub fn load(overrides: &Overrides) -> anyhow::Result<Self> {
        // A missing `.env` is fine.
        let _ = dotenvy::dotenv();

        let file = match &overrides.config_path {
            Some(path) => config::File::from(path.clone()).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let cfg = config::Config::builder()
            .set_default("api_url", DEFAULT_API_URL)?
            .set_default("page_size", i64::from(DEFAULT_PAGE_SIZE))?
            .add_source(file)
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .set_override_option("api_url", overrides.api_url.clone())?
            .set_override_option("page_size", overrides.page_size.map(i64::from))?
            .build()
            .context("failed to build configuration")?;

        let settings: Settings = cfg
            .try_deserialize()
            .context("failed to deserialize configuration")?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_url.trim().is_empty() {
            bail!("api_url must not be empty");
        }
        if !(1..=MAX_PAGE_SIZE).contains(&self.page_size) {
            bail!("page_size must be between 1 and {MAX_PAGE_SIZE}, got {}", self.page_size);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::{Mutex, MutexGuard};
    use tempfile::TempDir;

    // `load` reads the process environment, which tests share.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_guard() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_config(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("bookshelf.toml");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn defaults_are_valid() {
        let settings = Settings::default();
        assert_eq!(settings.api_url, "http://localhost:8000/api/v1");
        assert_eq!(settings.page_size, 10);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn file_values_are_read() {
        let _guard = env_guard();
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "api_url = \"http://books.test/api\"\npage_size = 25\n");
        let settings = Settings::load(&Overrides {
            config_path: Some(path),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(settings.api_url, "http://books.test/api");
        assert_eq!(settings.page_size, 25);
    }

    #[test]
    fn flags_beat_the_file() {
        let _guard = env_guard();
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "api_url = \"http://books.test/api\"\npage_size = 25\n");
        let settings = Settings::load(&Overrides {
            config_path: Some(path),
            api_url: Some("http://other.test".to_string()),
            page_size: Some(5),
        })
        .unwrap();
        assert_eq!(settings.api_url, "http://other.test");
        assert_eq!(settings.page_size, 5);
    }

    #[test]
    fn page_size_is_bounded() {
        let _guard = env_guard();
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "page_size = 0\n");
        let err = Settings::load(&Overrides {
            config_path: Some(path.clone()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(err.to_string().contains("page_size must be between 1 and 100"));

        let err = Settings::load(&Overrides {
            config_path: Some(path),
            page_size: Some(101),
            ..Default::default()
        })
        .unwrap_err();
        assert!(err.to_string().contains("got 101"));
    }

    #[test]
    fn explicit_config_must_exist() {
        let _guard = env_guard();
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(Settings::load(&Overrides {
            config_path: Some(missing),
            ..Default::default()
        })
        .is_err());
    }

    #[test]
    fn environment_beats_file_and_flags_beat_environment() {
        let _guard = env_guard();
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "api_url = \"http://file.test\"\npage_size = 25\n");

        std::env::set_var("BOOKSHELF_API_URL", "http://env.test");
        std::env::set_var("BOOKSHELF_PAGE_SIZE", "40");
        let from_env = Settings::load(&Overrides {
            config_path: Some(path.clone()),
            ..Default::default()
        });
        let from_flags = Settings::load(&Overrides {
            config_path: Some(path),
            api_url: Some("http://flag.test".to_string()),
            page_size: Some(5),
        });
        std::env::remove_var("BOOKSHELF_API_URL");
        std::env::remove_var("BOOKSHELF_PAGE_SIZE");

        let from_env = from_env.unwrap();
        assert_eq!(from_env.api_url, "http://env.test");
        assert_eq!(from_env.page_size, 40);

        let from_flags = from_flags.unwrap();
        assert_eq!(from_flags.api_url, "http://flag.test");
        assert_eq!(from_flags.page_size, 5);
    }

    #[test]
    fn environment_page_size_is_validated() {
        let _guard = env_guard();
        std::env::set_var("BOOKSHELF_PAGE_SIZE", "250");
        let result = Settings::load(&Overrides::default());
        std::env::remove_var("BOOKSHELF_PAGE_SIZE");

        let err = result.unwrap_err();
        assert!(err.to_string().contains("got 250"));
    }
}
