use serde::Deserialize;

const CONFIG_PATH: &str = "config.toml";

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    #[serde(default = "default_auth_file")]
    pub auth_file: String,
    #[serde(default = "default_sleep_between_accounts")]
    pub sleep_between_accounts: u64,
    #[serde(default = "default_sleep_between_runs")]
    pub sleep_between_runs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_auth_file() -> String {
    "auth.txt".to_string()
}

fn default_sleep_between_accounts() -> u64 {
    10
}

fn default_sleep_between_runs() -> u64 {
    8 * 3600
}

fn default_max_retries() -> u32 {
    3
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auth_file: default_auth_file(),
            sleep_between_accounts: default_sleep_between_accounts(),
            sleep_between_runs: default_sleep_between_runs(),
            max_retries: default_max_retries(),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        Self::load_from(CONFIG_PATH)
    }

    fn load_from(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("Invalid config file {path}: {e}, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                log::warn!("Config file {path} not found, using defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = Config::load_from("no-such-config.toml");
        assert_eq!(config.auth_file, "auth.txt");
        assert_eq!(config.sleep_between_accounts, 10);
        assert_eq!(config.sleep_between_runs, 8 * 3600);
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "auth_file = \"accounts.txt\"").unwrap();
        writeln!(file, "max_retries = 5").unwrap();
        file.flush().unwrap();

        let config = Config::load_from(file.path().to_str().unwrap());
        assert_eq!(config.auth_file, "accounts.txt");
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.sleep_between_accounts, 10);
        assert_eq!(config.sleep_between_runs, 8 * 3600);
    }

    #[test]
    fn test_malformed_file_uses_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "auth_file = [not toml").unwrap();
        file.flush().unwrap();

        let config = Config::load_from(file.path().to_str().unwrap());
        assert_eq!(config.auth_file, "auth.txt");
    }
}
