use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

pub const DEFAULT_DATA_FILE: &str = "resources/job_data.csv";
pub const DATA_FILE_VAR: &str = "JOB_DATA_FILE";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
        }
    }
}

impl Config {
    /// Reads `JOB_DATA_FILE`, falling back to the default location.
    pub fn from_env() -> Config {
        Config::from_data_file_var(env::var_os(DATA_FILE_VAR))
    }

    fn from_data_file_var(value: Option<OsString>) -> Config {
        match value {
            Some(v) if !v.is_empty() => Config {
                data_file: PathBuf::from(v),
            },
            _ => Config::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_data_file() {
        assert_eq!(
            Config::from_data_file_var(None).data_file,
            PathBuf::from("resources/job_data.csv")
        );
    }

    #[test]
    fn test_data_file_override() {
        let config = Config::from_data_file_var(Some(OsString::from("/tmp/jobs.csv")));
        assert_eq!(config.data_file, PathBuf::from("/tmp/jobs.csv"));
    }

    #[test]
    fn test_empty_override_is_ignored() {
        assert_eq!(Config::from_data_file_var(Some(OsString::new())), Config::default());
    }
}
