//! Startup configuration: which serial device to open, at what baud rate,
//! and where the element data file lives. Stored as JSON next to the
//! binary; a missing file is replaced with the defaults, which are also
//! written back so the operator has something to edit.

use serde::{Deserialize, Serialize};
use std::{
    borrow::Cow,
    fmt, fs,
    path::{Path, PathBuf},
};

/// Everything the host needs to know before it can start.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Serial device path the Quimikey is plugged into.
    pub serial_port: String,
    /// Baud rate of the serial connection. The firmware ships at 9600.
    pub baudrate: u32,
    /// Path of the element data file.
    pub elements_path: PathBuf,
    /// Whether `listen` should attach to the device immediately at startup.
    pub auto_start_serial: bool,
}

impl Default for Config {
    fn default() -> Self {
        let serial_port = if cfg!(windows) {
            "COM3".to_owned()
        } else {
            "/dev/ttyUSB0".to_owned()
        };

        Config {
            serial_port,
            baudrate: 9600,
            elements_path: PathBuf::from("elements.json"),
            auto_start_serial: true,
        }
    }
}

/// Problems reading or validating the configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The file exists but could not be read, or defaults could not be
    /// written back.
    Io(std::io::Error),
    /// The file is not valid JSON.
    Parse(serde_json::Error),
    /// A value fails validation; the string names the offending field.
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let msg = match self {
            ConfigError::Io(error) => Cow::from(format!("io error: {}", error)),
            ConfigError::Parse(error) => Cow::from(format!("parse error: {}", error)),
            ConfigError::Invalid(what) => Cow::from(format!("invalid configuration: {}", what)),
        };

        write!(f, "{}", msg)
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl Config {
    /// Loads the configuration at `path`. When the file does not exist, the
    /// defaults are written there and returned, matching what the desktop
    /// app has always done.
    pub fn load_or_create(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            let config = Config::default();
            fs::write(path, serde_json::to_string_pretty(&config)?)?;
            return Ok(config);
        }

        let raw = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&raw)?;
        Ok(config)
    }

    /// Checks that the reader could actually start with these values.
    /// Failing validation keeps the reader from starting, but the directory
    /// and query surface work regardless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.serial_port.is_empty() {
            return Err(ConfigError::Invalid("serial_port must not be empty"));
        }
        if self.baudrate == 0 {
            return Err(ConfigError::Invalid("baudrate must be nonzero"));
        }
        if self.elements_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("elements_path must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_writes_defaults_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = Config::load_or_create(&path).unwrap();
        assert_eq!(config, Config::default());

        // The file now exists and round-trips to the same values.
        let reread = Config::load_or_create(&path).unwrap();
        assert_eq!(reread, config);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"serial_port": "/dev/ttyACM0", "baudrate": 115200}"#)
            .unwrap();

        let config = Config::load_or_create(file.path()).unwrap();
        assert_eq!(config.serial_port, "/dev/ttyACM0");
        assert_eq!(config.baudrate, 115200);
        // Unspecified fields keep their defaults.
        assert_eq!(config.elements_path, PathBuf::from("elements.json"));
        assert!(config.auto_start_serial);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{not json").unwrap();
        assert!(matches!(
            Config::load_or_create(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn zero_baudrate_fails_validation() {
        let config = Config {
            baudrate: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn defaults_validate() {
        Config::default().validate().unwrap();
    }
}
