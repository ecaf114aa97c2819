//! TOML settings files
//!
//! ```toml
//! [decoder]
//! address_bytes = 3
//! min_address = "0x1000"
//! max_address = 0x200000
//! level = "only-data"
//! commands = "commandsets/is25lp128f.ron"
//! ```
//!
//! Every key is optional. A `max_address` of 0 means no upper bound. A
//! relative `commands` path is resolved against the settings file's
//! directory. The address window is not checked here, so that command-line
//! overrides can still correct it; see [`DecoderConfig::validate`].

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::string::String;

use crate::decoder::{AddressWindow, DecoderConfig, OutputLevel};
use crate::error::Error;
use crate::spi::AddressWidth;

/// Error type for settings files
#[derive(Debug)]
pub enum SettingsError {
    /// I/O error reading the file
    Io(io::Error),
    /// TOML parsing error
    Parse(toml::de::Error),
    /// A value was parsed but is not usable
    Invalid(Error),
}

impl From<io::Error> for SettingsError {
    fn from(e: io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<toml::de::Error> for SettingsError {
    fn from(e: toml::de::Error) -> Self {
        SettingsError::Parse(e)
    }
}

impl From<Error> for SettingsError {
    fn from(e: Error) -> Self {
        SettingsError::Invalid(e)
    }
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "I/O error: {}", e),
            SettingsError::Parse(e) => write!(f, "Parse error: {}", e),
            SettingsError::Invalid(e) => write!(f, "Invalid setting: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
            SettingsError::Invalid(e) => Some(e),
        }
    }
}

/// Settings file structure
#[derive(Debug, Default, serde::Deserialize)]
struct SettingsFile {
    #[serde(default)]
    decoder: DecoderSection,
}

/// `[decoder]` table
#[derive(Debug, Default, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct DecoderSection {
    #[serde(default)]
    address_bytes: Option<u8>,
    #[serde(default, deserialize_with = "deserialize_opt_hex_u32")]
    min_address: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_opt_hex_u32")]
    max_address: Option<u32>,
    #[serde(default)]
    level: Option<String>,
    #[serde(default)]
    commands: Option<PathBuf>,
}

/// Deserialize an optional u32 that can be hex (0x...) or decimal
fn deserialize_opt_hex_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;

    // Try to deserialize as a number first, then as a string
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum HexOrInt {
        Int(u32),
        Str(String),
    }

    match Option::<HexOrInt>::deserialize(deserializer)? {
        None => Ok(None),
        Some(HexOrInt::Int(n)) => Ok(Some(n)),
        Some(HexOrInt::Str(s)) => parse_number(&s).map(Some).map_err(serde::de::Error::custom),
    }
}

/// Parse a number that can be hex (0x...) or decimal
pub fn parse_number(s: &str) -> Result<u32, String> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).map_err(|e| std::format!("invalid hex: {}", e))
    } else {
        s.parse().map_err(|e| std::format!("invalid number: {}", e))
    }
}

/// Decoder settings loaded from a file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Decoder configuration
    pub config: DecoderConfig,
    /// Command-set file to use instead of the built-in set
    pub commands: Option<PathBuf>,
}

impl Settings {
    /// Load settings from a TOML file
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let mut settings = Self::from_toml_str(&content)?;

        if let (Some(commands), Some(dir)) = (&settings.commands, path.parent()) {
            if commands.is_relative() {
                settings.commands = Some(dir.join(commands));
            }
        }
        Ok(settings)
    }

    /// Parse settings from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        let file: SettingsFile = toml::from_str(content)?;
        let section = file.decoder;

        let mut config = DecoderConfig::default();
        if let Some(bytes) = section.address_bytes {
            config.address_width = AddressWidth::try_from(bytes)?;
        }
        config.window = AddressWindow {
            min: section.min_address.unwrap_or(0),
            max: section.max_address.filter(|&max| max != 0),
        };
        if let Some(level) = section.level {
            config.level = level.parse::<OutputLevel>()?;
        }

        Ok(Self {
            config,
            commands: section.commands,
        })
    }
}
