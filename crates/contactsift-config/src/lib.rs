use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use contactsift_core::{
    default_phone_keywords, default_scan_strategies, default_strategies, parse_strategy_list,
    CoreError, NanpTrunkPolicy, StrategyName,
};
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "contactsift";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_SCAN_MIN_DIGITS: usize = 7;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub nanp_trunk: NanpTrunkPolicy,
    pub extract: ExtractConfig,
    pub dataset: DatasetConfig,
    pub recognizer: Option<RecognizerConfig>,
}

#[derive(Debug, Clone)]
pub struct ExtractConfig {
    pub strategies: Vec<StrategyName>,
    pub scan_strategies: Vec<StrategyName>,
    pub scan_min_digits: usize,
}

#[derive(Debug, Clone)]
pub struct DatasetConfig {
    pub phone_keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognizerConfig {
    pub command: String,
    pub args: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            nanp_trunk: NanpTrunkPolicy::default(),
            extract: ExtractConfig {
                strategies: default_strategies(),
                scan_strategies: default_scan_strategies(),
                scan_min_digits: DEFAULT_SCAN_MIN_DIGITS,
            },
            dataset: DatasetConfig {
                phone_keywords: default_phone_keywords(),
            },
            recognizer: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("invalid {field}: {source}")]
    InvalidStrategies {
        field: &'static str,
        #[source]
        source: CoreError,
    },
    #[error("invalid scan_min_digits value: {0}")]
    InvalidScanMinDigits(usize),
    #[error("invalid phone keyword: {0:?}")]
    InvalidPhoneKeyword(String),
    #[error("phone_keywords cannot be empty")]
    EmptyPhoneKeywords,
    #[error("recognizer command cannot be empty")]
    EmptyRecognizerCommand,
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    normalize: Option<NormalizeFile>,
    extract: Option<ExtractFile>,
    dataset: Option<DatasetFile>,
    recognizer: Option<RecognizerFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct NormalizeFile {
    nanp_trunk: Option<NanpTrunkPolicy>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ExtractFile {
    strategies: Option<Vec<String>>,
    scan_strategies: Option<Vec<String>>,
    scan_min_digits: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct DatasetFile {
    phone_keywords: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RecognizerFile {
    command: String,
    #[serde(default)]
    args: Vec<String>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path.clone()) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    ensure_permissions(path)?;
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(policy) = parsed.normalize.and_then(|normalize| normalize.nanp_trunk) {
        config.nanp_trunk = policy;
    }

    if let Some(extract) = parsed.extract {
        if let Some(names) = extract.strategies {
            config.extract.strategies = parse_strategies("extract.strategies", &names)?;
        }
        if let Some(names) = extract.scan_strategies {
            config.extract.scan_strategies = parse_strategies("extract.scan_strategies", &names)?;
        }
        if let Some(min_digits) = extract.scan_min_digits {
            if min_digits == 0 {
                return Err(ConfigError::InvalidScanMinDigits(min_digits));
            }
            config.extract.scan_min_digits = min_digits;
        }
    }

    if let Some(keywords) = parsed.dataset.and_then(|dataset| dataset.phone_keywords) {
        config.dataset.phone_keywords = parse_keywords(keywords)?;
    }

    if let Some(recognizer) = parsed.recognizer {
        let command = recognizer.command.trim();
        if command.is_empty() {
            return Err(ConfigError::EmptyRecognizerCommand);
        }
        config.recognizer = Some(RecognizerConfig {
            command: command.to_string(),
            args: recognizer.args,
        });
    }

    Ok(config)
}

fn parse_strategies(field: &'static str, names: &[String]) -> Result<Vec<StrategyName>> {
    parse_strategy_list(names).map_err(|source| ConfigError::InvalidStrategies { field, source })
}

fn parse_keywords(raw: Vec<String>) -> Result<Vec<String>> {
    let mut keywords: Vec<String> = Vec::new();
    for keyword in raw {
        let normalized = keyword.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(ConfigError::InvalidPhoneKeyword(keyword));
        }
        if !keywords.contains(&normalized) {
            keywords.push(normalized);
        }
    }
    if keywords.is_empty() {
        return Err(ConfigError::EmptyPhoneKeywords);
    }
    Ok(keywords)
}

#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mode = metadata.permissions().mode();
    if mode & 0o077 != 0 {
        return Err(ConfigError::InsecurePermissions(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
