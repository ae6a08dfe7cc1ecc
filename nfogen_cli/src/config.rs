use crate::file_discovery::{DEFAULT_CONTAINER_EXTENSIONS, normalize_extension};
use crate::paths;
use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use nfogen_core::descriptor::{DEFAULT_EXTRA_ELEMENTS, DEFAULT_UNIQUE_ID_TYPE};
use nfogen_core::{DescriptorOptions, HashAlgorithm, IdSource, IdentifierDeriver};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::PathBuf;

/// Default descriptor file extension
pub const DEFAULT_DESCRIPTOR_EXTENSION: &str = "nfo";

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub descriptor: DescriptorConfig,

    #[serde(default)]
    pub identifier: IdentifierConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ScanConfig {
    pub root: PathBuf,
    pub overwrite: bool,
    #[serde(deserialize_with = "deserialize_list")]
    pub containers: Vec<String>,
    #[serde(deserialize_with = "deserialize_list")]
    pub exclude: Vec<String>,
    pub follow_links: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct DescriptorConfig {
    pub extension: String,
    pub emit_empty_elements: bool,
    #[serde(deserialize_with = "deserialize_list")]
    pub extra_elements: Vec<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct IdentifierConfig {
    pub source: IdSource,
    pub algorithm: HashAlgorithm,
    pub unique_id_type: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            overwrite: false,
            containers: DEFAULT_CONTAINER_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            exclude: Vec::new(),
            follow_links: false,
            max_depth: None,
        }
    }
}

impl Default for DescriptorConfig {
    fn default() -> Self {
        Self {
            extension: DEFAULT_DESCRIPTOR_EXTENSION.to_string(),
            emit_empty_elements: true,
            extra_elements: DEFAULT_EXTRA_ELEMENTS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl Default for IdentifierConfig {
    fn default() -> Self {
        Self {
            source: IdSource::default(),
            algorithm: HashAlgorithm::default(),
            unique_id_type: DEFAULT_UNIQUE_ID_TYPE.to_string(),
        }
    }
}

/// Values given on the command line; `None` keeps the configured value
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub root: Option<PathBuf>,
    pub overwrite: bool,
    pub emit_empty_elements: Option<bool>,
    pub extra_elements: Vec<String>,
    pub source: Option<IdSource>,
    pub algorithm: Option<HashAlgorithm>,
    pub unique_id_type: Option<String>,
    pub containers: Vec<String>,
    pub descriptor_extension: Option<String>,
    pub exclude: Vec<String>,
    pub follow_links: bool,
    pub max_depth: Option<usize>,
}

impl AppConfig {
    /// Apply CLI argument overrides to the configuration
    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(root) = overrides.root {
            self.scan.root = root;
        }
        if overrides.overwrite {
            self.scan.overwrite = true;
        }
        if !overrides.containers.is_empty() {
            self.scan.containers = overrides.containers;
        }
        self.scan.exclude.extend(overrides.exclude);
        if overrides.follow_links {
            self.scan.follow_links = true;
        }
        if overrides.max_depth.is_some() {
            self.scan.max_depth = overrides.max_depth;
        }

        if let Some(emit) = overrides.emit_empty_elements {
            self.descriptor.emit_empty_elements = emit;
        }
        if !overrides.extra_elements.is_empty() {
            self.descriptor.extra_elements = overrides.extra_elements;
        }
        if let Some(extension) = overrides.descriptor_extension {
            self.descriptor.extension = extension;
        }

        if let Some(source) = overrides.source {
            self.identifier.source = source;
        }
        if let Some(algorithm) = overrides.algorithm {
            self.identifier.algorithm = algorithm;
        }
        if let Some(label) = overrides.unique_id_type {
            self.identifier.unique_id_type = label;
        }
    }

    /// Check the resolved configuration before a run starts
    pub fn validate(&self) -> Result<()> {
        let extension = normalize_extension(&self.descriptor.extension);
        if extension.is_empty() || extension.contains(['/', '\\']) {
            anyhow::bail!(
                "descriptor.extension must be a plain file extension, got '{}'",
                self.descriptor.extension
            );
        }

        if self.scan.containers.iter().all(|c| normalize_extension(c).is_empty()) {
            anyhow::bail!("scan.containers must name at least one extension");
        }

        if self.identifier.unique_id_type.trim().is_empty() {
            anyhow::bail!("identifier.unique_id_type must not be empty");
        }

        for name in &self.descriptor.extra_elements {
            if !is_element_name(name) {
                anyhow::bail!("descriptor.extra_elements contains an invalid element name: '{name}'");
            }
        }

        Ok(())
    }

    /// Descriptor emission options for the core builder
    pub fn descriptor_options(&self) -> DescriptorOptions {
        DescriptorOptions {
            unique_id_type: self.identifier.unique_id_type.clone(),
            emit_empty_elements: self.descriptor.emit_empty_elements,
            extra_elements: self.descriptor.extra_elements.clone(),
        }
    }

    /// Identifier deriver for the configured policy
    pub fn identifier_deriver(&self) -> IdentifierDeriver {
        IdentifierDeriver::new(self.identifier.source, self.identifier.algorithm)
    }
}

fn is_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        }
        _ => false,
    }
}

/// Keys accepted by `config set`
const CONFIG_KEYS: &[&str] = &[
    "scan.root",
    "scan.overwrite",
    "scan.containers",
    "scan.exclude",
    "scan.follow_links",
    "scan.max_depth",
    "descriptor.extension",
    "descriptor.emit_empty_elements",
    "descriptor.extra_elements",
    "identifier.source",
    "identifier.algorithm",
    "identifier.unique_id_type",
];

/// Keys holding comma-separated lists
const LIST_KEYS: &[&str] = &[
    "scan.containers",
    "scan.exclude",
    "descriptor.extra_elements",
];

/// Configuration manager that handles XDG-compliant paths and layered configuration
pub struct ConfigManager {
    config_path: PathBuf,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    /// Create a new ConfigManager with the default configuration path
    pub fn new() -> Self {
        Self {
            config_path: paths::get_config_path(),
        }
    }

    /// Create a ConfigManager with a specific path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn get_config_path(&self) -> PathBuf {
        self.config_path.clone()
    }

    /// Load configuration with layered priority: ENV > File > Defaults
    ///
    /// CLI overrides are applied on top by the caller.
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new();

        // Layer 1: Defaults
        figment = figment.merge(Serialized::defaults(AppConfig::default()));

        // Layer 2: Config file (if exists)
        if self.config_path.exists() {
            figment = figment.merge(Toml::file(&self.config_path));
        }

        // Layer 3: Environment variables
        figment = figment.merge(Env::prefixed("NFOGEN_").split("__"));

        figment.extract().context("Failed to load configuration")
    }

    /// Get a configuration value by key (dot notation)
    pub fn get(&self, key: &str) -> Result<String> {
        let value = self.resolved_value()?;

        let mut current = &value;
        for part in key.split('.') {
            match current {
                toml::Value::Table(table) => {
                    current = table
                        .get(part)
                        .ok_or_else(|| anyhow::anyhow!("Key '{}' not found", key))?;
                }
                _ => anyhow::bail!("Invalid key path: {}", key),
            }
        }

        display_value(current)
            .ok_or_else(|| anyhow::anyhow!("Value at '{}' is not a simple type", key))
    }

    /// Set a configuration value by key (dot notation)
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.validate_config_value(key, value)?;

        // Load existing config or create new
        let mut config = if self.config_path.exists() {
            let content = fs::read_to_string(&self.config_path)?;
            toml::from_str::<toml::Table>(&content)?
        } else {
            toml::Table::new()
        };

        let (section, field) = key
            .split_once('.')
            .ok_or_else(|| anyhow::anyhow!("Invalid key path: {}", key))?;

        let section_table = config
            .entry(section.to_string())
            .or_insert_with(|| toml::Value::Table(toml::Table::new()));
        let toml::Value::Table(section_table) = section_table else {
            anyhow::bail!("Invalid key path: expected table at '{}'", section);
        };
        section_table.insert(field.to_string(), self.parse_config_value(key, value)?);

        // Ensure directory exists
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(&config)?;
        fs::write(&self.config_path, toml_string)?;

        Ok(())
    }

    /// List all configuration values
    pub fn list(&self) -> Result<Vec<(String, String)>> {
        let value = self.resolved_value()?;

        let mut items = Vec::new();
        Self::collect_values(&value, String::new(), &mut items);
        items.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(items)
    }

    /// Resolved configuration as a TOML value tree
    fn resolved_value(&self) -> Result<toml::Value> {
        let config = self.load()?;
        let toml_string = toml::to_string(&config)?;
        let table: toml::Table = toml::from_str(&toml_string)?;
        Ok(toml::Value::Table(table))
    }

    /// Recursively collect all key-value pairs from TOML
    fn collect_values(value: &toml::Value, prefix: String, items: &mut Vec<(String, String)>) {
        if let toml::Value::Table(table) = value {
            for (key, val) in table {
                let new_prefix = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                Self::collect_values(val, new_prefix, items);
            }
        } else if let Some(display) = display_value(value) {
            items.push((prefix, display));
        }
    }

    /// Validate a configuration value
    fn validate_config_value(&self, key: &str, value: &str) -> Result<()> {
        if !CONFIG_KEYS.contains(&key) {
            anyhow::bail!(
                "Unknown configuration key: {} (known keys: {})",
                key,
                CONFIG_KEYS.join(", ")
            );
        }

        match key {
            "scan.overwrite" | "scan.follow_links" | "descriptor.emit_empty_elements" => {
                let _: bool = value.parse().context("Value must be 'true' or 'false'")?;
            }
            "scan.max_depth" => {
                let _: usize = value
                    .parse()
                    .context("max_depth must be a non-negative integer")?;
            }
            "identifier.source" => {
                value.parse::<IdSource>()?;
            }
            "identifier.algorithm" => {
                value.parse::<HashAlgorithm>()?;
            }
            "descriptor.extension" | "identifier.unique_id_type" => {
                if value.trim().is_empty() {
                    anyhow::bail!("{} must not be empty", key);
                }
            }
            "descriptor.extra_elements" => {
                for name in split_list(value) {
                    if !is_element_name(&name) {
                        anyhow::bail!("Invalid element name: '{}'", name);
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Parse a value to the appropriate TOML type
    fn parse_config_value(&self, key: &str, value: &str) -> Result<toml::Value> {
        match key {
            k if LIST_KEYS.contains(&k) => Ok(toml::Value::Array(
                split_list(value)
                    .into_iter()
                    .map(toml::Value::String)
                    .collect(),
            )),
            "scan.overwrite" | "scan.follow_links" | "descriptor.emit_empty_elements" => {
                let bool_val: bool = value
                    .parse()
                    .context("Expected boolean value (true/false)")?;
                Ok(toml::Value::Boolean(bool_val))
            }
            "scan.max_depth" => {
                let num: i64 = value.parse().context("Expected integer value")?;
                Ok(toml::Value::Integer(num))
            }
            "identifier.source" => Ok(toml::Value::String(
                value.parse::<IdSource>()?.to_string(),
            )),
            "identifier.algorithm" => Ok(toml::Value::String(
                value.parse::<HashAlgorithm>()?.to_string(),
            )),
            _ => Ok(toml::Value::String(value.to_string())),
        }
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Accept a list either as an array or as one comma-separated string
///
/// Environment variables such as `NFOGEN_SCAN__CONTAINERS=mkv,mp4` reach
/// the config as plain strings.
fn deserialize_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ListOrString {
        List(Vec<String>),
        String(String),
    }

    Ok(match ListOrString::deserialize(deserializer)? {
        ListOrString::List(items) => items,
        ListOrString::String(value) => split_list(&value),
    })
}

fn display_value(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        toml::Value::Array(items) => Some(
            items
                .iter()
                .filter_map(display_value)
                .collect::<Vec<_>>()
                .join(","),
        ),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_behaviour() {
        let config = AppConfig::default();

        assert_eq!(config.scan.root, PathBuf::from("."));
        assert!(!config.scan.overwrite);
        assert!(config.scan.containers.contains(&"mkv".to_string()));
        assert!(config.descriptor.emit_empty_elements);
        assert_eq!(config.descriptor.extension, "nfo");
        assert_eq!(
            config.descriptor.extra_elements,
            vec!["plot", "credits", "aired", "userrating"]
        );
        assert_eq!(config.identifier.source, IdSource::Path);
        assert_eq!(config.identifier.algorithm, HashAlgorithm::MD5);
        assert_eq!(config.identifier.unique_id_type, "hashpath");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_list_keys_accept_comma_separated_strings() {
        let config: AppConfig = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::string(
                "[scan]\ncontainers = \"mkv, mp4\"\nexclude = [\"**/Extras/**\"]\n\n[descriptor]\nextra_elements = \"plot\"\n",
            ))
            .extract()
            .unwrap();

        assert_eq!(config.scan.containers, vec!["mkv", "mp4"]);
        assert_eq!(config.scan.exclude, vec!["**/Extras/**"]);
        assert_eq!(config.descriptor.extra_elements, vec!["plot"]);
    }

    #[test]
    fn test_cli_overrides_replace_configured_values() {
        let mut config = AppConfig::default();
        config.apply_cli_overrides(CliOverrides {
            root: Some(PathBuf::from("/media/tv")),
            overwrite: true,
            emit_empty_elements: Some(false),
            extra_elements: vec!["rating".to_string()],
            source: Some(IdSource::Filename),
            algorithm: Some(HashAlgorithm::SHA1),
            unique_id_type: Some("sha1name".to_string()),
            containers: vec!["mkv".to_string()],
            descriptor_extension: Some("xml".to_string()),
            exclude: vec!["**/Extras/**".to_string()],
            follow_links: true,
            max_depth: Some(2),
        });

        assert_eq!(config.scan.root, PathBuf::from("/media/tv"));
        assert!(config.scan.overwrite);
        assert_eq!(config.scan.containers, vec!["mkv"]);
        assert_eq!(config.scan.exclude, vec!["**/Extras/**"]);
        assert!(config.scan.follow_links);
        assert_eq!(config.scan.max_depth, Some(2));
        assert!(!config.descriptor.emit_empty_elements);
        assert_eq!(config.descriptor.extra_elements, vec!["rating"]);
        assert_eq!(config.descriptor.extension, "xml");
        assert_eq!(config.identifier.source, IdSource::Filename);
        assert_eq!(config.identifier.algorithm, HashAlgorithm::SHA1);
        assert_eq!(config.identifier.unique_id_type, "sha1name");
    }

    #[test]
    fn test_empty_overrides_keep_configuration() {
        let mut config = AppConfig::default();
        config.apply_cli_overrides(CliOverrides::default());
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.descriptor.extension = ".".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.descriptor.extra_elements = vec!["1bad".to_string()];
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.scan.containers = vec![String::new()];
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.identifier.unique_id_type = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_descriptor_options_follow_config() {
        let mut config = AppConfig::default();
        config.descriptor.emit_empty_elements = false;
        config.identifier.unique_id_type = "custom".to_string();

        let options = config.descriptor_options();
        assert!(!options.emit_empty_elements);
        assert_eq!(options.unique_id_type, "custom");
        assert_eq!(options.extra_elements, config.descriptor.extra_elements);
    }

    #[test]
    fn test_element_names() {
        assert!(is_element_name("plot"));
        assert!(is_element_name("user_rating-2"));
        assert!(!is_element_name(""));
        assert!(!is_element_name("has space"));
        assert!(!is_element_name("<tag>"));
    }

    #[test]
    fn test_split_list_trims_entries() {
        assert_eq!(split_list(" mkv, mp4 ,,avi"), vec!["mkv", "mp4", "avi"]);
    }
}
