//! Configuration management for refgen.
//!
//! Parses `refgen.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `docs.spec_dir`, `docs.sections`, `docs.typespec`
//! - `docs.markdown_dir`, `docs.output_dir`
//! - `libraries.versions.spec`

mod expand;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override spec directory.
    pub spec_dir: Option<PathBuf>,
    /// Override build output directory.
    pub output_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "refgen.toml";

/// Default common sections file, relative to the spec directory.
const DEFAULT_SECTIONS: &str = "common-client-libs-sections.json";

/// Default type-spec artifact, relative to the spec directory.
const DEFAULT_TYPESPEC: &str = "enrichments/tsdoc_v2/combined.json";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input and output locations (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Documented client libraries.
    pub libraries: Vec<LibraryConfig>,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    spec_dir: Option<String>,
    sections: Option<String>,
    typespec: Option<String>,
    markdown_dir: Option<String>,
    output_dir: Option<String>,
}

/// Resolved input and output locations.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Directory holding library specs and shared inputs.
    pub spec_dir: PathBuf,
    /// Common sections file, relative to `spec_dir`.
    pub sections: PathBuf,
    /// Type-spec artifact, relative to `spec_dir`.
    pub typespec: PathBuf,
    /// Root of per-library markdown.
    pub markdown_dir: PathBuf,
    /// Build output directory.
    pub output_dir: PathBuf,
}

impl DocsConfig {
    /// Absolute path of the common sections file.
    #[must_use]
    pub fn sections_file(&self) -> PathBuf {
        self.spec_dir.join(&self.sections)
    }

    /// Absolute path of the type-spec artifact.
    #[must_use]
    pub fn typespec_file(&self) -> PathBuf {
        self.spec_dir.join(&self.typespec)
    }
}

/// One documented client library.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LibraryConfig {
    /// Library id, used in URLs (e.g. "javascript").
    pub id: String,
    /// Versions, latest first.
    #[serde(default)]
    pub versions: Vec<VersionConfig>,
}

/// One version of a client library.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct VersionConfig {
    /// Version name (e.g. "v2").
    pub version: String,
    /// Spec file, relative to the spec directory.
    pub spec: String,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`docs.spec_dir`").
        field: String,
        /// Error message (e.g., "${`SPEC_DIR`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `refgen.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails
    /// or the configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(spec_dir) = &settings.spec_dir {
            self.docs_resolved.spec_dir.clone_from(spec_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.docs_resolved.output_dir.clone_from(output_dir);
        }
    }

    /// Find a library by id.
    #[must_use]
    pub fn library(&self, id: &str) -> Option<&LibraryConfig> {
        self.libraries.iter().find(|l| l.id == id)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        let mut config = Self {
            docs: DocsConfigRaw::default(),
            libraries: Vec::new(),
            docs_resolved: DocsConfig::default(),
            config_path: None,
        };
        config.resolve_paths(base);
        config
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Library ids must be non-empty and unique, every library needs at least
    /// one version and version names must be unique per library. Called
    /// automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut ids = HashSet::new();
        for library in &self.libraries {
            require_non_empty(&library.id, "libraries.id")?;
            if !ids.insert(library.id.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate library id: {}",
                    library.id
                )));
            }
            Self::validate_versions(library)?;
        }
        Ok(())
    }

    fn validate_versions(library: &LibraryConfig) -> Result<(), ConfigError> {
        if library.versions.is_empty() {
            return Err(ConfigError::Validation(format!(
                "library {} has no versions",
                library.id
            )));
        }

        let mut versions = HashSet::new();
        for version in &library.versions {
            require_non_empty(&version.version, "libraries.versions.version")?;
            require_non_empty(&version.spec, "libraries.versions.spec")?;
            if !versions.insert(version.version.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate version {} of library {}",
                    version.version, library.id
                )));
            }
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        expand::expand_opt(&mut self.docs.spec_dir, "docs.spec_dir")?;
        expand::expand_opt(&mut self.docs.sections, "docs.sections")?;
        expand::expand_opt(&mut self.docs.typespec, "docs.typespec")?;
        expand::expand_opt(&mut self.docs.markdown_dir, "docs.markdown_dir")?;
        expand::expand_opt(&mut self.docs.output_dir, "docs.output_dir")?;

        for library in &mut self.libraries {
            for version in &mut library.versions {
                version.spec = expand::expand_env(&version.spec, "libraries.versions.spec")?;
            }
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.docs_resolved = DocsConfig {
            spec_dir: resolve(self.docs.spec_dir.as_deref(), "spec"),
            sections: PathBuf::from(self.docs.sections.as_deref().unwrap_or(DEFAULT_SECTIONS)),
            typespec: PathBuf::from(self.docs.typespec.as_deref().unwrap_or(DEFAULT_TYPESPEC)),
            markdown_dir: resolve(self.docs.markdown_dir.as_deref(), "docs/ref"),
            output_dir: resolve(self.docs.output_dir.as_deref(), ".refgen/build"),
        };
    }
}
