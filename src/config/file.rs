//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::EngineConfig;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".readiness-engine.yaml",
    ".readiness-engine.yml",
    "readiness-engine.yaml",
    "readiness-engine.yml",
];

/// Directory name under the user config directory.
const CONFIG_DIR_NAME: &str = "readiness-engine";

/// Directories searched for a config file, in priority order.
///
/// 1. Current directory
/// 2. User config directory (~/.config/readiness-engine/)
/// 3. Home directory
#[must_use]
pub fn config_search_dirs() -> Vec<PathBuf> {
    [
        std::env::current_dir().ok(),
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME)),
        dirs::home_dir(),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Discover a config file by searching standard locations.
///
/// An explicit path wins when it exists; otherwise each directory from
/// [`config_search_dirs`] is tried in turn.
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path
        && path.exists()
    {
        return Some(path.to_path_buf());
    }

    config_search_dirs()
        .iter()
        .find_map(|dir| find_config_in_dir(dir))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigFileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err)
    }
}

/// Load an `EngineConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<EngineConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    // An empty file is a valid "all defaults" config.
    if content.trim().is_empty() {
        return Ok(EngineConfig::default());
    }
    let config: EngineConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (EngineConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (EngineConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (EngineConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl EngineConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Only values that differ from the defaults override, so a partially
    /// filled `other` (typically built from CLI flags) leaves the rest of
    /// `self` alone.
    pub fn merge(&mut self, other: &Self) {
        let defaults = Self::default();

        if other.blending.blend_factor != defaults.blending.blend_factor {
            self.blending.blend_factor = other.blending.blend_factor;
        }
        if other.blending.strategy != defaults.blending.strategy {
            self.blending.strategy = other.blending.strategy;
        }
        if other.blending.max_deviation != defaults.blending.max_deviation {
            self.blending.max_deviation = other.blending.max_deviation;
        }

        if other.normalization != defaults.normalization {
            self.normalization = other.normalization.clone();
        }
        if other.softmax != defaults.softmax {
            self.softmax = other.softmax.clone();
        }

        if other.learning.enabled {
            self.learning.enabled = true;
        }
        if other.learning.alpha != defaults.learning.alpha {
            self.learning.alpha = other.learning.alpha;
        }
        if other.learning.gamma != defaults.learning.gamma {
            self.learning.gamma = other.learning.gamma;
        }
        if other.learning.iterations != defaults.learning.iterations {
            self.learning.iterations = other.learning.iterations;
        }
        if other.learning.synthetic_seed != defaults.learning.synthetic_seed {
            self.learning.synthetic_seed = other.learning.synthetic_seed;
        }

        if other.answers != defaults.answers {
            self.answers = other.answers.clone();
        }
        if other.report != defaults.report {
            self.report = other.report.clone();
        }
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content.
#[must_use]
pub fn generate_example_config() -> String {
    let example = EngineConfig::default();
    format!(
        r"# Readiness Engine Configuration
# Place this file at .readiness-engine.yaml in your project root or ~/.config/readiness-engine/

{}",
        serde_yaml::to_string(&example).unwrap_or_default()
    )
}

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# Readiness Engine Configuration File
# ===================================
#
# Place it at:
#   - .readiness-engine.yaml in your project root
#   - ~/.config/readiness-engine/readiness-engine.yaml for global config
#
# CLI arguments always override file settings.

# Blending of user weights with softmax weights
blending:
  # Share of the softmax weight (0.0 = user weights only, 1.0 = softmax only)
  blend_factor: 0.3
  # Strategy: linear, clamped
  strategy: linear
  # Clamped only: maximum distance from the user weight, in points
  max_deviation: 2.0

# Rounding residual after normalization to 100
normalization:
  # Target: first-key, last-key, largest
  residual_target: first-key

# Softmax over Q-values
softmax:
  # Sharpness; 0 gives a uniform distribution
  eta: 1.0

# Q-values
learning:
  # Refine category Q-values from user weights and scores
  enabled: false
  alpha: 0.1
  gamma: 0.9
  iterations: 10
  # Seed for synthetic Q-values used when none are supplied
  synthetic_seed: 42

# Questionnaire answer scale
answers:
  min: 1
  max: 4

# Report shaping
report:
  # Number of gaps listed in summaries
  top_gaps: 5
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weights::{BlendStrategy, ResidualTarget};
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".readiness-engine.yaml");
        std::fs::write(&config_path, "blending:\n  blend_factor: 0.5\n").unwrap();

        let found = find_config_in_dir(tmp.path());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");

        let yaml = r"
blending:
  blend_factor: 0.5
  strategy: clamped
normalization:
  residual_target: last-key
learning:
  enabled: true
";
        std::fs::write(&config_path, yaml).unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.blending.blend_factor, 0.5);
        assert_eq!(config.blending.strategy, BlendStrategy::Clamped);
        assert_eq!(config.normalization.residual_target, ResidualTarget::LastKey);
        assert!(config.learning.enabled);
    }

    #[test]
    fn test_load_empty_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("empty.yaml");
        std::fs::write(&config_path, "\n").unwrap();
        assert_eq!(load_config_file(&config_path).unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_load_config_file_invalid_yaml() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("bad.yaml");
        std::fs::write(&config_path, "blending:\n  strategy: [nope\n").unwrap();
        assert!(matches!(
            load_config_file(&config_path),
            Err(ConfigFileError::Parse(_))
        ));
    }

    #[test]
    fn test_config_merge() {
        let mut base = EngineConfig::builder().blend_factor(0.2).learning(true).build();
        let overrides = EngineConfig::builder()
            .blend_strategy(BlendStrategy::Clamped)
            .build();

        base.merge(&overrides);

        assert_eq!(base.blending.blend_factor, 0.2);
        assert_eq!(base.blending.strategy, BlendStrategy::Clamped);
        assert!(base.learning.enabled);
    }

    #[test]
    fn test_generate_example_config_parses() {
        let example = generate_example_config();
        assert!(example.contains("blending:"));
        let parsed: EngineConfig = serde_yaml::from_str(&example).unwrap();
        assert_eq!(parsed, EngineConfig::default());

        let full: EngineConfig = serde_yaml::from_str(&generate_full_example_config()).unwrap();
        assert_eq!(full, EngineConfig::default());
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom-config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "softmax:\n  eta: 2.0").unwrap();

        let discovered = discover_config_file(Some(&config_path));
        assert_eq!(discovered, Some(config_path));
    }
}
