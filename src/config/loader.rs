//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading resolution
//! rules and the report palette from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::render::Palette;

use super::types::{EngineConfig, PaletteFile, PolicyFile, ResolutionPolicy};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── policy.yaml   # Resolution preset and rule overrides
/// └── palette.yaml  # Status literal / prefix colors
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("General shift late after {}", loader.policy().general_late_after);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if either file is missing, is not valid YAML, or
    /// holds an invalid clock time or color.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let policy_path = path.join("policy.yaml");
        let policy = Self::load_yaml::<PolicyFile>(&policy_path)?.into_policy();

        let palette_path = path.join("palette.yaml");
        let palette_file = Self::load_yaml::<PaletteFile>(&palette_path)?;
        let palette = Palette::from_hex(&palette_file.exact, &palette_file.prefixes).map_err(
            |message| EngineError::ConfigParseError {
                path: palette_path.display().to_string(),
                message,
            },
        )?;

        debug!(
            config_dir = %path.display(),
            general_late_after = %policy.general_late_after,
            evening_late_after = %policy.evening_late_after,
            "Loaded engine configuration"
        );

        Ok(Self {
            config: EngineConfig::new(policy, palette),
        })
    }

    /// The built-in defaults: dual-punch rules and the default palette.
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Replaces the resolution rules, keeping the palette.
    pub fn with_policy(self, policy: ResolutionPolicy) -> Self {
        let palette = self.config.palette().clone();
        Self {
            config: EngineConfig::new(policy, palette),
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the resolution rules.
    pub fn policy(&self) -> &ResolutionPolicy {
        self.config.policy()
    }

    /// Returns the report palette.
    pub fn palette(&self) -> &Palette {
        self.config.palette()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HalfDayLeavePolicy, MissingPunchPolicy};

    fn config_path() -> &'static str {
        "./config/default"
    }

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "attendance-engine-{}-{}",
            name,
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_shipped_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(*loader.policy(), ResolutionPolicy::dual_punch());
        assert_eq!(loader.palette().color_for("LWP"), Some(0xFF4500));
        assert_eq!(loader.palette().color_for("ESL 17:00"), Some(0x83F7F0));
    }

    #[test]
    fn test_shipped_palette_matches_builtin() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert_eq!(loader.palette(), ConfigLoader::builtin().palette());
    }

    #[test]
    fn test_builtin_is_dual_punch() {
        let loader = ConfigLoader::builtin();
        assert_eq!(loader.policy().missing_punch, MissingPunchPolicy::Absent);
        assert_eq!(
            loader.policy().half_day_leave,
            HalfDayLeavePolicy::PunchDependent
        );
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("policy.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_single_punch_preset() {
        let dir = scratch_dir("single");
        fs::write(dir.join("policy.yaml"), "preset: single_punch\n").unwrap();
        fs::write(dir.join("palette.yaml"), "exact:\n  PT: \"00FF00\"\n").unwrap();

        let loader = ConfigLoader::load(&dir).unwrap();
        assert_eq!(*loader.policy(), ResolutionPolicy::single_punch());
        assert_eq!(loader.palette().color_for("PT"), Some(0x00FF00));
        assert_eq!(loader.palette().color_for("WOff"), None);

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_bad_palette_color_is_parse_error() {
        let dir = scratch_dir("badcolor");
        fs::write(dir.join("policy.yaml"), "{}\n").unwrap();
        fs::write(dir.join("palette.yaml"), "exact:\n  PT: \"nope\"\n").unwrap();

        match ConfigLoader::load(&dir) {
            Err(EngineError::ConfigParseError { path, message }) => {
                assert!(path.contains("palette.yaml"));
                assert!(message.contains("nope"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_bad_yaml_is_parse_error() {
        let dir = scratch_dir("badyaml");
        fs::write(dir.join("policy.yaml"), "preset: [unclosed\n").unwrap();
        fs::write(dir.join("palette.yaml"), "{}\n").unwrap();

        assert!(matches!(
            ConfigLoader::load(&dir),
            Err(EngineError::ConfigParseError { .. })
        ));

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_with_policy_keeps_palette() {
        let loader = ConfigLoader::load(config_path())
            .unwrap()
            .with_policy(ResolutionPolicy::single_punch());

        assert_eq!(*loader.policy(), ResolutionPolicy::single_punch());
        assert_eq!(loader.palette().color_for("ESL 14:31"), Some(0x83F7F0));
    }
}
