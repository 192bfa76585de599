//! Configuration file loading.

use crate::config::Config;
use crate::constants::{APP_NAME, CONFIG_FILE_NAME};
use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolve the config file: `explicit` when given, else `config.toml` in
/// the platform config directory (`~/.config/scenetag/` on Linux).
pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
        .ok_or(Error::ConfigDirNotFound)
}

/// Load configuration from a TOML file.
///
/// Returns default config if the file does not exist.
pub fn load_config_file(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&contents).map_err(|e| Error::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load configuration from `explicit` if given, else from the default
/// platform-specific path.
///
/// Returns default config if no config file exists.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    match config_path(explicit) {
        Ok(path) => load_config_file(&path),
        Err(Error::ConfigDirNotFound) => Ok(Config::default()),
        Err(e) => Err(e),
    }
}

/// Save configuration to a TOML file.
pub fn save_config(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::ConfigWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    let contents =
        toml::to_string_pretty(config).map_err(|e| Error::ConfigSerialize { source: e })?;

    std::fs::write(path, contents).map_err(|e| Error::ConfigWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Save configuration to `explicit` if given, else to the default path.
pub fn save_config_to(config: &Config, explicit: Option<&Path>) -> Result<PathBuf> {
    let path = config_path(explicit)?;
    save_config(config, &path)?;
    Ok(path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::config::{ClipWriteFailurePolicy, ManifestFormat};
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_config_path_prefers_explicit() {
        let path = config_path(Some(Path::new("/tmp/custom.toml"))).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/custom.toml"));
    }

    #[test]
    fn test_default_config_path_is_per_app() {
        let path = config_path(None).unwrap();
        assert!(path.ends_with(Path::new(APP_NAME).join(CONFIG_FILE_NAME)));
    }

    #[test]
    fn test_load_nonexistent_file_returns_default() {
        let path = Path::new("/nonexistent/path/config.toml");
        let config = load_config_file(path).unwrap();
        assert_eq!(config.defaults.sample_rate, 16_000);
    }

    #[test]
    fn test_load_valid_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[defaults]
sample_rate = 22050
window_len = 2.0
format = "json"
clip_write_failure = "drop-row"

[output]
dir_name = "tag-v2"

[synthesis]
program = "/usr/local/bin/synth-scene"
args = ["{{annotation}}", "{{audio}}"]
timeout_secs = 120
"#
        )
        .unwrap();

        let config = load_config_file(file.path()).unwrap();
        assert_eq!(config.defaults.sample_rate, 22_050);
        assert_eq!(config.defaults.window_len, 2.0);
        assert_eq!(config.defaults.recording_duration, 10.0);
        assert_eq!(config.defaults.format, ManifestFormat::Json);
        assert_eq!(
            config.defaults.clip_write_failure,
            ClipWriteFailurePolicy::DropRow
        );
        assert_eq!(config.output.dir_name, "tag-v2");
        assert_eq!(config.synthesis.args, vec!["{annotation}", "{audio}"]);
        assert_eq!(config.synthesis.timeout_secs, Some(120));
    }

    #[test]
    fn test_load_invalid_toml_returns_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "this is not valid toml {{{{").unwrap();

        let config = load_config_file(file.path());
        assert!(matches!(config, Err(Error::ConfigParse { .. })));
    }

    #[test]
    fn test_save_then_load_explicit_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.defaults.jobs = 4;
        let saved = save_config_to(&config, Some(&path)).unwrap();
        assert_eq!(saved, path);

        let loaded = load_config(Some(&path)).unwrap();
        assert_eq!(loaded.defaults.jobs, 4);
    }
}
