//! Optional TOML config file, merged under command-line arguments

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::report::OutputFormat;

/// Values that may come from the config file or the command line
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub kubeconfig: Option<PathBuf>,
    pub context: Option<String>,
    pub namespace: Option<String>,
    pub output: Option<OutputFormat>,
    /// Deadline for the pod list call; 0 disables it
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    /// Default config file location (`~/.config/podphase/config.toml` on Linux)
    fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("podphase").join("config.toml"))
    }

    /// Load the config file. An explicit path must exist; a missing default
    /// file yields an empty config.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };

        tracing::debug!(path = %path.display(), "loading config file");
        let content = fs::read_to_string(&path)
            .context(format!("Failed to read config file {}", path.display()))?;
        Self::parse(&content).context(format!("Invalid config file {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Layer `overrides` on top of this config; set fields in `overrides` win
    pub fn overlay(self, overrides: FileConfig) -> FileConfig {
        FileConfig {
            kubeconfig: overrides.kubeconfig.or(self.kubeconfig),
            context: overrides.context.or(self.context),
            namespace: overrides.namespace.or(self.namespace),
            output: overrides.output.or(self.output),
            timeout_secs: overrides.timeout_secs.or(self.timeout_secs),
        }
    }

    pub fn into_settings(self, quiet: bool) -> Settings {
        Settings {
            kubeconfig: self.kubeconfig,
            context: self.context,
            namespace: self.namespace,
            output: self.output.unwrap_or_default(),
            timeout: self
                .timeout_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
            quiet,
        }
    }
}

/// Fully resolved run settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub kubeconfig: Option<PathBuf>,
    pub context: Option<String>,
    /// `None` lists pods across all namespaces
    pub namespace: Option<String>,
    pub output: OutputFormat,
    pub timeout: Option<Duration>,
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let config = FileConfig::parse(
            r#"
kubeconfig = "/etc/kube/admin.conf"
context = "staging"
output = "json"
timeout_secs = 30
"#,
        )
        .unwrap();

        assert_eq!(config.kubeconfig, Some(PathBuf::from("/etc/kube/admin.conf")));
        assert_eq!(config.context.as_deref(), Some("staging"));
        assert_eq!(config.namespace, None);
        assert_eq!(config.output, Some(OutputFormat::Json));
        assert_eq!(config.timeout_secs, Some(30));
    }

    #[test]
    fn test_empty_config() {
        assert_eq!(FileConfig::parse("").unwrap(), FileConfig::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(FileConfig::parse("retries = 3").is_err());
        assert!(FileConfig::parse("output = \"yaml\"").is_err());
    }

    #[test]
    fn test_command_line_overrides_file() {
        let file = FileConfig {
            context: Some("prod".to_string()),
            namespace: Some("kube-system".to_string()),
            output: Some(OutputFormat::Json),
            timeout_secs: Some(10),
            ..Default::default()
        };
        let cli = FileConfig {
            context: Some("dev".to_string()),
            ..Default::default()
        };

        let settings = file.overlay(cli).into_settings(false);
        assert_eq!(settings.context.as_deref(), Some("dev"));
        assert_eq!(settings.namespace.as_deref(), Some("kube-system"));
        assert_eq!(settings.output, OutputFormat::Json);
        assert_eq!(settings.timeout, Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_defaults() {
        let settings = FileConfig::default().into_settings(true);
        assert_eq!(settings.output, OutputFormat::Text);
        assert_eq!(settings.timeout, None);
        assert_eq!(settings.namespace, None);
        assert!(settings.quiet);
    }

    #[test]
    fn test_zero_timeout_disables_deadline() {
        let config = FileConfig {
            timeout_secs: Some(0),
            ..Default::default()
        };
        assert_eq!(config.into_settings(false).timeout, None);
    }

    #[test]
    fn test_missing_explicit_config_is_error() {
        assert!(FileConfig::load(Some(Path::new("/nonexistent/podphase.toml"))).is_err());
    }
}
