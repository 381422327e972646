use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use choices_picker::picker::{FormFactor, OptionMetadata, PickerProps};

/// Host-side settings: the properties fed to the picker on startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    pub label: String,

    /// Initially selected option value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,

    pub form_factor: FormFactor,

    /// Icon mapping JSON, e.g. `{"1":"Mail"}`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration: Option<String>,

    pub disabled: bool,
    pub masked: bool,

    /// kitty-style color file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_file: Option<PathBuf>,

    pub options: Vec<OptionMetadata>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            label: "Preferred contact method".to_string(),
            value: None,
            form_factor: FormFactor::Small,
            configuration: Some(r#"{"1":"Mail","2":"Phone","3":"Print","4":"MapPin"}"#.to_string()),
            disabled: false,
            masked: false,
            theme_file: None,
            options: vec![
                OptionMetadata::new(1, "Email"),
                OptionMetadata::new(2, "Phone"),
                OptionMetadata::new(3, "Fax"),
                OptionMetadata::new(4, "Mail"),
            ],
        }
    }
}

impl HostConfig {
    /// Default config file path
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("choices-picker");

        if let Err(e) = std::fs::create_dir_all(&config_dir) {
            tracing::warn!("Could not create config directory: {}", e);
        }

        Ok(config_dir.join("config.toml"))
    }

    /// Load an explicit config file; any failure is an error
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Load the default config file, or create it with defaults
    pub fn load() -> Result<Self> {
        let path = match Self::config_path() {
            Ok(p) => p,
            Err(_) => return Ok(HostConfig::default()),
        };

        if path.exists() {
            match Self::load_from(&path) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("{:#}", e);
                    return Ok(HostConfig::default());
                }
            }
        }

        let config = HostConfig::default();
        if let Err(e) = config.save_to(&path) {
            tracing::warn!("Could not write default config: {:#}", e);
        }
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn props(&self) -> PickerProps {
        PickerProps {
            label: self.label.clone(),
            value: self.value,
            options: self.options.clone(),
            form_factor: self.form_factor,
            configuration: self.configuration.clone(),
            disabled: self.disabled,
            masked: self.masked,
        }
    }
}
