//! Icon mapping parsed from the picker's JSON configuration string.
//!
//! The configuration is a JSON object keyed by stringified option values,
//! e.g. `{"1":"Mail","2":"Phone"}`. Icons are purely decorative.

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigurationParseError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON object mapping option values to icon names")]
    NotAnObject,

    #[error("key '{0}' is not an option value")]
    InvalidKey(String),

    #[error("icon for option '{0}' is not a string")]
    InvalidIcon(String),
}

/// Option value -> icon name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IconMapping {
    icons: HashMap<i64, String>,
}

impl IconMapping {
    pub fn parse(configuration: &str) -> Result<Self, ConfigurationParseError> {
        let json: serde_json::Value = serde_json::from_str(configuration)?;
        let object = json.as_object().ok_or(ConfigurationParseError::NotAnObject)?;

        let mut icons = HashMap::with_capacity(object.len());
        for (key, icon) in object {
            // Keys must be the exact stringified value, "01" would never match option 1
            let value = key
                .parse::<i64>()
                .ok()
                .filter(|v| v.to_string() == *key)
                .ok_or_else(|| ConfigurationParseError::InvalidKey(key.clone()))?;
            let name = icon
                .as_str()
                .ok_or_else(|| ConfigurationParseError::InvalidIcon(key.clone()))?;
            icons.insert(value, name.to_string());
        }

        Ok(Self { icons })
    }

    pub fn icon_for(&self, value: i64) -> Option<&str> {
        self.icons.get(&value).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}

/// An inline icon. Always decorative: screen readers skip it, the title names it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IconProps {
    pub icon_name: String,
    pub title: String,
    pub decorative: bool,
}

impl IconProps {
    pub fn new(icon_name: &str) -> Self {
        Self {
            icon_name: icon_name.to_string(),
            title: icon_name.to_string(),
            decorative: true,
        }
    }

    pub fn glyph(&self) -> &'static str {
        glyph(&self.icon_name)
    }
}

/// Nerd Font glyph for a Fluent-style icon name
pub fn glyph(icon_name: &str) -> &'static str {
    match icon_name {
        "Mail" | "Message" => "󰇮",
        "Phone" | "CellPhone" => "󰏲",
        "Chat" => "󰭹",
        "Contact" | "Person" => "󰀄",
        "People" => "󰡉",
        "Calendar" => "󰃭",
        "Globe" | "Website" => "󰇧",
        "Home" => "󰋜",
        "MapPin" | "Location" => "󰍎",
        "Print" | "Fax" => "󰐪",
        "Settings" => "󰒓",
        "FavoriteStar" | "Star" => "󰓎",
        "Heart" => "󰋑",
        "Warning" => "󰀪",
        "Error" => "󰅚",
        "Info" => "󰋼",
        "CheckMark" | "Accept" => "󰄬",
        "Cancel" => "󰅖",
        "Flag" => "󰈻",
        "Car" => "󰄋",
        "Airplane" => "󰀝",
        "Lock" => "󰌾",
        _ => "󰀻",
    }
}
