//! Render-ready option lists, derived from `(options, configuration)` and memoized.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::icons::{IconMapping, IconProps};

/// A selectable option as supplied by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionMetadata {
    pub value: i64,
    pub label: String,
}

impl OptionMetadata {
    pub fn new(value: i64, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }
}

/// Entry of the choice-group representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceItem {
    pub key: String,
    pub value: i64,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<IconProps>,
}

/// Data carried by each dropdown entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropdownData {
    pub value: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<IconProps>,
}

/// Entry of the dropdown representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropdownItem {
    pub key: String,
    pub text: String,
    pub data: DropdownData,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivedItems {
    /// Set when the configuration failed to parse; the lists carry no icons then
    pub error: Option<String>,
    pub choices: Vec<ChoiceItem>,
    pub dropdown: Vec<DropdownItem>,
}

impl DerivedItems {
    pub fn derive(options: &[OptionMetadata], configuration: Option<&str>) -> Self {
        let mut error = None;
        let mapping = match configuration.filter(|c| !c.is_empty()) {
            Some(config) => match IconMapping::parse(config) {
                Ok(mapping) => mapping,
                Err(e) => {
                    tracing::warn!("Invalid picker configuration {:?}: {}", config, e);
                    error = Some(format!("Invalid configuration: '{}'", config));
                    IconMapping::default()
                }
            },
            None => IconMapping::default(),
        };

        let icon_of = |value: i64| mapping.icon_for(value).map(IconProps::new);

        let choices = options
            .iter()
            .map(|option| ChoiceItem {
                key: option.value.to_string(),
                value: option.value,
                text: option.label.clone(),
                icon: icon_of(option.value),
            })
            .collect();

        let dropdown = options
            .iter()
            .map(|option| DropdownItem {
                key: option.value.to_string(),
                text: option.label.clone(),
                data: DropdownData {
                    value: option.value,
                    icon: icon_of(option.value),
                },
            })
            .collect();

        Self {
            error,
            choices,
            dropdown,
        }
    }
}

/// Single-entry memo of the last derivation, compared by value
#[derive(Debug, Default)]
pub struct ItemsCache {
    entry: Option<CacheEntry>,
}

#[derive(Debug)]
struct CacheEntry {
    options: Vec<OptionMetadata>,
    configuration: Option<String>,
    items: Rc<DerivedItems>,
}

impl ItemsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(
        &mut self,
        options: &[OptionMetadata],
        configuration: Option<&str>,
    ) -> Rc<DerivedItems> {
        if let Some(entry) = &self.entry {
            if entry.options == options && entry.configuration.as_deref() == configuration {
                return Rc::clone(&entry.items);
            }
        }

        tracing::debug!(
            "Deriving picker items for {} options (configuration: {:?})",
            options.len(),
            configuration
        );
        let items = Rc::new(DerivedItems::derive(options, configuration));
        self.entry = Some(CacheEntry {
            options: options.to_vec(),
            configuration: configuration.map(str::to_string),
            items: Rc::clone(&items),
        });
        items
    }
}
