use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::ConfigError;

const DEFAULT_FALLBACK_ICON: &str = "\u{27a1}\u{fe0f}";

const DEFAULT_ICONS: &[(&str, &str)] = &[
    ("walking", "\u{1f6b6}"),
    ("running", "\u{1f3c3}"),
    ("in passenger vehicle", "\u{1f697}"),
    ("in vehicle", "\u{1f698}"),
    ("in bus", "\u{1f68c}"),
    ("in train", "\u{1f686}"),
    ("in subway", "\u{1f687}"),
    ("in airplane", "\u{2708}\u{fe0f}"),
    ("in ferry", "\u{26f4}\u{fe0f}"),
    ("on bicycle", "\u{1f6b2}"),
    ("flying", "\u{1f6eb}"),
    ("still", "\u{23f8}\u{fe0f}"),
    ("unknown", "\u{2753}"),
];

/// Maps activity types (e.g. `"in bus"`) to the emoji shown in map popups.
///
/// Read-only once built; pass it wherever activity metadata is derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconTable {
    icons: HashMap<String, String>,
    fallback: String,
}

impl IconTable {
    #[must_use]
    pub fn new(icons: HashMap<String, String>, fallback: impl Into<String>) -> Self {
        Self {
            icons,
            fallback: fallback.into(),
        }
    }

    /// Icon for `activity_type`, or the fallback icon for unlisted types.
    #[must_use]
    pub fn icon_for(&self, activity_type: &str) -> &str {
        self.icons
            .get(activity_type)
            .map_or(self.fallback.as_str(), String::as_str)
    }
}

impl Default for IconTable {
    fn default() -> Self {
        let icons = DEFAULT_ICONS
            .iter()
            .map(|(kind, icon)| ((*kind).to_string(), (*icon).to_string()))
            .collect();
        Self::new(icons, DEFAULT_FALLBACK_ICON)
    }
}

#[derive(Debug, Deserialize)]
struct IconsFile {
    #[serde(default)]
    fallback: Option<String>,
    icons: HashMap<String, String>,
}

/// Load an icon table from a YAML file.
///
/// Entries in the file replace the built-in icons for the same activity type;
/// types the file does not mention keep their built-in icon.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_icon_table(path: &Path) -> Result<IconTable, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IconsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: IconsFile = serde_yaml::from_str(&content)?;
    validate_icons(&file)?;

    let mut table = IconTable::default();
    table.icons.extend(
        file.icons
            .into_iter()
            .map(|(kind, icon)| (kind.trim().to_string(), icon)),
    );
    if let Some(fallback) = file.fallback {
        table.fallback = fallback;
    }
    Ok(table)
}

fn validate_icons(file: &IconsFile) -> Result<(), ConfigError> {
    for (kind, icon) in &file.icons {
        if kind.trim().is_empty() {
            return Err(ConfigError::Validation(
                "activity type must be non-empty".to_string(),
            ));
        }
        if icon.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "activity type '{kind}' has an empty icon"
            )));
        }
    }

    if file
        .fallback
        .as_deref()
        .is_some_and(|f| f.trim().is_empty())
    {
        return Err(ConfigError::Validation(
            "fallback icon must be non-empty when set".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
#[path = "icons_test.rs"]
mod tests;
