use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from .tick/config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Show the key-hint strip in the status row.
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Color overrides, hex strings keyed by theme slot name.
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            colors: HashMap::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config: WorkspaceConfig = toml::from_str("").unwrap();
        assert!(config.ui.show_key_hints);
        assert!(config.ui.colors.is_empty());
    }

    #[test]
    fn partial_ui_section_keeps_other_defaults() {
        let config: WorkspaceConfig = toml::from_str(
            r#"
[ui]
show_key_hints = false
"#,
        )
        .unwrap();
        assert!(!config.ui.show_key_hints);
        assert!(config.ui.colors.is_empty());
    }

    #[test]
    fn color_overrides_parse() {
        let config: WorkspaceConfig = toml::from_str(
            r##"
[ui.colors]
background = "#000000"
highlight = "#FB4196"
"##,
        )
        .unwrap();
        assert_eq!(
            config.ui.colors.get("background").map(String::as_str),
            Some("#000000")
        );
        assert_eq!(config.ui.colors.len(), 2);
    }
}
