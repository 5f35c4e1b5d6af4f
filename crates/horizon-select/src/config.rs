//! Select widget configuration.
//!
//! [`SelectConfig`] holds every behavior switch the engine recognises. It can
//! be built in code with the `with_*` setters or loaded from TOML; missing
//! keys take their defaults.
//!
//! # Example
//!
//! ```
//! use horizon_select::config::{MenuPosition, SelectConfig};
//!
//! let config = SelectConfig::from_toml_str(r#"
//! is_multi = true
//! menu_position = "auto"
//! input_delay = 150
//! "#).unwrap();
//!
//! assert!(config.is_multi);
//! assert_eq!(config.menu_position, MenuPosition::Auto);
//! assert!(config.hide_selected_options_or_default());
//! ```

use std::path::Path;
use std::time::Duration;

use horizon_select_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Row height used when none is configured.
pub const MENU_ITEM_SIZE_DEFAULT: f32 = 35.0;
/// Menu height cap used when none is configured.
pub const MENU_MAX_HEIGHT_DEFAULT: f32 = 300.0;
/// Scroll-into-view animation length, in frame time units.
pub const MENU_SCROLL_DURATION_DEFAULT: f32 = 300.0;
/// Rows rendered beyond the visible window.
pub const MENU_OVERSCAN_COUNT_DEFAULT: usize = 1;
pub const PLACEHOLDER_DEFAULT: &str = "Select option..";
pub const NO_OPTIONS_MSG_DEFAULT: &str = "No options";

/// Where the menu opens relative to the control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuPosition {
    /// Always above the control.
    Top,
    /// Below the control, in normal flow.
    #[default]
    Bottom,
    /// Below when it fits inside the scroll container, otherwise above.
    Auto,
}

/// Behavior switches for a select widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectConfig {
    /// Allow more than one selected option.
    pub is_multi: bool,
    /// Typing filters the option list.
    pub is_searchable: bool,
    /// A single selection can be cleared by Backspace or the clear indicator.
    pub is_clearable: bool,
    /// Ignore all keyboard and pointer input.
    pub is_disabled: bool,
    pub open_menu_on_focus: bool,
    pub open_menu_on_click: bool,
    /// Tab selects the focused option instead of closing the menu.
    pub tab_selects_option: bool,
    pub close_menu_on_select: bool,
    /// Animate the scroll container so an opened menu is fully visible.
    pub scroll_menu_into_view: bool,
    pub backspace_clears_value: bool,
    /// Hide selected options from the list. Unset means "hide when multi".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide_selected_options: Option<bool>,
    pub filter_is_case_sensitive: bool,
    pub menu_position: MenuPosition,
    /// Fixed height of one menu row.
    pub menu_item_size: f32,
    /// Cap on the menu height.
    pub menu_max_height: f32,
    /// Search debounce in milliseconds. Unset or 0 filters on every keystroke.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_delay: Option<u64>,
    /// The menu renders in a detached overlay layer.
    pub is_menu_portaled: bool,
    /// Scroll-into-view animation length, in frame time units.
    pub menu_scroll_duration: f32,
    pub menu_overscan_count: usize,
    /// Blur the input after a selection. Unset means "blur on touch devices".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blur_input_on_select: Option<bool>,
    /// Emit accessibility snapshots while the input is focused.
    pub is_aria_live_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aria_label: Option<String>,
    pub placeholder: String,
    pub no_options_msg: String,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            is_multi: false,
            is_searchable: true,
            is_clearable: false,
            is_disabled: false,
            open_menu_on_focus: false,
            open_menu_on_click: true,
            tab_selects_option: true,
            close_menu_on_select: true,
            scroll_menu_into_view: true,
            backspace_clears_value: true,
            hide_selected_options: None,
            filter_is_case_sensitive: false,
            menu_position: MenuPosition::Bottom,
            menu_item_size: MENU_ITEM_SIZE_DEFAULT,
            menu_max_height: MENU_MAX_HEIGHT_DEFAULT,
            input_delay: None,
            is_menu_portaled: false,
            menu_scroll_duration: MENU_SCROLL_DURATION_DEFAULT,
            menu_overscan_count: MENU_OVERSCAN_COUNT_DEFAULT,
            blur_input_on_select: None,
            is_aria_live_enabled: false,
            aria_label: None,
            placeholder: PLACEHOLDER_DEFAULT.to_string(),
            no_options_msg: NO_OPTIONS_MSG_DEFAULT.to_string(),
        }
    }
}

impl SelectConfig {
    /// Create a configuration with every option at its default.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Parse a configuration from TOML text. Missing keys take defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        tracing::debug!(target: targets::CONFIG, ?config, "select configuration parsed");
        Ok(config)
    }

    /// Read and parse a TOML configuration file.
    pub fn load_toml(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml_str(&text),
            Err(source) => Err(ConfigError::io(path, source)),
        }
    }

    /// Render the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Check the numeric fields, reporting the first invalid one.
    pub fn validate(&self) -> Result<()> {
        if !(self.menu_item_size.is_finite() && self.menu_item_size > 0.0) {
            return Err(ConfigError::invalid_value(
                "menu_item_size",
                format!(
                    "expected a positive row height, got {}",
                    self.menu_item_size
                ),
            ));
        }
        if !(self.menu_max_height.is_finite() && self.menu_max_height >= 0.0) {
            return Err(ConfigError::invalid_value(
                "menu_max_height",
                format!(
                    "expected a non-negative height, got {}",
                    self.menu_max_height
                ),
            ));
        }
        if !(self.menu_scroll_duration.is_finite() && self.menu_scroll_duration > 0.0) {
            return Err(ConfigError::invalid_value(
                "menu_scroll_duration",
                format!(
                    "expected a positive duration, got {}",
                    self.menu_scroll_duration
                ),
            ));
        }
        Ok(())
    }

    /// Replace every invalid field with its default, logging a warning for
    /// each one. The result always passes [`validate`](Self::validate).
    pub fn sanitized(mut self) -> Self {
        if !(self.menu_item_size.is_finite() && self.menu_item_size > 0.0) {
            tracing::warn!(
                target: targets::CONFIG,
                value = self.menu_item_size,
                "invalid menu_item_size, using default"
            );
            self.menu_item_size = MENU_ITEM_SIZE_DEFAULT;
        }
        if !(self.menu_max_height.is_finite() && self.menu_max_height >= 0.0) {
            tracing::warn!(
                target: targets::CONFIG,
                value = self.menu_max_height,
                "invalid menu_max_height, using default"
            );
            self.menu_max_height = MENU_MAX_HEIGHT_DEFAULT;
        }
        if !(self.menu_scroll_duration.is_finite() && self.menu_scroll_duration > 0.0) {
            tracing::warn!(
                target: targets::CONFIG,
                value = self.menu_scroll_duration,
                "invalid menu_scroll_duration, using default"
            );
            self.menu_scroll_duration = MENU_SCROLL_DURATION_DEFAULT;
        }
        self
    }

    // =========================================================================
    // Derived Values
    // =========================================================================

    /// Effective hide-selected policy: the explicit value, else `is_multi`.
    pub fn hide_selected_options_or_default(&self) -> bool {
        self.hide_selected_options.unwrap_or(self.is_multi)
    }

    /// Search debounce delay. Zero disables debouncing.
    pub fn input_delay_duration(&self) -> Duration {
        Duration::from_millis(self.input_delay.unwrap_or(0))
    }

    // =========================================================================
    // Builder Pattern
    // =========================================================================

    pub fn with_multi(mut self, multi: bool) -> Self {
        self.is_multi = multi;
        self
    }

    pub fn with_searchable(mut self, searchable: bool) -> Self {
        self.is_searchable = searchable;
        self
    }

    pub fn with_clearable(mut self, clearable: bool) -> Self {
        self.is_clearable = clearable;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.is_disabled = disabled;
        self
    }

    pub fn with_open_menu_on_focus(mut self, open: bool) -> Self {
        self.open_menu_on_focus = open;
        self
    }

    pub fn with_open_menu_on_click(mut self, open: bool) -> Self {
        self.open_menu_on_click = open;
        self
    }

    pub fn with_tab_selects_option(mut self, selects: bool) -> Self {
        self.tab_selects_option = selects;
        self
    }

    pub fn with_close_menu_on_select(mut self, close: bool) -> Self {
        self.close_menu_on_select = close;
        self
    }

    pub fn with_scroll_menu_into_view(mut self, scroll: bool) -> Self {
        self.scroll_menu_into_view = scroll;
        self
    }

    pub fn with_backspace_clears_value(mut self, clears: bool) -> Self {
        self.backspace_clears_value = clears;
        self
    }

    pub fn with_hide_selected_options(mut self, hide: bool) -> Self {
        self.hide_selected_options = Some(hide);
        self
    }

    pub fn with_filter_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.filter_is_case_sensitive = case_sensitive;
        self
    }

    pub fn with_menu_position(mut self, position: MenuPosition) -> Self {
        self.menu_position = position;
        self
    }

    pub fn with_menu_item_size(mut self, size: f32) -> Self {
        self.menu_item_size = size;
        self
    }

    pub fn with_menu_max_height(mut self, height: f32) -> Self {
        self.menu_max_height = height;
        self
    }

    /// Set the search debounce in milliseconds.
    pub fn with_input_delay(mut self, millis: u64) -> Self {
        self.input_delay = Some(millis);
        self
    }

    pub fn with_menu_portaled(mut self, portaled: bool) -> Self {
        self.is_menu_portaled = portaled;
        self
    }

    pub fn with_menu_scroll_duration(mut self, duration: f32) -> Self {
        self.menu_scroll_duration = duration;
        self
    }

    pub fn with_menu_overscan_count(mut self, count: usize) -> Self {
        self.menu_overscan_count = count;
        self
    }

    pub fn with_blur_input_on_select(mut self, blur: bool) -> Self {
        self.blur_input_on_select = Some(blur);
        self
    }

    pub fn with_aria_live(mut self, enabled: bool) -> Self {
        self.is_aria_live_enabled = enabled;
        self
    }

    pub fn with_aria_label(mut self, label: impl Into<String>) -> Self {
        self.aria_label = Some(label.into());
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_no_options_msg(mut self, message: impl Into<String>) -> Self {
        self.no_options_msg = message.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SelectConfig::default();
        assert!(config.is_searchable);
        assert!(config.open_menu_on_click);
        assert!(config.tab_selects_option);
        assert!(config.close_menu_on_select);
        assert!(config.scroll_menu_into_view);
        assert!(config.backspace_clears_value);
        assert!(!config.is_multi);
        assert_eq!(config.menu_item_size, 35.0);
        assert_eq!(config.menu_max_height, 300.0);
        assert_eq!(config.menu_position, MenuPosition::Bottom);
        assert_eq!(config.placeholder, "Select option..");
        assert_eq!(config.no_options_msg, "No options");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_hide_selected_default_follows_multi() {
        let single = SelectConfig::new();
        assert!(!single.hide_selected_options_or_default());

        let multi = SelectConfig::new().with_multi(true);
        assert!(multi.hide_selected_options_or_default());

        let explicit = SelectConfig::new()
            .with_multi(true)
            .with_hide_selected_options(false);
        assert!(!explicit.hide_selected_options_or_default());
    }

    #[test]
    fn test_input_delay_duration() {
        assert_eq!(SelectConfig::new().input_delay_duration(), Duration::ZERO);
        assert_eq!(
            SelectConfig::new()
                .with_input_delay(250)
                .input_delay_duration(),
            Duration::from_millis(250)
        );
    }

    #[test]
    fn test_from_toml_partial() {
        let config = SelectConfig::from_toml_str(
            r#"
            is_clearable = true
            menu_position = "top"
            menu_max_height = 180.0
            blur_input_on_select = false
            "#,
        )
        .unwrap();

        assert!(config.is_clearable);
        assert_eq!(config.menu_position, MenuPosition::Top);
        assert_eq!(config.menu_max_height, 180.0);
        assert_eq!(config.blur_input_on_select, Some(false));
        assert_eq!(config.menu_item_size, MENU_ITEM_SIZE_DEFAULT);
    }

    #[test]
    fn test_from_toml_rejects_unknown_position() {
        let result = SelectConfig::from_toml_str(r#"menu_position = "left""#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_toml_text_reloads_to_same_config() {
        let config = SelectConfig::new()
            .with_multi(true)
            .with_input_delay(120)
            .with_aria_label("Fruit");
        let text = config.to_toml_string().unwrap();
        assert_eq!(SelectConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_validate_reports_field() {
        let config = SelectConfig::new().with_menu_item_size(0.0);
        match config.validate() {
            Err(ConfigError::InvalidValue { field, .. }) => assert_eq!(field, "menu_item_size"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_sanitized_restores_defaults() {
        let config = SelectConfig::new()
            .with_menu_item_size(-4.0)
            .with_menu_max_height(f32::NAN)
            .with_menu_scroll_duration(0.0)
            .with_multi(true)
            .sanitized();

        assert_eq!(config.menu_item_size, MENU_ITEM_SIZE_DEFAULT);
        assert_eq!(config.menu_max_height, MENU_MAX_HEIGHT_DEFAULT);
        assert_eq!(config.menu_scroll_duration, MENU_SCROLL_DURATION_DEFAULT);
        assert!(config.is_multi);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_toml_missing_file() {
        let result = SelectConfig::load_toml("/nonexistent/horizon-select.toml");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
