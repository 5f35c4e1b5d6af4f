//! What the rendering collaborator sees.
//!
//! After every committed transition the engine projects its state into a
//! [`SelectView`] and emits it on `state_changed`. Renderers draw from the
//! view alone and never read engine internals.

use crate::list_view::ListViewProps;

use super::placement::MenuPlacement;
use super::types::{FocusedOption, SelectedOption};

/// One menu row, ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct RowView<T> {
    pub index: usize,
    pub data: T,
    /// Text produced by the render-label accessor.
    pub label: String,
    pub is_focused: bool,
    pub is_selected: bool,
    pub is_disabled: bool,
}

/// A full projection of the widget state.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectView<T> {
    pub input_value: String,
    pub menu_open: bool,
    pub is_focused: bool,
    pub is_disabled: bool,
    pub is_multi: bool,
    pub selected: Vec<SelectedOption<T>>,
    pub focused: FocusedOption<T>,
    pub rows: Vec<RowView<T>>,
    /// Shown in the control when there is neither search text nor a selection.
    pub placeholder: Option<String>,
    /// Shown in an open menu with no rows.
    pub no_options_msg: Option<String>,
    pub show_clear_indicator: bool,
    pub menu: MenuPlacement,
    pub list: ListViewProps,
}

impl<T> SelectView<T> {
    /// The row the keyboard highlights, if any.
    pub fn focused_row(&self) -> Option<&RowView<T>> {
        self.rows.iter().find(|row| row.is_focused)
    }

    /// Labels of the selected options, in selection order.
    pub fn selected_labels(&self) -> Vec<&str> {
        self.selected.iter().map(|s| s.label.as_str()).collect()
    }
}

/// Input for an accessibility announcer.
///
/// Emitted on `announcement` while live announcements are enabled and the
/// input has focus. Nothing flows back into the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct AriaSnapshot<T> {
    pub menu_open: bool,
    pub input_value: String,
    pub focused_option: FocusedOption<T>,
    pub selected_option: Vec<SelectedOption<T>>,
    pub option_count: usize,
    pub is_searchable: bool,
    pub aria_label: Option<String>,
}
