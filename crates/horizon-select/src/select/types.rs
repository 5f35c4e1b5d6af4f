//! Option records and accessor plumbing.

use std::fmt;
use std::sync::Arc;

// ============================================================================
// Option Values
// ============================================================================

/// The value extracted from an option: a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OptionValue {
    Int(i64),
    Text(String),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Int(n) => write!(f, "{n}"),
            OptionValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Int(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        OptionValue::Int(value.into())
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Text(value)
    }
}

// ============================================================================
// Derived Records
// ============================================================================

/// One row of the derived option list.
///
/// Rebuilt on every derivation pass; `index` is the row's position in the
/// current list.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuOption<T> {
    pub index: usize,
    pub data: T,
    pub value: OptionValue,
    pub label: String,
    pub is_disabled: bool,
    pub is_selected: bool,
}

impl<T: Clone> MenuOption<T> {
    /// The selection record this row would produce.
    pub fn to_selected(&self) -> SelectedOption<T> {
        SelectedOption {
            data: self.data.clone(),
            value: self.value.clone(),
            label: self.label.clone(),
        }
    }
}

/// A currently chosen option.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedOption<T> {
    pub data: T,
    pub value: OptionValue,
    pub label: String,
}

/// The keyboard-highlighted row.
///
/// `index == -1` means nothing is focused; the optional fields are populated
/// only when a concrete row backs the focus.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusedOption<T> {
    pub index: i32,
    pub data: Option<T>,
    pub value: Option<OptionValue>,
    pub label: Option<String>,
    pub is_disabled: bool,
    pub is_selected: bool,
}

impl<T> FocusedOption<T> {
    /// The "nothing focused" state.
    pub fn none() -> Self {
        Self {
            index: -1,
            data: None,
            value: None,
            label: None,
            is_disabled: false,
            is_selected: false,
        }
    }

    pub fn is_none(&self) -> bool {
        self.index < 0
    }

    /// The focused row index, if any.
    pub fn index(&self) -> Option<usize> {
        usize::try_from(self.index).ok()
    }
}

impl<T: Clone> FocusedOption<T> {
    /// Focus state backed by a derived row.
    pub fn from_menu_option(option: &MenuOption<T>) -> Self {
        Self {
            index: option.index as i32,
            data: Some(option.data.clone()),
            value: Some(option.value.clone()),
            label: Some(option.label.clone()),
            is_disabled: option.is_disabled,
            is_selected: option.is_selected,
        }
    }
}

impl<T> Default for FocusedOption<T> {
    fn default() -> Self {
        Self::none()
    }
}

/// What `option_changed` reports after the selection changes.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionChange<T> {
    /// Single mode: the selected option's data, if any.
    Single(Option<T>),
    /// Multi mode: every selected option's data, in selection order.
    Multi(Vec<T>),
}

// ============================================================================
// Accessors
// ============================================================================

/// Built-in value and label extraction for option records.
///
/// Option types that implement this get working [`Accessors`] via
/// `Accessors::default()`.
pub trait LabeledOption {
    fn option_value(&self) -> OptionValue;
    fn option_label(&self) -> String;
}

/// A plain `{ value, label }` option record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectItem {
    pub value: OptionValue,
    pub label: String,
}

impl SelectItem {
    pub fn new(value: impl Into<OptionValue>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

impl LabeledOption for SelectItem {
    fn option_value(&self) -> OptionValue {
        self.value.clone()
    }

    fn option_label(&self) -> String {
        self.label.clone()
    }
}

type TextFn<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;
type ValueFn<T> = Arc<dyn Fn(&T) -> OptionValue + Send + Sync>;
type PredicateFn<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// Pluggable functions that read options.
///
/// Only value and label are mandatory. The filter string falls back to the
/// label, the rendered label falls back to the label, and options are enabled
/// unless a disabled predicate says otherwise.
pub struct Accessors<T> {
    get_option_label: TextFn<T>,
    get_option_value: ValueFn<T>,
    get_is_option_disabled: Option<PredicateFn<T>>,
    get_filter_option_string: Option<TextFn<T>>,
    render_option_label: Option<TextFn<T>>,
}

impl<T> Accessors<T> {
    /// Accessors from a label function and a value function.
    pub fn new<L, V>(get_option_label: L, get_option_value: V) -> Self
    where
        L: Fn(&T) -> String + Send + Sync + 'static,
        V: Fn(&T) -> OptionValue + Send + Sync + 'static,
    {
        Self {
            get_option_label: Arc::new(get_option_label),
            get_option_value: Arc::new(get_option_value),
            get_is_option_disabled: None,
            get_filter_option_string: None,
            render_option_label: None,
        }
    }

    pub fn with_is_option_disabled<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.get_is_option_disabled = Some(Arc::new(predicate));
        self
    }

    pub fn with_filter_option_string<F>(mut self, filter: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.get_filter_option_string = Some(Arc::new(filter));
        self
    }

    pub fn with_render_option_label<F>(mut self, render: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.render_option_label = Some(Arc::new(render));
        self
    }

    pub fn label(&self, data: &T) -> String {
        (self.get_option_label)(data)
    }

    pub fn value(&self, data: &T) -> OptionValue {
        (self.get_option_value)(data)
    }

    pub fn is_disabled(&self, data: &T) -> bool {
        self.get_is_option_disabled
            .as_ref()
            .is_some_and(|f| f(data))
    }

    /// The text search input is matched against.
    pub fn filter_string(&self, data: &T, label: &str) -> String {
        match &self.get_filter_option_string {
            Some(f) => f(data),
            None => label.to_string(),
        }
    }

    /// The text a row displays.
    pub fn render_label(&self, data: &T) -> String {
        match &self.render_option_label {
            Some(f) => f(data),
            None => self.label(data),
        }
    }

    /// Build a selection record for `data`.
    pub fn to_selected(&self, data: T) -> SelectedOption<T> {
        SelectedOption {
            value: self.value(&data),
            label: self.label(&data),
            data,
        }
    }
}

impl<T: LabeledOption + 'static> Default for Accessors<T> {
    fn default() -> Self {
        Self::new(T::option_label, T::option_value)
    }
}

impl<T> Clone for Accessors<T> {
    fn clone(&self) -> Self {
        Self {
            get_option_label: self.get_option_label.clone(),
            get_option_value: self.get_option_value.clone(),
            get_is_option_disabled: self.get_is_option_disabled.clone(),
            get_filter_option_string: self.get_filter_option_string.clone(),
            render_option_label: self.render_option_label.clone(),
        }
    }
}

impl<T> fmt::Debug for Accessors<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessors")
            .field(
                "get_is_option_disabled",
                &self.get_is_option_disabled.is_some(),
            )
            .field(
                "get_filter_option_string",
                &self.get_filter_option_string.is_some(),
            )
            .field("render_option_label", &self.render_option_label.is_some())
            .finish_non_exhaustive()
    }
}
