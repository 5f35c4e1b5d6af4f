//! The select (combobox) interaction engine.
//!
//! [`Select`] owns the widget state: search text, menu open/closed, input
//! focus, the selection and the keyboard-focused row. The host feeds it
//! keyboard, pointer and focus events; every handler finishes with a commit
//! step that re-derives the option list if one of its inputs changed, runs
//! the menu open/close transition, and notifies observers through signals.
//!
//! # Example
//!
//! ```
//! use horizon_select::config::SelectConfig;
//! use horizon_select::events::Key;
//! use horizon_select::select::{Select, SelectItem};
//!
//! let options = vec![SelectItem::new(1, "Apple"), SelectItem::new(2, "Banana")];
//! let mut select = Select::new(options, SelectConfig::new());
//!
//! select.handle_input_focus();
//! select.handle_input_change("an");
//! assert_eq!(select.menu_options().len(), 1);
//!
//! select.handle_key_press(&Key::Enter.into());
//! assert_eq!(select.selected()[0].label, "Banana");
//! assert!(!select.is_menu_open());
//! ```

mod debounce;
mod options;
mod placement;
mod positioner;
mod scroll;
mod types;
mod view;


use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use horizon_select_core::logging::{span_names, targets};
use horizon_select_core::{Clock, FrameId, FrameScheduler, Signal};

use crate::config::SelectConfig;
use crate::device::{self, DeviceDetector};
use crate::events::{Key, KeyPressEvent, PointerTarget};
use crate::geometry::{ElementHandle, GeometryProvider};
use crate::list_view::{ListView, ListViewProps};

pub use debounce::DebouncedValue;
pub use options::{derive_menu_options, normalize_value, validate_candidates};
pub use placement::{
    MenuPlacement, calculate_menu_top, get_scroll_parent, menu_fits_below,
    resolve_menu_top_position, scroll_space_below,
};
pub use positioner::{FrameProgress, MenuGeometry, MenuPositioner, OpenOptions, OpenProgress};
pub use scroll::{FRAME_STEP, ScrollAnimation, ScrollDecision, scroll_menu_into_view_on_open};
pub use types::{
    Accessors, FocusedOption, LabeledOption, MenuOption, OptionValue, SelectItem, SelectedOption,
    SelectionChange,
};
pub use view::{AriaSnapshot, RowView, SelectView};

/// A host hook that sees key presses first. Returning `true` claims the
/// event and the engine ignores it.
pub type KeyHook = Arc<dyn Fn(&KeyPressEvent) -> bool + Send + Sync>;

/// Which end of the list to focus when the menu opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexPosition {
    First,
    Last,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
}

/// A headless searchable select widget.
pub struct Select<T> {
    config: SelectConfig,
    accessors: Accessors<T>,
    options: Vec<T>,

    // State
    input_value: String,
    search: DebouncedValue<String>,
    menu_open: bool,
    is_focused: bool,
    selected: Vec<SelectedOption<T>>,
    focused: FocusedOption<T>,
    menu_options: Vec<MenuOption<T>>,
    prev_menu_options_len: Option<usize>,

    // Commit bookkeeping
    derive_dirty: bool,
    committed_menu_open: bool,
    committed_selection: Vec<OptionValue>,
    torn_down: bool,

    // Collaborators
    positioner: MenuPositioner,
    geometry: Option<MenuGeometry>,
    list_view: Option<Arc<dyn ListView>>,
    frames: Option<Arc<dyn FrameScheduler>>,
    device: Option<Arc<dyn DeviceDetector>>,
    key_hook: Option<KeyHook>,

    // Signals
    /// Emitted when the sequence of selected values changes.
    ///
    /// Not emitted for the initial value set at construction, nor when a
    /// click or key re-selects the option that is already the single
    /// selection.
    pub option_changed: Signal<SelectionChange<T>>,
    /// Emitted once the menu is open (after any scroll-into-view animation).
    pub menu_opened: Signal<()>,
    /// Emitted when the menu closes.
    pub menu_closed: Signal<()>,
    /// Emitted when the input gains focus.
    pub input_focused: Signal<()>,
    /// Emitted when the input loses focus.
    pub input_blurred: Signal<()>,
    /// Emitted with a fresh projection after every committed transition.
    pub state_changed: Signal<SelectView<T>>,
    /// Emitted for the accessibility announcer while the input has focus.
    pub announcement: Signal<AriaSnapshot<T>>,
}

impl<T: LabeledOption + Clone + Send + Sync + 'static> Select<T> {
    /// Create a select over options that carry their own value and label.
    pub fn new(options: Vec<T>, config: SelectConfig) -> Self {
        Self::with_accessors(options, config, Accessors::default())
    }
}

impl<T: Clone + Send + Sync + 'static> Select<T> {
    /// Create a select that reads options through `accessors`.
    pub fn with_accessors(options: Vec<T>, config: SelectConfig, accessors: Accessors<T>) -> Self {
        let config = config.sanitized();
        let search = DebouncedValue::new(String::new(), config.input_delay_duration());
        let positioner = MenuPositioner::new(config.menu_max_height);

        let mut select = Self {
            config,
            accessors,
            options,
            input_value: String::new(),
            search,
            menu_open: false,
            is_focused: false,
            selected: Vec::new(),
            focused: FocusedOption::none(),
            menu_options: Vec::new(),
            prev_menu_options_len: None,
            derive_dirty: true,
            committed_menu_open: false,
            committed_selection: Vec::new(),
            torn_down: false,
            positioner,
            geometry: None,
            list_view: None,
            frames: None,
            device: None,
            key_hook: None,
            option_changed: Signal::new(),
            menu_opened: Signal::new(),
            menu_closed: Signal::new(),
            input_focused: Signal::new(),
            input_blurred: Signal::new(),
            state_changed: Signal::new(),
            announcement: Signal::new(),
        };
        select.rederive();
        select
    }

    // =========================================================================
    // Builder Pattern
    // =========================================================================

    /// Seed the selection. Duplicates are dropped; single mode keeps the first.
    pub fn with_initial_value(mut self, initial: Vec<T>) -> Self {
        self.selected = normalize_value(initial, self.config.is_multi, &self.accessors);
        self.committed_selection = self.selection_values();
        self.derive_dirty = true;
        self.rederive();
        self
    }

    /// Attach the host elements used for placement and scrolling.
    pub fn with_geometry(
        mut self,
        provider: Arc<dyn GeometryProvider>,
        menu: ElementHandle,
        control: ElementHandle,
    ) -> Self {
        let geometry = MenuGeometry {
            provider,
            menu,
            control,
        };
        self.positioner
            .update_placement(self.config.menu_position, Some(&geometry));
        self.geometry = Some(geometry);
        self
    }

    /// Attach the virtualized list that renders the menu rows.
    pub fn with_list_view(mut self, list_view: Arc<dyn ListView>) -> Self {
        self.list_view = Some(list_view);
        self
    }

    /// Attach the frame scheduler that drives scroll animations.
    pub fn with_frame_scheduler(mut self, frames: Arc<dyn FrameScheduler>) -> Self {
        self.frames = Some(frames);
        self
    }

    /// Use `clock` for the search debounce.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        let value = self.search.value().clone();
        let delay = self.config.input_delay_duration();
        self.search = DebouncedValue::with_clock(value, delay, clock);
        self
    }

    /// Use a per-widget device detector instead of the process-wide cache.
    pub fn with_device_detector(mut self, detector: Arc<dyn DeviceDetector>) -> Self {
        self.device = Some(detector);
        self
    }

    /// Let the host see key presses before the engine.
    pub fn with_key_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&KeyPressEvent) -> bool + Send + Sync + 'static,
    {
        self.key_hook = Some(Arc::new(hook));
        self
    }

    // =========================================================================
    // State Access
    // =========================================================================

    /// The sanitized configuration in effect.
    pub fn config(&self) -> &SelectConfig {
        &self.config
    }

    /// The raw option list, before search and hide-selected filtering.
    pub fn options(&self) -> &[T] {
        &self.options
    }

    /// Current (undebounced) search text.
    pub fn input_value(&self) -> &str {
        &self.input_value
    }

    /// Search text the option list is currently filtered by.
    pub fn search_value(&self) -> &str {
        self.search.value()
    }

    /// Whether the menu is open. Stays `true` while an opening scroll runs.
    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// Whether the text input has focus.
    pub fn is_focused(&self) -> bool {
        self.is_focused
    }

    /// The selection in selection order. Holds at most one entry in single
    /// mode.
    pub fn selected(&self) -> &[SelectedOption<T>] {
        &self.selected
    }

    /// The keyboard-focused row, if any.
    pub fn focused_option(&self) -> &FocusedOption<T> {
        &self.focused
    }

    /// The derived option rows.
    pub fn menu_options(&self) -> &[MenuOption<T>] {
        &self.menu_options
    }

    /// Rendered menu height, capped at the configured maximum.
    pub fn menu_height(&self) -> f32 {
        self.positioner
            .effective_height(self.config.menu_max_height)
    }

    /// Whether the menu renders above the control.
    pub fn is_menu_top_position(&self) -> bool {
        self.positioner.is_menu_top_position()
    }

    /// Whether a scroll-into-view animation is in flight.
    pub fn is_scrolling(&self) -> bool {
        self.positioner.is_scrolling()
    }

    /// Whether [`teardown`](Self::teardown) has run.
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// The selection as `option_changed` reports it.
    pub fn selection_change(&self) -> SelectionChange<T> {
        if self.config.is_multi {
            SelectionChange::Multi(self.selected.iter().map(|s| s.data.clone()).collect())
        } else {
            SelectionChange::Single(self.selected.first().map(|s| s.data.clone()))
        }
    }

    /// Sizing inputs for the virtualized list.
    pub fn list_view_props(&self) -> ListViewProps {
        ListViewProps {
            item_count: self.menu_options.len(),
            item_size: self.config.menu_item_size,
            max_height: self.menu_height(),
            overscan_count: self.config.menu_overscan_count,
        }
    }

    /// Resolved menu placement.
    pub fn menu_placement(&self) -> MenuPlacement {
        self.positioner
            .placement(self.geometry.as_ref(), self.config.menu_max_height)
    }

    /// Project the current state for rendering.
    pub fn view(&self) -> SelectView<T> {
        let focused_index = self.focused.index();
        let rows = self
            .menu_options
            .iter()
            .map(|option| RowView {
                index: option.index,
                data: option.data.clone(),
                label: self.accessors.render_label(&option.data),
                is_focused: focused_index == Some(option.index),
                is_selected: option.is_selected,
                is_disabled: option.is_disabled,
            })
            .collect();

        let has_selection = !self.selected.is_empty();
        let show_placeholder = self.input_value.is_empty() && !has_selection;
        let show_no_options = self.menu_open && self.menu_options.is_empty();
        let show_clear = self.config.is_clearable && has_selection && !self.config.is_disabled;
        SelectView {
            input_value: self.input_value.clone(),
            menu_open: self.menu_open,
            is_focused: self.is_focused,
            is_disabled: self.config.is_disabled,
            is_multi: self.config.is_multi,
            selected: self.selected.clone(),
            focused: self.focused.clone(),
            rows,
            placeholder: show_placeholder.then(|| self.config.placeholder.clone()),
            no_options_msg: show_no_options.then(|| self.config.no_options_msg.clone()),
            show_clear_indicator: show_clear,
            menu: self.menu_placement(),
            list: self.list_view_props(),
        }
    }

    /// Snapshot for the accessibility announcer.
    pub fn aria_snapshot(&self) -> AriaSnapshot<T> {
        AriaSnapshot {
            menu_open: self.menu_open,
            input_value: self.input_value.clone(),
            focused_option: self.focused.clone(),
            selected_option: self.selected.clone(),
            option_count: self.menu_options.len(),
            is_searchable: self.config.is_searchable,
            aria_label: self.config.aria_label.clone(),
        }
    }

    // =========================================================================
    // Keyboard
    // =========================================================================

    /// Handle a key press on the control.
    ///
    /// Returns `true` if the engine consumed the key, in which case the host
    /// should suppress its default action.
    pub fn handle_key_press(&mut self, event: &KeyPressEvent) -> bool {
        if self.torn_down || self.config.is_disabled {
            return false;
        }
        if let Some(hook) = &self.key_hook
            && hook(event)
        {
            tracing::trace!(target: targets::SELECT, key = ?event.key, "key claimed by hook");
            return false;
        }

        let consumed = match event.key {
            Key::ArrowDown => {
                if self.menu_open {
                    self.focus_option_on_arrow(Direction::Down);
                } else {
                    self.open_menu_and_focus_option(IndexPosition::First);
                }
                true
            }
            Key::ArrowUp => {
                if self.menu_open {
                    self.focus_option_on_arrow(Direction::Up);
                } else {
                    self.open_menu_and_focus_option(IndexPosition::Last);
                }
                true
            }
            Key::Space => {
                if !self.input_value.is_empty() {
                    false
                } else {
                    if self.menu_open {
                        self.select_option_from_focused();
                    } else {
                        self.open_menu_and_focus_option(IndexPosition::First);
                    }
                    true
                }
            }
            Key::Enter => {
                if event.is_composing || !self.menu_open {
                    false
                } else {
                    self.select_option_from_focused();
                    true
                }
            }
            Key::Escape => {
                if self.menu_open {
                    self.close_menu_and_clear_input();
                    true
                } else {
                    false
                }
            }
            Key::Tab => {
                if event.modifiers.shift || !self.menu_open || self.focused.is_none() {
                    false
                } else {
                    if self.config.tab_selects_option {
                        self.select_option_from_focused();
                    } else {
                        self.close_menu_and_clear_input();
                    }
                    true
                }
            }
            Key::Backspace | Key::Delete => {
                if !self.input_value.is_empty() || !self.config.backspace_clears_value {
                    false
                } else {
                    self.clear_last_selection();
                    true
                }
            }
            Key::Character(_) | Key::Other => false,
        };

        if consumed {
            tracing::trace!(target: targets::SELECT, key = ?event.key, "key handled");
            self.commit();
        }
        consumed
    }

    // =========================================================================
    // Pointer
    // =========================================================================

    /// Handle a pointer-down anywhere on the control.
    ///
    /// Returns `true` if the host should suppress its default action (the
    /// pointer landed outside the text input).
    pub fn handle_control_pointer_down(&mut self, target: PointerTarget) -> bool {
        if self.torn_down || self.config.is_disabled {
            return false;
        }

        let was_open = self.menu_open;
        if !self.is_focused {
            self.focus_input();
        }

        if !was_open {
            if self.config.open_menu_on_click {
                self.open_menu_and_focus_option(IndexPosition::First);
            }
        } else if target.is_outside_input() {
            self.menu_open = false;
            if !self.input_value.is_empty() {
                self.set_input_value(String::new());
            }
        }

        self.commit();
        target.is_outside_input()
    }

    /// Handle a pointer-down on the menu panel outside any row.
    ///
    /// Keeps focus on the input without closing the menu.
    pub fn handle_menu_pointer_down(&mut self) {
        if self.torn_down {
            return;
        }
        self.focus_input();
        self.commit();
    }

    /// Handle a click on the row at `index`. Disabled rows are ignored.
    pub fn handle_option_click(&mut self, index: usize) {
        if self.torn_down || self.config.is_disabled {
            return;
        }
        let Some(option) = self.menu_options.get(index) else {
            return;
        };
        if option.is_disabled {
            return;
        }

        let is_selected = option.is_selected;
        let selected = option.to_selected();
        self.select_option(selected, is_selected);
        self.commit();
    }

    /// Handle a pointer-down on the clear indicator.
    pub fn handle_clear_pointer_down(&mut self) {
        if self.torn_down || self.config.is_disabled {
            return;
        }
        self.set_selection(Vec::new());
        self.focus_input();
        self.commit();
    }

    /// Handle a pointer-down on the dropdown caret.
    ///
    /// Only active when open-on-click is off; otherwise the control's own
    /// pointer handling toggles the menu. Returns `true` if handled.
    pub fn handle_caret_pointer_down(&mut self) -> bool {
        if self.torn_down || self.config.is_disabled || self.config.open_menu_on_click {
            return false;
        }

        let was_open = self.menu_open;
        self.focus_input();
        if was_open {
            self.menu_open = false;
        } else {
            self.open_menu_and_focus_option(IndexPosition::First);
        }
        self.commit();
        true
    }

    /// Remove one option from a multi selection (a chip's remove button).
    pub fn remove_selected_option(&mut self, value: &OptionValue) {
        if self.torn_down {
            return;
        }
        self.remove_selected_value(value);
        self.commit();
    }

    // =========================================================================
    // Input and Focus
    // =========================================================================

    /// Handle the input's text changing. Opens the menu.
    pub fn handle_input_change(&mut self, text: impl Into<String>) {
        if self.torn_down || self.config.is_disabled || !self.config.is_searchable {
            return;
        }
        self.menu_open = true;
        self.set_input_value(text.into());
        self.commit();
    }

    /// Handle the input gaining focus.
    pub fn handle_input_focus(&mut self) {
        if self.torn_down {
            return;
        }
        self.focus_input();
        self.commit();
    }

    /// Handle the input losing focus: closes the menu and clears the search.
    pub fn handle_input_blur(&mut self) {
        if self.torn_down {
            return;
        }
        self.apply_blur();
        self.commit();
    }

    // =========================================================================
    // Imperative Handle
    // =========================================================================

    /// Take focus away from the input.
    pub fn blur(&mut self) {
        if self.torn_down || !self.is_focused {
            return;
        }
        self.apply_blur();
        self.commit();
    }

    /// Give the input focus.
    pub fn focus(&mut self) {
        self.handle_input_focus();
    }

    /// Reset the selection and the focused row.
    pub fn clear_value(&mut self) {
        if self.torn_down {
            return;
        }
        self.set_selection(Vec::new());
        self.focused = FocusedOption::none();
        self.commit();
    }

    /// Replace the selection with the candidates found in the current rows.
    ///
    /// Unknown candidates are dropped silently; the selection may end up
    /// empty.
    pub fn set_value(&mut self, candidates: Vec<T>) {
        if self.torn_down {
            return;
        }
        let validated = validate_candidates(
            candidates,
            &self.menu_options,
            self.config.is_multi,
            &self.accessors,
        );
        self.set_selection(validated);
        self.commit();
    }

    /// Replace the configuration.
    ///
    /// The new config is sanitized like the one given at construction. A
    /// changed search delay applies from the next keystroke. Switching to
    /// single mode keeps only the first selected option, and disabling the
    /// control closes an open menu.
    pub fn set_config(&mut self, config: SelectConfig) {
        if self.torn_down {
            return;
        }
        let config = config.sanitized();
        self.search.set_delay(config.input_delay_duration());
        self.positioner.set_default_height(config.menu_max_height);
        self.positioner
            .update_placement(config.menu_position, self.geometry.as_ref());

        if !config.is_multi && self.selected.len() > 1 {
            self.selected.truncate(1);
        }
        if config.is_disabled && self.menu_open {
            self.close_menu_and_clear_input();
        }

        self.config = config;
        self.derive_dirty = true;
        tracing::debug!(target: targets::SELECT, "config replaced");
        self.commit();
    }

    /// Replace the raw option list.
    pub fn set_options(&mut self, options: Vec<T>) {
        if self.torn_down {
            return;
        }
        self.options = options;
        self.derive_dirty = true;
        self.commit();
    }

    // =========================================================================
    // Deferred Work
    // =========================================================================

    /// Publish a due debounced search. Call when the event loop wakes up.
    ///
    /// Returns `true` if the search text the list is filtered by changed.
    pub fn process_timers(&mut self) -> bool {
        if self.torn_down {
            return false;
        }
        if !self.search.poll() {
            return false;
        }
        let search = self.search.value().as_str();
        tracing::debug!(target: targets::SELECT, search, "debounced search published");
        self.derive_dirty = true;
        self.commit();
        true
    }

    /// Time until [`process_timers`](Self::process_timers) has work to do.
    pub fn next_timer_deadline(&mut self) -> Option<Duration> {
        if self.torn_down {
            return None;
        }
        self.search.next_deadline()
    }

    /// Deliver a frame requested from the frame scheduler.
    pub fn handle_frame(&mut self, id: FrameId) {
        if self.torn_down {
            return;
        }
        let progress = self
            .positioner
            .handle_frame(id, self.geometry.as_ref(), self.frames.as_deref());
        if progress == FrameProgress::Opened {
            tracing::debug!(target: targets::SELECT, "menu opened after scroll");
            self.menu_opened.emit(());
            self.emit_view();
        }
    }

    /// Cancel deferred work and disconnect every observer.
    ///
    /// Afterwards every handler is a no-op. Also runs on drop.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.release_deferred_work();
        self.option_changed.disconnect_all();
        self.menu_opened.disconnect_all();
        self.menu_closed.disconnect_all();
        self.input_focused.disconnect_all();
        self.input_blurred.disconnect_all();
        self.state_changed.disconnect_all();
        self.announcement.disconnect_all();
        tracing::debug!(target: targets::SELECT, "select torn down");
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    fn open_menu_and_focus_option(&mut self, position: IndexPosition) {
        self.menu_open = true;
        if self.menu_options.is_empty() {
            return;
        }

        let selected_index = if self.config.is_multi {
            None
        } else {
            self.menu_options
                .iter()
                .position(|option| option.is_selected)
        };
        let index = selected_index.unwrap_or(match position {
            IndexPosition::First => 0,
            IndexPosition::Last => self.menu_options.len() - 1,
        });
        self.focus_index(index);
    }

    fn focus_option_on_arrow(&mut self, direction: Direction) {
        let len = self.menu_options.len();
        if len == 0 {
            return;
        }

        let index = match (direction, self.focused.index()) {
            (Direction::Down, Some(current)) => (current + 1) % len,
            (Direction::Down, None) => 0,
            (Direction::Up, Some(current)) if current > 0 => current - 1,
            (Direction::Up, _) => len - 1,
        };
        self.focus_index(index);
    }

    fn focus_index(&mut self, index: usize) {
        if let Some(option) = self.menu_options.get(index) {
            self.focused = FocusedOption::from_menu_option(option);
            self.scroll_to_item(index);
        }
    }

    fn select_option_from_focused(&mut self) {
        let focused = self.focused.index();
        let Some(option) = focused.and_then(|index| self.menu_options.get(index)) else {
            return;
        };
        if option.is_disabled {
            return;
        }
        let is_selected = option.is_selected;
        let selected = option.to_selected();
        self.select_option(selected, is_selected);
    }

    fn select_option(&mut self, option: SelectedOption<T>, is_selected: bool) {
        if is_selected {
            if self.config.is_multi {
                self.remove_selected_value(&option.value);
            }
        } else if self.config.is_multi {
            if !self.selected.iter().any(|s| s.value == option.value) {
                let mut selection = self.selected.clone();
                selection.push(option);
                self.set_selection(selection);
            }
        } else {
            self.set_selection(vec![option]);
        }

        if self.blur_input_on_select() {
            if self.is_focused {
                self.apply_blur();
            }
        } else if self.config.close_menu_on_select {
            self.close_menu_and_clear_input();
        }
    }

    fn clear_last_selection(&mut self) {
        if self.config.is_multi {
            if let Some(last) = self.selected.last().map(|s| s.value.clone()) {
                self.remove_selected_value(&last);
            }
        } else if self.config.is_clearable && !self.selected.is_empty() {
            self.set_selection(Vec::new());
        }
    }

    fn remove_selected_value(&mut self, value: &OptionValue) {
        if self.selected.iter().any(|s| &s.value == value) {
            let selection = self
                .selected
                .iter()
                .filter(|s| &s.value != value)
                .cloned()
                .collect();
            self.set_selection(selection);
        }
    }

    fn set_selection(&mut self, selection: Vec<SelectedOption<T>>) {
        self.selected = selection;
        self.derive_dirty = true;
    }

    fn close_menu_and_clear_input(&mut self) {
        self.menu_open = false;
        self.set_input_value(String::new());
    }

    fn set_input_value(&mut self, text: String) {
        if self.search.set(text.clone()) {
            self.derive_dirty = true;
        }
        self.input_value = text;
    }

    fn focus_input(&mut self) {
        if self.is_focused {
            return;
        }
        self.is_focused = true;
        tracing::debug!(target: targets::SELECT, "input focused");
        self.input_focused.emit(());
        if self.config.open_menu_on_focus {
            self.open_menu_and_focus_option(IndexPosition::First);
        }
    }

    fn apply_blur(&mut self) {
        self.is_focused = false;
        self.menu_open = false;
        self.set_input_value(String::new());
        tracing::debug!(target: targets::SELECT, "input blurred");
        self.input_blurred.emit(());
    }

    fn blur_input_on_select(&self) -> bool {
        self.config.blur_input_on_select.unwrap_or_else(|| {
            let capabilities = match &self.device {
                Some(detector) => detector.detect(),
                None => device::capabilities(),
            };
            capabilities.is_touch_device
        })
    }

    fn scroll_to_item(&self, index: usize) {
        if let Some(list_view) = &self.list_view {
            list_view.scroll_to_item(index);
        }
    }

    // =========================================================================
    // Commit
    // =========================================================================

    fn commit(&mut self) {
        if self.torn_down {
            return;
        }
        let _span = tracing::debug_span!(span_names::COMMIT).entered();

        self.rederive();
        self.sync_menu_transition();

        let selection = self.selection_values();
        if selection != self.committed_selection {
            tracing::debug!(target: targets::SELECT, count = selection.len(), "selection changed");
            self.committed_selection = selection;
            self.option_changed.emit(self.selection_change());
        }

        self.emit_view();
    }

    /// Re-derive the option list if an input changed, then keep the focused
    /// row valid.
    fn rederive(&mut self) {
        if !self.derive_dirty {
            return;
        }
        self.derive_dirty = false;

        self.menu_options = derive_menu_options(
            &self.options,
            self.search.value(),
            self.config.hide_selected_options_or_default(),
            &self.selected,
            &self.accessors,
            self.config.filter_is_case_sensitive,
        );

        let focused = self.focused.index();
        self.focused = match focused.and_then(|index| self.menu_options.get(index)) {
            Some(option) => FocusedOption::from_menu_option(option),
            None => FocusedOption::none(),
        };

        let len = self.menu_options.len();
        let list_changed = len != self.options.len() || self.prev_menu_options_len == Some(0);
        if len == 1 || (len > 0 && list_changed) {
            self.focus_index(0);
        }
        self.prev_menu_options_len = Some(len);
    }

    fn sync_menu_transition(&mut self) {
        if self.menu_open == self.committed_menu_open {
            return;
        }
        self.committed_menu_open = self.menu_open;

        if self.menu_open {
            self.positioner
                .update_placement(self.config.menu_position, self.geometry.as_ref());
            let options = OpenOptions {
                is_menu_portaled: self.config.is_menu_portaled,
                scroll_menu_into_view: self.config.scroll_menu_into_view,
                menu_scroll_duration: self.config.menu_scroll_duration,
            };
            let progress = self
                .positioner
                .open(self.geometry.as_ref(), self.frames.as_deref(), options);
            if progress == OpenProgress::Opened {
                tracing::debug!(target: targets::SELECT, "menu opened");
                self.menu_opened.emit(());
            }
        } else {
            self.positioner.close(self.frames.as_deref());
            tracing::debug!(target: targets::SELECT, "menu closed");
            self.menu_closed.emit(());
        }
    }

    fn emit_view(&self) {
        self.state_changed.emit(self.view());
        if self.config.is_aria_live_enabled && self.is_focused {
            self.announcement.emit(self.aria_snapshot());
        }
    }

    fn selection_values(&self) -> Vec<OptionValue> {
        self.selected.iter().map(|s| s.value.clone()).collect()
    }
}

impl<T> Select<T> {
    fn release_deferred_work(&mut self) {
        self.torn_down = true;
        self.search.cancel();
        self.positioner.stop_animation(self.frames.as_deref());
    }
}

impl<T> Drop for Select<T> {
    fn drop(&mut self) {
        if !self.torn_down {
            self.release_deferred_work();
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Select<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Select")
            .field("input_value", &self.input_value)
            .field("menu_open", &self.menu_open)
            .field("is_focused", &self.is_focused)
            .field("selected", &self.selected)
            .field("focused", &self.focused.index)
            .field("menu_options", &self.menu_options.len())
            .field("torn_down", &self.torn_down)
            .finish_non_exhaustive()
    }
}
