//! Scroll-into-view on menu open.
//!
//! When the menu opens below the control but does not fit in the viewport,
//! the engine either scrolls the menu's scroll container until the menu is
//! fully visible or, when there is not enough content to scroll, shrinks the
//! menu to the space that is available.
//!
//! The scroll itself is a [`ScrollAnimation`] stepped once per rendered
//! frame: each step advances the animation clock by [`FRAME_STEP`] units and
//! writes an eased scroll offset.

use horizon_select_core::logging::{span_names, targets};

use crate::animation::lerp_eased;
use crate::geometry::{ElementHandle, GeometryProvider};

use super::placement::{get_scroll_parent, scroll_space_below};

/// Animation time advanced per frame.
pub const FRAME_STEP: f32 = 5.0;

/// What to do when the menu opens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollDecision {
    /// Open now. `available_space` overrides the menu height when set.
    Open { available_space: Option<f32> },
    /// Scroll `container` from its current offset to `to`, then open.
    Animate {
        container: ElementHandle,
        from: f32,
        to: f32,
    },
}

/// Decide how to bring an opening menu into view.
pub fn scroll_menu_into_view_on_open(
    geometry: &dyn GeometryProvider,
    menu: Option<ElementHandle>,
    scroll_menu_into_view: bool,
) -> ScrollDecision {
    let fits = ScrollDecision::Open {
        available_space: None,
    };
    let Some(menu) = menu else {
        return fits;
    };
    let Some(menu_rect) = geometry.bounding_rect(menu) else {
        return fits;
    };

    let view_inner = geometry.viewport_height();
    if view_inner - menu_rect.top() >= menu_rect.height() {
        return fits;
    }

    let Some(scroll_space) = scroll_space_below(geometry, menu) else {
        return fits;
    };
    let not_enough_space_below = scroll_space < menu_rect.height();

    if not_enough_space_below || !scroll_menu_into_view {
        let available_space = not_enough_space_below.then_some(scroll_space);
        tracing::debug!(target: targets::SCROLL, ?available_space, "menu opens without scrolling");
        return ScrollDecision::Open { available_space };
    }

    let container = get_scroll_parent(geometry, menu);
    let from = geometry.scroll_top(container);
    let margin_bottom = geometry
        .computed_style(menu)
        .map_or(0.0, |style| style.margin_bottom);
    let to = menu_rect.bottom() - view_inner + from + margin_bottom;

    tracing::debug!(target: targets::SCROLL, from, to, "scrolling menu into view");
    ScrollDecision::Animate {
        container,
        from,
        to,
    }
}

/// An in-flight scroll of one container.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollAnimation {
    container: ElementHandle,
    from: f32,
    to: f32,
    duration: f32,
    current_time: f32,
}

impl ScrollAnimation {
    /// Create an animation. A non-positive duration finishes on the first step.
    pub fn new(container: ElementHandle, from: f32, to: f32, duration: f32) -> Self {
        Self {
            container,
            from,
            to,
            duration,
            current_time: 0.0,
        }
    }

    pub fn container(&self) -> ElementHandle {
        self.container
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    /// Animation progress in `0.0..=1.0`.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.current_time / self.duration).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self) -> bool {
        self.current_time >= self.duration
    }

    /// Advance one frame and write the new scroll offset.
    ///
    /// Returns `true` once the container sits on its target.
    pub fn step(&mut self, geometry: &dyn GeometryProvider) -> bool {
        let _span = tracing::trace_span!(span_names::SCROLL_FRAME).entered();

        self.current_time += FRAME_STEP;
        let offset = if self.is_finished() {
            self.to
        } else {
            lerp_eased(self.from, self.to, self.progress())
        };
        geometry.set_scroll_top(self.container, offset);
        tracing::trace!(target: targets::SCROLL, time = self.current_time, offset, "scroll frame");

        self.is_finished()
    }
}
