//! Menu placement.
//!
//! Decides whether the menu renders above or below the control and, when
//! above, the vertical offset that puts it flush against the control's top
//! edge. Every query goes through a [`GeometryProvider`]; an element that is
//! not mounted counts as fitting and produces no adjustment.

use horizon_select_core::logging::targets;

use crate::config::MenuPosition;
use crate::geometry::{ElementHandle, GeometryProvider, Position};

/// Find the nearest ancestor that scrolls `element`'s content.
///
/// Fixed elements scroll with the document. Absolutely positioned elements
/// skip statically positioned ancestors. Without a scrollable ancestor the
/// document element is returned.
pub fn get_scroll_parent(geometry: &dyn GeometryProvider, element: ElementHandle) -> ElementHandle {
    let document = geometry.document_element();
    let Some(style) = geometry.computed_style(element) else {
        return document;
    };

    if style.position == Position::Fixed {
        return document;
    }
    let exclude_static_parent = style.position == Position::Absolute;

    let mut current = geometry.parent(element);
    while let Some(parent) = current {
        if let Some(style) = geometry.computed_style(parent)
            && !(exclude_static_parent && style.position == Position::Static)
            && style.is_scrollable()
        {
            return parent;
        }
        current = geometry.parent(parent);
    }

    document
}

/// Space left below the menu's top edge inside its scroll container.
///
/// `None` when the menu is not mounted.
pub fn scroll_space_below(geometry: &dyn GeometryProvider, menu: ElementHandle) -> Option<f32> {
    let menu_rect = geometry.bounding_rect(menu)?;
    let scroll_parent = get_scroll_parent(geometry, menu);
    let container_height = geometry
        .bounding_rect(scroll_parent)
        .map_or_else(|| geometry.viewport_height(), |rect| rect.height());
    let scroll_top = geometry.scroll_top(scroll_parent);

    Some(container_height - scroll_top - menu_rect.top())
}

/// Whether the menu's natural height fits below the control.
pub fn menu_fits_below(geometry: &dyn GeometryProvider, menu: Option<ElementHandle>) -> bool {
    let Some(menu) = menu else {
        return true;
    };
    let Some(menu_rect) = geometry.bounding_rect(menu) else {
        return true;
    };

    scroll_space_below(geometry, menu).is_none_or(|space| space >= menu_rect.height())
}

/// Whether the menu is placed above the control.
pub fn resolve_menu_top_position(
    position: MenuPosition,
    fits_below: impl FnOnce() -> bool,
) -> bool {
    match position {
        MenuPosition::Top => true,
        MenuPosition::Bottom => false,
        MenuPosition::Auto => !fits_below(),
    }
}

/// Vertical offset for a menu placed above the control.
///
/// `-(menu height + control height)`, corrected by the menu's own vertical
/// margins. A zero `menu_height` falls back to the menu's measured height.
pub fn calculate_menu_top(
    geometry: &dyn GeometryProvider,
    menu_height: f32,
    menu: Option<ElementHandle>,
    control: Option<ElementHandle>,
) -> f32 {
    let measured = menu.and_then(|menu| geometry.bounding_rect(menu));
    let menu_height = match measured {
        Some(rect) if menu_height <= 0.0 => rect.height(),
        _ => menu_height,
    };
    let control_height = control
        .and_then(|control| geometry.bounding_rect(control))
        .map_or(0.0, |rect| rect.height());
    let margins = menu
        .and_then(|menu| geometry.computed_style(menu))
        .map_or(0.0, |style| style.margin_top + style.margin_bottom);

    let top = -(menu_height + control_height).abs() + margins;
    tracing::trace!(
        target: targets::PLACEMENT,
        menu_height,
        control_height,
        margins,
        top,
        "menu top offset"
    );
    top
}

/// Resolved menu geometry, as the rendering collaborator consumes it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuPlacement {
    /// The menu renders above the control.
    pub is_top: bool,
    /// Offset from the control's top edge when placed above.
    pub top_offset: Option<f32>,
    /// Rendered menu height.
    pub height: f32,
}
