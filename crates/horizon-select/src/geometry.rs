//! Geometry queries against the host's element tree.
//!
//! The placement calculator and the scroll-into-view animator never touch a
//! live element tree. They go through a [`GeometryProvider`], which answers
//! bounding-box, computed-style and scroll-offset questions about opaque
//! [`ElementHandle`]s. [`StaticGeometry`] is an in-memory provider for tests
//! and headless hosts.
//!
//! All rectangles are in viewport coordinates (y grows downward).

use std::collections::HashMap;

use parking_lot::Mutex;

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// A 2D size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    /// Create a new rectangle from origin and size.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point { x, y },
            size: Size { width, height },
        }
    }

    /// Top edge.
    #[inline]
    pub fn top(&self) -> f32 {
        self.origin.y
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.origin.x
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.height
    }
}

/// Opaque handle to an element owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementHandle(u64);

impl ElementHandle {
    /// Wrap a host-side element id.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The host-side element id.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// CSS-like positioning scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    #[default]
    Static,
    Relative,
    Absolute,
    Fixed,
    Sticky,
}

/// CSS-like overflow behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Clip,
    Auto,
    Scroll,
}

impl Overflow {
    /// Whether content overflowing in this mode can be scrolled to.
    pub fn is_scrollable(self) -> bool {
        matches!(self, Overflow::Auto | Overflow::Scroll)
    }
}

/// The subset of an element's computed style the engine reads.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ComputedStyle {
    pub position: Position,
    /// Shorthand `overflow`, consulted together with the per-axis values.
    pub overflow: Overflow,
    pub overflow_x: Overflow,
    pub overflow_y: Overflow,
    pub margin_top: f32,
    pub margin_bottom: f32,
}

impl ComputedStyle {
    /// A style with the given position and everything else at defaults.
    pub fn positioned(position: Position) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// A style whose vertical overflow is scrollable.
    pub fn scroll_container() -> Self {
        Self {
            overflow_y: Overflow::Auto,
            ..Self::default()
        }
    }

    /// Set both vertical margins.
    pub fn with_margins(mut self, top: f32, bottom: f32) -> Self {
        self.margin_top = top;
        self.margin_bottom = bottom;
        self
    }

    /// Whether any overflow axis scrolls.
    pub fn is_scrollable(&self) -> bool {
        self.overflow.is_scrollable()
            || self.overflow_y.is_scrollable()
            || self.overflow_x.is_scrollable()
    }
}

/// Read and scroll access to the host's element tree.
///
/// Queries against an element that is not (or no longer) mounted return
/// `None`; callers treat that as "no adjustment needed".
pub trait GeometryProvider: Send + Sync {
    /// Bounding rectangle of an element in viewport coordinates.
    fn bounding_rect(&self, element: ElementHandle) -> Option<Rect>;

    /// Computed style of an element.
    fn computed_style(&self, element: ElementHandle) -> Option<ComputedStyle>;

    /// Parent of an element, `None` at the root or for detached elements.
    fn parent(&self, element: ElementHandle) -> Option<ElementHandle>;

    /// The root (document) element, which scrolls the whole page.
    fn document_element(&self) -> ElementHandle;

    /// Height of the visible viewport.
    fn viewport_height(&self) -> f32;

    /// Current vertical scroll offset of an element.
    ///
    /// For the document element this is the page scroll offset.
    fn scroll_top(&self, element: ElementHandle) -> f32;

    /// Set the vertical scroll offset of an element.
    fn set_scroll_top(&self, element: ElementHandle, top: f32);
}

#[derive(Debug, Clone, Default)]
struct ElementGeometry {
    rect: Option<Rect>,
    style: ComputedStyle,
    parent: Option<ElementHandle>,
    scroll_top: f32,
}

#[derive(Debug, Default)]
struct Elements {
    map: HashMap<ElementHandle, ElementGeometry>,
    next_handle: u64,
}

/// An in-memory [`GeometryProvider`].
///
/// Elements are registered up front with fixed rectangles. Scroll offsets are
/// stored but do not move any rectangles.
#[derive(Debug)]
pub struct StaticGeometry {
    elements: Mutex<Elements>,
    document: ElementHandle,
    viewport_height: Mutex<f32>,
}

impl StaticGeometry {
    /// Create a geometry whose document element spans the viewport.
    pub fn new(viewport_height: f32) -> Self {
        let document = ElementHandle::new(0);
        let mut elements = Elements {
            map: HashMap::new(),
            next_handle: 1,
        };
        elements.map.insert(
            document,
            ElementGeometry {
                rect: Some(Rect::new(0.0, 0.0, 0.0, viewport_height)),
                ..ElementGeometry::default()
            },
        );

        Self {
            elements: Mutex::new(elements),
            document,
            viewport_height: Mutex::new(viewport_height),
        }
    }

    /// Register an element under `parent` (the document element if `None`).
    pub fn add_element(
        &self,
        parent: Option<ElementHandle>,
        rect: Rect,
        style: ComputedStyle,
    ) -> ElementHandle {
        let mut elements = self.elements.lock();
        let handle = ElementHandle::new(elements.next_handle);
        elements.next_handle += 1;
        elements.map.insert(
            handle,
            ElementGeometry {
                rect: Some(rect),
                style,
                parent: Some(parent.unwrap_or(self.document)),
                scroll_top: 0.0,
            },
        );
        handle
    }

    /// Replace an element's bounding rectangle.
    pub fn set_rect(&self, element: ElementHandle, rect: Rect) {
        if let Some(geometry) = self.elements.lock().map.get_mut(&element) {
            geometry.rect = Some(rect);
        }
    }

    /// Replace an element's computed style.
    pub fn set_style(&self, element: ElementHandle, style: ComputedStyle) {
        if let Some(geometry) = self.elements.lock().map.get_mut(&element) {
            geometry.style = style;
        }
    }

    /// Unmount an element. Later queries about it return `None`.
    pub fn detach(&self, element: ElementHandle) {
        self.elements.lock().map.remove(&element);
    }

    /// Change the viewport height (and the document element's height).
    pub fn set_viewport_height(&self, height: f32) {
        *self.viewport_height.lock() = height;
        if let Some(geometry) = self.elements.lock().map.get_mut(&self.document) {
            geometry.rect = Some(Rect::new(0.0, 0.0, 0.0, height));
        }
    }
}

impl GeometryProvider for StaticGeometry {
    fn bounding_rect(&self, element: ElementHandle) -> Option<Rect> {
        self.elements.lock().map.get(&element).and_then(|g| g.rect)
    }

    fn computed_style(&self, element: ElementHandle) -> Option<ComputedStyle> {
        self.elements.lock().map.get(&element).map(|g| g.style)
    }

    fn parent(&self, element: ElementHandle) -> Option<ElementHandle> {
        self.elements
            .lock()
            .map
            .get(&element)
            .and_then(|g| g.parent)
    }

    fn document_element(&self) -> ElementHandle {
        self.document
    }

    fn viewport_height(&self) -> f32 {
        *self.viewport_height.lock()
    }

    fn scroll_top(&self, element: ElementHandle) -> f32 {
        self.elements
            .lock()
            .map
            .get(&element)
            .map_or(0.0, |g| g.scroll_top)
    }

    fn set_scroll_top(&self, element: ElementHandle, top: f32) {
        if let Some(geometry) = self.elements.lock().map.get_mut(&element) {
            geometry.scroll_top = top;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(rect.top(), 20.0);
        assert_eq!(rect.bottom(), 70.0);
        assert_eq!(rect.left(), 10.0);
        assert_eq!(rect.height(), 50.0);
        assert_eq!(rect.width(), 100.0);
    }

    #[test]
    fn test_scrollable_style() {
        assert!(!ComputedStyle::default().is_scrollable());
        assert!(ComputedStyle::scroll_container().is_scrollable());

        let hidden = ComputedStyle {
            overflow: Overflow::Hidden,
            ..ComputedStyle::default()
        };
        assert!(!hidden.is_scrollable());
    }

    #[test]
    fn test_static_geometry_tree() {
        let geometry = StaticGeometry::new(600.0);
        let doc = geometry.document_element();
        assert_eq!(
            geometry.bounding_rect(doc).map(|r| r.height()),
            Some(600.0)
        );

        let panel = geometry.add_element(
            None,
            Rect::new(0.0, 0.0, 200.0, 400.0),
            ComputedStyle::scroll_container(),
        );
        let child = geometry.add_element(
            Some(panel),
            Rect::new(0.0, 10.0, 200.0, 30.0),
            ComputedStyle::default(),
        );
        assert_eq!(geometry.parent(child), Some(panel));
        assert_eq!(geometry.parent(panel), Some(doc));
        assert_eq!(geometry.parent(doc), None);

        geometry.set_scroll_top(panel, 25.0);
        assert_eq!(geometry.scroll_top(panel), 25.0);

        geometry.detach(child);
        assert_eq!(geometry.bounding_rect(child), None);
        assert_eq!(geometry.computed_style(child), None);
        assert_eq!(geometry.scroll_top(child), 0.0);
    }

    #[test]
    fn test_set_viewport_height() {
        let geometry = StaticGeometry::new(600.0);
        geometry.set_viewport_height(320.0);
        assert_eq!(geometry.viewport_height(), 320.0);
        let doc = geometry.document_element();
        assert_eq!(
            geometry.bounding_rect(doc).map(|r| r.height()),
            Some(320.0)
        );
    }
}
