//! Menu height and placement state across open/close cycles.

use std::fmt;
use std::sync::Arc;

use horizon_select_core::logging::targets;
use horizon_select_core::{FrameId, FrameScheduler};

use crate::config::MenuPosition;
use crate::geometry::{ElementHandle, GeometryProvider};

use super::placement::{
    MenuPlacement, calculate_menu_top, menu_fits_below, resolve_menu_top_position,
};
use super::scroll::{ScrollAnimation, ScrollDecision, scroll_menu_into_view_on_open};

/// The host elements the engine measures.
#[derive(Clone)]
pub struct MenuGeometry {
    pub provider: Arc<dyn GeometryProvider>,
    /// The menu panel.
    pub menu: ElementHandle,
    /// The control the menu anchors to.
    pub control: ElementHandle,
}

impl fmt::Debug for MenuGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuGeometry")
            .field("menu", &self.menu)
            .field("control", &self.control)
            .finish_non_exhaustive()
    }
}

/// Settings read when the menu opens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpenOptions {
    pub is_menu_portaled: bool,
    pub scroll_menu_into_view: bool,
    pub menu_scroll_duration: f32,
}

/// Result of starting an open transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenProgress {
    /// The menu is open; announce it now.
    Opened,
    /// A scroll animation runs first; the menu opens when it completes.
    Scrolling,
}

/// Result of delivering a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameProgress {
    /// Not the frame the positioner waits for.
    Stale,
    /// The animation advanced and requested another frame.
    Continue,
    /// The animation completed and the menu is open.
    Opened,
}

/// Tracks menu height, top/bottom placement and the scroll animation.
#[derive(Debug)]
pub struct MenuPositioner {
    menu_height_default: f32,
    menu_height: f32,
    is_menu_top_position: bool,
    reset_menu_height: bool,
    animation: Option<ScrollAnimation>,
    awaiting_frame: Option<FrameId>,
}

impl MenuPositioner {
    /// Create a positioner whose menu height starts at `menu_height_default`.
    pub fn new(menu_height_default: f32) -> Self {
        Self {
            menu_height_default,
            menu_height: menu_height_default,
            is_menu_top_position: false,
            reset_menu_height: false,
            animation: None,
            awaiting_frame: None,
        }
    }

    /// Current menu height, including any clamp applied on open.
    pub fn menu_height(&self) -> f32 {
        self.menu_height
    }

    /// Rendered menu height: the current height capped at `max_height`.
    pub fn effective_height(&self, max_height: f32) -> f32 {
        self.menu_height.min(max_height)
    }

    pub fn is_menu_top_position(&self) -> bool {
        self.is_menu_top_position
    }

    /// Whether a scroll animation is in flight.
    pub fn is_scrolling(&self) -> bool {
        self.animation.is_some()
    }

    /// The frame the in-flight animation waits for.
    pub fn awaiting_frame(&self) -> Option<FrameId> {
        self.awaiting_frame
    }

    /// Change the height the menu returns to after a clamp is released.
    ///
    /// Applied immediately unless the open menu is currently clamped.
    pub fn set_default_height(&mut self, height: f32) {
        self.menu_height_default = height;
        if !self.reset_menu_height {
            self.menu_height = height;
        }
    }

    /// Recompute top/bottom placement.
    pub fn update_placement(&mut self, position: MenuPosition, geometry: Option<&MenuGeometry>) {
        self.is_menu_top_position = resolve_menu_top_position(position, || {
            geometry.is_none_or(|g| menu_fits_below(g.provider.as_ref(), Some(g.menu)))
        });
        let is_top = self.is_menu_top_position;
        tracing::trace!(target: targets::PLACEMENT, ?position, is_top, "menu placement resolved");
    }

    /// Run the Closed to Open transition.
    ///
    /// Menus that are portaled or placed above the control never scroll.
    pub fn open(
        &mut self,
        geometry: Option<&MenuGeometry>,
        frames: Option<&dyn FrameScheduler>,
        options: OpenOptions,
    ) -> OpenProgress {
        self.stop_animation(frames);

        let should_scroll = !self.is_menu_top_position && !options.is_menu_portaled;
        let Some(geometry) = geometry.filter(|_| should_scroll) else {
            self.apply_open(None);
            return OpenProgress::Opened;
        };

        let provider = geometry.provider.as_ref();
        match scroll_menu_into_view_on_open(
            provider,
            Some(geometry.menu),
            options.scroll_menu_into_view,
        ) {
            ScrollDecision::Open { available_space } => {
                self.apply_open(available_space);
                OpenProgress::Opened
            }
            ScrollDecision::Animate {
                container,
                from,
                to,
            } => {
                let Some(frames) = frames else {
                    // Nothing drives frames: jump straight to the target.
                    provider.set_scroll_top(container, to);
                    self.apply_open(None);
                    return OpenProgress::Opened;
                };
                let duration = options.menu_scroll_duration;
                self.animation = Some(ScrollAnimation::new(container, from, to, duration));
                self.awaiting_frame = Some(frames.request_frame());
                OpenProgress::Scrolling
            }
        }
    }

    /// Step the animation for a delivered frame.
    pub fn handle_frame(
        &mut self,
        id: FrameId,
        geometry: Option<&MenuGeometry>,
        frames: Option<&dyn FrameScheduler>,
    ) -> FrameProgress {
        if self.awaiting_frame != Some(id) {
            tracing::trace!(target: targets::SCROLL, ?id, "ignoring stale frame");
            return FrameProgress::Stale;
        }
        self.awaiting_frame = None;

        let (Some(animation), Some(geometry)) = (self.animation.as_mut(), geometry) else {
            self.animation = None;
            self.apply_open(None);
            return FrameProgress::Opened;
        };

        if animation.step(geometry.provider.as_ref()) {
            self.animation = None;
            self.apply_open(None);
            return FrameProgress::Opened;
        }

        match frames {
            Some(frames) => {
                self.awaiting_frame = Some(frames.request_frame());
                FrameProgress::Continue
            }
            None => {
                geometry
                    .provider
                    .set_scroll_top(animation.container(), animation.target());
                self.animation = None;
                self.apply_open(None);
                FrameProgress::Opened
            }
        }
    }

    /// Run the Open to Closed transition.
    pub fn close(&mut self, frames: Option<&dyn FrameScheduler>) {
        self.stop_animation(frames);
        if self.reset_menu_height {
            self.reset_menu_height = false;
            self.menu_height = self.menu_height_default;
        }
    }

    /// Abandon any in-flight animation without touching the height.
    pub fn stop_animation(&mut self, frames: Option<&dyn FrameScheduler>) {
        self.animation = None;
        if let Some(id) = self.awaiting_frame.take()
            && let Some(frames) = frames
            && frames.cancel_frame(id).is_err()
        {
            tracing::trace!(target: targets::SCROLL, ?id, "frame already delivered");
        }
    }

    /// Resolved placement for rendering.
    pub fn placement(&self, geometry: Option<&MenuGeometry>, max_height: f32) -> MenuPlacement {
        let height = self.effective_height(max_height);
        let top_offset = self.is_menu_top_position.then(|| match geometry {
            Some(g) => {
                calculate_menu_top(g.provider.as_ref(), height, Some(g.menu), Some(g.control))
            }
            None => -height.abs(),
        });

        MenuPlacement {
            is_top: self.is_menu_top_position,
            top_offset,
            height,
        }
    }

    fn apply_open(&mut self, available_space: Option<f32>) {
        // A zero space is treated as "no override".
        if let Some(space) = available_space
            && space != 0.0
        {
            self.reset_menu_height = true;
            self.menu_height = space.max(0.0);
        }
        tracing::debug!(target: targets::PLACEMENT, menu_height = self.menu_height, "menu opened");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{ComputedStyle, Rect, StaticGeometry};
    use horizon_select_core::ManualFrameScheduler;

    const OPEN: OpenOptions = OpenOptions {
        is_menu_portaled: false,
        scroll_menu_into_view: true,
        menu_scroll_duration: 20.0,
    };

    fn geometry(
        menu_top: f32,
        scroller_height: f32,
    ) -> (Arc<StaticGeometry>, MenuGeometry, ElementHandle) {
        let provider = Arc::new(StaticGeometry::new(600.0));
        let scroller = provider.add_element(
            None,
            Rect::new(0.0, 0.0, 400.0, scroller_height),
            ComputedStyle::scroll_container(),
        );
        let control = provider.add_element(
            Some(scroller),
            Rect::new(0.0, menu_top - 38.0, 300.0, 38.0),
            ComputedStyle::default(),
        );
        let menu = provider.add_element(
            Some(scroller),
            Rect::new(0.0, menu_top, 300.0, 300.0),
            ComputedStyle::default(),
        );
        let binding = MenuGeometry {
            provider: provider.clone(),
            menu,
            control,
        };
        (provider, binding, scroller)
    }

    #[test]
    fn test_open_without_geometry() {
        let mut positioner = MenuPositioner::new(300.0);
        assert_eq!(positioner.open(None, None, OPEN), OpenProgress::Opened);
        assert_eq!(positioner.menu_height(), 300.0);
    }

    #[test]
    fn test_clamped_height_resets_on_close() {
        let (_, binding, _) = geometry(500.0, 700.0);
        let mut positioner = MenuPositioner::new(300.0);

        assert_eq!(
            positioner.open(Some(&binding), None, OPEN),
            OpenProgress::Opened
        );
        assert_eq!(positioner.menu_height(), 200.0);
        assert_eq!(positioner.effective_height(300.0), 200.0);

        positioner.close(None);
        assert_eq!(positioner.menu_height(), 300.0);
    }

    #[test]
    fn test_animation_runs_on_frames() {
        let (provider, binding, scroller) = geometry(500.0, 1200.0);
        let frames = ManualFrameScheduler::new();
        let mut positioner = MenuPositioner::new(300.0);

        assert_eq!(
            positioner.open(Some(&binding), Some(&frames), OPEN),
            OpenProgress::Scrolling
        );
        assert!(positioner.is_scrolling());

        let mut steps = 0;
        loop {
            let pending = frames.take_pending();
            assert_eq!(pending.len(), 1);
            steps += 1;
            match positioner.handle_frame(pending[0], Some(&binding), Some(&frames)) {
                FrameProgress::Continue => continue,
                FrameProgress::Opened => break,
                FrameProgress::Stale => panic!("frame should be current"),
            }
        }

        assert_eq!(steps, 4);
        assert_eq!(provider.scroll_top(scroller), 200.0);
        assert!(!positioner.is_scrolling());
        assert_eq!(frames.pending_count(), 0);
    }

    #[test]
    fn test_close_cancels_animation() {
        let (provider, binding, scroller) = geometry(500.0, 1200.0);
        let frames = ManualFrameScheduler::new();
        let mut positioner = MenuPositioner::new(300.0);

        positioner.open(Some(&binding), Some(&frames), OPEN);
        let id = positioner.awaiting_frame().unwrap();
        positioner.close(Some(&frames));

        assert!(!positioner.is_scrolling());
        assert!(!frames.is_pending(id));
        assert_eq!(
            positioner.handle_frame(id, Some(&binding), Some(&frames)),
            FrameProgress::Stale
        );
        assert_eq!(provider.scroll_top(scroller), 0.0);
    }

    #[test]
    fn test_top_position_skips_scrolling() {
        let (_, binding, _) = geometry(500.0, 1200.0);
        let frames = ManualFrameScheduler::new();
        let mut positioner = MenuPositioner::new(300.0);

        positioner.update_placement(MenuPosition::Top, Some(&binding));
        assert!(positioner.is_menu_top_position());
        assert_eq!(
            positioner.open(Some(&binding), Some(&frames), OPEN),
            OpenProgress::Opened
        );
        assert_eq!(frames.pending_count(), 0);

        let placement = positioner.placement(Some(&binding), 300.0);
        assert!(placement.is_top);
        assert_eq!(placement.top_offset, Some(-338.0));
    }

    #[test]
    fn test_portaled_skips_scrolling() {
        let (_, binding, _) = geometry(500.0, 700.0);
        let mut positioner = MenuPositioner::new(300.0);
        let options = OpenOptions {
            is_menu_portaled: true,
            ..OPEN
        };
        assert_eq!(
            positioner.open(Some(&binding), None, options),
            OpenProgress::Opened
        );
        assert_eq!(positioner.menu_height(), 300.0);
    }

    #[test]
    fn test_auto_placement() {
        let (_, binding, _) = geometry(500.0, 600.0);
        let mut positioner = MenuPositioner::new(300.0);
        positioner.update_placement(MenuPosition::Auto, Some(&binding));
        assert!(positioner.is_menu_top_position());

        positioner.update_placement(MenuPosition::Auto, None);
        assert!(!positioner.is_menu_top_position());
        assert_eq!(positioner.placement(None, 300.0).top_offset, None);
    }

    #[test]
    fn test_default_height_waits_for_clamp_release() {
        let (_, binding, _) = geometry(500.0, 700.0);
        let mut positioner = MenuPositioner::new(300.0);
        positioner.set_default_height(250.0);
        assert_eq!(positioner.menu_height(), 250.0);

        positioner.open(Some(&binding), None, OPEN);
        assert_eq!(positioner.menu_height(), 200.0);
        positioner.set_default_height(180.0);
        assert_eq!(positioner.menu_height(), 200.0);

        positioner.close(None);
        assert_eq!(positioner.menu_height(), 180.0);
    }
}
