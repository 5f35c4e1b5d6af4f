//! Easing curve for menu animations.
//!
//! The scroll-into-view animation maps linear progress (0.0 to 1.0) through a
//! cubic ease-out: it moves the scroll container quickly at first and settles
//! gently on the target.

/// Cubic ease-out. Progress outside `0.0..=1.0` is clamped first.
///
/// ```
/// use horizon_select::animation::ease_out_cubic;
///
/// assert_eq!(ease_out_cubic(0.0), 0.0);
/// assert!(ease_out_cubic(0.5) > 0.5);
/// assert_eq!(ease_out_cubic(1.0), 1.0);
/// ```
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Interpolate from `start` to `end` along the cubic ease-out curve.
#[inline]
pub fn lerp_eased(start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * ease_out_cubic(t)
}
