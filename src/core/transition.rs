//! Vertical slide offsets for feed items.
//!
//! Items are stacked one container-height apart, with the current item at 0.
//! During a drag only the current item and its two neighbours follow the
//! finger; everything else is off-screen anyway.  All functions are pure, so
//! the on-screen position is always reproducible from state.

/// Offset of item `index` in the same units as `container_height`.
pub fn item_offset(
    index: usize,
    current_index: usize,
    drag_offset: f64,
    container_height: f64,
    is_dragging: bool,
) -> f64 {
    let height = sanitize(container_height);
    let drag = if drag_offset.is_finite() { drag_offset } else { 0.0 };

    if is_dragging {
        if index == current_index {
            return drag;
        } else if index == current_index + 1 {
            return height + drag;
        } else if index + 1 == current_index {
            return -height + drag;
        }
    }

    (index as f64 - current_index as f64) * height
}

/// The loading placeholder always sits one screen below the current item.
pub fn loading_offset(container_height: f64) -> f64 {
    sanitize(container_height)
}

/// Unmeasured or garbage heights collapse to zero so no offset is ever NaN.
pub(crate) fn sanitize(height: f64) -> f64 {
    if height.is_finite() && height > 0.0 {
        height
    } else {
        0.0
    }
}
