//! Placement of the pinned copy of the timezone header.

/// Vertical band (screen coordinates) the header copy occupies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StickyBand {
    pub top: f32,
    pub height: f32,
}

/// Where to pin the header copy, if at all.
///
/// `header_top` is the real header's current top edge, `grid_bottom` the
/// bottom edge of the grid it labels, `viewport_top` the top of the visible
/// area. The copy appears once the real header has scrolled above the
/// viewport and is clipped so it never hangs past the grid.
pub fn sticky_header_band(
    header_top: f32,
    header_height: f32,
    grid_bottom: f32,
    viewport_top: f32,
) -> Option<StickyBand> {
    if header_top >= viewport_top || viewport_top >= grid_bottom {
        return None;
    }
    let height = header_height.min(grid_bottom - viewport_top);
    (height > 0.0).then_some(StickyBand {
        top: viewport_top,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_while_header_visible() {
        assert_eq!(sticky_header_band(120.0, 40.0, 900.0, 100.0), None);
        assert_eq!(sticky_header_band(100.0, 40.0, 900.0, 100.0), None);
    }

    #[test]
    fn test_pinned_after_header_scrolls_out() {
        assert_eq!(
            sticky_header_band(20.0, 40.0, 900.0, 100.0),
            Some(StickyBand { top: 100.0, height: 40.0 })
        );
    }

    #[test]
    fn test_clipped_at_grid_bottom() {
        assert_eq!(
            sticky_header_band(-500.0, 40.0, 125.0, 100.0),
            Some(StickyBand { top: 100.0, height: 25.0 })
        );
        assert_eq!(sticky_header_band(-500.0, 40.0, 90.0, 100.0), None);
    }
}
