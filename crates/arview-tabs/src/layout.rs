//! Pure geometry for the content inset, overlays and the chat panel.
//!
//! All values are logical pixels with the origin at the window's top-left.

use arview_common::{Margins, Rect};
use serde::{Deserialize, Serialize};

/// Upper bound on centered overlay width.
pub const MAX_OVERLAY_WIDTH: f64 = 600.0;

/// Gap between the chat panel and the inner rect edge.
pub const CHAT_EDGE_GAP: f64 = 16.0;

/// Bounds of the content surface.
pub fn inset_bounds(width: f64, height: f64, margins: &Margins, tab_bar_height: f64) -> Rect {
    Rect::new(
        margins.left,
        margins.top + tab_bar_height,
        (width - margins.left - margins.right).max(0.0),
        (height - margins.top - margins.bottom - tab_bar_height).max(0.0),
    )
}

/// The window minus its margins.
pub fn inner_rect(width: f64, height: f64, margins: &Margins) -> Rect {
    inset_bounds(width, height, margins, 0.0)
}

/// Full-width strip at the top of the window.
pub fn tab_bar_rect(width: f64, height: f64) -> Rect {
    Rect::new(0.0, 0.0, width.max(0.0), height.max(0.0))
}

/// Command palette: fixed size, horizontally centered, `top_offset` down.
pub fn palette_rect(window_width: f64, width: f64, height: f64, top_offset: f64) -> Rect {
    let width = width.min(window_width).max(0.0);
    Rect::new(((window_width - width) / 2.0).max(0.0), top_offset, width, height)
}

/// Quick list and workspace switcher: `width_percent` of the window capped
/// at [`MAX_OVERLAY_WIDTH`], centered on both axes.
pub fn centered_overlay_rect(
    window_width: f64,
    window_height: f64,
    width_percent: f64,
    overlay_height: f64,
) -> Rect {
    let width = (window_width * width_percent).min(MAX_OVERLAY_WIDTH).max(0.0);
    let height = overlay_height.min(window_height).max(0.0);
    Rect::new(
        ((window_width - width) / 2.0).max(0.0),
        ((window_height - height) / 2.0).max(0.0),
        width,
        height,
    )
}

/// How the chat panel follows window resizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinMode {
    /// Free floating; keeps its rect.
    #[default]
    None,
    /// Keeps its offset from the inner top-right corner.
    Fixed,
    /// Snaps to the nearest candidate region.
    Smart,
}

/// First placement of the chat panel inside `inner`.
pub fn chat_initial_rect(inner: Rect) -> Rect {
    let width = (inner.width * 0.35).round().max(380.0).min(480.0);
    let height = (inner.height - 80.0).min(720.0).max(420.0);
    Rect::new(
        inner.x + inner.width - width - CHAT_EDGE_GAP,
        inner.y + CHAT_EDGE_GAP,
        width,
        height,
    )
}

/// Regions the chat panel may snap to: the full rect, four halves,
/// four quadrants and four quarter-width side strips.
pub fn snap_candidates(inner: Rect) -> Vec<Rect> {
    let Rect {
        x,
        y,
        width: w,
        height: h,
    } = inner;
    let (hw, hh, qw) = (w / 2.0, h / 2.0, w / 4.0);

    vec![
        inner,
        // halves
        Rect::new(x, y, hw, h),
        Rect::new(x + hw, y, hw, h),
        Rect::new(x, y, w, hh),
        Rect::new(x, y + hh, w, hh),
        // quadrants
        Rect::new(x, y, hw, hh),
        Rect::new(x + hw, y, hw, hh),
        Rect::new(x, y + hh, hw, hh),
        Rect::new(x + hw, y + hh, hw, hh),
        // side strips
        Rect::new(x, y, qw, hh),
        Rect::new(x, y + hh, qw, hh),
        Rect::new(x + w - qw, y, qw, hh),
        Rect::new(x + w - qw, y + hh, qw, hh),
    ]
}

/// The candidate whose center is closest to the center of `current`.
pub fn smart_snap(current: Rect, inner: Rect) -> Rect {
    let (cx, cy) = current.center();
    snap_candidates(inner)
        .into_iter()
        .min_by(|a, b| {
            distance_sq(a.center(), (cx, cy)).total_cmp(&distance_sq(b.center(), (cx, cy)))
        })
        .unwrap_or(inner)
}

fn distance_sq(a: (f64, f64), b: (f64, f64)) -> f64 {
    let (dx, dy) = (a.0 - b.0, a.1 - b.1);
    dx * dx + dy * dy
}

#[cfg(test)]
mod tests {
    use super::*;

    fn margins(top: f64, right: f64, bottom: f64, left: f64) -> Margins {
        Margins {
            top,
            right,
            bottom,
            left,
        }
    }

    #[test]
    fn inset_without_tab_bar() {
        let r = inset_bounds(800.0, 600.0, &margins(10.0, 20.0, 30.0, 40.0), 0.0);
        assert_eq!(r, Rect::new(40.0, 10.0, 740.0, 560.0));
    }

    #[test]
    fn inset_with_tab_bar() {
        let r = inset_bounds(800.0, 600.0, &Margins::default(), 32.0);
        assert_eq!(r, Rect::new(0.0, 32.0, 800.0, 568.0));
    }

    #[test]
    fn inset_never_negative() {
        let r = inset_bounds(50.0, 40.0, &margins(30.0, 30.0, 30.0, 30.0), 10.0);
        assert_eq!(r.width, 0.0);
        assert_eq!(r.height, 0.0);
    }

    #[test]
    fn palette_is_centered() {
        let r = palette_rect(1000.0, 600.0, 60.0, 120.0);
        assert_eq!(r, Rect::new(200.0, 120.0, 600.0, 60.0));
    }

    #[test]
    fn overlay_width_is_capped() {
        let r = centered_overlay_rect(2000.0, 1000.0, 0.6, 400.0);
        assert_eq!(r.width, 600.0);
        assert_eq!(r.x, 700.0);
        assert_eq!(r.y, 300.0);

        let r = centered_overlay_rect(800.0, 1000.0, 0.5, 400.0);
        assert_eq!(r.width, 400.0);
    }

    #[test]
    fn chat_initial_size_clamps() {
        let inner = Rect::new(0.0, 0.0, 1000.0, 900.0);
        let r = chat_initial_rect(inner);
        assert_eq!(r.width, 380.0);
        assert_eq!(r.height, 720.0);
        assert_eq!(r.x, 1000.0 - 380.0 - 16.0);
        assert_eq!(r.y, 16.0);

        let r = chat_initial_rect(Rect::new(0.0, 0.0, 1200.0, 400.0));
        assert_eq!(r.width, 420.0);
        assert_eq!(r.height, 420.0);

        let r = chat_initial_rect(Rect::new(0.0, 0.0, 3000.0, 400.0));
        assert_eq!(r.width, 480.0);
    }

    #[test]
    fn thirteen_candidates() {
        assert_eq!(snap_candidates(Rect::new(0.0, 0.0, 800.0, 600.0)).len(), 13);
    }

    #[test]
    fn smart_snap_picks_nearest_center() {
        let inner = Rect::new(0.0, 0.0, 800.0, 600.0);

        let near_top_right = Rect::new(560.0, 20.0, 200.0, 200.0);
        assert_eq!(
            smart_snap(near_top_right, inner),
            Rect::new(600.0, 0.0, 200.0, 300.0)
        );

        let centered = Rect::new(300.0, 200.0, 200.0, 200.0);
        assert_eq!(smart_snap(centered, inner), inner);
    }

    #[test]
    fn pin_mode_wire_names() {
        assert_eq!(serde_json::to_string(&PinMode::Smart).unwrap(), "\"smart\"");
        let mode: PinMode = serde_json::from_str("\"fixed\"").unwrap();
        assert_eq!(mode, PinMode::Fixed);
    }
}
