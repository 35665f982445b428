//! Coordinate conversion between layout rects and wry rects.

use arview_common::Rect;

/// Convert a layout `Rect` (f64 logical coords) to a wry `Rect`.
pub fn rect_to_wry(rect: &Rect) -> wry::Rect {
    wry::Rect {
        position: wry::dpi::Position::Logical(wry::dpi::LogicalPosition::new(rect.x, rect.y)),
        size: wry::dpi::Size::Logical(wry::dpi::LogicalSize::new(rect.width, rect.height)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(rect: wry::Rect) -> (f64, f64, f64, f64) {
        let (x, y) = match rect.position {
            wry::dpi::Position::Logical(pos) => (pos.x, pos.y),
            _ => panic!("Expected logical position"),
        };
        let (w, h) = match rect.size {
            wry::dpi::Size::Logical(size) => (size.width, size.height),
            _ => panic!("Expected logical size"),
        };
        (x, y, w, h)
    }

    #[test]
    fn inset_rect_converts_to_wry_rect() {
        let inset = Rect::new(0.0, 48.0, 1200.0, 744.0);
        assert_eq!(parts(rect_to_wry(&inset)), (0.0, 48.0, 1200.0, 744.0));
    }

    #[test]
    fn zero_rect_converts_correctly() {
        assert_eq!(parts(rect_to_wry(&Rect::ZERO)), (0.0, 0.0, 0.0, 0.0));
    }
}
