//! Miscellaneous utilities.

use tui::layout::Rect;

/// Returns true if `rect` contains the point at `x` and `y`.
pub fn rect_contains(rect: Rect, x: u16, y: u16) -> bool {
  rect.x <= x
    && x < rect.x.saturating_add(rect.width)
    && rect.y <= y
    && y < rect.y.saturating_add(rect.height)
}

/// Returns the index that keeps `cursor` inside a window of `height` rows
/// starting at `offset`.
pub fn scroll_to(offset: usize, cursor: usize, height: usize) -> usize {
  if height == 0 || cursor < offset {
    cursor
  } else if cursor >= offset + height {
    cursor + 1 - height
  } else {
    offset
  }
}
