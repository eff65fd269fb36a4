//! Tab drag-to-reorder.
//!
//! A press-and-hold arms drag mode; while dragging, the tab's horizontal
//! travel is clamped to the tab strip and sibling tabs shift out of the way
//! once the dragged tab's edge crosses their midpoint. All of it is
//! cosmetic until release, which commits a single array move.
//!
//! Geometry comes from the host (the strip's left edge, the add-button's
//! left edge, and one rect per tab); the math here is pure.

use std::time::Duration;

use web_time::Instant;

/// Horizontal extent of one tab in the strip.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TabRect {
    pub left: f64,
    pub width: f64,
}

impl TabRect {
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    fn midpoint(&self) -> f64 {
        self.left + self.width / 2.0
    }
}

/// Tab strip geometry at drag time.
#[derive(Clone, Debug)]
pub struct StripGeometry {
    /// Left edge of the tab strip; tabs cannot travel before it.
    pub strip_left: f64,
    /// Left edge of the "add tab" control; tabs cannot travel past it.
    pub add_button_left: f64,
    /// One rect per tab, in order.
    pub tabs: Vec<TabRect>,
}

/// One visual frame of an active drag.
#[derive(Clone, Debug, PartialEq)]
pub struct DragFrame {
    /// Clamped horizontal offset of the dragged tab.
    pub dragged_offset: f64,
    /// Cosmetic shift per sibling tab (zero for the dragged tab itself).
    pub sibling_offsets: Vec<f64>,
    /// Index the tab would land at if released now.
    pub position: usize,
}

/// Committed outcome of a released drag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DragCommit {
    pub from: usize,
    pub to: usize,
    /// False when the press was released before the hold delay: the press
    /// was a plain click, not a drag.
    pub dragged: bool,
}

/// An in-progress tab press/drag.
#[derive(Debug)]
pub struct TabDrag {
    x_origin: f64,
    l_origin: f64,
    r_origin: f64,
    index: usize,
    position: usize,
    pressed_at: Instant,
    hold: Duration,
    armed: bool,
}

impl TabDrag {
    /// Begin tracking a press on a tab. Returns `None` when there is
    /// nothing to reorder (fewer than two tabs) or the index is bogus.
    pub fn press(
        index: usize,
        pointer_x: f64,
        geometry: &StripGeometry,
        now: Instant,
        hold: Duration,
    ) -> Option<TabDrag> {
        if geometry.tabs.len() < 2 {
            return None;
        }
        let rect = geometry.tabs.get(index)?;
        Some(TabDrag {
            x_origin: pointer_x,
            l_origin: rect.left,
            r_origin: rect.right(),
            index,
            position: index,
            pressed_at: now,
            hold,
            armed: false,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether the hold delay has elapsed and the press acts as a drag.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Pointer moved. Returns the visual frame to apply, or `None` while
    /// the press has not been held long enough to arm.
    pub fn drag_to(
        &mut self,
        pointer_x: f64,
        now: Instant,
        geometry: &StripGeometry,
    ) -> Option<DragFrame> {
        if !self.armed {
            if now.duration_since(self.pressed_at) < self.hold {
                return None;
            }
            self.armed = true;
        }

        let delta = pointer_x - self.x_origin;
        let distance = if self.l_origin + delta <= geometry.strip_left {
            geometry.strip_left - self.l_origin
        } else if self.r_origin + delta >= geometry.add_button_left {
            geometry.add_button_left - self.r_origin
        } else {
            delta
        };

        let width = self.r_origin - self.l_origin;
        let left = self.l_origin + distance;
        let right = self.r_origin + distance;

        if let Some(position) = self.crossed_position(left, right, width, geometry) {
            self.position = position;
        }

        let sibling_offsets = (0..geometry.tabs.len())
            .map(|i| {
                if self.position > self.index && i > self.index && i <= self.position {
                    -width
                } else if self.position < self.index && i >= self.position && i < self.index {
                    width
                } else {
                    0.0
                }
            })
            .collect();

        Some(DragFrame {
            dragged_offset: distance,
            sibling_offsets,
            position: self.position,
        })
    }

    /// Release the press: the final order is decided here, once.
    pub fn release(self) -> DragCommit {
        DragCommit {
            from: self.index,
            to: if self.armed { self.position } else { self.index },
            dragged: self.armed,
        }
    }

    /// Half-width crossing heuristic: a sibling yields its slot once the
    /// dragged tab's leading edge crosses the sibling's midpoint.
    fn crossed_position(
        &self,
        left: f64,
        right: f64,
        width: f64,
        geometry: &StripGeometry,
    ) -> Option<usize> {
        let half = width / 2.0;
        for (i, sibling) in geometry.tabs.iter().enumerate() {
            if i == self.index {
                continue;
            }

            if left > sibling.left && left < sibling.right() && sibling.right() - left > half {
                return Some(if i > self.index { i - 1 } else { i });
            }

            if right > sibling.left && right < sibling.right() && sibling.right() - right < half {
                return Some(if i > self.index { i } else { i + 1 });
            }
        }
        None
    }
}

/// Move one element of a vector from `from` to `to`, shifting the rest.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from == to || from >= items.len() || to >= items.len() {
        return;
    }
    let item = items.remove(from);
    items.insert(to, item);
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOLD: Duration = Duration::from_millis(300);

    fn strip(tab_count: usize) -> StripGeometry {
        // Uniform 100px tabs starting at the strip's left edge, with the
        // add button immediately after the last tab.
        StripGeometry {
            strip_left: 0.0,
            add_button_left: tab_count as f64 * 100.0,
            tabs: (0..tab_count)
                .map(|i| TabRect::new(i as f64 * 100.0, 100.0))
                .collect(),
        }
    }

    #[test]
    fn test_press_needs_two_tabs() {
        let now = Instant::now();
        assert!(TabDrag::press(0, 50.0, &strip(1), now, HOLD).is_none());
        assert!(TabDrag::press(0, 50.0, &strip(2), now, HOLD).is_some());
        assert!(TabDrag::press(5, 50.0, &strip(2), now, HOLD).is_none());
    }

    #[test]
    fn test_quick_release_is_a_click_not_a_drag() {
        let now = Instant::now();
        let mut drag = TabDrag::press(0, 50.0, &strip(3), now, HOLD).unwrap();
        assert!(drag.drag_to(80.0, now + Duration::from_millis(100), &strip(3)).is_none());

        let commit = drag.release();
        assert!(!commit.dragged);
        assert_eq!(commit.to, 0);
    }

    #[test]
    fn test_hold_arms_drag() {
        let now = Instant::now();
        let geometry = strip(3);
        let mut drag = TabDrag::press(0, 50.0, &geometry, now, HOLD).unwrap();

        let frame = drag
            .drag_to(60.0, now + HOLD, &geometry)
            .expect("armed after hold");
        assert_eq!(frame.dragged_offset, 10.0);
        assert!(drag.is_armed());
    }

    #[test]
    fn test_clamps_to_strip_start_and_add_button() {
        let now = Instant::now();
        let geometry = strip(3);

        let mut drag = TabDrag::press(0, 50.0, &geometry, now, HOLD).unwrap();
        let frame = drag.drag_to(-500.0, now + HOLD, &geometry).unwrap();
        assert_eq!(frame.dragged_offset, 0.0);

        let frame = drag.drag_to(5000.0, now + HOLD, &geometry).unwrap();
        // Tab 0 can travel at most to the add button: 300 - 100 = 200.
        assert_eq!(frame.dragged_offset, 200.0);
    }

    #[test]
    fn test_half_width_crossing_shifts_siblings() {
        let now = Instant::now();
        let geometry = strip(3);
        let mut drag = TabDrag::press(0, 50.0, &geometry, now, HOLD).unwrap();
        let armed = now + HOLD;

        // Right edge at 140: not yet past tab 1's midpoint (150).
        let frame = drag.drag_to(90.0, armed, &geometry).unwrap();
        assert_eq!(frame.position, 0);
        assert_eq!(frame.sibling_offsets, vec![0.0, 0.0, 0.0]);

        // Right edge at 160: crossed tab 1's midpoint; tab 1 shifts left.
        let frame = drag.drag_to(110.0, armed, &geometry).unwrap();
        assert_eq!(frame.position, 1);
        assert_eq!(frame.sibling_offsets, vec![0.0, -100.0, 0.0]);

        // Right edge at 260: crossed tab 2's midpoint as well.
        let frame = drag.drag_to(210.0, armed, &geometry).unwrap();
        assert_eq!(frame.position, 2);
        assert_eq!(frame.sibling_offsets, vec![0.0, -100.0, -100.0]);
    }

    #[test]
    fn test_dragging_left_shifts_siblings_right() {
        let now = Instant::now();
        let geometry = strip(3);
        let mut drag = TabDrag::press(2, 250.0, &geometry, now, HOLD).unwrap();
        let armed = now + HOLD;

        // Left edge at 140: crossed tab 1's midpoint (150) moving left.
        let frame = drag.drag_to(190.0, armed, &geometry).unwrap();
        assert_eq!(frame.position, 1);
        assert_eq!(frame.sibling_offsets, vec![0.0, 100.0, 0.0]);

        // Left edge at 40: crossed tab 0's midpoint.
        let frame = drag.drag_to(90.0, armed, &geometry).unwrap();
        assert_eq!(frame.position, 0);
        assert_eq!(frame.sibling_offsets, vec![100.0, 100.0, 0.0]);
    }

    #[test]
    fn test_release_commits_final_position_once() {
        let now = Instant::now();
        let geometry = strip(3);
        let mut drag = TabDrag::press(0, 50.0, &geometry, now, HOLD).unwrap();
        drag.drag_to(210.0, now + HOLD, &geometry).unwrap();

        let commit = drag.release();
        assert!(commit.dragged);
        assert_eq!((commit.from, commit.to), (0, 2));

        let mut items = vec!["a", "b", "c"];
        move_item(&mut items, commit.from, commit.to);
        assert_eq!(items, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_move_item_bounds() {
        let mut items = vec![1, 2, 3];
        move_item(&mut items, 1, 1);
        assert_eq!(items, vec![1, 2, 3]);
        move_item(&mut items, 9, 0);
        assert_eq!(items, vec![1, 2, 3]);
        move_item(&mut items, 2, 0);
        assert_eq!(items, vec![3, 1, 2]);
    }
}
