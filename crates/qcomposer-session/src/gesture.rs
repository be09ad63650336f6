//! Drag-to-connect state for CNOT targets.
//!
//! A gesture starts on a CNOT gate, follows the pointer while dragging,
//! and on release either names a destination qubit line or nothing.
//! Only a resolved release turns into an edit.

use qcomposer_ir::GateId;

/// A pointer position in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position, growing downwards.
    pub y: f64,
}

impl Point {
    /// Create a point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Vertical placement of qubit lines on the canvas.
///
/// Line `i` is centred at `top + i * pitch`; a point belongs to the line
/// whose centre is nearest, within half a pitch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineLayout {
    /// Centre of line 0.
    pub top: f64,
    /// Distance between neighbouring line centres.
    pub pitch: f64,
}

impl LineLayout {
    /// Create a layout.
    pub fn new(top: f64, pitch: f64) -> Self {
        Self { top, pitch }
    }

    /// Line under `y`, if it is one of `qubit_count` lines.
    pub fn line_at(&self, y: f64, qubit_count: usize) -> Option<usize> {
        if self.pitch.is_nan() || self.pitch <= 0.0 {
            return None;
        }
        let index = ((y - self.top) / self.pitch).round();
        if !index.is_finite() || index < 0.0 {
            return None;
        }
        let index = index as usize;
        (index < qubit_count).then_some(index)
    }

    /// Centre of line `index`.
    pub fn line_y(&self, index: usize) -> f64 {
        self.top + index as f64 * self.pitch
    }
}

/// An in-progress drag from a CNOT gate.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectGesture {
    gate: GateId,
    start: Point,
    cursor: Point,
}

impl ConnectGesture {
    /// Start dragging from `gate` at `start`.
    pub fn new(gate: GateId, start: Point) -> Self {
        Self {
            gate,
            start,
            cursor: start,
        }
    }

    /// The gate being connected.
    pub fn gate(&self) -> GateId {
        self.gate
    }

    /// Where the drag began.
    pub fn start(&self) -> Point {
        self.start
    }

    /// Where the pointer is now.
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// Follow the pointer.
    pub fn move_to(&mut self, point: Point) {
        self.cursor = point;
    }

    /// Destination line for a release at the current cursor.
    ///
    /// `None` when the cursor is off every line or over `source` itself.
    pub fn resolve(&self, layout: &LineLayout, source: usize, qubit_count: usize) -> Option<usize> {
        layout
            .line_at(self.cursor.y, qubit_count)
            .filter(|&line| line != source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_at_snaps_to_nearest() {
        let layout = LineLayout::new(20.0, 40.0);
        assert_eq!(layout.line_at(20.0, 3), Some(0));
        assert_eq!(layout.line_at(5.0, 3), Some(0));
        assert_eq!(layout.line_at(55.0, 3), Some(1));
        assert_eq!(layout.line_at(100.0, 3), Some(2));
        assert_eq!(layout.line_at(-10.0, 3), None);
        assert_eq!(layout.line_at(140.0, 3), None);
        assert_eq!(layout.line_y(2), 100.0);
    }

    #[test]
    fn test_degenerate_layout() {
        assert_eq!(LineLayout::new(0.0, 0.0).line_at(0.0, 3), None);
        assert_eq!(LineLayout::new(0.0, 10.0).line_at(f64::NAN, 3), None);
    }

    #[test]
    fn test_resolve_ignores_source_line() {
        let layout = LineLayout::new(0.0, 10.0);
        let mut gesture = ConnectGesture::new(GateId::fresh(), Point::new(5.0, 0.0));
        assert_eq!(gesture.resolve(&layout, 0, 3), None);

        gesture.move_to(Point::new(5.0, 21.0));
        assert_eq!(gesture.cursor(), Point::new(5.0, 21.0));
        assert_eq!(gesture.resolve(&layout, 0, 3), Some(2));

        gesture.move_to(Point::new(5.0, 300.0));
        assert_eq!(gesture.resolve(&layout, 0, 3), None);
    }
}
