//! Pointer-to-cell mapping and drag painting

/// Map a pointer position in pixels to the cell under it, clamped onto a
/// `width` x `height` grid of `cell_size`-pixel cells.
pub fn cell_at(px: u32, py: u32, cell_size: u32, width: usize, height: usize) -> (usize, usize) {
    let cell_size = cell_size.max(1);
    let x = (px / cell_size) as usize;
    let y = (py / cell_size) as usize;
    (x.min(width.saturating_sub(1)), y.min(height.saturating_sub(1)))
}

/// One press-drag-release gesture.
///
/// The first cell pressed is toggled; every cell dragged over afterwards is
/// painted with the opposite of that cell's new value. The paint value lives
/// only as long as the gesture.
#[derive(Debug, PartialEq, Eq)]
pub struct DragGesture {
    paint: bool,
}

impl DragGesture {
    /// Start a gesture from the value the pressed cell was toggled to
    pub fn from_toggle(new_value: bool) -> Self {
        Self { paint: !new_value }
    }

    /// Value written to every cell the drag passes over
    pub fn paint(&self) -> bool {
        self.paint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_mapping() {
        assert_eq!(cell_at(0, 0, 20, 40, 40), (0, 0));
        assert_eq!(cell_at(19, 20, 20, 40, 40), (0, 1));
        assert_eq!(cell_at(399, 785, 20, 40, 40), (19, 39));
    }

    #[test]
    fn test_cell_mapping_clamps() {
        assert_eq!(cell_at(800, 810, 20, 40, 40), (39, 39));
        assert_eq!(cell_at(5000, 3, 20, 40, 30), (39, 0));
    }

    #[test]
    fn test_paint_polarity() {
        // Pressing a dead cell brings it to life, so the drag erases
        assert!(!DragGesture::from_toggle(true).paint());
        assert!(DragGesture::from_toggle(false).paint());
    }
}
