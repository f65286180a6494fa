//! Deterministic word placement for the cloud renderer.
//!
//! Words are laid out largest first along an Archimedean spiral from the
//! canvas centre, keeping the first position whose bounding box fits inside
//! the canvas without overlapping previously placed words. The walk is
//! fully deterministic: the same sequence of box sizes always lands in the
//! same spots.

/// Angle advanced per spiral step, in radians.
const STEP_RADIANS: f64 = 0.35;

/// Radial growth per radian.
const RADIUS_PER_RADIAN: f64 = 3.0;

/// Horizontal stretch so placement tracks the canvas aspect ratio.
const ASPECT: f64 = 1.6;

/// Walk length bound; beyond this the word is reported unplaceable.
const MAX_STEPS: usize = 4000;

/// Padding added around candidate boxes during collision tests.
const COLLISION_PAD: i32 = 2;

/// Axis-aligned box in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    /// Left edge.
    pub x0: i32,
    /// Top edge.
    pub y0: i32,
    /// Right edge (exclusive).
    pub x1: i32,
    /// Bottom edge (exclusive).
    pub y1: i32,
}

impl Rect {
    /// Builds a `width` x `height` box centred on (`cx`, `cy`).
    pub fn centered(cx: i32, cy: i32, width: i32, height: i32) -> Self {
        let x0 = cx - width / 2;
        let y0 = cy - height / 2;
        Self {
            x0,
            y0,
            x1: x0 + width,
            y1: y0 + height,
        }
    }

    /// Grows the box by `pad` pixels on every side.
    pub fn padded(&self, pad: i32) -> Self {
        Self {
            x0: self.x0 - pad,
            y0: self.y0 - pad,
            x1: self.x1 + pad,
            y1: self.y1 + pad,
        }
    }

    /// Returns true if the boxes overlap.
    pub fn intersects(&self, other: &Self) -> bool {
        self.x0 < other.x1 && other.x0 < self.x1 && self.y0 < other.y1 && other.y0 < self.y1
    }

    /// Returns true if `self` lies entirely inside `outer`.
    pub fn within(&self, outer: &Self) -> bool {
        self.x0 >= outer.x0 && self.y0 >= outer.y0 && self.x1 <= outer.x1 && self.y1 <= outer.y1
    }
}

/// Finds a centre position for a `width` x `height` box.
///
/// Walks the spiral out from the canvas centre and returns the first
/// position where the padded box stays inside the canvas and clears every
/// box in `occupied`. Returns `None` when the walk runs out of steps.
pub fn place(
    width: i32,
    height: i32,
    canvas_width: i32,
    canvas_height: i32,
    occupied: &[Rect],
) -> Option<(i32, i32)> {
    let canvas = Rect {
        x0: 0,
        y0: 0,
        x1: canvas_width,
        y1: canvas_height,
    };
    let centre_x = canvas_width / 2;
    let centre_y = canvas_height / 2;
    for step in 0..MAX_STEPS {
        let angle = step as f64 * STEP_RADIANS;
        let radius = RADIUS_PER_RADIAN * angle;
        let cx = centre_x + (radius * angle.cos() * ASPECT) as i32;
        let cy = centre_y + (radius * angle.sin()) as i32;
        let candidate = Rect::centered(cx, cy, width, height).padded(COLLISION_PAD);
        if !candidate.within(&canvas) {
            continue;
        }
        if occupied.iter().any(|rect| candidate.intersects(rect)) {
            continue;
        }
        return Some((cx, cy));
    }
    None
}
