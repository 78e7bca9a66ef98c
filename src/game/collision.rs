//! Pixel-accurate overlap test between two positioned sprites.
//!
//! Positions are sprite centres in world pixels. A cheap axis-aligned box
//! test rejects most pairs; only the intersecting rectangle is scanned pixel
//! by pixel, so cost tracks overlap area rather than sprite area.

/// Opacity lookup for anything that can collide.
pub trait Mask {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// `x`/`y` are local to the sprite's top-left corner.
    fn is_opaque(&self, x: u32, y: u32) -> bool;
}

/// Integer box, right and bottom exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
}

impl BoundingBox {
    pub fn centered(x: f32, y: f32, width: u32, height: u32) -> Self {
        let left = (x - width as f32 / 2.0).floor() as i64;
        let top = (y - height as f32 / 2.0).floor() as i64;
        Self {
            left,
            top,
            right: left + width as i64,
            bottom: top + height as i64,
        }
    }

    pub fn of<M: Mask + ?Sized>(pos: (f32, f32), mask: &M) -> Self {
        Self::centered(pos.0, pos.1, mask.width(), mask.height())
    }

    pub fn intersection(&self, other: &BoundingBox) -> Option<BoundingBox> {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right.min(other.right);
        let bottom = self.bottom.min(other.bottom);
        if left >= right || top >= bottom {
            return None;
        }
        Some(BoundingBox { left, top, right, bottom })
    }
}

/// True when at least one pixel is opaque in both sprites.
pub fn overlaps<A, B>(pos_a: (f32, f32), a: &A, pos_b: (f32, f32), b: &B) -> bool
where
    A: Mask + ?Sized,
    B: Mask + ?Sized,
{
    let box_a = BoundingBox::of(pos_a, a);
    let box_b = BoundingBox::of(pos_b, b);
    let Some(area) = box_a.intersection(&box_b) else {
        return false;
    };

    for y in area.top..area.bottom {
        let ay = (y - box_a.top) as u32;
        let by = (y - box_b.top) as u32;
        for x in area.left..area.right {
            if a.is_opaque((x - box_a.left) as u32, ay) && b.is_opaque((x - box_b.left) as u32, by) {
                return true;
            }
        }
    }
    false
}
