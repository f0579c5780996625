use crate::map_defs::Node;

use glam::Vec2;
use math::cross_side;

/// Index of the right child in `Node::children`
pub const RIGHT: usize = 0;
/// Index of the left child in `Node::children`
pub const LEFT: usize = 1;

impl Node {
    /// R_PointOnSide
    ///
    /// Determine with cross-product which side of a splitting line the point
    /// is on. A point on the line counts as left.
    pub fn point_on_side(&self, v: &Vec2) -> usize {
        if cross_side(self.xy, self.delta, *v) > 0.0 {
            return RIGHT;
        }
        LEFT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map_defs::{BBox, NodeChild};

    fn north_splitter() -> Node {
        Node {
            xy: Vec2::new(128.0, 0.0),
            delta: Vec2::new(0.0, 256.0),
            bboxes: [
                BBox::from_raw([256, 0, 128, 256]),
                BBox::from_raw([256, 0, 0, 128]),
            ],
            children: [NodeChild::SubSector(0), NodeChild::SubSector(1)],
        }
    }

    #[test]
    fn sides() {
        let node = north_splitter();
        assert_eq!(node.point_on_side(&Vec2::new(200.0, 10.0)), RIGHT);
        assert_eq!(node.point_on_side(&Vec2::new(20.0, 10.0)), LEFT);
        // on the line
        assert_eq!(node.point_on_side(&Vec2::new(128.0, 500.0)), LEFT);
    }
}
