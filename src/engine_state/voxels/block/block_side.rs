//! # Block Side Module
//!
//! This module defines the different faces/sides of a voxel block.
//! It maps faces to their outward normals, which the pick resolver reports
//! and the interaction handler uses to find the target cell.

use cgmath::Vector3;

/// Represents the six possible faces of a voxel block.
///
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The front face (facing positive Z)
    FRONT = 0,

    /// The back face (facing negative Z)
    BACK = 1,

    /// The bottom face (facing negative Y)
    BOTTOM = 2,

    /// The top face (facing positive Y)
    TOP = 3,

    /// The left face (facing negative X)
    LEFT = 4,

    /// The right face (facing positive X)
    RIGHT = 5,
}

impl BlockSide {
    /// Returns the unit outward normal of this face.
    pub fn normal(&self) -> Vector3<f32> {
        match self {
            BlockSide::FRONT => Vector3::new(0.0, 0.0, 1.0),
            BlockSide::BACK => Vector3::new(0.0, 0.0, -1.0),
            BlockSide::BOTTOM => Vector3::new(0.0, -1.0, 0.0),
            BlockSide::TOP => Vector3::new(0.0, 1.0, 0.0),
            BlockSide::LEFT => Vector3::new(-1.0, 0.0, 0.0),
            BlockSide::RIGHT => Vector3::new(1.0, 0.0, 0.0),
        }
    }

    /// Returns the face a ray enters through after stepping along an axis.
    ///
    /// A ray that crosses into a cell by stepping `+1` along X enters through the
    /// cell's LEFT face, and so on.
    ///
    /// # Arguments
    /// * `axis` - 0 for X, 1 for Y, 2 for Z
    /// * `step` - The direction of the step, `1` or `-1`
    pub fn entered_by_step(axis: usize, step: i32) -> BlockSide {
        match (axis, step > 0) {
            (0, true) => BlockSide::LEFT,
            (0, false) => BlockSide::RIGHT,
            (1, true) => BlockSide::BOTTOM,
            (1, false) => BlockSide::TOP,
            (_, true) => BlockSide::BACK,
            (_, false) => BlockSide::FRONT,
        }
    }

    /// Returns the face of an axis-aligned box struck by a ray whose slab entry
    /// was on `axis`, given the sign of the ray direction on that axis.
    pub fn entered_by_slab(axis: usize, direction_component: f32) -> BlockSide {
        Self::entered_by_step(axis, if direction_component >= 0.0 { 1 } else { -1 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normals_are_unit_and_distinct() {
        let normals: Vec<_> = (0..3)
            .flat_map(|axis| [-1, 1].map(|step| BlockSide::entered_by_step(axis, step).normal()))
            .collect();
        assert_eq!(normals.len(), 6);
        for (i, a) in normals.iter().enumerate() {
            assert_eq!(a.x.abs() + a.y.abs() + a.z.abs(), 1.0);
            for b in normals.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_entered_face_opposes_step() {
        for axis in 0..3 {
            for step in [-1, 1] {
                let normal = BlockSide::entered_by_step(axis, step).normal();
                assert_eq!(normal[axis], -(step as f32));
            }
        }
    }

    #[test]
    fn test_falling_ray_enters_top() {
        assert_eq!(BlockSide::entered_by_step(1, -1), BlockSide::TOP);
        assert_eq!(BlockSide::entered_by_slab(1, -0.5), BlockSide::TOP);
    }
}
