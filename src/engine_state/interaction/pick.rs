//! # Pick Resolution
//!
//! Finds what the player is looking at. Two kinds of geometry are tested:
//!
//! * Solid cells in the `VoxelStore`, walked with a grid traversal (DDA) so only
//!   the cells the ray actually crosses are inspected
//! * Special targets, free-floating axis-aligned boxes such as the sign glyphs,
//!   tested with a slab intersection
//!
//! The nearest hit wins. The resolver reports hits up to its search horizon and
//! never applies the reach limit; that policy belongs to the interaction handler.

use cgmath::{EuclideanSpace, InnerSpace, Point3, Vector3};

use crate::engine_state::{
    camera_state::camera::Camera,
    voxels::{
        block::{block_side::BlockSide, cell_at},
        world::{CellBounds, VoxelStore},
    },
};

/// A half-line from an origin along a direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub direction: Vector3<f32>,
}

impl Ray {
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Self {
        Ray { origin, direction }
    }

    /// The ray through the camera along its view direction.
    pub fn from_camera(camera: &Camera) -> Self {
        Ray::new(camera.position, camera.get_view_vec())
    }
}

/// A non-block box that redirects interaction instead of being edited.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpecialTarget {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

impl SpecialTarget {
    /// A cube of edge `edge` centered on `center`.
    pub fn cube(center: Point3<f32>, edge: f32) -> Self {
        let half = Vector3::new(edge, edge, edge) * 0.5;
        SpecialTarget {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Point3<f32> {
        self.min.midpoint(self.max)
    }

    /// Slab test against a normalized direction.
    ///
    /// Returns the entry distance and the face entered. Boxes behind the origin
    /// or containing it are not hits.
    fn intersect(&self, origin: Point3<f32>, direction: Vector3<f32>) -> Option<(f32, BlockSide)> {
        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;
        let mut enter_axis = 0;

        for axis in 0..3 {
            let (o, d) = (origin[axis], direction[axis]);
            if d == 0.0 {
                if o < self.min[axis] || o > self.max[axis] {
                    return None;
                }
                continue;
            }
            let t1 = (self.min[axis] - o) / d;
            let t2 = (self.max[axis] - o) / d;
            let (near, far) = if t1 < t2 { (t1, t2) } else { (t2, t1) };
            if near > t_enter {
                t_enter = near;
                enter_axis = axis;
            }
            t_exit = t_exit.min(far);
        }

        if t_enter > t_exit || t_enter < 0.0 {
            return None;
        }
        Some((
            t_enter,
            BlockSide::entered_by_slab(enter_axis, direction[enter_axis]),
        ))
    }
}

/// What a pick struck.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickTarget {
    /// A solid cell of the store
    Block(Point3<i32>),
    /// The special target at this index of the resolver's list
    Special(usize),
}

/// The nearest intersection along a pick ray.
///
/// A miss is represented by `resolve` returning `None`, so every `PickResult`
/// is a hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickResult {
    /// Where the ray meets the struck face
    pub point: Point3<f32>,
    /// Outward unit normal of the struck face
    pub face_normal: Vector3<f32>,
    /// Distance from the ray origin to `point`.
    ///
    /// Cell `(x, y, z)` spans `[x, x + 1)` on each axis, so block faces lie on integer planes.
    pub distance: f32,
    /// `true` if the hit is a special target rather than block geometry
    pub is_special_target: bool,
    /// The struck face
    pub side: BlockSide,
    /// The struck object
    pub target: PickTarget,
}

impl PickResult {
    /// The cell behind the struck face: `floor(point - normal / 2)`.
    pub fn struck_cell(&self) -> Point3<i32> {
        floor_point(self.point - self.face_normal * 0.5)
    }

    /// The empty cell in front of the struck face: `floor(point + normal / 2)`.
    pub fn adjacent_cell(&self) -> Point3<i32> {
        floor_point(self.point + self.face_normal * 0.5)
    }
}

fn floor_point(point: Point3<f32>) -> Point3<i32> {
    cell_at(point.x, point.y, point.z)
}

/// Resolves pick rays against the store and a set of special targets.
#[derive(Debug, Clone, Default)]
pub struct PickResolver {
    special_targets: Vec<SpecialTarget>,
}

impl PickResolver {
    /// Creates a resolver with no special targets.
    pub fn new() -> Self {
        PickResolver {
            special_targets: Vec::new(),
        }
    }

    pub fn with_special_targets(special_targets: Vec<SpecialTarget>) -> Self {
        PickResolver { special_targets }
    }

    pub fn add_special_target(&mut self, target: SpecialTarget) {
        self.special_targets.push(target);
    }

    pub fn special_targets(&self) -> &[SpecialTarget] {
        &self.special_targets
    }

    /// Finds the nearest hit within `max_distance` of the ray origin.
    ///
    /// # Arguments
    /// * `store` - The world to pick against
    /// * `ray` - The pick ray; its direction need not be normalized
    /// * `max_distance` - Search horizon. This is not the reach limit.
    ///
    /// # Returns
    /// The nearest hit, or `None` if nothing lies within the horizon or the ray has
    /// no direction. The cell containing the origin is never reported.
    pub fn resolve(&self, store: &VoxelStore, ray: &Ray, max_distance: f32) -> Option<PickResult> {
        if ray.direction.magnitude2() == 0.0 || !ray.direction.magnitude2().is_finite() {
            return None;
        }
        let direction = ray.direction.normalize();

        let block_hit = Self::traverse_cells(store, ray.origin, direction, max_distance);

        let special_hit = self
            .special_targets
            .iter()
            .enumerate()
            .filter_map(|(index, target)| {
                target
                    .intersect(ray.origin, direction)
                    .map(|(distance, side)| (distance, side, PickTarget::Special(index)))
            })
            .filter(|(distance, _, _)| *distance <= max_distance)
            .min_by(|a, b| a.0.total_cmp(&b.0));

        let (distance, side, target) = match (block_hit, special_hit) {
            (Some(block), Some(special)) if special.0 < block.0 => special,
            (Some(block), _) => block,
            (None, Some(special)) => special,
            (None, None) => return None,
        };

        Some(PickResult {
            point: ray.origin + direction * distance,
            face_normal: side.normal(),
            distance,
            is_special_target: matches!(target, PickTarget::Special(_)),
            side,
            target,
        })
    }

    /// Walks the grid cells crossed by the ray, nearest first, and returns the first
    /// solid one after the origin cell.
    fn traverse_cells(
        store: &VoxelStore,
        origin: Point3<f32>,
        direction: Vector3<f32>,
        max_distance: f32,
    ) -> Option<(f32, BlockSide, PickTarget)> {
        let bounds = store.bounds()?;
        let limit = max_distance.min(Self::exit_distance(bounds, origin, direction)?);

        let mut cell = floor_point(origin);
        let mut step = [0i32; 3];
        let mut t_max = [f32::INFINITY; 3];
        let mut t_delta = [f32::INFINITY; 3];

        for axis in 0..3 {
            let d = direction[axis];
            if d > 0.0 {
                step[axis] = 1;
                t_delta[axis] = 1.0 / d;
                t_max[axis] = ((cell[axis] + 1) as f32 - origin[axis]) / d;
            } else if d < 0.0 {
                step[axis] = -1;
                t_delta[axis] = -1.0 / d;
                t_max[axis] = (cell[axis] as f32 - origin[axis]) / d;
            }
        }

        loop {
            let axis = if t_max[0] < t_max[1] {
                if t_max[0] < t_max[2] {
                    0
                } else {
                    2
                }
            } else if t_max[1] < t_max[2] {
                1
            } else {
                2
            };

            let t = t_max[axis];
            if !(t <= limit) {
                return None;
            }

            cell[axis] += step[axis];
            t_max[axis] += t_delta[axis];

            if store.has(cell) {
                let side = BlockSide::entered_by_step(axis, step[axis]);
                return Some((t.max(0.0), side, PickTarget::Block(cell)));
            }
        }
    }

    /// Distance along the ray at which it leaves the box spanned by `bounds`.
    ///
    /// Returns `None` if the ray runs parallel to a slab it lies outside of, so it
    /// can never reach a block.
    fn exit_distance(bounds: CellBounds, origin: Point3<f32>, direction: Vector3<f32>) -> Option<f32> {
        let mut exit = f32::INFINITY;
        for axis in 0..3 {
            let lo = bounds.min[axis] as f32;
            let hi = bounds.max[axis] as f32 + 1.0;
            let d = direction[axis];
            if d > 0.0 {
                exit = exit.min((hi - origin[axis]) / d);
            } else if d < 0.0 {
                exit = exit.min((lo - origin[axis]) / d);
            } else if origin[axis] < lo || origin[axis] >= hi {
                return None;
            }
        }
        Some(exit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::block_type::BlockType;
    use approx::assert_relative_eq;
    use test_case::test_case;

    fn down_from(x: f32, y: f32, z: f32) -> Ray {
        Ray::new(Point3::new(x, y, z), Vector3::new(0.0, -1.0, 0.0))
    }

    #[test]
    fn test_straight_down_hits_top_face() {
        let mut store = VoxelStore::new();
        store.place(Point3::new(2, 0, 2), BlockType::GRASS);

        let hit = PickResolver::new()
            .resolve(&store, &down_from(2.0, 5.0, 2.0), 64.0)
            .unwrap();
        assert!(!hit.is_special_target);
        assert_eq!(hit.side, BlockSide::TOP);
        assert_eq!(hit.face_normal, Vector3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(hit.distance, 4.0);
        assert_eq!(hit.target, PickTarget::Block(Point3::new(2, 0, 2)));
        assert_eq!(hit.struck_cell(), Point3::new(2, 0, 2));
        assert_eq!(hit.adjacent_cell(), Point3::new(2, 1, 2));
    }

    #[test]
    fn test_nearest_block_wins() {
        let mut store = VoxelStore::new();
        store.place(Point3::new(0, 0, -8), BlockType::STONE);
        store.place(Point3::new(0, 0, -3), BlockType::STONE);
        let ray = Ray::new(Point3::new(0.5, 0.5, 0.5), Vector3::new(0.0, 0.0, -1.0));

        let hit = PickResolver::new().resolve(&store, &ray, 64.0).unwrap();
        assert_eq!(hit.target, PickTarget::Block(Point3::new(0, 0, -3)));
        assert_eq!(hit.side, BlockSide::FRONT);
        assert_relative_eq!(hit.distance, 2.5);
    }

    #[test]
    fn test_horizon_limits_search_but_not_reach() {
        let mut store = VoxelStore::new();
        store.place(Point3::new(0, 0, 0), BlockType::DIRT);
        let ray = down_from(0.5, 20.5, 0.5);

        assert!(PickResolver::new().resolve(&store, &ray, 10.0).is_none());
        let hit = PickResolver::new().resolve(&store, &ray, 64.0).unwrap();
        assert_relative_eq!(hit.distance, 19.5);
    }

    #[test]
    fn test_origin_cell_is_skipped() {
        let mut store = VoxelStore::new();
        store.place(Point3::new(0, 0, 0), BlockType::STONE);
        store.place(Point3::new(0, 0, -2), BlockType::WOOD);
        let ray = Ray::new(Point3::new(0.5, 0.5, 0.5), Vector3::new(0.0, 0.0, -1.0));

        let hit = PickResolver::new().resolve(&store, &ray, 64.0).unwrap();
        assert_eq!(hit.target, PickTarget::Block(Point3::new(0, 0, -2)));
    }

    #[test]
    fn test_diagonal_ray_reports_entered_face() {
        let mut store = VoxelStore::new();
        store.place(Point3::new(3, 0, 0), BlockType::STONE);
        // Shallow descent along +X: crosses x = 3 well above y = 0.
        let ray = Ray::new(Point3::new(0.5, 1.5, 0.5), Vector3::new(1.0, -0.4, 0.0));

        let hit = PickResolver::new().resolve(&store, &ray, 64.0).unwrap();
        assert_eq!(hit.target, PickTarget::Block(Point3::new(3, 0, 0)));
        assert_eq!(hit.side, BlockSide::LEFT);
        assert_relative_eq!(hit.point.x, 3.0, epsilon = 1e-5);
        assert_eq!(hit.adjacent_cell(), Point3::new(2, 0, 0));
    }

    #[test_case(Vector3::new(0.0, 0.0, 0.0) ; "zero direction")]
    #[test_case(Vector3::new(0.0, 1.0, 0.0) ; "into empty sky")]
    fn test_misses(direction: Vector3<f32>) {
        let mut store = VoxelStore::new();
        store.place(Point3::new(0, 0, 0), BlockType::GRASS);
        let ray = Ray::new(Point3::new(0.5, 3.0, 0.5), direction);
        assert!(PickResolver::new().resolve(&store, &ray, 64.0).is_none());
    }

    #[test]
    fn test_special_target_in_front_of_block() {
        let mut store = VoxelStore::new();
        store.place(Point3::new(0, 0, -10), BlockType::STONE);
        let resolver =
            PickResolver::with_special_targets(vec![SpecialTarget::cube(Point3::new(0.5, 0.5, -5.0), 0.8)]);
        let ray = Ray::new(Point3::new(0.5, 0.5, 0.5), Vector3::new(0.0, 0.0, -1.0));

        let hit = resolver.resolve(&store, &ray, 64.0).unwrap();
        assert!(hit.is_special_target);
        assert_eq!(hit.target, PickTarget::Special(0));
        assert_eq!(hit.side, BlockSide::FRONT);
        assert_relative_eq!(hit.distance, 5.1, epsilon = 1e-5);
    }

    #[test]
    fn test_block_in_front_of_special_target() {
        let mut store = VoxelStore::new();
        store.place(Point3::new(0, 0, -3), BlockType::STONE);
        let resolver =
            PickResolver::with_special_targets(vec![SpecialTarget::cube(Point3::new(0.5, 0.5, -5.0), 0.8)]);
        let ray = Ray::new(Point3::new(0.5, 0.5, 0.5), Vector3::new(0.0, 0.0, -1.0));

        let hit = resolver.resolve(&store, &ray, 64.0).unwrap();
        assert!(!hit.is_special_target);
    }

    #[test]
    fn test_special_target_behind_origin_is_ignored() {
        let store = VoxelStore::new();
        let resolver =
            PickResolver::with_special_targets(vec![SpecialTarget::cube(Point3::new(0.0, 0.0, 5.0), 0.8)]);
        let ray = Ray::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, -1.0));
        assert!(resolver.resolve(&store, &ray, 64.0).is_none());
    }

    #[test]
    fn test_unbounded_horizon_miss_terminates() {
        let resolver = PickResolver::new();
        let up = Ray::new(Point3::new(0.5, 5.0, 0.5), Vector3::new(0.0, 1.0, 0.0));
        assert!(resolver.resolve(&VoxelStore::new(), &up, f32::INFINITY).is_none());

        let mut store = VoxelStore::new();
        store.place(Point3::new(0, 0, 0), BlockType::GRASS);
        store.place(Point3::new(40, 3, -40), BlockType::STONE);
        assert!(resolver.resolve(&store, &up, f32::INFINITY).is_none());

        let sideways = Ray::new(Point3::new(0.5, 10.0, 0.5), Vector3::new(1.0, 0.0, 0.3));
        assert!(resolver.resolve(&store, &sideways, f32::INFINITY).is_none());
    }

    #[test]
    fn test_unbounded_horizon_still_finds_distant_block() {
        let mut store = VoxelStore::new();
        store.place(Point3::new(0, -500, 0), BlockType::DIRT);

        let hit = PickResolver::new()
            .resolve(&store, &down_from(0.5, 5.0, 0.5), f32::INFINITY)
            .unwrap();
        assert_eq!(hit.struck_cell(), Point3::new(0, -500, 0));
        assert_relative_eq!(hit.distance, 504.0);
    }

    #[test]
    fn test_cube_bounds() {
        let target = SpecialTarget::cube(Point3::new(1.0, 2.0, 3.0), 0.8);
        assert_relative_eq!(target.min.x, 0.6);
        assert_relative_eq!(target.max.z, 3.4);
        assert_relative_eq!(target.center().y, 2.0, epsilon = 1e-6);
    }
}
