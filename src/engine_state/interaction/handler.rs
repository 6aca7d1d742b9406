//! Turns a resolved pick and a mouse button into a world edit

use cgmath::Point3;
use winit::event::MouseButton;

use super::pick::{PickResolver, PickResult, Ray};
use crate::{
    config::InteractionConfig,
    engine_state::voxels::{block::block_type::BlockType, world::VoxelStore},
};

/// The edit a click asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionAction {
    /// Destroy the struck block
    Remove,
    /// Place the selected block against the struck face
    Place,
}

impl InteractionAction {
    /// Left button removes, right button places, anything else does nothing.
    pub fn from_mouse_button(button: MouseButton) -> Option<Self> {
        match button {
            MouseButton::Left => Some(InteractionAction::Remove),
            MouseButton::Right => Some(InteractionAction::Place),
            _ => None,
        }
    }
}

/// What came of a single click.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionOutcome {
    /// A special target was hit; the info page should be opened. The world is untouched.
    OpenInfoPage { url: String },
    /// The block at `coord` was destroyed
    Removed { coord: Point3<i32> },
    /// A block of `block_type` was created at `coord`
    Placed {
        coord: Point3<i32>,
        block_type: BlockType,
    },
    /// The target cell was already in the requested state
    Unchanged { coord: Point3<i32> },
    /// The hit lies past the reach limit
    OutOfReach { distance: f32 },
    /// Nothing was hit
    Missed,
}

impl InteractionOutcome {
    /// Returns `true` if the store was edited.
    pub fn mutated_world(&self) -> bool {
        matches!(
            self,
            InteractionOutcome::Removed { .. } | InteractionOutcome::Placed { .. }
        )
    }
}

/// Applies the reach and special-target rules, then edits the store.
#[derive(Debug, Clone)]
pub struct InteractionHandler {
    reach: f32,
    info_url: String,
}

impl InteractionHandler {
    /// # Arguments
    /// * `reach` - Farthest pick distance, inclusive, at which blocks can be edited
    /// * `info_url` - Page opened when a special target is clicked
    pub fn new(reach: f32, info_url: impl Into<String>) -> Self {
        InteractionHandler {
            reach,
            info_url: info_url.into(),
        }
    }

    pub fn from_config(config: &InteractionConfig) -> Self {
        Self::new(config.reach, config.info_url.clone())
    }

    pub fn reach(&self) -> f32 {
        self.reach
    }

    /// Resolves one click against a pick.
    ///
    /// Special targets win over every other rule and never touch the store. Hits
    /// past the reach limit are ignored. Otherwise `Remove` clears the cell behind
    /// the struck face and `Place` fills the cell in front of it with `selected`.
    pub fn handle(
        &self,
        pick: Option<&PickResult>,
        action: InteractionAction,
        selected: BlockType,
        store: &mut VoxelStore,
    ) -> InteractionOutcome {
        let Some(pick) = pick else {
            return InteractionOutcome::Missed;
        };

        if pick.is_special_target {
            log::info!("Special target hit, opening {}", self.info_url);
            return InteractionOutcome::OpenInfoPage {
                url: self.info_url.clone(),
            };
        }

        if pick.distance > self.reach {
            log::debug!(
                "Pick at distance {:.2} is beyond reach {:.2}",
                pick.distance,
                self.reach
            );
            return InteractionOutcome::OutOfReach {
                distance: pick.distance,
            };
        }

        match action {
            InteractionAction::Remove => {
                let coord = pick.struck_cell();
                if store.remove(coord) {
                    log::info!("Removed block at {:?}", coord);
                    InteractionOutcome::Removed { coord }
                } else {
                    InteractionOutcome::Unchanged { coord }
                }
            }
            InteractionAction::Place => {
                let coord = pick.adjacent_cell();
                if store.place(coord, selected) {
                    log::info!("Placed {} at {:?}", selected, coord);
                    InteractionOutcome::Placed {
                        coord,
                        block_type: selected,
                    }
                } else {
                    InteractionOutcome::Unchanged { coord }
                }
            }
        }
    }

    /// Picks along `ray` and handles the click in one go.
    pub fn interact(
        &self,
        resolver: &PickResolver,
        ray: &Ray,
        horizon: f32,
        action: InteractionAction,
        selected: BlockType,
        store: &mut VoxelStore,
    ) -> InteractionOutcome {
        let pick = resolver.resolve(store, ray, horizon);
        self.handle(pick.as_ref(), action, selected, store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::interaction::pick::SpecialTarget;
    use cgmath::Vector3;
    use test_case::test_case;

    fn handler() -> InteractionHandler {
        InteractionHandler::new(5.0, "./info.html")
    }

    fn ray_down(height: f32) -> Ray {
        Ray::new(Point3::new(2.0, height, 2.0), Vector3::new(0.0, -1.0, 0.0))
    }

    fn single_block_store() -> VoxelStore {
        let mut store = VoxelStore::new();
        store.place(Point3::new(2, 0, 2), BlockType::GRASS);
        store.drain_events();
        store
    }

    #[test]
    fn test_place_on_top_face() {
        let mut store = single_block_store();
        let outcome = handler().interact(
            &PickResolver::new(),
            &ray_down(5.0),
            64.0,
            InteractionAction::Place,
            BlockType::STONE,
            &mut store,
        );
        assert_eq!(
            outcome,
            InteractionOutcome::Placed {
                coord: Point3::new(2, 1, 2),
                block_type: BlockType::STONE,
            }
        );
        assert!(store.has(Point3::new(2, 1, 2)));
        assert!(store.has(Point3::new(2, 0, 2)));
    }

    #[test]
    fn test_remove_struck_block() {
        let mut store = single_block_store();
        let outcome = handler().interact(
            &PickResolver::new(),
            &ray_down(5.0),
            64.0,
            InteractionAction::Remove,
            BlockType::STONE,
            &mut store,
        );
        assert_eq!(
            outcome,
            InteractionOutcome::Removed {
                coord: Point3::new(2, 0, 2)
            }
        );
        assert!(store.is_empty());
    }

    #[test_case(6.0, true ; "exactly at reach")]
    #[test_case(6.5, false ; "past reach")]
    fn test_reach_is_inclusive(height: f32, allowed: bool) {
        let mut store = single_block_store();
        let outcome = handler().interact(
            &PickResolver::new(),
            &ray_down(height),
            64.0,
            InteractionAction::Remove,
            BlockType::GRASS,
            &mut store,
        );
        assert_eq!(outcome.mutated_world(), allowed);
        assert_eq!(store.has(Point3::new(2, 0, 2)), !allowed);
        if !allowed {
            assert_eq!(outcome, InteractionOutcome::OutOfReach { distance: 5.5 });
        }
    }

    #[test_case(InteractionAction::Remove ; "remove")]
    #[test_case(InteractionAction::Place ; "place")]
    fn test_special_target_never_edits(action: InteractionAction) {
        let mut store = single_block_store();
        let resolver = PickResolver::with_special_targets(vec![SpecialTarget::cube(
            Point3::new(2.0, 3.0, 2.0),
            0.8,
        )]);
        for block_type in BlockType::ALL {
            let outcome = handler().interact(
                &resolver,
                &ray_down(5.0),
                64.0,
                action,
                block_type,
                &mut store,
            );
            assert_eq!(
                outcome,
                InteractionOutcome::OpenInfoPage {
                    url: "./info.html".to_string()
                }
            );
        }
        assert_eq!(store.len(), 1);
        assert_eq!(store.pending_event_count(), 0);
    }

    #[test]
    fn test_special_target_ignores_reach() {
        let mut store = VoxelStore::new();
        let resolver = PickResolver::with_special_targets(vec![SpecialTarget::cube(
            Point3::new(2.0, -40.0, 2.0),
            0.8,
        )]);
        let outcome = handler().interact(
            &resolver,
            &ray_down(5.0),
            64.0,
            InteractionAction::Remove,
            BlockType::GRASS,
            &mut store,
        );
        assert!(matches!(outcome, InteractionOutcome::OpenInfoPage { .. }));
    }

    #[test]
    fn test_miss() {
        let mut store = VoxelStore::new();
        let outcome = handler().handle(None, InteractionAction::Place, BlockType::WOOD, &mut store);
        assert_eq!(outcome, InteractionOutcome::Missed);
        assert!(store.is_empty());
    }

    #[test]
    fn test_button_mapping() {
        assert_eq!(
            InteractionAction::from_mouse_button(MouseButton::Left),
            Some(InteractionAction::Remove)
        );
        assert_eq!(
            InteractionAction::from_mouse_button(MouseButton::Right),
            Some(InteractionAction::Place)
        );
        assert_eq!(InteractionAction::from_mouse_button(MouseButton::Middle), None);
    }
}
