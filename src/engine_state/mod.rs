//! # Engine State Module
//!
//! The game session: the world, the player, and everything that advances them
//! one tick at a time.
//!
//! ## Key Components
//!
//! * `EngineState` - The session container and tick driver
//! * `voxels` - The block store, world queries and terrain generation
//! * `player_state` - Player kinematics and the fixed-step controller
//! * `camera_state` - Mouse look and the published camera pose
//! * `interaction` - Pick resolution and block editing
//! * `rendering` - Mirrors store changes into a visual collaborator
//! * `sign` - The floating sign, a set of special pick targets
//!
//! ## Tick Order
//!
//! 1. Translate the processed input into a `PlayerAction`
//! 2. Apply block selection
//! 3. Apply mouse look
//! 4. Step the player controller
//! 5. Resolve each click against the camera ray
//! 6. Sync the render collaborator
//! 7. Publish the camera pose
//!
//! Everything runs on the caller's thread; one call to `tick` is one frame.

use cgmath::Point3;
use winit::keyboard::KeyCode;

use camera_state::{camera::Camera, CameraState};
use interaction::{
    handler::{InteractionAction, InteractionHandler, InteractionOutcome},
    pick::{PickResolver, Ray},
};
use player_state::{
    controller::{PlayerController, StepReport},
    PlayerState,
};
use rendering::{RenderSync, SyncStats, VisualSink};
use voxels::{
    block::block_type::BlockType, queries::WorldQuery, terrain::TerrainGenerator,
    world::VoxelStore,
};

use crate::{application_state::input_state::ProcessedInputState, config::SandboxConfig};

pub mod camera_state;
pub mod interaction;
pub mod player_state;
pub mod rendering;
pub mod sign;
pub mod voxels;

/// Keys that pick a block type, in selector order.
const SELECTOR_KEYS: [KeyCode; 4] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
];

/// Represents player actions derived from input
///
/// This struct contains flags for the player's movement intent, look input,
/// block selection and the clicks to resolve this tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerAction {
    /// Movement actions - true if key is pressed or held
    pub move_forward: bool,
    pub move_backward: bool,
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,

    /// View rotation - Some if the pointer is captured and has moved
    pub rotate_view: Option<(f64, f64)>,

    /// Block type chosen this tick, if any
    pub select_block: Option<BlockType>,

    /// Edits requested by clicks, oldest first
    pub interactions: Vec<InteractionAction>,

    /// A click arrived while the pointer was free
    pub request_capture: bool,
}

/// Everything a tick produced that collaborators may react to.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// One outcome per resolved click
    pub outcomes: Vec<InteractionOutcome>,
    /// The driver should capture the pointer
    pub capture_requested: bool,
    /// Camera pose after the tick
    pub camera: Camera,
    /// What the controller did
    pub step: StepReport,
    /// Visual changes pushed to the render collaborator
    pub visuals: SyncStats,
}

/// The main state container for a sandbox session.
///
/// # Examples
///
/// ```
/// use voxel_sandbox::application_state::input_state::ProcessedInputState;
/// use voxel_sandbox::config::SandboxConfig;
/// use voxel_sandbox::engine_state::{rendering::HeadlessVisuals, EngineState};
///
/// let mut engine = EngineState::new(&SandboxConfig::default(), HeadlessVisuals::new());
/// for _ in 0..300 {
///     engine.tick(ProcessedInputState::default());
/// }
/// assert!(engine.player.on_ground);
/// ```
pub struct EngineState<S: VisualSink> {
    /// The block world
    pub store: VoxelStore,
    /// The player's kinematic state
    pub player: PlayerState,
    /// Look controller and published pose
    pub camera_state: CameraState,
    controller: PlayerController,
    pick_resolver: PickResolver,
    interaction_handler: InteractionHandler,
    render_sync: RenderSync<S>,
    selected_block: BlockType,
    pick_horizon: f32,
    ground_scan_top: i32,
    tick_count: u64,
}

impl<S: VisualSink> EngineState<S> {
    /// Creates a session with terrain generated from the configuration.
    ///
    /// # Arguments
    /// * `config` - Sanitized and validated sandbox settings
    /// * `sink` - The render collaborator mirroring the world
    pub fn new(config: &SandboxConfig, sink: S) -> Self {
        let mut store = VoxelStore::new();
        let placed = TerrainGenerator::new(&config.terrain).generate(&mut store);
        log::info!("World ready with {} blocks", placed);
        Self::with_store(config, store, sink)
    }

    /// Creates a session around an existing world.
    pub fn with_store(config: &SandboxConfig, store: VoxelStore, sink: S) -> Self {
        let [x, y, z] = config.spawn;
        let player = PlayerState::at(Point3::new(x, y, z));

        let pick_resolver = if config.interaction.show_sign {
            PickResolver::with_special_targets(sign::sign_targets())
        } else {
            PickResolver::new()
        };

        let mut engine_state = Self {
            store,
            player,
            camera_state: CameraState::new(&player, config.look.sensitivity),
            controller: PlayerController::new(config.physics.clone()),
            pick_resolver,
            interaction_handler: InteractionHandler::from_config(&config.interaction),
            render_sync: RenderSync::new(sink),
            selected_block: config.selected_block,
            pick_horizon: config.interaction.pick_horizon,
            ground_scan_top: config.physics.ground_scan_top,
            tick_count: 0,
        };
        engine_state.render_sync.sync(&mut engine_state.store);
        engine_state
    }

    /// Advances the session by one frame.
    pub fn tick(&mut self, input: ProcessedInputState) -> TickReport {
        let actions = self.translate_processed_input(&input);

        if let Some(block_type) = actions.select_block {
            if block_type != self.selected_block {
                log::info!("Selected block: {}", block_type);
            }
            self.selected_block = block_type;
        }

        self.camera_state.intake_actions(&actions);
        self.camera_state.apply_look(&mut self.player);

        let world = WorldQuery::with_scan_top(&self.store, self.ground_scan_top);
        let step = self.controller.step(&mut self.player, &actions, &world);

        let outcomes = actions
            .interactions
            .iter()
            .map(|&action| {
                let ray = Ray::from_camera(&Camera::from_player(&self.player));
                self.interaction_handler.interact(
                    &self.pick_resolver,
                    &ray,
                    self.pick_horizon,
                    action,
                    self.selected_block,
                    &mut self.store,
                )
            })
            .collect();

        let visuals = self.render_sync.sync(&mut self.store);
        let camera = self.camera_state.update(&self.player);
        self.tick_count += 1;

        TickReport {
            outcomes,
            capture_requested: actions.request_capture,
            camera,
            step,
            visuals,
        }
    }

    /// Translates the processed input state into player actions.
    ///
    /// Look and clicks only count while the pointer is captured; a click while it
    /// is free asks for capture instead.
    fn translate_processed_input(&self, input: &ProcessedInputState) -> PlayerAction {
        let mut player_action = PlayerAction {
            move_forward: input.get_key_state(KeyCode::KeyW).is_active(),
            move_backward: input.get_key_state(KeyCode::KeyS).is_active(),
            move_left: input.get_key_state(KeyCode::KeyA).is_active(),
            move_right: input.get_key_state(KeyCode::KeyD).is_active(),
            jump: input.get_key_state(KeyCode::Space).is_active(),
            ..PlayerAction::default()
        };

        // Selector keys only trigger on press; the last one pressed wins
        player_action.select_block = SELECTOR_KEYS
            .iter()
            .enumerate()
            .filter(|(_, &key)| input.get_key_state(key).is_just_pressed())
            .filter_map(|(slot, _)| BlockType::from_selector_slot(slot))
            .last();

        if input.pointer_captured {
            player_action.rotate_view = input.get_mouse_delta();
            player_action.interactions = input
                .clicks
                .iter()
                .filter_map(|&button| InteractionAction::from_mouse_button(button))
                .collect();
        } else if !input.clicks.is_empty() {
            player_action.request_capture = true;
        }

        player_action
    }

    /// Read-only occupancy queries over the current world.
    pub fn world_query(&self) -> WorldQuery<'_> {
        WorldQuery::with_scan_top(&self.store, self.ground_scan_top)
    }

    pub fn selected_block(&self) -> BlockType {
        self.selected_block
    }

    pub fn set_selected_block(&mut self, block_type: BlockType) {
        self.selected_block = block_type;
    }

    pub fn pick_resolver(&self) -> &PickResolver {
        &self.pick_resolver
    }

    pub fn render_sync(&self) -> &RenderSync<S> {
        &self.render_sync
    }

    /// Number of ticks run so far.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::rendering::HeadlessVisuals;
    use winit::event::MouseButton;

    fn empty_engine() -> EngineState<HeadlessVisuals> {
        EngineState::with_store(&SandboxConfig::default(), VoxelStore::new(), HeadlessVisuals::new())
    }

    fn pressed(keys: &[KeyCode]) -> ProcessedInputState {
        let mut input = ProcessedInputState::default();
        for &key in keys {
            input
                .keyboard_states
                .insert(key, crate::application_state::input_state::RawInputState::Pressed);
        }
        input
    }

    #[test]
    fn test_selector_keys() {
        let mut engine = empty_engine();
        assert_eq!(engine.selected_block(), BlockType::GRASS);
        engine.tick(pressed(&[KeyCode::Digit3]));
        assert_eq!(engine.selected_block(), BlockType::WOOD);
        engine.tick(pressed(&[KeyCode::Digit4]));
        assert_eq!(engine.selected_block(), BlockType::DIRT);
    }

    #[test]
    fn test_click_while_free_requests_capture() {
        let mut engine = empty_engine();
        engine.store.place(Point3::new(0, 0, 0), BlockType::GRASS);
        let input = ProcessedInputState {
            clicks: vec![MouseButton::Left],
            mouse_delta: Some((500.0, 0.0)),
            ..ProcessedInputState::default()
        };
        let report = engine.tick(input);
        assert!(report.capture_requested);
        assert!(report.outcomes.is_empty());
        assert_eq!(engine.player.yaw.0, 0.0);
        assert!(engine.store.has(Point3::new(0, 0, 0)));
    }

    #[test]
    fn test_camera_tracks_player() {
        let mut engine = empty_engine();
        let report = engine.tick(ProcessedInputState::default());
        assert_eq!(report.camera.position, engine.player.position);
        assert_eq!(engine.tick_count(), 1);
    }

    #[test]
    fn test_visuals_follow_store() {
        let mut store = VoxelStore::new();
        store.place(Point3::new(0, 0, 0), BlockType::GRASS);
        let engine =
            EngineState::with_store(&SandboxConfig::default(), store, HeadlessVisuals::new());
        assert_eq!(engine.render_sync().sink().live_count(), 1);
        assert_eq!(engine.store.pending_event_count(), 0);
    }

    #[test]
    fn test_sign_is_not_solid() {
        let engine = empty_engine();
        assert!(!engine.pick_resolver().special_targets().is_empty());
        assert!(engine.store.is_empty());
    }
}
