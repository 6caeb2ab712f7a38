//! # Engine State Module
//!
//! The simulation context of the sandbox. `EngineState` owns the voxel grid, the actor
//! and everything derived from them each tick; there are no globals.
//!
//! ## Key Components
//!
//! * `EngineState` - The simulation context and its fixed-tick pipeline
//! * `actor_state` - The actor, its camera, and collision resolution
//! * `rendering` - Frame batching and target picking
//! * `voxels` - The voxel grid, colors, and face visibility
//!
//! ## Tick Pipeline
//!
//! Input is translated into actor intents and rotations between ticks. Each tick then:
//! 1. Integrates the actor and resolves it against nearby voxels
//! 2. Refreshes face visibility
//! 3. Rebuilds the frame batch and its slot table
//! 4. Picks the face under the crosshair
//! 5. Applies at most one pending edit command to the grid
//!
//! The grid is only ever mutated in step 5.

use cgmath::Rad;
use web_time::Duration;
use winit::{event::MouseButton, keyboard::KeyCode};

use actor_state::{collision, Actor, MotionSettings};
use rendering::{picking::pick, FrameBatch, PickHit};
use voxels::{
    block::color::HueBrightness,
    position::VoxelPosition,
    visibility::{visible_faces, VisibilityCache},
    world::VoxelGrid,
};

use crate::{application_state::input_state::ProcessedInputState, config::SimulationConfig};

pub mod actor_state;
pub mod rendering;
pub mod voxels;

/// A grid edit queued by input and applied at the end of the next tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditCommand {
    /// Add a voxel of the given color in the empty cell in front of the targeted face
    AddVoxel(HueBrightness),
    /// Remove the targeted voxel
    RemoveVoxel,
    /// Repaint the targeted face
    RecolorFace(HueBrightness),
    /// Add a voxel at a fixed cell, independent of the target
    InsertAt {
        /// The cell to fill
        position: VoxelPosition,
        /// Color of the new voxel
        color: HueBrightness,
    },
}

/// The main state container for the sandbox simulation.
///
/// # Examples
///
/// ```
/// use voxel_sandbox::{config::SimulationConfig, engine_state::EngineState};
///
/// let config = SimulationConfig::default();
/// let mut engine_state = EngineState::new(&config);
/// engine_state.tick(config.tick_interval());
/// assert_eq!(engine_state.frame().len(), 6);
/// ```
pub struct EngineState {
    /// The player-controlled actor
    pub actor: Actor,
    /// Current player actions derived from input
    pub player_actions: PlayerAction,
    grid: VoxelGrid,
    visibility: VisibilityCache,
    incremental_visibility: bool,
    frame: FrameBatch,
    target: Option<PickHit>,
    pending_edit: Option<EditCommand>,
    gravity_enabled: bool,
    brush_color: HueBrightness,
    motion: MotionSettings,
    collision_radius: f32,
    mouse_sensitivity: f32,
    ticks: u64,
}

impl EngineState {
    /// Creates a new engine state with a world seeded from `config`.
    ///
    /// # Arguments
    /// * `config` - Session settings
    ///
    /// # Returns
    /// An engine state whose first frame is built on the first `tick`.
    pub fn new(config: &SimulationConfig) -> Self {
        let grid = VoxelGrid::generate(
            config.world_generation,
            config.world_radius,
            config.world_seed,
        );
        log::info!(
            "Generated {:?} world with {} voxels",
            config.world_generation,
            grid.len()
        );
        Self::with_grid(config, grid)
    }

    /// Creates a new engine state around an existing grid.
    pub fn with_grid(config: &SimulationConfig, grid: VoxelGrid) -> Self {
        let visibility = VisibilityCache::new(&grid);
        Self {
            actor: Actor::new(config.spawn_point(), config.actor_extents),
            player_actions: PlayerAction::default(),
            grid,
            visibility,
            incremental_visibility: config.incremental_visibility,
            frame: FrameBatch::default(),
            target: None,
            pending_edit: None,
            gravity_enabled: config.gravity_enabled,
            brush_color: HueBrightness::default(),
            motion: config.motion_settings(),
            collision_radius: config.collision_radius,
            mouse_sensitivity: config.mouse_sensitivity,
            ticks: 0,
        }
    }

    /// The voxel grid.
    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    /// The batched faces of the last tick.
    pub fn frame(&self) -> &FrameBatch {
        &self.frame
    }

    /// The face under the crosshair as of the last tick.
    pub fn target(&self) -> Option<&PickHit> {
        self.target.as_ref()
    }

    /// Whether the actor ended the last tick standing on a voxel.
    pub fn is_grounded(&self) -> bool {
        self.actor.grounded
    }

    /// Whether gravity currently acts on the actor.
    pub fn gravity_enabled(&self) -> bool {
        self.gravity_enabled
    }

    /// The color used for added voxels and recolored faces.
    pub fn brush_color(&self) -> HueBrightness {
        self.brush_color
    }

    /// Sets the brush color.
    pub fn set_brush_color(&mut self, color: HueBrightness) {
        self.brush_color = color;
    }

    /// The edit that will be applied at the end of the next tick, if any.
    pub fn pending_edit(&self) -> Option<&EditCommand> {
        self.pending_edit.as_ref()
    }

    /// Number of ticks run so far.
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Queues an edit for the next tick. A later command replaces an earlier one.
    pub fn queue_edit(&mut self, command: EditCommand) {
        if let Some(previous) = self.pending_edit.replace(command) {
            log::debug!("Edit {:?} replaced by {:?}", previous, command);
        }
    }

    /// Turns gravity on or off. Turning it off stops any fall or jump in progress.
    pub fn set_gravity(&mut self, enabled: bool) {
        self.gravity_enabled = enabled;
        if !enabled {
            self.actor.vertical_velocity = 0.0;
        }
        log::info!("Gravity {}", if enabled { "enabled" } else { "disabled" });
    }

    /// Advances the simulation by one tick.
    ///
    /// # Arguments
    /// * `elapsed` - The time since the previous tick
    pub fn tick(&mut self, elapsed: Duration) {
        let dt = elapsed.as_secs_f32();

        self.actor.integrate(dt, &self.motion, self.gravity_enabled);
        collision::resolve(&mut self.actor, &self.grid, self.collision_radius);

        let faces = if self.incremental_visibility {
            self.visibility.refresh(&self.grid);
            self.visibility.faces()
        } else {
            visible_faces(&self.grid)
        };
        self.frame = FrameBatch::build(&self.grid, &faces);

        let target = pick(&self.frame, &self.actor.camera.view_ray());
        let target_face = |hit: &Option<PickHit>| hit.map(|h| (h.position, h.side));
        if target_face(&target) != target_face(&self.target) {
            match &target {
                Some(hit) => log::debug!("Targeting {:?} face of {}", hit.side, hit.position),
                None => log::debug!("No target"),
            }
        }
        self.target = target;

        if let Some(command) = self.pending_edit.take() {
            self.apply_edit(command);
        }

        self.ticks += 1;
        log::trace!(
            "Tick {}: actor at {:?}, {} faces, grounded {}",
            self.ticks,
            self.actor.position,
            self.frame.len(),
            self.actor.grounded
        );
    }

    /// Applies an edit against the current target.
    ///
    /// # Returns
    /// `true` if the grid changed.
    fn apply_edit(&mut self, command: EditCommand) -> bool {
        let (position, applied) = match command {
            EditCommand::InsertAt { position, color } => {
                (position, self.grid.insert(position, color))
            }
            EditCommand::AddVoxel(color) => {
                let Some(hit) = self.target else {
                    log::debug!("Ignoring {:?} without a target", command);
                    return false;
                };
                let Some(position) = hit.adjacent_position() else {
                    log::warn!("No cell in front of {:?} face of {}", hit.side, hit.position);
                    return false;
                };
                if collision::intersects_cell(&self.actor, position) {
                    log::warn!("Refusing to add voxel at {} inside the actor", position);
                    return false;
                }
                (position, self.grid.insert(position, color))
            }
            EditCommand::RemoveVoxel => {
                let Some(hit) = self.target else {
                    log::debug!("Ignoring {:?} without a target", command);
                    return false;
                };
                (hit.position, self.grid.remove(hit.position))
            }
            EditCommand::RecolorFace(color) => {
                let Some(hit) = self.target else {
                    log::debug!("Ignoring {:?} without a target", command);
                    return false;
                };
                let applied = self.grid.recolor_face(hit.position, hit.side, color);
                if applied {
                    log::debug!("Recolored {:?} face of {}", hit.side, hit.position);
                }
                return applied;
            }
        };

        if applied {
            if self.incremental_visibility {
                self.visibility.mark_dirty(position);
            }
            log::debug!("Applied {:?} at {}", command, position);
        } else {
            log::debug!("Edit {:?} at {} had no effect", command, position);
        }
        applied
    }

    /// Sets the input commands for the engine state.
    ///
    /// # Arguments
    /// * `input` - The processed input state to use for setting commands
    pub fn set_input_commands(&mut self, input: ProcessedInputState) {
        let player_action = self.translate_processed_input(input);
        self.apply_player_action(&player_action);
        self.player_actions = player_action;
    }

    /// Translates the processed input state into player actions.
    ///
    /// # Arguments
    /// * `input` - The processed input state to translate
    ///
    /// # Returns
    /// A PlayerAction struct with the appropriate actions set
    fn translate_processed_input(&self, input: ProcessedInputState) -> PlayerAction {
        PlayerAction {
            move_forward: input.get_key_state(KeyCode::KeyW).is_active(),
            move_backward: input.get_key_state(KeyCode::KeyS).is_active(),
            move_left: input.get_key_state(KeyCode::KeyA).is_active(),
            move_right: input.get_key_state(KeyCode::KeyD).is_active(),
            move_up: input.get_key_state(KeyCode::Space).is_active(),
            move_down: input.get_key_state(KeyCode::ShiftLeft).is_active(),
            rotate_view: input.get_mouse_delta(),
            // Edits and toggles fire on the press only, not while held
            toggle_gravity: input.get_key_state(KeyCode::KeyG).is_just_pressed(),
            restore_origin: input.get_key_state(KeyCode::KeyO).is_just_pressed(),
            randomize_brush: input.get_key_state(KeyCode::KeyR).is_just_pressed(),
            add_voxel: input.get_mouse_button_state(MouseButton::Left).is_just_pressed(),
            remove_voxel: input.get_mouse_button_state(MouseButton::Right).is_just_pressed(),
            recolor_face: input.get_mouse_button_state(MouseButton::Middle).is_just_pressed(),
        }
    }

    /// Applies player actions to the actor and the edit queue.
    pub fn apply_player_action(&mut self, action: &PlayerAction) {
        if action.toggle_gravity {
            self.set_gravity(!self.gravity_enabled);
        }

        let intent = &mut self.actor.intent;
        intent.forward = axis_intent(action.move_forward, action.move_backward);
        intent.sideward = axis_intent(action.move_right, action.move_left);
        if self.gravity_enabled {
            intent.upward = 0;
            if action.move_up && self.actor.try_jump(self.motion.jump_speed) {
                log::debug!("Jump");
            }
        } else {
            intent.upward = axis_intent(action.move_up, action.move_down);
        }

        if let Some((dx, dy)) = action.rotate_view {
            // screen y grows downward, pitch grows upward
            self.actor.camera.rotate(
                dx as f32 * self.mouse_sensitivity,
                -(dy as f32) * self.mouse_sensitivity,
            );
        }

        if action.randomize_brush {
            self.brush_color = HueBrightness::random();
            log::debug!("Brush hue {:.2}", self.brush_color.hue);
        }

        if action.restore_origin {
            self.queue_edit(EditCommand::InsertAt {
                position: VoxelPosition::ORIGIN,
                color: HueBrightness::default(),
            });
        }
        if action.add_voxel {
            self.queue_edit(EditCommand::AddVoxel(self.brush_color));
        }
        if action.remove_voxel {
            self.queue_edit(EditCommand::RemoveVoxel);
        }
        if action.recolor_face {
            self.queue_edit(EditCommand::RecolorFace(self.brush_color));
        }
    }

    /// Overrides the camera orientation.
    pub fn set_view(&mut self, yaw: Rad<f32>, pitch: Rad<f32>) {
        self.actor.camera.yaw = yaw;
        self.actor.camera.pitch = Rad(pitch.0.clamp(
            -std::f32::consts::FRAC_PI_2,
            std::f32::consts::FRAC_PI_2,
        ));
    }
}

fn axis_intent(positive: bool, negative: bool) -> i8 {
    positive as i8 - negative as i8
}

/// Represents player actions derived from input
///
/// This struct contains flags for the movement, view, and edit actions that can be
/// triggered by input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerAction {
    /// Movement actions - true if key is pressed or held
    pub move_forward: bool,
    /// Walk away from the view direction
    pub move_backward: bool,
    /// Strafe left
    pub move_left: bool,
    /// Strafe right
    pub move_right: bool,
    /// Fly up, or jump while gravity is on
    pub move_up: bool,
    /// Fly down while gravity is off
    pub move_down: bool,

    /// View rotation in pixels of mouse motion
    pub rotate_view: Option<(f64, f64)>,

    /// Actions that should only trigger on press, not hold
    pub toggle_gravity: bool,
    /// Re-add the origin voxel
    pub restore_origin: bool,
    /// Pick a random brush hue
    pub randomize_brush: bool,
    /// Add a voxel against the targeted face
    pub add_voxel: bool,
    /// Remove the targeted voxel
    pub remove_voxel: bool,
    /// Repaint the targeted face
    pub recolor_face: bool,
}
