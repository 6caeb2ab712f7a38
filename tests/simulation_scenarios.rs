use cgmath::Rad;
use std::f32::consts::FRAC_PI_2;
use web_time::Duration;

use voxel_sandbox::config::SimulationConfig;
use voxel_sandbox::engine_state::{
    voxels::{
        block::{block_side::BlockSide, color::HueBrightness},
        position::VoxelPosition,
        visibility::visible_faces,
        world::VoxelGrid,
    },
    EditCommand, EngineState,
};

const TICK: Duration = Duration::from_millis(20);

fn grid_with(positions: &[(i32, i32, i32)]) -> VoxelGrid {
    let mut grid = VoxelGrid::new();
    for p in positions {
        grid.insert(VoxelPosition::new(p.0, p.1, p.2), HueBrightness::default());
    }
    grid
}

fn engine(positions: &[(i32, i32, i32)], spawn: [f32; 3], gravity: bool) -> EngineState {
    let config = SimulationConfig {
        spawn_position: spawn,
        gravity_enabled: gravity,
        ..SimulationConfig::default()
    };
    EngineState::with_grid(&config, grid_with(positions))
}

#[test]
fn actor_falls_and_rests_on_voxel() {
    let config = SimulationConfig::default();
    let rest = 0.5 + config.actor_extents.half_height_bottom;
    let mut state = engine(&[(0, 0, 0)], [0.0, rest + 2.0, 0.0], true);
    state.actor.vertical_velocity = -10.0;

    for _ in 0..100 {
        state.tick(TICK);
    }

    assert_eq!(state.actor.position.y, rest);
    assert_eq!(state.actor.vertical_velocity, 0.0);
    assert!(state.is_grounded());
}

#[test]
fn picking_from_above_and_below() {
    let mut state = engine(&[(0, 0, 0)], [0.0, 5.0, 0.0], false);
    state.set_view(Rad(0.0), Rad(-FRAC_PI_2));
    state.tick(TICK);

    let hit = state.target().copied().unwrap();
    assert_eq!(hit.position, VoxelPosition::ORIGIN);
    assert_eq!(hit.side, BlockSide::TOP);
    assert!((hit.distance - 4.5).abs() < 1e-4);
    assert_eq!(state.frame().slot(hit.slot), Some((VoxelPosition::ORIGIN, BlockSide::TOP)));

    state.set_view(Rad(0.0), Rad(FRAC_PI_2));
    state.tick(TICK);
    assert!(state.target().is_none());
}

#[test]
fn stacked_voxels_hide_shared_faces() {
    let mut state = engine(&[(0, 0, 0), (0, 1, 0)], [0.0, 6.0, 0.0], false);
    state.set_view(Rad(0.0), Rad(-FRAC_PI_2));
    state.tick(TICK);

    let frame = state.frame();
    assert_eq!(frame.len(), 10);
    for slot in 0..frame.len() {
        let face = frame.slot(slot).unwrap();
        assert_ne!(face, (VoxelPosition::new(0, 0, 0), BlockSide::TOP));
        assert_ne!(face, (VoxelPosition::new(0, 1, 0), BlockSide::BOTTOM));
    }
    assert_eq!(state.target().unwrap().position, VoxelPosition::new(0, 1, 0));
}

#[test]
fn batch_matches_visibility_and_is_idempotent() {
    let mut state = engine(&[(0, 0, 0), (1, 0, 0), (0, 0, 1), (5, 5, 5)], [0.0, 9.0, 0.0], false);
    state.tick(TICK);
    let first = state.frame().clone();
    state.tick(TICK);
    assert_eq!(&first, state.frame());

    let faces = visible_faces(state.grid());
    assert_eq!(first.len(), faces.len());
    for (slot, face) in faces.iter().enumerate() {
        assert_eq!(first.slot(slot), Some((face.position, face.side)));
        let corners = first.corners(slot).unwrap();
        let normal = face.side.normal();
        let center = face.position.center();
        // every emitted corner lies on the face plane
        for corner in corners.chunks_exact(3) {
            let offset = [corner[0] - center.x, corner[1] - center.y, corner[2] - center.z];
            let along = offset[0] * normal.x + offset[1] * normal.y + offset[2] * normal.z;
            assert!((along - 0.5).abs() < 1e-6);
        }
    }
    assert_eq!(first.tex_coords.len(), faces.len() * 8);
    assert_eq!(first.colors.len(), faces.len() * 16);
}

#[test]
fn build_a_tower_then_tear_it_down() {
    let mut state = engine(&[(0, 0, 0)], [0.0, 5.5, 0.0], false);
    state.set_view(Rad(0.0), Rad(-FRAC_PI_2));
    state.tick(TICK);

    for height in 1..=3 {
        state.queue_edit(EditCommand::AddVoxel(HueBrightness::new(height as f32, 1.0)));
        state.tick(TICK);
        assert!(state.grid().contains(VoxelPosition::new(0, height, 0)));
    }
    state.tick(TICK);
    assert_eq!(state.frame().len(), 4 * 4 + 2);

    // the next voxel would reach into the actor's feet
    state.queue_edit(EditCommand::AddVoxel(HueBrightness::default()));
    state.tick(TICK);
    assert!(!state.grid().contains(VoxelPosition::new(0, 4, 0)));

    for height in (0..=3).rev() {
        state.tick(TICK);
        assert_eq!(state.target().unwrap().position, VoxelPosition::new(0, height, 0));
        state.queue_edit(EditCommand::RemoveVoxel);
        state.tick(TICK);
    }
    assert!(state.grid().is_empty());
}

#[test]
fn generated_floor_catches_the_actor() {
    let config = SimulationConfig {
        world_generation: voxel_sandbox::engine_state::voxels::world::WorldGenerationMethod::Flat,
        world_radius: 4,
        spawn_position: [0.3, 3.0, -0.2],
        gravity_enabled: true,
        ..SimulationConfig::default()
    };
    let mut state = EngineState::new(&config);
    for _ in 0..100 {
        state.tick(TICK);
    }
    assert!(state.is_grounded());
    assert_eq!(state.actor.position.y, -1.0 + 0.5 + config.actor_extents.half_height_bottom);
}
