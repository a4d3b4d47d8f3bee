// Interactive demo: particles stream into a circular arena.
//
// Left mouse pulls particles toward the cursor, right mouse pushes them
// away, arrow keys toggle the gravity direction.
use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use bevy::window::WindowResolution;
use verlet2d::config::{WINDOW_SIZE, WORLD_SIZE};
use verlet2d::{
    Boundary, GravityDirection, SimCommand, Simulation, SpawnerConfig, VerletPlugin,
    step_simulation,
};

const GRAVITY_KEYS: [(KeyCode, GravityDirection); 4] = [
    (KeyCode::ArrowUp, GravityDirection::Up),
    (KeyCode::ArrowDown, GravityDirection::Down),
    (KeyCode::ArrowLeft, GravityDirection::Left),
    (KeyCode::ArrowRight, GravityDirection::Right),
];

#[derive(Component)]
struct ParticleVisual {
    index: usize,
}

#[derive(Component)]
struct DiagnosticsText;

/// Unit circle shared by every particle, scaled by its radius
#[derive(Resource)]
struct ParticleMesh(Handle<Mesh>);

// Simulation space is window pixels with y pointing down
fn sim_to_world(position: Vec2) -> Vec3 {
    Vec3::new(
        position.x - WORLD_SIZE / 2.0,
        WORLD_SIZE / 2.0 - position.y,
        0.0,
    )
}

fn world_to_sim(position: Vec2) -> Vec2 {
    Vec2::new(position.x + WORLD_SIZE / 2.0, WORLD_SIZE / 2.0 - position.y)
}

fn init(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    simulation: Res<Simulation>,
) {
    commands.spawn(Camera2d);
    commands.insert_resource(ParticleMesh(meshes.add(Circle::new(1.0))));

    let backdrop = match simulation.boundary() {
        Boundary::Circle(circle) => meshes.add(Circle::new(circle.radius)),
        Boundary::Rect(rect) => {
            let size = rect.max - rect.min;
            meshes.add(Rectangle::new(size.x, size.y))
        }
    };
    commands.spawn((
        Mesh2d(backdrop),
        MeshMaterial2d(materials.add(Color::BLACK)),
        Transform::from_translation(sim_to_world(simulation.boundary().center()).with_z(-1.0)),
    ));
}

fn spawn_missing_visuals(
    mut commands: Commands,
    mesh: Res<ParticleMesh>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    simulation: Res<Simulation>,
    mut spawned: Local<usize>,
) {
    let particles = simulation.particles();
    for (index, particle) in particles.iter().enumerate().skip(*spawned) {
        commands.spawn((
            ParticleVisual { index },
            Mesh2d(mesh.0.clone()),
            MeshMaterial2d(materials.add(particle.color)),
            Transform::from_translation(sim_to_world(particle.position))
                .with_scale(Vec3::splat(particle.radius)),
        ));
    }
    *spawned = particles.len();
}

fn update_particle_transforms(
    simulation: Res<Simulation>,
    mut query: Query<(&ParticleVisual, &mut Transform)>,
) {
    let particles = simulation.particles();
    for (visual, mut transform) in query.iter_mut() {
        if let Some(particle) = particles.get(visual.index) {
            transform.translation = sim_to_world(particle.position);
        }
    }
}

fn mouse_forces(
    mut simulation: ResMut<Simulation>,
    windows: Query<&Window>,
    camera_query: Query<(&Camera, &GlobalTransform)>,
    mouse: Res<ButtonInput<MouseButton>>,
) {
    let pull = mouse.pressed(MouseButton::Left);
    let push = mouse.pressed(MouseButton::Right);
    if !pull && !push {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor_pos) = window.cursor_position() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };
    let Ok(world_pos) = camera.viewport_to_world_2d(camera_transform, cursor_pos) else {
        return;
    };

    let point = world_to_sim(world_pos);
    if pull {
        simulation.apply(SimCommand::pull(point));
    }
    if push {
        simulation.apply(SimCommand::push(point));
    }
}

fn gravity_controls(mut simulation: ResMut<Simulation>, input: Res<ButtonInput<KeyCode>>) {
    for (key, direction) in GRAVITY_KEYS {
        if input.just_pressed(key) {
            let gravity = simulation.gravity().toggled(direction);
            simulation.apply(SimCommand::SetGravity(gravity));
            info!("gravity set to {:?}", gravity);
        }
    }
}

fn setup_diagnostics(mut commands: Commands) {
    commands.spawn((
        Text::default(),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        TextColor(Color::BLACK),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
        DiagnosticsText,
    ));
}

fn update_diagnostics(
    diagnostics: Res<DiagnosticsStore>,
    simulation: Res<Simulation>,
    mut query: Query<&mut Text, With<DiagnosticsText>>,
) {
    for mut text in &mut query {
        let fps = diagnostics
            .get(&FrameTimeDiagnosticsPlugin::FPS)
            .and_then(|fps| fps.smoothed())
            .unwrap_or(0.0);

        text.0 = format!(
            "FPS: {:.1}\nParticles: {}\nGravity: {:?}",
            fps,
            simulation.particle_count(),
            simulation.gravity(),
        );
    }
}

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Verlet".into(),
                resolution: WindowResolution::from((WINDOW_SIZE, WINDOW_SIZE)),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        .add_plugins(VerletPlugin::default().with_spawner(SpawnerConfig::default()))
        .insert_resource(ClearColor(Color::WHITE))
        .add_systems(Startup, (init, setup_diagnostics))
        .add_systems(FixedUpdate, mouse_forces.before(step_simulation))
        .add_systems(
            Update,
            (
                gravity_controls,
                spawn_missing_visuals,
                update_particle_transforms,
                update_diagnostics,
            )
                .chain(),
        )
        .run();
}
