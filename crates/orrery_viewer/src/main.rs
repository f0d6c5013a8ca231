use bevy::app::AppExit;
use bevy::core_pipeline::bloom::BloomSettings;
use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use orrery::camera::{CameraController, CameraState};
use orrery::{
    presets, AnimationScheduler, GlobalSimulationState, SceneBuilder,
    SharedSimulationState,
};
use smooth_bevy_cameras::controllers::orbit::{
    OrbitCameraBundle, OrbitCameraController, OrbitCameraPlugin,
};
use smooth_bevy_cameras::LookTransformPlugin;

mod backend;
mod config;
mod ui;
mod update;

const CAMERA_EYE: Vec3 = Vec3::new(-30.0, 30.0, 30.0);
const CAMERA_DAMPING: f32 = 0.25;
const LIGHT_INTENSITY: f32 = 150_000.0;
const LIGHT_RANGE: f32 = 500.0;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(LookTransformPlugin)
        .add_plugins(OrbitCameraPlugin::new(false))
        .add_plugins(EguiPlugin)
        .init_resource::<ui::UiState>()
        .add_systems(Startup, setup)
        .add_systems(Update, ui::render.run_if(resource_exists::<Orrery>()))
        .add_systems(
            Update,
            (update::camera_focus, update::observe_camera, update::animate)
                .chain()
                .after(ui::render)
                .run_if(resource_exists::<Orrery>()),
        )
        .run();
}

/// The animation core, driven once per bevy frame.
#[derive(Resource)]
pub struct Orrery(pub AnimationScheduler<Entity, ObservedCamera>);

/// Scene light that follows the star.
#[derive(Resource)]
pub struct SceneLight(pub Entity);

/// Mirrors the bevy orbit camera. Damping and input are handled by
/// smooth-bevy-cameras; this only reports where it ended up.
#[derive(Debug, Clone, Copy)]
pub struct ObservedCamera(pub CameraState);

impl CameraController for ObservedCamera {
    fn step(&mut self) -> CameraState {
        self.0
    }
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    mut exit: EventWriter<AppExit>,
) {
    commands.insert_resource(ClearColor(Color::BLACK));

    commands.insert_resource(AmbientLight {
        color: Color::rgb_u8(0xaa, 0xaa, 0xaa),
        brightness: 0.3,
    });

    let table = match config::load_system_table() {
        Ok(table) => table,
        Err(err) => {
            error!("{err:#}, falling back to the built-in solar system");
            presets::solar_system()
        }
    };

    let initial = GlobalSimulationState::default();
    let state = match SharedSimulationState::new(initial) {
        Ok(state) => state,
        Err(err) => {
            error!("{err}");
            exit.send(AppExit);
            return;
        }
    };

    let mut factory = backend::BevyFactory {
        commands: &mut commands,
        meshes: meshes.as_mut(),
        materials: materials.as_mut(),
        asset_server: asset_server.as_ref(),
    };

    let scene = match SceneBuilder::new(table)
        .with_initial_state(initial)
        .build(&mut factory)
    {
        Ok(scene) => scene,
        Err(err) => {
            error!("Invalid system table: {err}");
            exit.send(AppExit);
            return;
        }
    };

    let light = commands
        .spawn(PointLightBundle {
            point_light: PointLight {
                color: Color::rgb_u8(255, 220, 180),
                intensity: LIGHT_INTENSITY,
                range: LIGHT_RANGE,
                shadows_enabled: true,
                ..default()
            },
            ..default()
        })
        .id();
    commands.insert_resource(SceneLight(light));

    commands
        .spawn(Camera3dBundle {
            camera: Camera {
                hdr: true,
                ..default()
            },
            ..default()
        })
        .insert(BloomSettings::OLD_SCHOOL)
        .insert(OrbitCameraBundle::new(
            {
                let mut controller = OrbitCameraController::default();

                controller.smoothing_weight = 1.0 - CAMERA_DAMPING;
                controller.mouse_wheel_zoom_sensitivity = 0.0;

                controller
            },
            CAMERA_EYE,
            Vec3::ZERO,
            Vec3::Y,
        ));

    let camera = ObservedCamera(CameraState::looking_at(
        CAMERA_EYE.as_dvec3(),
        orrery::Vec3::ZERO,
    ));

    let mut scheduler = AnimationScheduler::with_monotonic_clock(camera, state);
    scheduler.start(scene);
    commands.insert_resource(Orrery(scheduler));
}
