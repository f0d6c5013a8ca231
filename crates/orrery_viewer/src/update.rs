use bevy::prelude::*;
use orrery::camera::CameraState;
use smooth_bevy_cameras::LookTransform;

use crate::backend::BevySink;
use crate::ui::{FocusMode, UiState};
use crate::{ObservedCamera, Orrery, SceneLight};

pub fn animate(
    mut orrery: ResMut<Orrery>,
    light: Res<SceneLight>,
    mut transforms: Query<&mut Transform, Without<Camera>>,
) {
    let mut sink = BevySink {
        transforms: &mut transforms,
        light: light.0,
    };

    match orrery.0.tick(&mut sink) {
        Ok(_) => {}
        Err(never) => match never {},
    }
}

pub fn observe_camera(
    mut orrery: ResMut<Orrery>,
    look_transform: Query<&LookTransform>,
) {
    let Ok(look) = look_transform.get_single() else {
        return;
    };

    *orrery.0.camera_mut() = ObservedCamera(CameraState {
        eye: look.eye.as_dvec3(),
        target: look.target.as_dvec3(),
        up: look.up.as_dvec3(),
    });
}

pub fn camera_focus(
    mut look_transform: Query<&mut LookTransform>,
    ui_state: Res<UiState>,
    orrery: Res<Orrery>,
) {
    let Ok(mut look) = look_transform.get_single_mut() else {
        return;
    };

    let Some(scene) = orrery.0.scene() else {
        return;
    };

    match &ui_state.focus_mode {
        FocusMode::Star => {
            look.target = scene.star.position.as_vec3();
        }
        FocusMode::Body(focused) => {
            if let Some(entry) = scene.registry.get(focused) {
                look.target = entry.instance.position.as_vec3();
            }
        }
    }
}
