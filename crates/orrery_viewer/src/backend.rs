use std::convert::Infallible;
use std::path::Path;

use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;
use orrery::camera::CameraState;
use orrery::scene::{
    MaterialFactory, MaterialSpec, MeshFactory, RingGeometry, SceneSink,
};
use orrery::Num;

const ASSET_DIR: &str = "assets";
const GLOW_COLOR: Color = Color::rgba(1.0, 0.95, 0.8, 0.12);
/// Sides of the tube used to draw a flat annulus.
const ANNULUS_SIDES: usize = 4;

/// Material handle plus whether meshes using it should cast shadows.
/// Unlit materials never do, so the light inside the star is not blocked.
#[derive(Clone)]
pub struct BodyMaterial {
    handle: Handle<StandardMaterial>,
    casts_shadows: bool,
}

/// Spawns scene meshes as bevy entities.
pub struct BevyFactory<'a, 'w, 's> {
    pub commands: &'a mut Commands<'w, 's>,
    pub meshes: &'a mut Assets<Mesh>,
    pub materials: &'a mut Assets<StandardMaterial>,
    pub asset_server: &'a AssetServer,
}

impl BevyFactory<'_, '_, '_> {
    fn texture(&self, spec: &MaterialSpec) -> Option<Handle<Image>> {
        let path = spec.texture.as_ref()?;

        if !Path::new(ASSET_DIR).join(path).is_file() {
            warn!("Texture {path} not found, drawing untextured");
            return None;
        }

        Some(self.asset_server.load(path.clone()))
    }

    fn material(
        &mut self,
        spec: &MaterialSpec,
        material: StandardMaterial,
    ) -> BodyMaterial {
        let casts_shadows = !material.unlit;
        let texture = self.texture(spec);
        let handle = self.materials.add(StandardMaterial {
            base_color: color(spec),
            base_color_texture: texture,
            ..material
        });

        BodyMaterial {
            handle,
            casts_shadows,
        }
    }

    fn spawn(&mut self, mesh: Mesh, material: BodyMaterial) -> Entity {
        let mut entity = self.commands.spawn(PbrBundle {
            mesh: self.meshes.add(mesh),
            material: material.handle,
            ..default()
        });

        if !material.casts_shadows {
            entity.insert(NotShadowCaster);
        }

        entity.id()
    }
}

fn color(spec: &MaterialSpec) -> Color {
    let [r, g, b] = spec.color.rgb();
    Color::rgb_u8(r, g, b)
}

impl MaterialFactory for BevyFactory<'_, '_, '_> {
    type Material = BodyMaterial;

    fn basic(&mut self, spec: &MaterialSpec) -> BodyMaterial {
        self.material(
            spec,
            StandardMaterial {
                unlit: true,
                double_sided: true,
                cull_mode: None,
                ..default()
            },
        )
    }

    fn lambert(&mut self, spec: &MaterialSpec) -> BodyMaterial {
        self.material(
            spec,
            StandardMaterial {
                perceptual_roughness: 1.0,
                reflectance: 0.0,
                ..default()
            },
        )
    }

    fn phong(&mut self, spec: &MaterialSpec) -> BodyMaterial {
        self.material(
            spec,
            StandardMaterial {
                perceptual_roughness: 0.35,
                reflectance: 0.6,
                ..default()
            },
        )
    }

    fn standard(&mut self, spec: &MaterialSpec) -> BodyMaterial {
        self.material(spec, StandardMaterial::default())
    }
}

impl MeshFactory for BevyFactory<'_, '_, '_> {
    type Handle = Entity;

    fn create_sphere(
        &mut self,
        radius: Num,
        resolution: u32,
        material: BodyMaterial,
    ) -> Entity {
        let mesh = Mesh::from(shape::UVSphere {
            radius: radius as f32,
            sectors: resolution as usize,
            stacks: resolution as usize,
        });

        self.spawn(mesh, material)
    }

    fn create_ring(
        &mut self,
        geometry: &RingGeometry,
        material: BodyMaterial,
    ) -> Entity {
        // bevy's torus already lies in the XZ plane
        let torus = match *geometry {
            RingGeometry::Annulus {
                outer,
                inner,
                segments,
            } => shape::Torus {
                radius: ((outer + inner) / 2.0) as f32,
                ring_radius: ((outer - inner) / 2.0) as f32,
                subdivisions_segments: segments as usize,
                subdivisions_sides: ANNULUS_SIDES,
            },
            RingGeometry::Torus {
                radius,
                tube,
                radial_segments,
                tubular_segments,
            } => shape::Torus {
                radius: radius as f32,
                ring_radius: tube as f32,
                subdivisions_segments: tubular_segments as usize,
                subdivisions_sides: radial_segments as usize,
            },
        };

        self.spawn(Mesh::from(torus), material)
    }

    fn create_glow(&mut self, star: &Entity, diameter: Num) {
        let mesh = self.meshes.add(Mesh::from(shape::UVSphere {
            radius: (diameter / 2.0) as f32,
            sectors: 32,
            stacks: 32,
        }));
        let material = self.materials.add(StandardMaterial {
            base_color: GLOW_COLOR,
            alpha_mode: AlphaMode::Add,
            unlit: true,
            ..default()
        });

        self.commands.entity(*star).with_children(|star| {
            star.spawn((
                PbrBundle {
                    mesh,
                    material,
                    ..default()
                },
                NotShadowCaster,
            ));
        });
    }
}

/// Writes animation results into entity transforms. Bevy renders on its
/// own schedule, so presenting a frame is a no-op.
pub struct BevySink<'a, 'w, 's> {
    pub transforms:
        &'a mut Query<'w, 's, &'static mut Transform, Without<Camera>>,
    pub light: Entity,
}

impl SceneSink for BevySink<'_, '_, '_> {
    type Handle = Entity;
    type Error = Infallible;

    fn place(&mut self, handle: &Entity, position: orrery::Vec3) {
        if let Ok(mut transform) = self.transforms.get_mut(*handle) {
            transform.translation = position.as_vec3();
        }
    }

    fn rotate_y(&mut self, handle: &Entity, angle: Num) {
        if let Ok(mut transform) = self.transforms.get_mut(*handle) {
            transform.rotation = Quat::from_rotation_y(angle as f32);
        }
    }

    fn place_light(&mut self, position: orrery::Vec3) {
        let light = self.light;
        self.place(&light, position);
    }

    fn render_frame(
        &mut self,
        _camera: &CameraState,
    ) -> Result<(), Infallible> {
        Ok(())
    }
}
