use crate::components::{FootprintOverlay, GroundTile, GuessMarker, MapCamera};
use crate::resources::{MapView, Overlays, QuizEngine};
use crate::style::{HAIRLINE_WEIGHT, STROKE_WEIGHT};
use bevy::math::Isometry2d;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;

const GROUND_TILE_SIZE: f32 = 40.0;
const GROUND_TILES_X: i32 = 40;
const GROUND_TILES_Y: i32 = 30;
const FOOTPRINT_Z: f32 = 1.0;
const MARKER_Z: f32 = 2.0;

// Outlines no wider than HAIRLINE_WEIGHT; everything else uses the default group
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct HairlineGizmos;

pub fn configure_stroke_widths(mut store: ResMut<GizmoConfigStore>) {
    let (config, _) = store.config_mut::<DefaultGizmoConfigGroup>();
    config.line_width = STROKE_WEIGHT;
    let (config, _) = store.config_mut::<HairlineGizmos>();
    config.line_width = HAIRLINE_WEIGHT;
}

fn is_hairline(weight: f32) -> bool {
    weight <= HAIRLINE_WEIGHT
}

pub fn setup_map(mut commands: Commands, view: Res<MapView>) {
    let center = view.camera_position();
    commands.spawn((
        Camera2d,
        MapCamera,
        Transform::from_translation(center.extend(0.0)),
    ));

    // Checkerboard ground so panning is visible
    let half_width = GROUND_TILES_X as f32 * GROUND_TILE_SIZE / 2.0;
    let half_height = GROUND_TILES_Y as f32 * GROUND_TILE_SIZE / 2.0;
    for y in 0..GROUND_TILES_Y {
        for x in 0..GROUND_TILES_X {
            let pos_x = x as f32 * GROUND_TILE_SIZE - half_width + GROUND_TILE_SIZE / 2.0;
            let pos_y = y as f32 * GROUND_TILE_SIZE - half_height + GROUND_TILE_SIZE / 2.0;
            let tile_color = if (x + y) % 2 == 0 {
                Color::srgb(0.85, 0.87, 0.84)
            } else {
                Color::srgb(0.9, 0.92, 0.89)
            };

            commands.spawn((
                Sprite {
                    color: tile_color,
                    custom_size: Some(Vec2::splat(GROUND_TILE_SIZE)),
                    ..default()
                },
                Transform::from_translation(Vec3::new(pos_x, pos_y, -1.0)),
                GroundTile,
            ));
        }
    }
}

/// Spawns one hidden fill mesh per footprint plus the (hidden) guess marker.
pub fn spawn_overlays(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    engine: Res<QuizEngine>,
    view: Res<MapView>,
) {
    for (id, location) in engine.locations().iter().enumerate() {
        let outline: Vec<Vec2> = location
            .polygon
            .iter()
            .map(|&point| view.projection.geo_to_world(point))
            .collect();

        commands.spawn((
            Name::new(location.name.clone()),
            Mesh2d(meshes.add(footprint_mesh(&outline))),
            MeshMaterial2d(materials.add(ColorMaterial::from(Color::NONE))),
            Transform::from_xyz(0.0, 0.0, FOOTPRINT_Z),
            Visibility::Hidden,
            FootprintOverlay { id, outline },
        ));
    }

    commands.spawn((
        Name::new("Guess Marker"),
        Mesh2d(meshes.add(Circle::new(1.0))),
        MeshMaterial2d(materials.add(ColorMaterial::from(Color::NONE))),
        Transform::from_xyz(0.0, 0.0, MARKER_Z),
        Visibility::Hidden,
        GuessMarker,
    ));
}

/// Triangle fan over the ring. Campus footprints are convex.
fn footprint_mesh(outline: &[Vec2]) -> Mesh {
    let positions: Vec<[f32; 3]> = outline.iter().map(|p| [p.x, p.y, 0.0]).collect();
    let normals = vec![[0.0, 0.0, 1.0]; positions.len()];
    let uvs = vec![[0.0, 0.0]; positions.len()];
    let indices: Vec<u32> = (1..outline.len().saturating_sub(1) as u32)
        .flat_map(|i| [0, i, i + 1])
        .collect();

    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
    .with_inserted_indices(Indices::U32(indices))
}

// Mirrors the Overlays resource onto the footprint and marker entities
pub fn sync_overlays(
    overlays: Res<Overlays>,
    view: Res<MapView>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut footprints: Query<
        (&FootprintOverlay, &MeshMaterial2d<ColorMaterial>, &mut Visibility),
        Without<GuessMarker>,
    >,
    mut markers: Query<
        (&MeshMaterial2d<ColorMaterial>, &mut Transform, &mut Visibility),
        With<GuessMarker>,
    >,
) {
    if !overlays.is_changed() {
        return;
    }

    for (footprint, material, mut visibility) in footprints.iter_mut() {
        match overlays.polygons.get(&footprint.id) {
            Some(style) => {
                if let Some(material) = materials.get_mut(&material.0) {
                    material.color = style.fill();
                }
                *visibility = Visibility::Visible;
            }
            None => *visibility = Visibility::Hidden,
        }
    }

    for (material, mut transform, mut visibility) in markers.iter_mut() {
        match overlays.marker {
            Some((at, style)) => {
                if let Some(material) = materials.get_mut(&material.0) {
                    material.color = style.fill();
                }
                let position = view.projection.geo_to_world(at);
                transform.translation = position.extend(MARKER_Z);
                transform.scale = Vec3::splat(style.radius);
                *visibility = Visibility::Visible;
            }
            None => *visibility = Visibility::Hidden,
        }
    }
}

// Outlines are immediate-mode, redrawn every frame from the current styles
pub fn draw_overlay_outlines(
    mut gizmos: Gizmos,
    mut hairlines: Gizmos<HairlineGizmos>,
    overlays: Res<Overlays>,
    view: Res<MapView>,
    footprints: Query<&FootprintOverlay>,
) {
    for footprint in footprints.iter() {
        let Some(style) = overlays.polygons.get(&footprint.id) else {
            continue;
        };
        let Some(&first) = footprint.outline.first() else {
            continue;
        };
        let ring = footprint
            .outline
            .iter()
            .copied()
            .chain(std::iter::once(first));
        if is_hairline(style.stroke_weight) {
            hairlines.linestrip_2d(ring, style.stroke());
        } else {
            gizmos.linestrip_2d(ring, style.stroke());
        }
    }

    if let Some((at, style)) = overlays.marker {
        let isometry = Isometry2d::from_translation(view.projection.geo_to_world(at));
        if is_hairline(style.stroke_weight) {
            hairlines.circle_2d(isometry, style.radius, style.stroke_color);
        } else {
            gizmos.circle_2d(isometry, style.radius, style.stroke_color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{MarkerStyle, PolygonStyle};

    #[test]
    fn fan_covers_every_vertex() {
        let square = [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ];
        let mesh = footprint_mesh(&square);
        let Some(Indices::U32(indices)) = mesh.indices() else {
            panic!("expected u32 indices");
        };
        assert_eq!(indices, &vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(mesh.count_vertices(), 4);
    }

    #[test]
    fn stroke_weights_pick_the_gizmo_group() {
        assert!(is_hairline(PolygonStyle::debug().stroke_weight));
        assert!(!is_hairline(PolygonStyle::base().stroke_weight));
        assert!(!is_hairline(PolygonStyle::verdict(true).stroke_weight));
        assert!(!is_hairline(MarkerStyle::verdict(false).stroke_weight));
    }

    #[test]
    fn gizmo_groups_take_the_style_widths() {
        let mut store = GizmoConfigStore::default();
        store.insert(GizmoConfig::default(), DefaultGizmoConfigGroup);
        store.insert(GizmoConfig::default(), HairlineGizmos);

        let mut app = App::new();
        app.insert_resource(store)
            .add_systems(Startup, configure_stroke_widths);
        app.update();

        let store = app.world().resource::<GizmoConfigStore>();
        assert_eq!(
            store.config::<DefaultGizmoConfigGroup>().0.line_width,
            PolygonStyle::verdict(true).stroke_weight
        );
        assert_eq!(
            store.config::<HairlineGizmos>().0.line_width,
            PolygonStyle::debug().stroke_weight
        );
    }
}
