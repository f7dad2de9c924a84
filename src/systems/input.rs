use crate::components::{MapCamera, RestartButton};
use crate::events::{GuessEvent, RestartEvent};
use crate::resources::{DragAnchor, MapView, PointerState};
use bevy::math::DVec2;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

// Two quick primary clicks on the map become a guess at the clicked coordinate
pub fn double_click_system(
    time: Res<Time<Real>>,
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<MapCamera>>,
    interactions: Query<&Interaction>,
    view: Res<MapView>,
    mut pointer: ResMut<PointerState>,
    mut guesses: EventWriter<GuessEvent>,
) {
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };

    // Clicks on the restart button are not map clicks
    if interactions.iter().any(|i| *i != Interaction::None) {
        return;
    }

    if !pointer.register_click(time.elapsed(), cursor) {
        return;
    }

    let Ok((camera, camera_transform)) = cameras.get_single() else {
        return;
    };
    let Ok(world) = camera.viewport_to_world_2d(camera_transform, cursor) else {
        return;
    };

    let at = view.projection.world_to_geo(world);
    debug!("Double-click at {at:?}");
    guesses.send(GuessEvent { at });
}

// Secondary-button drag pans the otherwise fixed map. No window or cursor
// means no update; with no camera only MapView moves.
pub fn right_drag_pan_system(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut pointer: ResMut<PointerState>,
    mut view: ResMut<MapView>,
    mut cameras: Query<&mut Transform, With<MapCamera>>,
) {
    if !buttons.pressed(MouseButton::Right) {
        pointer.drag = None;
        return;
    }
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };

    if buttons.just_pressed(MouseButton::Right) {
        pointer.drag = Some(DragAnchor {
            cursor_start: cursor,
            center_px: view.projection.geo_to_pixel(view.center),
        });
        return;
    }
    let Some(anchor) = pointer.drag else {
        return;
    };

    // Screen and map pixels both grow downward, so the delta applies directly
    let delta = cursor - anchor.cursor_start;
    let center_px = anchor.center_px - DVec2::new(f64::from(delta.x), f64::from(delta.y));
    let center = view.projection.pixel_to_geo(center_px);
    if !center.is_finite() {
        return;
    }
    view.center = center;

    let Ok(mut transform) = cameras.get_single_mut() else {
        return;
    };
    let position = view.camera_position();
    transform.translation.x = position.x;
    transform.translation.y = position.y;
}

pub fn restart_input_system(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    buttons: Query<&Interaction, (Changed<Interaction>, With<RestartButton>)>,
    mut restarts: EventWriter<RestartEvent>,
) {
    let clicked = buttons.iter().any(|i| *i == Interaction::Pressed);
    if clicked || keyboard_input.just_pressed(KeyCode::KeyR) {
        restarts.send(RestartEvent);
    }
}
