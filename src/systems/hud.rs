use crate::components::{HudField, RestartButton, ToastPanel};
use crate::engine::Tone;
use crate::resources::{Hud, ToastSettings};
use bevy::prelude::*;

const PANEL_COLOR: Color = Color::srgba(0.04, 0.07, 0.13, 0.85);
const TEXT_COLOR: Color = Color::srgb(0.9, 0.93, 0.97);

pub fn spawn_hud(mut commands: Commands) {
    // Prompt and scoreboard, top-left
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(12.0),
                left: Val::Px(12.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(6.0),
                padding: UiRect::all(Val::Px(12.0)),
                ..default()
            },
            BackgroundColor(PANEL_COLOR),
        ))
        .with_children(|panel| {
            spawn_field(panel, HudField::Prompt, 22.0);
            spawn_field(panel, HudField::Progress, 16.0);
            spawn_field(panel, HudField::Score, 16.0);
            spawn_field(panel, HudField::Timer, 16.0);
            spawn_field(panel, HudField::Best, 16.0);

            panel
                .spawn((
                    Button,
                    RestartButton,
                    Node {
                        margin: UiRect::top(Val::Px(6.0)),
                        padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
                        justify_content: JustifyContent::Center,
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.13, 0.83, 0.93)),
                ))
                .with_children(|button| {
                    button.spawn((
                        Text::new("Restart (R)"),
                        TextFont {
                            font_size: 16.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.04, 0.07, 0.13)),
                    ));
                });
        });

    // Toast, bottom-center
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(24.0),
            width: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            ..default()
        })
        .with_children(|row| {
            row.spawn((
                ToastPanel,
                Node {
                    padding: UiRect::axes(Val::Px(16.0), Val::Px(10.0)),
                    ..default()
                },
                BackgroundColor(tone_color(Tone::Neutral)),
                Visibility::Hidden,
            ))
            .with_children(|toast| {
                spawn_field(toast, HudField::Toast, 18.0);
            });
        });
}

fn spawn_field(parent: &mut ChildBuilder, field: HudField, font_size: f32) {
    parent.spawn((
        Text::new(""),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(TEXT_COLOR),
        field,
    ));
}

fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Positive => Color::srgba(0.09, 0.64, 0.29, 0.92),
        Tone::Negative => Color::srgba(0.94, 0.27, 0.27, 0.92),
        Tone::Neutral => Color::srgba(0.2, 0.25, 0.33, 0.92),
    }
}

fn field_text(field: HudField, hud: &Hud) -> String {
    match field {
        HudField::Prompt => hud.prompt.clone(),
        HudField::Progress => format!("Round {}", hud.progress),
        HudField::Score => format!("Score {}", hud.score),
        HudField::Timer => format!("Time {}", hud.timer),
        HudField::Best => format!("Best {}", hud.best),
        HudField::Toast => hud
            .toast
            .as_ref()
            .map(|toast| toast.message.clone())
            .unwrap_or_default(),
    }
}

pub fn sync_hud_text(
    hud: Res<Hud>,
    mut fields: Query<(&HudField, &mut Text)>,
    mut toast_panels: Query<(&mut BackgroundColor, &mut Visibility), With<ToastPanel>>,
) {
    if !hud.is_changed() {
        return;
    }

    for (field, mut text) in fields.iter_mut() {
        let value = field_text(*field, &hud);
        if text.0 != value {
            text.0 = value;
        }
    }

    for (mut background, mut visibility) in toast_panels.iter_mut() {
        match &hud.toast {
            Some(toast) => {
                background.0 = tone_color(toast.tone);
                *visibility = Visibility::Inherited;
            }
            None => *visibility = Visibility::Hidden,
        }
    }
}

// Stamps new toasts with the frame they appear on and drops them once expired
pub fn expire_toast_system(
    time: Res<Time<Real>>,
    settings: Res<ToastSettings>,
    mut hud: ResMut<Hud>,
) {
    let now = time.elapsed();
    let Some(shown_at) = hud.toast.as_ref().map(|toast| toast.shown_at) else {
        return;
    };
    match shown_at {
        None => {
            if let Some(toast) = hud.bypass_change_detection().toast.as_mut() {
                toast.shown_at = Some(now);
            }
        }
        Some(at) if now.saturating_sub(at) >= settings.duration => {
            hud.toast = None;
        }
        Some(_) => {}
    }
}
