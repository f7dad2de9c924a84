use bevy::log::LogPlugin;
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

mod clock;
mod components;
mod config;
mod engine;
mod events;
mod geometry;
mod locations;
mod resources;
mod store;
mod style;
mod systems;

use config::QuizConfig;
use engine::{RoundEngine, RoundSettings};
use events::{GuessEvent, RestartEvent};
use locations::{campus_locations, validated};
use resources::*;
use store::{BestTime, FileStore};
use systems::hud::*;
use systems::input::*;
use systems::overlay::*;
use systems::round::*;

fn main() {
    let config = QuizConfig::from_env();

    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Campus Map Quiz".into(),
                    resolution: (1024., 768.).into(),
                    ..default()
                }),
                ..default()
            })
            .set(LogPlugin {
                filter: config.log_filter.clone(),
                ..default()
            }),
    );
    config.report_ignored();

    let (locations, errors) = validated(campus_locations());
    for err in &errors {
        error!("Skipping location: {err}");
    }
    if locations.is_empty() {
        error!("No playable locations, nothing to quiz on");
        app.add_systems(Startup, |mut exit: EventWriter<AppExit>| {
            exit.send(AppExit::error());
        });
        app.run();
        return;
    }

    info!(
        "Loaded {} locations; best time stored under {}",
        locations.len(),
        config.data_dir.display()
    );
    let settings = RoundSettings::from_config(&config, locations.len());
    let engine: QuizEngine = RoundEngine::new(
        locations,
        settings,
        BestTime::new(FileStore::new(&config.data_dir)),
        StdRng::from_os_rng(),
    );

    app.insert_resource(ClearColor(Color::srgb(0.8, 0.82, 0.79)))
        .insert_resource(MapView::new(config.map_center, config.map_zoom))
        .insert_resource(TimerRefresh::new(config.timer_refresh))
        .insert_resource(ToastSettings {
            duration: config.toast_duration,
        })
        .insert_resource(Overlays::default())
        .insert_resource(Hud::default())
        .insert_resource(PointerState::default())
        .insert_resource(engine)
        .add_event::<GuessEvent>()
        .add_event::<RestartEvent>()
        .init_gizmo_group::<HairlineGizmos>()
        .add_systems(
            Startup,
            (
                configure_stroke_widths,
                setup_map,
                spawn_overlays,
                spawn_hud,
                start_first_game,
            )
                .chain(),
        )
        .add_systems(
            Update,
            (
                (
                    restart_input_system,
                    double_click_system,
                    right_drag_pan_system,
                ),
                restart_system,
                guess_system,
                continuation_system,
                timer_refresh_system,
                expire_toast_system,
                sync_overlays,
                sync_hud_text,
                draw_overlay_outlines,
            )
                .chain(),
        )
        .run();
}
