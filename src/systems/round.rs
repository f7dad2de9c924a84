use crate::engine::Presenter;
use crate::events::{GuessEvent, RestartEvent};
use crate::resources::{Hud, Overlays, QuizEngine, TimerRefresh};
use bevy::prelude::*;

// Entry point of play: runs once everything is spawned
pub fn start_first_game(
    time: Res<Time<Real>>,
    mut engine: ResMut<QuizEngine>,
    mut overlays: ResMut<Overlays>,
    mut hud: ResMut<Hud>,
) {
    engine.start_game(time.elapsed(), &mut *overlays, &mut *hud);
}

pub fn restart_system(
    time: Res<Time<Real>>,
    mut restarts: EventReader<RestartEvent>,
    mut engine: ResMut<QuizEngine>,
    mut overlays: ResMut<Overlays>,
    mut hud: ResMut<Hud>,
) {
    // Several presses in one frame still mean a single restart
    if restarts.read().count() == 0 {
        return;
    }
    engine.start_game(time.elapsed(), &mut *overlays, &mut *hud);
}

pub fn guess_system(
    time: Res<Time<Real>>,
    mut guesses: EventReader<GuessEvent>,
    mut engine: ResMut<QuizEngine>,
    mut overlays: ResMut<Overlays>,
    mut hud: ResMut<Hud>,
) {
    for guess in guesses.read() {
        let Some(verdict) =
            engine.handle_guess(time.elapsed(), guess.at, &mut *overlays, &mut *hud)
        else {
            continue;
        };
        debug!(
            "Guess at {:?} on location {}: correct={}",
            guess.at, verdict.location, verdict.correct
        );
    }
}

// Moves on to the next round once the feedback delay has passed
pub fn continuation_system(
    time: Res<Time<Real>>,
    mut engine: ResMut<QuizEngine>,
    mut overlays: ResMut<Overlays>,
    mut hud: ResMut<Hud>,
) {
    if engine.scheduled().is_none() {
        return;
    }
    engine.poll(time.elapsed(), &mut *overlays, &mut *hud);
}

// Display-only refresh of the running timer
pub fn timer_refresh_system(
    time: Res<Time<Real>>,
    engine: Res<QuizEngine>,
    mut refresh: ResMut<TimerRefresh>,
    mut hud: ResMut<Hud>,
) {
    refresh.0.tick(time.delta());
    if refresh.0.just_finished() && engine.is_timer_running() {
        hud.set_elapsed(engine.elapsed(time.elapsed()));
    }
}
