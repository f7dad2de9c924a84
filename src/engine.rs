// engine.rs
// Never touches Bevy entities; time only arrives as `now`.

use bevy::log::{debug, info, warn};
use bevy::prelude::Resource;
use rand::rngs::StdRng;
use rand::Rng;
use std::time::Duration;

use crate::clock::RoundClock;
use crate::config::QuizConfig;
use crate::geometry::{polygon_contains, LatLng};
use crate::locations::{Location, LocationId};
use crate::store::{BestTime, ScalarStore};
use crate::style::{MarkerStyle, PolygonStyle};

pub const RESET_MESSAGE: &str = "Game reset. Find the first location!";
pub const COMPLETE_PROMPT: &str = "Round complete! Hit restart to try again.";

pub trait Renderer {
    fn show_polygon(&mut self, id: LocationId, style: PolygonStyle);
    fn hide_polygon(&mut self, id: LocationId);
    fn show_marker(&mut self, at: LatLng, style: MarkerStyle);
    fn remove_marker(&mut self);
}

pub trait Presenter {
    fn set_prompt(&mut self, text: &str);
    fn set_progress(&mut self, round: usize, total: usize);
    fn set_score(&mut self, score: usize);
    fn set_elapsed(&mut self, elapsed: Duration);
    fn set_best(&mut self, best: Option<Duration>);
    fn notify(&mut self, message: String, tone: Tone);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub location: LocationId,
    pub correct: bool,
}

// Deferred "next round" step, only valid for the game that scheduled it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledAdvance {
    pub generation: u64,
    pub due: Duration,
}

#[derive(Debug, Clone)]
pub struct RoundSettings {
    pub feedback_delay: Duration,
    pub positive_threshold: usize,
    pub debug_polygons: bool,
}

impl RoundSettings {
    pub fn from_config(config: &QuizConfig, rounds: usize) -> Self {
        Self {
            feedback_delay: config.feedback_delay,
            positive_threshold: config.positive_threshold_for(rounds),
            debug_polygons: config.debug_polygons,
        }
    }
}

// Fisher-Yates over 0..n
pub fn shuffled_order<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<LocationId> {
    let mut order: Vec<LocationId> = (0..n).collect();
    for i in (1..n).rev() {
        let j = rng.random_range(0..=i);
        order.swap(i, j);
    }
    order
}

pub struct RoundEngine<S> {
    locations: Vec<Location>,
    settings: RoundSettings,
    best: BestTime<S>,
    rng: StdRng,
    order: Vec<LocationId>,
    round: usize,
    score: usize,
    locked: bool,
    clock: RoundClock,
    generation: u64,
    scheduled: Option<ScheduledAdvance>,
}

impl<S: ScalarStore + Send + Sync + 'static> Resource for RoundEngine<S> {}

impl<S: ScalarStore> RoundEngine<S> {
    // Input stays locked until start_game
    pub fn new(
        locations: Vec<Location>,
        settings: RoundSettings,
        best: BestTime<S>,
        rng: StdRng,
    ) -> Self {
        Self {
            locations,
            settings,
            best,
            rng,
            order: Vec::new(),
            round: 0,
            score: 0,
            locked: true,
            clock: RoundClock::default(),
            generation: 0,
            scheduled: None,
        }
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn total_rounds(&self) -> usize {
        self.locations.len()
    }

    #[cfg(test)]
    pub fn round(&self) -> usize {
        self.round
    }

    #[cfg(test)]
    pub fn score(&self) -> usize {
        self.score
    }

    #[cfg(test)]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn is_over(&self) -> bool {
        self.round >= self.total_rounds()
    }

    #[cfg(test)]
    pub fn order(&self) -> &[LocationId] {
        &self.order
    }

    #[cfg(test)]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn scheduled(&self) -> Option<ScheduledAdvance> {
        self.scheduled
    }

    #[cfg(test)]
    pub fn best_ms(&self) -> Option<u64> {
        self.best.get_best()
    }

    pub fn elapsed(&self, now: Duration) -> Duration {
        self.clock.elapsed(now)
    }

    pub fn is_timer_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn current_location(&self) -> Option<&Location> {
        let id = *self.order.get(self.round)?;
        self.locations.get(id)
    }

    pub fn start_game(
        &mut self,
        now: Duration,
        renderer: &mut impl Renderer,
        presenter: &mut impl Presenter,
    ) {
        self.score = 0;
        self.round = 0;
        self.locked = false;
        self.generation += 1;
        self.scheduled = None;
        self.order = shuffled_order(self.locations.len(), &mut self.rng);
        self.clock.start(now);
        info!(
            "Game {} started with round order {:?}",
            self.generation, self.order
        );

        self.clear_visuals(renderer);
        self.refresh_scoreboard(now, presenter);
        self.present_prompt(now, presenter);
        presenter.notify(RESET_MESSAGE.to_string(), Tone::Neutral);
    }

    pub fn present_prompt(&mut self, now: Duration, presenter: &mut impl Presenter) {
        if self.is_over() {
            self.end_game(now, presenter);
            return;
        }
        let total = self.total_rounds();
        let Some(location) = self.current_location() else {
            return;
        };
        presenter.set_prompt(&location.prompt);
        presenter.set_progress(self.round + 1, total);
    }

    /// Scores a guess for the current round. `None` means the guess was dropped
    /// because input is locked or the game is over.
    pub fn handle_guess(
        &mut self,
        now: Duration,
        at: LatLng,
        renderer: &mut impl Renderer,
        presenter: &mut impl Presenter,
    ) -> Option<Verdict> {
        if self.locked || self.is_over() {
            debug!("Dropping guess at {at:?}: input locked");
            return None;
        }
        self.locked = true;

        let id = *self.order.get(self.round)?;
        let location = self.locations.get(id)?;
        let correct = polygon_contains(at, &location.polygon);

        renderer.show_polygon(id, PolygonStyle::verdict(correct));
        renderer.show_marker(at, MarkerStyle::verdict(correct));

        if correct {
            self.score += 1;
            presenter.notify(
                format!("Correct! {} highlighted.", location.name),
                Tone::Positive,
            );
        } else {
            presenter.notify(
                format!("Not quite. {} is in red.", location.name),
                Tone::Negative,
            );
        }
        info!(
            "Round {}/{}: {} guessed {}",
            self.round + 1,
            self.total_rounds(),
            location.name,
            if correct { "correctly" } else { "incorrectly" }
        );

        self.round += 1;
        self.refresh_scoreboard(now, presenter);

        if self.is_over() {
            self.end_game(now, presenter);
        } else {
            self.scheduled = Some(ScheduledAdvance {
                generation: self.generation,
                due: now + self.settings.feedback_delay,
            });
        }

        Some(Verdict {
            location: id,
            correct,
        })
    }

    // Runs the pending next-round step once due; true if it ran
    pub fn poll(
        &mut self,
        now: Duration,
        renderer: &mut impl Renderer,
        presenter: &mut impl Presenter,
    ) -> bool {
        let Some(advance) = self.scheduled else {
            return false;
        };
        if advance.generation != self.generation {
            self.scheduled = None;
            return false;
        }
        if now < advance.due {
            return false;
        }

        self.scheduled = None;
        self.clear_visuals(renderer);
        self.locked = false;
        self.present_prompt(now, presenter);
        true
    }

    pub fn end_game(&mut self, now: Duration, presenter: &mut impl Presenter) {
        self.clock.stop(now);
        self.scheduled = None;
        self.locked = true;

        let elapsed = self.clock.elapsed(now);
        let elapsed_ms = elapsed.as_millis() as u64;
        let total = self.total_rounds();

        if total > 0 && self.score == total {
            let improved = self.best.get_best().is_none_or(|best| elapsed_ms < best);
            if improved {
                match self.best.set_best(elapsed_ms) {
                    Ok(()) => info!("New best time: {elapsed_ms} ms"),
                    Err(err) => warn!("Could not save best time: {err}"),
                }
                presenter.set_best(self.best.get_best_duration());
            }
        }

        presenter.set_elapsed(elapsed);
        presenter.set_prompt(COMPLETE_PROMPT);
        presenter.set_progress(total, total);

        let tone = if self.score >= self.settings.positive_threshold {
            Tone::Positive
        } else {
            Tone::Negative
        };
        presenter.notify(
            format!("Game over. You scored {} of {}.", self.score, total),
            tone,
        );
        info!(
            "Game {} over: {}/{} in {} ms",
            self.generation, self.score, total, elapsed_ms
        );
    }

    fn clear_visuals(&self, renderer: &mut impl Renderer) {
        for id in 0..self.locations.len() {
            if self.settings.debug_polygons {
                renderer.show_polygon(id, PolygonStyle::debug());
            } else {
                renderer.hide_polygon(id);
            }
        }
        renderer.remove_marker();
    }

    fn refresh_scoreboard(&self, now: Duration, presenter: &mut impl Presenter) {
        presenter.set_score(self.score);
        presenter.set_elapsed(self.clock.elapsed(now));
        presenter.set_best(self.best.get_best_duration());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::vertex_centroid;
    use crate::locations::campus_locations;
    use crate::store::MemoryStore;
    use rand::SeedableRng;
    use std::collections::HashMap;

    const FAR_AWAY: LatLng = LatLng::new(0.0, 0.0);

    #[derive(Default)]
    struct RecordingRenderer {
        polygons: HashMap<LocationId, PolygonStyle>,
        marker: Option<(LatLng, MarkerStyle)>,
    }

    impl Renderer for RecordingRenderer {
        fn show_polygon(&mut self, id: LocationId, style: PolygonStyle) {
            self.polygons.insert(id, style);
        }

        fn hide_polygon(&mut self, id: LocationId) {
            self.polygons.remove(&id);
        }

        fn show_marker(&mut self, at: LatLng, style: MarkerStyle) {
            self.marker = Some((at, style));
        }

        fn remove_marker(&mut self) {
            self.marker = None;
        }
    }

    #[derive(Default)]
    struct RecordingPresenter {
        prompt: String,
        progress: (usize, usize),
        score: usize,
        elapsed: Duration,
        best: Option<Duration>,
        toasts: Vec<(String, Tone)>,
    }

    impl RecordingPresenter {
        fn last_toast(&self) -> &(String, Tone) {
            self.toasts.last().unwrap()
        }
    }

    impl Presenter for RecordingPresenter {
        fn set_prompt(&mut self, text: &str) {
            self.prompt = text.to_string();
        }

        fn set_progress(&mut self, round: usize, total: usize) {
            self.progress = (round, total);
        }

        fn set_score(&mut self, score: usize) {
            self.score = score;
        }

        fn set_elapsed(&mut self, elapsed: Duration) {
            self.elapsed = elapsed;
        }

        fn set_best(&mut self, best: Option<Duration>) {
            self.best = best;
        }

        fn notify(&mut self, message: String, tone: Tone) {
            self.toasts.push((message, tone));
        }
    }

    fn settings(feedback_ms: u64) -> RoundSettings {
        RoundSettings {
            feedback_delay: Duration::from_millis(feedback_ms),
            positive_threshold: 4,
            debug_polygons: false,
        }
    }

    fn engine_with(seed: u64, settings: RoundSettings) -> RoundEngine<MemoryStore> {
        RoundEngine::new(
            campus_locations(),
            settings,
            BestTime::new(MemoryStore::default()),
            StdRng::seed_from_u64(seed),
        )
    }

    fn target(engine: &RoundEngine<MemoryStore>) -> LatLng {
        let location = engine.current_location().unwrap();
        vertex_centroid(&location.polygon).unwrap()
    }

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    // First `misses` rounds are guessed wrong; the last guess lands at start + elapsed
    fn play_game(
        engine: &mut RoundEngine<MemoryStore>,
        renderer: &mut RecordingRenderer,
        presenter: &mut RecordingPresenter,
        start: Duration,
        elapsed: Duration,
        misses: usize,
    ) {
        let delay = engine.settings.feedback_delay;
        let total = engine.total_rounds();
        engine.start_game(start, renderer, presenter);

        for i in 0..total {
            let is_last = i + 1 == total;
            let now = if is_last {
                start + elapsed
            } else {
                start + delay * i as u32
            };
            let at = if i < misses { FAR_AWAY } else { target(engine) };
            assert!(engine.handle_guess(now, at, renderer, presenter).is_some());
            if !is_last {
                assert!(engine.poll(start + delay * (i as u32 + 1), renderer, presenter));
            }
        }
        assert!(engine.is_over());
    }

    #[test]
    fn shuffle_yields_permutations() {
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut order = shuffled_order(7, &mut rng);
            order.sort_unstable();
            assert_eq!(order, (0..7).collect::<Vec<_>>());
        }
        let mut rng = StdRng::seed_from_u64(1);
        assert!(shuffled_order(0, &mut rng).is_empty());
        assert_eq!(shuffled_order(1, &mut rng), vec![0]);
    }

    #[test]
    fn shuffle_is_uniform_over_permutations() {
        let mut rng = StdRng::seed_from_u64(7);
        let trials = 60_000;
        let mut counts: HashMap<Vec<usize>, usize> = HashMap::new();
        for _ in 0..trials {
            *counts.entry(shuffled_order(3, &mut rng)).or_default() += 1;
        }

        assert_eq!(counts.len(), 6);
        let expected = trials / 6;
        for (order, count) in &counts {
            assert!(
                count.abs_diff(expected) < expected / 10,
                "{order:?} drawn {count} times, expected about {expected}"
            );
        }
    }

    #[test]
    fn restart_draws_a_fresh_order() {
        let mut engine = engine_with(3, settings(1200));
        let mut renderer = RecordingRenderer::default();
        let mut presenter = RecordingPresenter::default();

        let mut seen = std::collections::HashSet::new();
        for i in 0..20 {
            engine.start_game(ms(i * 10), &mut renderer, &mut presenter);
            let mut sorted = engine.order().to_vec();
            seen.insert(engine.order().to_vec());
            sorted.sort_unstable();
            assert_eq!(sorted, vec![0, 1, 2, 3, 4]);
        }
        assert!(seen.len() > 1);
    }

    #[test]
    fn start_game_resets_everything() {
        let mut engine = engine_with(11, settings(1200));
        let mut renderer = RecordingRenderer::default();
        let mut presenter = RecordingPresenter::default();

        assert!(engine.is_locked());
        engine.start_game(ms(0), &mut renderer, &mut presenter);

        assert!(!engine.is_locked());
        assert_eq!(engine.round(), 0);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.generation(), 1);
        assert_eq!(presenter.prompt, engine.current_location().unwrap().prompt);
        assert_eq!(presenter.progress, (1, 5));
        assert_eq!(presenter.best, None);
        assert_eq!(
            presenter.last_toast(),
            &(RESET_MESSAGE.to_string(), Tone::Neutral)
        );
        assert!(renderer.polygons.is_empty());
        assert!(renderer.marker.is_none());
    }

    #[test]
    fn correct_guess_scores_and_paints_feedback() {
        let mut engine = engine_with(5, settings(1200));
        let mut renderer = RecordingRenderer::default();
        let mut presenter = RecordingPresenter::default();
        engine.start_game(ms(0), &mut renderer, &mut presenter);

        let id = engine.order()[0];
        let name = engine.locations()[id].name.clone();
        let at = target(&engine);
        let verdict = engine
            .handle_guess(ms(800), at, &mut renderer, &mut presenter)
            .unwrap();

        assert_eq!(verdict, Verdict { location: id, correct: true });
        assert_eq!(engine.score(), 1);
        assert_eq!(engine.round(), 1);
        assert!(engine.is_locked());
        assert_eq!(presenter.score, 1);
        assert_eq!(presenter.elapsed, ms(800));
        assert_eq!(
            presenter.last_toast(),
            &(format!("Correct! {name} highlighted."), Tone::Positive)
        );
        assert_eq!(renderer.polygons.get(&id), Some(&PolygonStyle::verdict(true)));
        assert_eq!(renderer.marker, Some((at, MarkerStyle::verdict(true))));
        assert_eq!(
            engine.scheduled(),
            Some(ScheduledAdvance { generation: 1, due: ms(2000) })
        );
    }

    #[test]
    fn wrong_guess_names_the_answer() {
        let mut engine = engine_with(5, settings(1200));
        let mut renderer = RecordingRenderer::default();
        let mut presenter = RecordingPresenter::default();
        engine.start_game(ms(0), &mut renderer, &mut presenter);

        let id = engine.order()[0];
        let name = engine.locations()[id].name.clone();
        let verdict = engine
            .handle_guess(ms(10), FAR_AWAY, &mut renderer, &mut presenter)
            .unwrap();

        assert!(!verdict.correct);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.round(), 1);
        assert_eq!(
            presenter.last_toast(),
            &(format!("Not quite. {name} is in red."), Tone::Negative)
        );
        assert_eq!(renderer.polygons.get(&id), Some(&PolygonStyle::verdict(false)));
    }

    #[test]
    fn guesses_while_locked_are_dropped() {
        let mut engine = engine_with(9, settings(1200));
        let mut renderer = RecordingRenderer::default();
        let mut presenter = RecordingPresenter::default();
        engine.start_game(ms(0), &mut renderer, &mut presenter);

        let at = target(&engine);
        engine.handle_guess(ms(100), at, &mut renderer, &mut presenter);
        let prompt = presenter.prompt.clone();
        let toasts = presenter.toasts.len();

        for t in [110, 500, 1199] {
            let next = target_after_advance(&engine);
            assert_eq!(engine.handle_guess(ms(t), next, &mut renderer, &mut presenter), None);
        }
        assert_eq!(engine.score(), 1);
        assert_eq!(engine.round(), 1);
        assert_eq!(presenter.prompt, prompt);
        assert_eq!(presenter.toasts.len(), toasts);
    }

    // Center of the next round's footprint
    fn target_after_advance(engine: &RoundEngine<MemoryStore>) -> LatLng {
        let id = engine.order()[engine.round()];
        vertex_centroid(&engine.locations()[id].polygon).unwrap()
    }

    #[test]
    fn continuation_waits_for_the_feedback_delay() {
        let mut engine = engine_with(2, settings(1200));
        let mut renderer = RecordingRenderer::default();
        let mut presenter = RecordingPresenter::default();
        engine.start_game(ms(0), &mut renderer, &mut presenter);
        engine.handle_guess(ms(300), FAR_AWAY, &mut renderer, &mut presenter);

        assert!(!engine.poll(ms(1499), &mut renderer, &mut presenter));
        assert!(engine.is_locked());
        assert!(renderer.marker.is_some());

        assert!(engine.poll(ms(1500), &mut renderer, &mut presenter));
        assert!(!engine.is_locked());
        assert!(renderer.polygons.is_empty());
        assert!(renderer.marker.is_none());
        assert_eq!(presenter.progress, (2, 5));
        assert_eq!(presenter.prompt, engine.current_location().unwrap().prompt);

        assert!(!engine.poll(ms(5000), &mut renderer, &mut presenter));
    }

    #[test]
    fn restart_cancels_pending_continuation() {
        let mut engine = engine_with(4, settings(1200));
        let mut renderer = RecordingRenderer::default();
        let mut presenter = RecordingPresenter::default();
        engine.start_game(ms(0), &mut renderer, &mut presenter);
        engine.handle_guess(ms(100), FAR_AWAY, &mut renderer, &mut presenter);

        engine.start_game(ms(500), &mut renderer, &mut presenter);
        assert_eq!(engine.scheduled(), None);
        engine.handle_guess(ms(1000), FAR_AWAY, &mut renderer, &mut presenter);

        // The first game's step would have been due at 1300.
        assert!(!engine.poll(ms(1300), &mut renderer, &mut presenter));
        assert!(engine.is_locked());
        assert_eq!(engine.round(), 1);
        assert_eq!(
            engine.scheduled(),
            Some(ScheduledAdvance { generation: 2, due: ms(2200) })
        );
        assert!(engine.poll(ms(2200), &mut renderer, &mut presenter));
    }

    #[test]
    fn score_never_outruns_round() {
        let mut steps = StdRng::seed_from_u64(99);
        let mut engine = engine_with(17, settings(50));
        let mut renderer = RecordingRenderer::default();
        let mut presenter = RecordingPresenter::default();
        let mut now = ms(0);
        engine.start_game(now, &mut renderer, &mut presenter);

        for _ in 0..2_000 {
            now += ms(steps.random_range(0..40));
            match steps.random_range(0..10) {
                0 => engine.start_game(now, &mut renderer, &mut presenter),
                1..=4 => {
                    if !engine.is_over() {
                        let at = target(&engine);
                        engine.handle_guess(now, at, &mut renderer, &mut presenter);
                    }
                }
                5..=6 => {
                    engine.handle_guess(now, FAR_AWAY, &mut renderer, &mut presenter);
                }
                _ => {
                    engine.poll(now, &mut renderer, &mut presenter);
                }
            }
            assert!(engine.score() <= engine.round());
            assert!(engine.round() <= engine.total_rounds());
            if engine.is_over() || engine.scheduled().is_some() {
                assert!(engine.is_locked());
            }
        }
    }

    #[test]
    fn perfect_game_end_to_end() {
        let mut engine = engine_with(21, settings(1200));
        let mut renderer = RecordingRenderer::default();
        let mut presenter = RecordingPresenter::default();

        play_game(&mut engine, &mut renderer, &mut presenter, ms(1_000), ms(8_000), 0);

        assert_eq!(engine.score(), 5);
        assert!(engine.is_locked());
        assert!(!engine.is_timer_running());
        assert_eq!(presenter.score, 5);
        assert_eq!(presenter.prompt, COMPLETE_PROMPT);
        assert_eq!(presenter.progress, (5, 5));
        assert_eq!(presenter.elapsed, ms(8_000));
        assert_eq!(
            presenter.last_toast(),
            &("Game over. You scored 5 of 5.".to_string(), Tone::Positive)
        );
        assert_eq!(engine.best_ms(), Some(8_000));
        assert_eq!(presenter.best, Some(ms(8_000)));
        assert_eq!(engine.elapsed(ms(60_000)), ms(8_000));

        // Terminal: nothing moves until the next restart.
        assert_eq!(
            engine.handle_guess(ms(9_500), FAR_AWAY, &mut renderer, &mut presenter),
            None
        );
        assert!(!engine.poll(ms(20_000), &mut renderer, &mut presenter));
        assert_eq!(engine.scheduled(), None);
    }

    #[test]
    fn best_time_only_improves_on_perfect_runs() {
        let mut engine = engine_with(8, settings(100));
        let mut renderer = RecordingRenderer::default();
        let mut presenter = RecordingPresenter::default();

        play_game(&mut engine, &mut renderer, &mut presenter, ms(0), ms(5_000), 0);
        assert_eq!(engine.best_ms(), Some(5_000));

        play_game(&mut engine, &mut renderer, &mut presenter, ms(10_000), ms(7_000), 0);
        assert_eq!(engine.score(), 5);
        assert_eq!(engine.best_ms(), Some(5_000));
        assert_eq!(presenter.best, Some(ms(5_000)));

        play_game(&mut engine, &mut renderer, &mut presenter, ms(20_000), ms(1_000), 1);
        assert_eq!(engine.score(), 4);
        assert_eq!(engine.best_ms(), Some(5_000));

        play_game(&mut engine, &mut renderer, &mut presenter, ms(30_000), ms(4_999), 0);
        assert_eq!(engine.best_ms(), Some(4_999));
    }

    #[test]
    fn end_of_game_tone_follows_threshold() {
        let mut engine = engine_with(13, settings(100));
        let mut renderer = RecordingRenderer::default();
        let mut presenter = RecordingPresenter::default();

        play_game(&mut engine, &mut renderer, &mut presenter, ms(0), ms(2_000), 1);
        assert_eq!(
            presenter.last_toast(),
            &("Game over. You scored 4 of 5.".to_string(), Tone::Positive)
        );

        play_game(&mut engine, &mut renderer, &mut presenter, ms(5_000), ms(2_000), 2);
        assert_eq!(
            presenter.last_toast(),
            &("Game over. You scored 3 of 5.".to_string(), Tone::Negative)
        );
        assert_eq!(engine.best_ms(), None);
        assert_eq!(presenter.best, None);
    }

    #[test]
    fn debug_outlines_survive_clearing() {
        let mut engine = engine_with(
            6,
            RoundSettings {
                debug_polygons: true,
                ..settings(100)
            },
        );
        let mut renderer = RecordingRenderer::default();
        let mut presenter = RecordingPresenter::default();
        engine.start_game(ms(0), &mut renderer, &mut presenter);
        assert_eq!(renderer.polygons.len(), 5);
        assert!(renderer
            .polygons
            .values()
            .all(|style| *style == PolygonStyle::debug()));

        let id = engine.order()[0];
        engine.handle_guess(ms(10), FAR_AWAY, &mut renderer, &mut presenter);
        assert_eq!(renderer.polygons.get(&id), Some(&PolygonStyle::verdict(false)));

        engine.poll(ms(200), &mut renderer, &mut presenter);
        assert_eq!(renderer.polygons.get(&id), Some(&PolygonStyle::debug()));
        assert!(renderer.marker.is_none());
    }

    #[test]
    fn empty_location_set_ends_immediately_without_a_best() {
        let mut engine = RoundEngine::new(
            Vec::new(),
            settings(100),
            BestTime::new(MemoryStore::default()),
            StdRng::seed_from_u64(0),
        );
        let mut renderer = RecordingRenderer::default();
        let mut presenter = RecordingPresenter::default();
        engine.start_game(ms(0), &mut renderer, &mut presenter);

        assert!(engine.is_over());
        assert!(engine.is_locked());
        assert_eq!(presenter.prompt, COMPLETE_PROMPT);
        assert_eq!(engine.best_ms(), None);
    }
}
