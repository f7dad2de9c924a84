// resources.rs
use bevy::math::DVec2;
use bevy::prelude::*;
use std::collections::HashMap;
use std::time::Duration;

use crate::clock::{format_best, format_duration};
use crate::engine::{Presenter, Renderer, RoundEngine, Tone};
use crate::geometry::{LatLng, MapProjection};
use crate::locations::LocationId;
use crate::store::FileStore;
use crate::style::{MarkerStyle, PolygonStyle};

pub type QuizEngine = RoundEngine<FileStore>;

const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(400);
const DOUBLE_CLICK_SLOP: f32 = 6.0;

#[derive(Resource, Clone, Copy)]
pub struct MapView {
    pub projection: MapProjection,
    pub center: LatLng,
}

impl MapView {
    pub fn new(center: LatLng, zoom: u8) -> Self {
        Self {
            projection: MapProjection::new(center, zoom),
            center,
        }
    }

    /// World position the camera should sit at to show `center`.
    pub fn camera_position(&self) -> Vec2 {
        self.projection.geo_to_world(self.center)
    }
}

/// What the map should currently show. Systems in `overlay` mirror it onto
/// mesh entities every frame it changes.
#[derive(Resource, Default, Debug)]
pub struct Overlays {
    pub polygons: HashMap<LocationId, PolygonStyle>,
    pub marker: Option<(LatLng, MarkerStyle)>,
}

impl Renderer for Overlays {
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

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub message: String,
    pub tone: Tone,
    /// Stamped by the first frame that displays the toast.
    pub shown_at: Option<Duration>,
}

/// Scoreboard text, already formatted for display.
#[derive(Resource, Debug)]
pub struct Hud {
    pub prompt: String,
    pub progress: String,
    pub score: String,
    pub timer: String,
    pub best: String,
    pub toast: Option<Toast>,
}

impl Default for Hud {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            progress: String::new(),
            score: "0".to_string(),
            timer: format_duration(Duration::ZERO),
            best: format_best(None),
            toast: None,
        }
    }
}

impl Presenter for Hud {
    fn set_prompt(&mut self, text: &str) {
        self.prompt = text.to_string();
    }

    fn set_progress(&mut self, round: usize, total: usize) {
        self.progress = format!("{round} / {total}");
    }

    fn set_score(&mut self, score: usize) {
        self.score = score.to_string();
    }

    fn set_elapsed(&mut self, elapsed: Duration) {
        self.timer = format_duration(elapsed);
    }

    fn set_best(&mut self, best: Option<Duration>) {
        self.best = format_best(best.map(|d| d.as_millis() as u64));
    }

    fn notify(&mut self, message: String, tone: Tone) {
        self.toast = Some(Toast {
            message,
            tone,
            shown_at: None,
        });
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DragAnchor {
    pub cursor_start: Vec2,
    pub center_px: DVec2,
}

#[derive(Resource, Default, Debug)]
pub struct PointerState {
    last_click: Option<(Duration, Vec2)>,
    pub drag: Option<DragAnchor>,
}

impl PointerState {
    /// Records a primary click and reports whether it completes a double-click.
    pub fn register_click(&mut self, now: Duration, cursor: Vec2) -> bool {
        if let Some((at, position)) = self.last_click.take() {
            if now.saturating_sub(at) <= DOUBLE_CLICK_WINDOW
                && position.distance(cursor) <= DOUBLE_CLICK_SLOP
            {
                return true;
            }
        }
        self.last_click = Some((now, cursor));
        false
    }
}

#[derive(Resource)]
pub struct TimerRefresh(pub Timer);

impl TimerRefresh {
    pub fn new(interval: Duration) -> Self {
        Self(Timer::new(interval, TimerMode::Repeating))
    }
}

#[derive(Resource, Clone, Copy)]
pub struct ToastSettings {
    pub duration: Duration,
}
