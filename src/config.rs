// config.rs
use bevy::log::warn;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::geometry::LatLng;
use crate::locations::{CAMPUS_CENTER, CAMPUS_ZOOM};

const DEFAULT_LOG_FILTER: &str = "info,wgpu=error,naga=warn";

#[derive(Debug, Clone)]
pub struct QuizConfig {
    pub data_dir: PathBuf,
    pub feedback_delay: Duration,
    pub timer_refresh: Duration,
    pub toast_duration: Duration,
    // None derives it from the number of rounds
    pub positive_threshold: Option<usize>,
    pub debug_polygons: bool,
    pub log_filter: String,
    pub map_center: LatLng,
    pub map_zoom: u8,
    // Malformed variables as `KEY="raw"`, reported once logging is up
    pub ignored_vars: Vec<String>,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            feedback_delay: Duration::from_millis(1200),
            timer_refresh: Duration::from_millis(200),
            toast_duration: Duration::from_millis(1600),
            positive_threshold: None,
            debug_polygons: false,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            map_center: CAMPUS_CENTER,
            map_zoom: CAMPUS_ZOOM,
            ignored_vars: Vec::new(),
        }
    }
}

impl QuizConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let mut env = EnvReader {
            lookup,
            ignored: Vec::new(),
        };

        let data_dir = (env.lookup)("QUIZ_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);
        let feedback_delay = env.millis("QUIZ_FEEDBACK_MS", defaults.feedback_delay);
        let timer_refresh = env.millis("QUIZ_TIMER_REFRESH_MS", defaults.timer_refresh);
        let toast_duration = env.millis("QUIZ_TOAST_MS", defaults.toast_duration);
        let positive_threshold = env.parse("QUIZ_POSITIVE_THRESHOLD");
        let debug_polygons = env.parse("QUIZ_DEBUG_POLYGONS").unwrap_or(false);
        let log_filter = (env.lookup)("QUIZ_LOG").unwrap_or(defaults.log_filter);
        let map_center = LatLng::new(
            env.parse("QUIZ_MAP_LAT").unwrap_or(defaults.map_center.lat),
            env.parse("QUIZ_MAP_LNG").unwrap_or(defaults.map_center.lng),
        );
        let map_zoom = env
            .parse::<u8>("QUIZ_MAP_ZOOM")
            .unwrap_or(defaults.map_zoom)
            .min(22);

        Self {
            data_dir,
            feedback_delay,
            timer_refresh,
            toast_duration,
            positive_threshold,
            debug_polygons,
            log_filter,
            map_center,
            map_zoom,
            ignored_vars: env.ignored,
        }
    }

    // Call after LogPlugin is built, earlier warnings have no subscriber
    pub fn report_ignored(&self) {
        for var in &self.ignored_vars {
            warn!("Ignoring {var}: not a valid value, using the default");
        }
    }

    // Configured value, or 80% of the rounds rounded up
    pub fn positive_threshold_for(&self, rounds: usize) -> usize {
        self.positive_threshold
            .unwrap_or_else(|| (rounds * 4).div_ceil(5))
    }
}

struct EnvReader<F> {
    lookup: F,
    ignored: Vec<String>,
}

impl<F: Fn(&str) -> Option<String>> EnvReader<F> {
    // None when absent or malformed; malformed values are remembered
    fn parse<T: FromStr>(&mut self, key: &str) -> Option<T> {
        let raw = (self.lookup)(key)?;
        match raw.trim().parse::<T>() {
            Ok(value) => Some(value),
            Err(_) => {
                self.ignored.push(format!("{key}={raw:?}"));
                None
            }
        }
    }

    fn millis(&mut self, key: &str, fallback: Duration) -> Duration {
        self.parse::<u64>(key).map_or(fallback, Duration::from_millis)
    }
}

fn default_data_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(|home| PathBuf::from(home).join(".campus-map-quiz"))
        .unwrap_or_else(|| PathBuf::from(".campus-map-quiz"))
}
