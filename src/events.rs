use bevy::prelude::*;

use crate::geometry::LatLng;

// A double-click on the map, already converted to a coordinate
#[derive(Event, Debug, Clone, Copy)]
pub struct GuessEvent {
    pub at: LatLng,
}

// Restart button or the R key
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct RestartEvent;
