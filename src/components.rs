// components.rs
use bevy::prelude::*;

use crate::locations::LocationId;

#[derive(Component)]
pub struct MapCamera;

#[derive(Component)]
pub struct GroundTile;

/// Filled footprint mesh; `outline` holds the ring in world space for gizmos.
#[derive(Component)]
pub struct FootprintOverlay {
    pub id: LocationId,
    pub outline: Vec<Vec2>,
}

#[derive(Component)]
pub struct GuessMarker;

/// Which scoreboard value a text node mirrors.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudField {
    Prompt,
    Progress,
    Score,
    Timer,
    Best,
    Toast,
}

#[derive(Component)]
pub struct ToastPanel;

#[derive(Component)]
pub struct RestartButton;
