//! Pixel geometry of the shaft view.
//!
//! Floors are horizontal lines stacked upward from a baseline three quarters
//! down the viewport, spanning its middle third. Cars stand side by side from
//! the left end of the floor lines, one slot per car in collection order.

use serde::Serialize;

use crate::shared::ElevatorState;

pub const CAR_WIDTH: f64 = 36.0;
pub const CAR_HEIGHT: f64 = 56.0;
const CAR_GAP: f64 = 16.0;
const SHAFT_MARGIN: f64 = 10.0;

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Viewport {
        Viewport { width, height }
    }

    pub fn bottom_floor_y(&self) -> f64 {
        self.height / 4.0 * 3.0
    }

    pub fn left_x(&self) -> f64 {
        self.width / 3.0
    }

    pub fn right_x(&self) -> f64 {
        self.left_x() + self.width / 3.0
    }
}

/// Outline of one car and the x positions of its two door edges.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct CarGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(rename = "leftDoorX")]
    pub left_door_x: f64,
    #[serde(rename = "rightDoorX")]
    pub right_door_x: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct Layout {
    viewport: Viewport,
    floor_height: f64,
}

impl Layout {
    pub fn new(viewport: Viewport, floor_height: f64) -> Layout {
        Layout {
            viewport,
            floor_height,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Y coordinate of every drawn floor line, bottom first.
    pub fn floor_lines(&self, n_floors: u32) -> Vec<f64> {
        (0..n_floors)
            .map(|floor| self.viewport.bottom_floor_y() - self.floor_height * floor as f64)
            .collect()
    }

    pub fn car(&self, slot: usize, elevator: &ElevatorState) -> CarGeometry {
        let floor_y = self.viewport.bottom_floor_y() - (elevator.altitude * self.floor_height + 2.0);
        let x = self.viewport.left_x() + slot as f64 * (CAR_WIDTH + CAR_GAP) + SHAFT_MARGIN;
        let door_span = CAR_WIDTH - 5.0;
        let half_open = elevator.door_position / 2.0;

        CarGeometry {
            x,
            y: floor_y - CAR_HEIGHT,
            width: CAR_WIDTH,
            height: CAR_HEIGHT,
            left_door_x: x + 2.0 + (0.5 - half_open) * door_span,
            right_door_x: x + 3.0 + (0.5 + half_open) * door_span,
        }
    }
}
