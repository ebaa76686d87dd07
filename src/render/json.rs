use serde::Serialize;
use std::io::Write;

use crate::error::Result;
use crate::render::layout::{CarGeometry, Layout, Viewport};
use crate::render::{Frame, Renderer};
use crate::shared::ElevatorState;

#[derive(Serialize)]
struct JsonCar<'a> {
    #[serde(flatten)]
    state: &'a ElevatorState,
    geometry: CarGeometry,
}

#[derive(Serialize)]
struct JsonFrame<'a> {
    tick: u64,
    paused: bool,
    viewport: Viewport,
    #[serde(rename = "floorLeftX")]
    floor_left_x: f64,
    #[serde(rename = "floorRightX")]
    floor_right_x: f64,
    #[serde(rename = "floorLines")]
    floor_lines: Vec<f64>,
    elevators: Vec<JsonCar<'a>>,
}

/// Emits one JSON object per frame (JSON lines), with the pixel geometry of
/// every car so an external front end can draw it without knowing the layout.
pub struct JsonRenderer<W: Write> {
    out: W,
    layout: Layout,
    n_floors: u32,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W, layout: Layout, n_floors: u32) -> JsonRenderer<W> {
        JsonRenderer {
            out,
            layout,
            n_floors,
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for JsonRenderer<W> {
    fn render(&mut self, frame: &Frame<'_>) -> Result<()> {
        let viewport = self.layout.viewport();
        let json_frame = JsonFrame {
            tick: frame.tick,
            paused: frame.paused,
            viewport,
            floor_left_x: viewport.left_x(),
            floor_right_x: viewport.right_x(),
            floor_lines: self.layout.floor_lines(self.n_floors),
            elevators: frame
                .elevators
                .iter()
                .enumerate()
                .map(|(slot, state)| JsonCar {
                    state,
                    geometry: self.layout.car(slot, state),
                })
                .collect(),
        };

        serde_json::to_writer(&mut self.out, &json_frame)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }

    fn resize(&mut self, viewport: Viewport) {
        self.layout.resize(viewport);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn render_one(renderer: &mut JsonRenderer<Vec<u8>>, elevators: &[ElevatorState]) {
        let frame = Frame {
            tick: 3,
            paused: false,
            elevators,
        };
        renderer.render(&frame).unwrap();
    }

    #[test]
    fn test_frame_carries_state_and_geometry() {
        // Arrange
        let layout = Layout::new(Viewport::new(1200.0, 800.0), 64.0);
        let mut renderer = JsonRenderer::new(Vec::new(), layout, 10);
        let elevators = vec![ElevatorState::new(0.0, 0.0, 4), ElevatorState::new(1.0, 0.5, 6)];

        // Act
        render_one(&mut renderer, &elevators);
        let output = String::from_utf8(renderer.into_inner()).unwrap();
        let frame: Value = serde_json::from_str(output.trim_end()).unwrap();

        // Assert
        assert_eq!(frame["tick"], 3);
        assert_eq!(frame["floorLines"].as_array().unwrap().len(), 10);
        assert_eq!(frame["floorLeftX"], 400.0);
        assert_eq!(frame["floorRightX"], 800.0);
        assert_eq!(frame["elevators"][0]["targetFloor"], 4);
        assert_eq!(frame["elevators"][0]["phase"], "moving");
        assert_eq!(frame["elevators"][0]["geometry"]["x"], 410.0);
        assert_eq!(frame["elevators"][1]["speed"], 0.5);
        assert_eq!(frame["elevators"][1]["geometry"]["x"], 462.0);
    }

    #[test]
    fn test_one_line_per_frame_and_resize() {
        let layout = Layout::new(Viewport::new(1200.0, 800.0), 64.0);
        let mut renderer = JsonRenderer::new(Vec::new(), layout, 10);
        let elevators = vec![ElevatorState::new(0.0, 0.0, 4)];

        render_one(&mut renderer, &elevators);
        renderer.resize(Viewport::new(300.0, 400.0));
        render_one(&mut renderer, &elevators);

        let output = String::from_utf8(renderer.into_inner()).unwrap();
        let frames: Vec<Value> = output.lines().map(|line| serde_json::from_str(line).unwrap()).collect();

        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0]["viewport"]["width"], 1200.0);
        assert_eq!(frames[1]["viewport"]["width"], 300.0);
        assert_eq!(frames[1]["elevators"][0]["geometry"]["x"], 110.0);
    }
}
