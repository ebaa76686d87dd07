pub mod json;
pub mod layout;
pub mod text;

use std::io;

use crate::config::{Config, RenderMode};
use crate::error::Result;
use crate::shared::ElevatorState;

pub use json::JsonRenderer;
pub use layout::{Layout, Viewport};
pub use text::TextRenderer;

/// Read-only view of the simulation handed to a renderer after a tick.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub tick: u64,
    pub paused: bool,
    pub elevators: &'a [ElevatorState],
}

pub trait Renderer {
    fn render(&mut self, frame: &Frame<'_>) -> Result<()>;

    /// Only geometry depends on the viewport; simulation state never does.
    fn resize(&mut self, _viewport: Viewport) {}
}

/// Headless runs.
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _frame: &Frame<'_>) -> Result<()> {
        Ok(())
    }
}

/// Builds the renderer selected in `[render]`, writing to stdout.
pub fn build_renderer(config: &Config) -> Box<dyn Renderer + Send> {
    let viewport = Viewport::new(config.render.viewport_width, config.render.viewport_height);

    let mut renderer: Box<dyn Renderer + Send> = match config.render.mode {
        RenderMode::Text => Box::new(TextRenderer::new(io::stdout(), config.simulation.n_floors, true)),
        RenderMode::Json => Box::new(JsonRenderer::new(
            io::stdout(),
            Layout::new(viewport, config.render.floor_height),
            config.simulation.n_floors,
        )),
        RenderMode::None => Box::new(NullRenderer),
    };
    renderer.resize(viewport);
    renderer
}
