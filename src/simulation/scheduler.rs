/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{debug, info};
use std::io::BufRead;
use std::thread::{Builder, JoinHandle};
use std::time::{Duration, Instant};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::{RenderConfig, SchedulerConfig};
use crate::error::Result;
use crate::render::Renderer;
use crate::simulation::random::RandomSource;
use crate::simulation::step::Simulation;

/***************************************/
/*               Enums                 */
/***************************************/
enum Event {
    Tick(Instant),
    TogglePause(Instant),
    PauseInputClosed,
    Terminate,
    TerminateClosed,
}

/***************************************/
/*             Public API              */
/***************************************/

/**
 * Drives a `Simulation` on a fixed cadence and hands each frame to a renderer.
 *
 * # Fields
 * - `simulation`:      The owned simulation context.
 * - `renderer`:        Receives a read-only frame after each rendered tick.
 * - `tick_period`:     Nominal tick cadence. The measured time is what gets simulated.
 * - `max_ticks`:       Stop after this many advanced ticks.
 * - `render_every`:    Render one out of this many advanced ticks.
 * - `pause_rx`:        Each message flips the pause flag.
 * - `terminate_rx`:    Stops the loop.
 */
pub struct FrameScheduler<R: RandomSource> {
    simulation: Simulation<R>,
    renderer: Box<dyn Renderer + Send>,
    tick_period: Duration,
    max_ticks: Option<u64>,
    render_every: u64,
    pause_rx: cbc::Receiver<()>,
    terminate_rx: cbc::Receiver<()>,
}

impl<R: RandomSource> FrameScheduler<R> {
    pub fn new(
        scheduler_config: &SchedulerConfig,
        render_config: &RenderConfig,
        simulation: Simulation<R>,
        renderer: Box<dyn Renderer + Send>,
        pause_rx: cbc::Receiver<()>,
        terminate_rx: cbc::Receiver<()>,
    ) -> FrameScheduler<R> {
        FrameScheduler {
            simulation,
            renderer,
            tick_period: scheduler_config.tick_period(),
            max_ticks: scheduler_config.max_ticks,
            render_every: render_config.every_n_ticks.max(1),
            pause_rx,
            terminate_rx,
        }
    }

    /// Runs until the tick limit is reached or a terminate message arrives,
    /// then hands the simulation back.
    pub fn run(mut self) -> Result<Simulation<R>> {
        info!(
            "Running {} elevators every {:?}",
            self.simulation.elevators().len(),
            self.tick_period
        );

        let ticker = cbc::tick(self.tick_period);

        // Render the starting state once so a paused start is not blank
        self.renderer.render(&self.simulation.frame())?;

        loop {
            let event = self.wait_for_event(&ticker);
            if !self.handle_event(event)? {
                info!("Stopped after {} ticks", self.simulation.ticks());
                return Ok(self.simulation);
            }
        }
    }

    fn wait_for_event(&self, ticker: &cbc::Receiver<Instant>) -> Event {
        cbc::select! {
            recv(ticker) -> _scheduled => Event::Tick(Instant::now()),
            recv(self.pause_rx) -> msg => match msg {
                Ok(()) => Event::TogglePause(Instant::now()),
                Err(_) => Event::PauseInputClosed,
            },
            recv(self.terminate_rx) -> msg => match msg {
                Ok(()) => Event::Terminate,
                Err(_) => Event::TerminateClosed,
            },
        }
    }

    /// Returns `false` once the loop should stop.
    fn handle_event(&mut self, event: Event) -> Result<bool> {
        match event {
            Event::Tick(now) => {
                if !self.simulation.tick(now) {
                    return Ok(true);
                }

                let ticks = self.simulation.ticks();
                if ticks % self.render_every == 0 {
                    self.renderer.render(&self.simulation.frame())?;
                }

                if let Some(max_ticks) = self.max_ticks {
                    if ticks >= max_ticks {
                        return Ok(false);
                    }
                }
            }
            Event::TogglePause(now) => {
                self.simulation.toggle_pause(now);
                self.renderer.render(&self.simulation.frame())?;
            }
            Event::PauseInputClosed => {
                debug!("Pause input closed");
                self.pause_rx = cbc::never();
            }
            Event::Terminate => return Ok(false),
            Event::TerminateClosed => {
                self.terminate_rx = cbc::never();
            }
        }

        Ok(true)
    }
}

/// Forwards one pause toggle per line read from `input`. The thread exits
/// when the input ends or the scheduler is gone.
pub fn spawn_pause_input<B>(input: B, pause_tx: cbc::Sender<()>) -> std::io::Result<JoinHandle<()>>
where
    B: BufRead + Send + 'static,
{
    Builder::new().name("pause_input".into()).spawn(move || {
        for line in input.lines() {
            if line.is_err() || pause_tx.send(()).is_err() {
                break;
            }
        }
    })
}
