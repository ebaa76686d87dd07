use std::io::Write;

use crate::error::Result;
use crate::render::{Frame, Renderer};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/**
 * Draws the shafts as text, one row per floor line from the top down and one
 * column per car.
 *
 * A car is drawn on the row nearest to its altitude. The door glyph shows
 * `[||]` when closed, `[<>]` while the door is part open and `[  ]` when fully open.
 */
pub struct TextRenderer<W: Write> {
    out: W,
    n_floors: u32,
    clear_screen: bool,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W, n_floors: u32, clear_screen: bool) -> TextRenderer<W> {
        TextRenderer {
            out,
            n_floors,
            clear_screen,
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn row_of(&self, altitude: f64) -> u32 {
        altitude.round().clamp(0.0, self.n_floors as f64) as u32
    }
}

fn car_glyph(door_position: f64) -> &'static str {
    if door_position <= 0.0 {
        " [||]"
    } else if door_position >= 1.0 {
        " [  ]"
    } else {
        " [<>]"
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, frame: &Frame<'_>) -> Result<()> {
        let mut screen = String::new();
        if self.clear_screen {
            screen.push_str(CLEAR_SCREEN);
        }

        screen.push_str(&format!("tick {}", frame.tick));
        if frame.paused {
            screen.push_str("  (paused, press enter to resume)");
        }
        screen.push('\n');

        for floor in (0..=self.n_floors).rev() {
            screen.push_str(&format!("{:>3} |", floor));
            for elevator in frame.elevators {
                if self.row_of(elevator.altitude) == floor {
                    screen.push_str(car_glyph(elevator.door_position));
                } else {
                    screen.push_str("  .  ");
                }
            }
            screen.push('\n');
        }

        for (index, elevator) in frame.elevators.iter().enumerate() {
            screen.push_str(&format!(
                "car {}: {:>7} alt {:>6.2} speed {:>5.2} -> {}\n",
                index, elevator.phase, elevator.altitude, elevator.speed, elevator.target_floor
            ));
        }

        self.out.write_all(screen.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}
