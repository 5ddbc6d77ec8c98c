use std::error::Error;
use std::fs;
use std::time::Duration;

use rusty8::display::{Display, MonoTermDisplay};
use rusty8::input::{CrosstermInput, Input};
use rusty8::machine::Machine;
use rusty8::sound::{SimpleBeep, Sound};

/// instructions per second; the timers decay at the same rate
const STEPS_PER_SECOND: u64 = 700;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let rom_path = std::env::args()
        .nth(1)
        .ok_or("usage: rusty8 <program.ch8>")?;
    let program = fs::read(&rom_path)?;

    // initialise
    let mut display = MonoTermDisplay::new()?;
    let mut input = CrosstermInput::new()?;
    let mut sound = SimpleBeep::new();
    let mut machine = Machine::new(&program)?;

    let step_period = Duration::from_micros(1_000_000 / STEPS_PER_SECOND);
    let sleeper = spin_sleep::SpinSleeper::default();

    while !input.quit_requested() {
        machine.set_keys(input.key_state()?);

        if machine.step()? {
            display.draw(machine.frame())?;
        }
        sound.set_active(machine.sound_active())?;

        sleeper.sleep(step_period);
    }

    // silence the speaker before handing the terminal back
    sound.set_active(false)?;

    // shove some junk on stdout to stop the cli messing up the last frame
    for _ in 0..12 {
        println!();
    }
    Ok(())
}
