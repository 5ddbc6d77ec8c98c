use beep::beep;
use std::error::Error;

/// drives a tone on and off from the machine's sound signal
pub trait Sound {
    /// level-triggered: called every frame with `Machine::sound_active()`
    fn set_active(&mut self, active: bool) -> Result<(), Box<dyn Error>>;
}

const SIMPLEBEEP_PITCH: u16 = 2093; // C

pub struct SimpleBeep {
    is_beeping: bool,
}

impl SimpleBeep {
    pub fn new() -> Self {
        SimpleBeep { is_beeping: false }
    }
}

impl Sound for SimpleBeep {
    fn set_active(&mut self, active: bool) -> Result<(), Box<dyn Error>> {
        // only talk to the speaker on edges
        if active != self.is_beeping {
            beep(if active { SIMPLEBEEP_PITCH } else { 0 })?;
            self.is_beeping = active;
        }
        Ok(())
    }
}

pub struct Mute {}
impl Mute {
    pub fn new() -> Self {
        Mute {}
    }
}
impl Sound for Mute {
    fn set_active(&mut self, _active: bool) -> Result<(), Box<dyn Error>> {
        Ok(())
    }
}
