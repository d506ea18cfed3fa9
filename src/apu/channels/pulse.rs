//! Pulse (square wave) channel

use crate::apu::components::{Envelope, LengthCounter, PulseId, Sweep, Timer};
use crate::apu::constants::DUTY_SEQUENCES;

/// One of the two pulse channels
///
/// Registers (offsets within the channel's four-byte block):
///   +0  duty, length halt / envelope loop, envelope control
///   +1  sweep
///   +2  timer low
///   +3  length load + timer high (restarts envelope and phase)
#[derive(Debug, Clone)]
pub struct Pulse {
    enabled: bool,
    duty: u8,
    phase: u8,
    envelope: Envelope,
    sweep: Sweep,
    length: LengthCounter,
    timer: Timer,
}

impl Pulse {
    pub fn new(id: PulseId) -> Self {
        Pulse {
            enabled: false,
            duty: 0,
            phase: 0,
            envelope: Envelope::new(),
            sweep: Sweep::new(id),
            length: LengthCounter::new(),
            timer: Timer::new(),
        }
    }

    /// Write one of the channel's four registers
    pub fn write_register(&mut self, offset: u16, value: u8) {
        match offset & 0x03 {
            0 => {
                self.duty = value >> 6;
                self.length.set_halted(value & 0x20 != 0);
                self.envelope.configure(value);
            }
            1 => self.sweep.configure(value),
            2 => self.timer.set_period_low(value),
            3 => {
                self.timer.set_period_high(value & 0x07);
                if self.enabled {
                    self.length.load(value >> 3);
                }
                self.envelope.restart();
                self.phase = 0;
            }
            _ => unreachable!(),
        }
    }

    /// $4015 enable bit
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.length.silence();
        }
    }

    pub fn length_active(&self) -> bool {
        self.length.is_active()
    }

    /// Timer clock (every second CPU cycle)
    pub fn tick_timer(&mut self) {
        if self.timer.tick() {
            self.phase = (self.phase + 1) & 0x07;
        }
    }

    /// Quarter-frame clock
    pub fn tick_quarter_frame(&mut self) {
        self.envelope.tick();
    }

    /// Half-frame clock
    pub fn tick_half_frame(&mut self) {
        self.length.tick();
        if let Some(period) = self.sweep.tick(self.timer.period()) {
            self.timer.set_period(period);
        }
    }

    /// Current sample (0 or the envelope volume)
    pub fn output(&self) -> u8 {
        if !self.enabled
            || !self.length.is_active()
            || self.sweep.mutes(self.timer.period())
            || DUTY_SEQUENCES[self.duty as usize][self.phase as usize] == 0
        {
            0
        } else {
            self.envelope.volume()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn audible_pulse() -> Pulse {
        let mut pulse = Pulse::new(PulseId::One);
        pulse.set_enabled(true);
        pulse.write_register(0, 0xBF); // duty 2, halt, constant volume 15
        pulse.write_register(2, 0x80); // period 0x080 (above sweep mute floor)
        pulse.write_register(3, 0x08); // load length, timer high 0
        pulse
    }

    #[test]
    fn test_silent_until_enabled_and_loaded() {
        let mut pulse = Pulse::new(PulseId::One);
        assert_eq!(pulse.output(), 0);

        // Length load is gated on the enable bit
        pulse.write_register(3, 0x08);
        assert_eq!(pulse.output(), 0);
    }

    #[test]
    fn test_duty_sequence_gates_output() {
        let mut pulse = audible_pulse();

        // Phase 0 of duty 2 is low
        assert_eq!(pulse.output(), 0);

        // Advance one duty step: period+1 timer clocks
        for _ in 0..0x81 {
            pulse.tick_timer();
        }
        assert_eq!(pulse.output(), 15);
    }

    #[test]
    fn test_disable_silences_immediately() {
        let mut pulse = audible_pulse();
        pulse.set_enabled(false);
        assert!(!pulse.length_active());
        assert_eq!(pulse.output(), 0);
    }

    #[test]
    fn test_low_period_is_muted_by_sweep_rule() {
        let mut pulse = audible_pulse();
        pulse.write_register(2, 0x04); // period < 8
        for _ in 0..16 {
            pulse.tick_timer();
        }
        assert_eq!(pulse.output(), 0);
    }

    #[test]
    fn test_length_expiry_silences() {
        let mut pulse = audible_pulse();
        pulse.write_register(0, 0x3F); // clear halt, keep constant volume
        // Length index 1 -> 254 ticks
        for _ in 0..254 {
            pulse.tick_half_frame();
        }
        assert!(!pulse.length_active());
        assert_eq!(pulse.output(), 0);
    }
}
