//! Triangle wave channel

use crate::apu::components::{LengthCounter, LinearCounter, Timer};
use crate::apu::constants::TRIANGLE_SEQUENCE;

/// Triangle channel: a 32-step waveform gated by two counters
///
/// The sequencer only advances while both the linear counter and the
/// length counter are non-zero, so a stopped note holds its last level
/// instead of clicking to zero.
#[derive(Debug, Clone)]
pub struct Triangle {
    enabled: bool,
    linear: LinearCounter,
    length: LengthCounter,
    timer: Timer,
    step: u8,
}

impl Triangle {
    pub fn new() -> Self {
        Triangle {
            enabled: false,
            linear: LinearCounter::new(),
            length: LengthCounter::new(),
            timer: Timer::new(),
            step: 0,
        }
    }

    /// Write one of $4008-$400B
    pub fn write_register(&mut self, offset: u16, value: u8) {
        match offset & 0x03 {
            0 => {
                // Bit 7 doubles as control flag and length halt
                self.length.set_halted(value & 0x80 != 0);
                self.linear.configure(value);
            }
            1 => {} // $4009 unused
            2 => self.timer.set_period_low(value),
            3 => {
                self.timer.set_period_high(value & 0x07);
                if self.enabled {
                    self.length.load(value >> 3);
                }
                self.linear.arm_reload();
            }
            _ => unreachable!(),
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.length.silence();
        }
    }

    pub fn length_active(&self) -> bool {
        self.length.is_active()
    }

    /// Timer clock (every CPU cycle)
    pub fn tick_timer(&mut self) {
        if self.linear.is_active() && self.length.is_active() && self.timer.tick() {
            self.step = (self.step + 1) & 0x1F;
        }
    }

    /// Quarter-frame clock
    pub fn tick_quarter_frame(&mut self) {
        self.linear.tick();
    }

    /// Half-frame clock
    pub fn tick_half_frame(&mut self) {
        self.length.tick();
    }

    /// Current sample (0-15)
    pub fn output(&self) -> u8 {
        if !self.enabled || !self.linear.is_active() || !self.length.is_active() {
            return 0;
        }
        // Ultrasonic periods would alias badly; mute them
        if self.timer.period() < 2 {
            return 0;
        }
        TRIANGLE_SEQUENCE[self.step as usize]
    }
}

impl Default for Triangle {
    fn default() -> Self {
        Self::new()
    }
}
