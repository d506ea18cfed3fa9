//! APU frame sequencer
//!
//! Divides the CPU clock into the low-frequency quarter- and half-frame
//! events that drive envelopes, linear counters, length counters and
//! sweeps. Step positions are the hardware's half-cycle points doubled
//! into whole CPU cycles (3728.5 APU cycles = CPU cycle 7457 and so on).

use crate::apu::constants::frame_steps;

/// Sequencer mode selected by bit 7 of $4017
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerMode {
    /// Four steps over 29830 CPU cycles; the last step raises the
    /// frame interrupt flag unless inhibited
    FourStep,
    /// Five steps over 37282 CPU cycles; no interrupt
    FiveStep,
}

/// Clock events produced by one sequencer tick
///
/// A half-frame event implies the quarter-frame units are clocked too.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameClocks {
    pub quarter: bool,
    pub half: bool,
}

impl FrameClocks {
    const NONE: FrameClocks = FrameClocks {
        quarter: false,
        half: false,
    };

    const QUARTER: FrameClocks = FrameClocks {
        quarter: true,
        half: false,
    };

    const HALF: FrameClocks = FrameClocks {
        quarter: true,
        half: true,
    };
}

/// Frame counter state
#[derive(Debug, Clone)]
pub struct FrameCounter {
    mode: SequencerMode,
    cycle: u32,
    irq_inhibit: bool,
    irq_flag: bool,
}

impl FrameCounter {
    pub fn new() -> Self {
        FrameCounter {
            mode: SequencerMode::FourStep,
            cycle: 0,
            irq_inhibit: false,
            irq_flag: false,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Handle a $4017 write
    ///
    /// Bit 7 selects the mode, bit 6 inhibits (and clears) the frame
    /// interrupt flag. Selecting 5-step mode clocks a half frame
    /// immediately; either write restarts the sequence.
    pub fn write_control(&mut self, value: u8) -> FrameClocks {
        self.mode = if value & 0x80 != 0 {
            SequencerMode::FiveStep
        } else {
            SequencerMode::FourStep
        };
        self.irq_inhibit = value & 0x40 != 0;
        if self.irq_inhibit {
            self.irq_flag = false;
        }
        self.cycle = 0;

        if self.mode == SequencerMode::FiveStep {
            FrameClocks::HALF
        } else {
            FrameClocks::NONE
        }
    }

    /// Advance one CPU cycle
    pub fn tick(&mut self) -> FrameClocks {
        self.cycle += 1;

        let clocks = match self.mode {
            SequencerMode::FourStep => match self.cycle {
                frame_steps::STEP_1 | frame_steps::STEP_3 => FrameClocks::QUARTER,
                frame_steps::STEP_2 => FrameClocks::HALF,
                frame_steps::STEP_4 => {
                    if !self.irq_inhibit {
                        self.irq_flag = true;
                    }
                    FrameClocks::HALF
                }
                _ => FrameClocks::NONE,
            },
            SequencerMode::FiveStep => match self.cycle {
                frame_steps::STEP_1 | frame_steps::STEP_3 => FrameClocks::QUARTER,
                frame_steps::STEP_2 | frame_steps::STEP_5 => FrameClocks::HALF,
                _ => FrameClocks::NONE,
            },
        };

        let period = match self.mode {
            SequencerMode::FourStep => frame_steps::PERIOD_4_STEP,
            SequencerMode::FiveStep => frame_steps::PERIOD_5_STEP,
        };
        if self.cycle >= period {
            self.cycle = 0;
        }

        clocks
    }

    pub fn mode(&self) -> SequencerMode {
        self.mode
    }

    /// Frame interrupt flag ($4015 bit 6)
    pub fn irq_flag(&self) -> bool {
        self.irq_flag
    }

    /// Cleared by $4015 reads
    pub fn clear_irq_flag(&mut self) {
        self.irq_flag = false;
    }
}

impl Default for FrameCounter {
    fn default() -> Self {
        Self::new()
    }
}
