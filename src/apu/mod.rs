// APU module - Audio Processing Unit (2A03) emulation
//
// Five channels ticked per CPU cycle, sequenced by the frame counter:
//
// | Address | Channel / unit                          |
// |---------|-----------------------------------------|
// | $4000-$4003 | Pulse 1                             |
// | $4004-$4007 | Pulse 2                             |
// | $4008-$400B | Triangle                            |
// | $400C-$400F | Noise                               |
// | $4010-$4013 | DMC                                 |
// | $4015       | Channel enables / status            |
// | $4017       | Frame counter control               |
//
// The pulse timers run at half the CPU clock; triangle, noise and DMC
// timers count whole CPU cycles. Each tick also pushes one mixed sample
// into the outgoing queue, which the engine drains and resamples on
// demand.
//
// The frame interrupt flag is modeled and visible through $4015, but
// it is not wired to the CPU IRQ line (the DMC flag is).

pub mod channels;
pub mod components;
pub mod constants;

use crate::audio::Mixer;
use channels::{Dmc, Noise, Pulse, Triangle};
use components::{FrameClocks, FrameCounter, PulseId};

/// The Audio Processing Unit
pub struct Apu {
    pulse1: Pulse,
    pulse2: Pulse,
    triangle: Triangle,
    noise: Noise,
    dmc: Dmc,
    frame_counter: FrameCounter,

    /// Pulse timers clock on every other CPU cycle
    odd_cycle: bool,

    mixer: Mixer,
    /// One mixed sample per CPU cycle, drained by the engine
    sample_queue: Vec<f32>,
}

impl Apu {
    pub fn new() -> Self {
        Apu {
            pulse1: Pulse::new(PulseId::One),
            pulse2: Pulse::new(PulseId::Two),
            triangle: Triangle::new(),
            noise: Noise::new(),
            dmc: Dmc::new(),
            frame_counter: FrameCounter::new(),
            odd_cycle: false,
            mixer: Mixer::new(),
            sample_queue: Vec::new(),
        }
    }

    /// Reset: frame counter restarted, channels silenced except the DMC
    pub fn reset(&mut self) {
        self.frame_counter.reset();
        self.pulse1.set_enabled(false);
        self.pulse2.set_enabled(false);
        self.triangle.set_enabled(false);
        self.noise.set_enabled(false);
        self.odd_cycle = false;
        self.sample_queue.clear();
    }

    /// Advance one CPU cycle
    pub fn tick(&mut self) {
        let clocks = self.frame_counter.tick();
        self.distribute_frame_clocks(clocks);

        self.triangle.tick_timer();
        self.noise.tick_timer();
        self.dmc.tick_timer();

        self.odd_cycle = !self.odd_cycle;
        if self.odd_cycle {
            self.pulse1.tick_timer();
            self.pulse2.tick_timer();
        }

        let sample = self.mixer.mix(
            self.pulse1.output(),
            self.pulse2.output(),
            self.triangle.output(),
            self.noise.output(),
            self.dmc.output(),
        );
        self.sample_queue.push(sample);
    }

    fn distribute_frame_clocks(&mut self, clocks: FrameClocks) {
        if clocks.quarter {
            self.pulse1.tick_quarter_frame();
            self.pulse2.tick_quarter_frame();
            self.triangle.tick_quarter_frame();
            self.noise.tick_quarter_frame();
        }
        if clocks.half {
            self.pulse1.tick_half_frame();
            self.pulse2.tick_half_frame();
            self.triangle.tick_half_frame();
            self.noise.tick_half_frame();
        }
    }

    /// Write an APU register ($4000-$4013, $4015, $4017)
    pub fn write_register(&mut self, addr: u16, value: u8) {
        match addr {
            0x4000..=0x4003 => self.pulse1.write_register(addr, value),
            0x4004..=0x4007 => self.pulse2.write_register(addr, value),
            0x4008..=0x400B => self.triangle.write_register(addr, value),
            0x400C..=0x400F => self.noise.write_register(addr, value),
            0x4010..=0x4013 => self.dmc.write_register(addr, value),
            0x4015 => {
                self.pulse1.set_enabled(value & 0x01 != 0);
                self.pulse2.set_enabled(value & 0x02 != 0);
                self.triangle.set_enabled(value & 0x04 != 0);
                self.noise.set_enabled(value & 0x08 != 0);
                self.dmc.set_enabled(value & 0x10 != 0);
                self.dmc.clear_irq_flag();
            }
            0x4017 => {
                let clocks = self.frame_counter.write_control(value);
                self.distribute_frame_clocks(clocks);
            }
            _ => {}
        }
    }

    /// Read $4015: channel length status plus interrupt flags
    ///
    /// Reading clears the frame interrupt flag (but not the DMC flag).
    pub fn read_status(&mut self) -> u8 {
        let mut status = 0u8;
        if self.pulse1.length_active() {
            status |= 0x01;
        }
        if self.pulse2.length_active() {
            status |= 0x02;
        }
        if self.triangle.length_active() {
            status |= 0x04;
        }
        if self.noise.length_active() {
            status |= 0x08;
        }
        if self.dmc.is_active() {
            status |= 0x10;
        }
        if self.frame_counter.irq_flag() {
            status |= 0x40;
        }
        if self.dmc.irq_flag() {
            status |= 0x80;
        }

        self.frame_counter.clear_irq_flag();
        status
    }

    /// Address the DMC wants read from CPU memory, if any
    pub fn dmc_fetch_address(&self) -> Option<u16> {
        self.dmc.pending_fetch()
    }

    /// Deliver a fetched DMC sample byte
    pub fn dmc_complete_fetch(&mut self, byte: u8) {
        self.dmc.complete_fetch(byte);
    }

    /// The APU's contribution to the CPU IRQ line (DMC only; the frame
    /// interrupt stays a status flag)
    pub fn irq_asserted(&self) -> bool {
        self.dmc.irq_flag()
    }

    /// Frame interrupt flag, without the read side effect
    pub fn frame_irq_flag(&self) -> bool {
        self.frame_counter.irq_flag()
    }

    /// Take every sample mixed since the last drain
    pub fn drain_samples(&mut self) -> Vec<f32> {
        std::mem::take(&mut self.sample_queue)
    }

    /// Samples queued so far (for tests and pacing decisions)
    pub fn queued_samples(&self) -> usize {
        self.sample_queue.len()
    }
}

impl Default for Apu {
    fn default() -> Self {
        Self::new()
    }
}
