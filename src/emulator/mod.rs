// Emulator module - the engine facade the front-end drives
//
// Owns the CPU and the bus (which in turn owns the PPU, APU,
// controller ports and mapper) and exposes the synchronous engine API:
// load a ROM, reset, run whole frames, drain audio, feed input.
//
// One `step` is one unit of the cooperative schedule: execute a single
// CPU instruction (or interrupt service), then advance the APU by the
// instruction's cycle count and the PPU by three dots per cycle.

mod config;
mod recent_roms;
mod screenshot;

pub use config::{ConfigError, EmulatorConfig, CONFIG_FILE};
pub use recent_roms::{RecentRoms, RECENT_ROMS_FILE};
pub use screenshot::{save_screenshot, ScreenshotError};

use crate::audio::resampler::{resample_to_i16, CPU_CLOCK_HZ};
use crate::bus::Bus;
use crate::cartridge::{create_mapper, Cartridge, INesError, MapperError};
use crate::cpu::Cpu;
use crate::display::palette::color_index_luminance;
use crate::ppu::SCREEN_WIDTH;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

/// Pixel brightness above which the Zapper's photodiode reports light.
/// Targets are drawn near-white; the default gray backdrop must not
/// count as a hit.
const ZAPPER_LIGHT_THRESHOLD: u8 = 0xA0;

/// Errors from `Emulator::load`
#[derive(Debug)]
pub enum LoadError {
    /// Bad magic or truncated image
    InvalidRom(INesError),
    /// The image wants a mapper outside the supported set
    UnsupportedMapper(u8),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::InvalidRom(err) => write!(f, "invalid ROM: {}", err),
            LoadError::UnsupportedMapper(number) => {
                write!(f, "unsupported mapper {}", number)
            }
        }
    }
}

impl std::error::Error for LoadError {}

impl From<INesError> for LoadError {
    fn from(err: INesError) -> Self {
        LoadError::InvalidRom(err)
    }
}

impl From<MapperError> for LoadError {
    fn from(err: MapperError) -> Self {
        match err {
            MapperError::UnsupportedMapper(number) => LoadError::UnsupportedMapper(number),
        }
    }
}

/// The emulation engine
pub struct Emulator {
    cpu: Cpu,
    bus: Bus,
}

impl Emulator {
    pub fn new() -> Self {
        Emulator {
            cpu: Cpu::new(),
            bus: Bus::new(),
        }
    }

    /// Load an iNES image and reset the machine
    pub fn load(&mut self, rom_bytes: &[u8]) -> Result<(), LoadError> {
        let cartridge = Cartridge::from_ines_bytes(rom_bytes)?;
        let mapper = create_mapper(cartridge)?;
        self.bus.attach_mapper(Rc::new(RefCell::new(mapper)));
        self.reset();
        Ok(())
    }

    /// Load an iNES image from disk
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), LoadError> {
        let cartridge = Cartridge::from_ines_file(path)?;
        let mapper = create_mapper(cartridge)?;
        self.bus.attach_mapper(Rc::new(RefCell::new(mapper)));
        self.reset();
        Ok(())
    }

    /// Assert the reset line on every component
    pub fn reset(&mut self) {
        self.cpu.reset(&mut self.bus);
        self.bus.ppu_mut().reset();
        self.bus.apu_mut().reset();
        // The reset sequence itself consumes 7 CPU cycles of real time
        self.bus.tick(7);
    }

    /// Execute one instruction; returns its cycle cost
    pub fn step(&mut self) -> u32 {
        let cycles = self.cpu.step(&mut self.bus);
        self.bus.tick(cycles);
        cycles
    }

    /// Run until the PPU completes the current frame, then return the
    /// 256x240 frame as NES color indices
    pub fn run_frame(&mut self) -> &[u8] {
        loop {
            let cycles = self.cpu.step(&mut self.bus);
            if self.bus.tick(cycles) {
                break;
            }
        }
        self.update_zapper_light();
        self.bus.ppu().frame()
    }

    /// Drain audio accumulated since the last call, resampled to
    /// `rate_hz`
    pub fn audio_samples(&mut self, rate_hz: u32) -> Vec<i16> {
        let samples = self.bus.apu_mut().drain_samples();
        resample_to_i16(&samples, CPU_CLOCK_HZ, rate_hz as f64)
    }

    /// Set the gamepad state for a port (bit 0 = A ... bit 7 = Right)
    pub fn set_buttons(&mut self, port: usize, mask: u8) {
        self.bus.controllers_mut().set_buttons(port, mask);
    }

    /// Point the Zapper at screen coordinates and set its trigger
    pub fn set_zapper(&mut self, x: u8, y: u8, trigger: bool) {
        self.bus.controllers_mut().set_zapper(x, y, trigger);
        self.update_zapper_light();
    }

    /// Refresh the Zapper's light sense from the rendered frame
    fn update_zapper_light(&mut self) {
        let zapper = self.bus.controllers_mut().zapper();
        let x = zapper.x as usize;
        let y = (zapper.y as usize).min(crate::ppu::SCREEN_HEIGHT - 1);
        let index = self.bus.ppu().frame()[y * SCREEN_WIDTH + x];
        let lit = color_index_luminance(index) >= ZAPPER_LIGHT_THRESHOLD;
        self.bus.controllers_mut().set_zapper_light(lit);
    }

    // ========================================
    // Component access (tests, tooling, front-end)
    // ========================================

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut Bus {
        &mut self.bus
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}
