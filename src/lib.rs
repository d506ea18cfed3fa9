// famicore - NES emulator core with a desktop front-end
//
// The engine is a synchronous state machine: the CPU is the master
// clock, and each executed instruction advances the APU by its cycle
// count and the PPU by three dots per cycle. The `Emulator` facade in
// `emulator` is the only type a front-end needs.

pub mod apu;
pub mod audio;
pub mod bus;
pub mod cartridge;
pub mod cpu;
pub mod display;
pub mod emulator;
pub mod input;
pub mod ppu;

pub use apu::Apu;
#[cfg(feature = "audio")]
pub use audio::AudioOutput;
pub use bus::Bus;
pub use cartridge::{Cartridge, INesError, INesHeader, Mapper, MapperError, Mirroring};
pub use cpu::Cpu;
pub use display::{FrameBuffer, WindowConfig};
pub use emulator::{Emulator, EmulatorConfig, LoadError, RecentRoms};
pub use input::ControllerPorts;
pub use ppu::Ppu;
