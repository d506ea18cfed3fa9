// famicore - desktop entry point

use famicore::display::{run_window, WindowConfig};
use famicore::emulator::{EmulatorConfig, RecentRoms};
use famicore::Emulator;
use std::process::ExitCode;

fn main() -> ExitCode {
    let Some(rom_path) = std::env::args().nth(1) else {
        eprintln!("usage: famicore <rom.nes>");
        return ExitCode::FAILURE;
    };

    let config = EmulatorConfig::load_or_default(famicore::emulator::CONFIG_FILE);

    let mut emulator = Emulator::new();
    if let Err(err) = emulator.load_file(&rom_path) {
        eprintln!("failed to load {}: {}", rom_path, err);
        return ExitCode::FAILURE;
    }

    let mut recent = RecentRoms::load_or_default(famicore::emulator::RECENT_ROMS_FILE);
    recent.add(&rom_path);
    if let Err(err) = recent.save(famicore::emulator::RECENT_ROMS_FILE) {
        eprintln!("could not save recent ROM list: {}", err);
    }

    let window_config = WindowConfig::from_config(&config);
    if let Err(err) = run_window(emulator, window_config, config) {
        eprintln!("window error: {}", err);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
