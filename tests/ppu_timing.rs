// PPU timing and interlock scenarios driven through the full engine

mod common;

use common::{build_ines, looping_emulator, looping_prg};
use famicore::Emulator;

/// Dots per scanline and scanlines per frame
const DOTS: u64 = 341;
const LINES: u64 = 262;

#[test]
fn first_nmi_lands_at_the_documented_cycle() {
    // With the engine's power-up alignment the derivation is exact:
    // reset burns 7 CPU cycles (21 dots), vblank rises on the
    // 82,524th dot from power-on (pre-render line + 241 lines + 2
    // dots), i.e. during the tick batch after the instruction
    // boundary at CPU cycle 7 + (82524 - 21) / 3 = 27508. The reset
    // loop is all 3-cycle JMPs, so the boundary falls exactly there
    // and the 7-cycle NMI entry completes at 27515.
    let mut emulator = looping_emulator();
    emulator.bus_mut().write(0x2000, 0x80); // enable NMI

    let nmi_vector = {
        let low = emulator.bus_mut().read(0xFFFA) as u16;
        let high = emulator.bus_mut().read(0xFFFB) as u16;
        (high << 8) | low
    };

    loop {
        emulator.step();
        if emulator.cpu().pc == nmi_vector {
            break;
        }
        assert!(emulator.cpu().cycles < 100_000, "NMI never delivered");
    }

    assert_eq!(emulator.cpu().cycles, 27_515);
}

#[test]
fn frame_length_with_rendering_disabled() {
    let mut emulator = looping_emulator();

    emulator.run_frame();
    let cycles_before = emulator.cpu().cycles;
    emulator.run_frame();
    let cycles_elapsed = emulator.cpu().cycles - cycles_before;

    // 341 * 262 / 3 CPU cycles, within one instruction of slack
    let expected = DOTS * LINES / 3;
    assert!(
        (cycles_elapsed as i64 - expected as i64).abs() <= 3,
        "frame took {} cycles, expected about {}",
        cycles_elapsed,
        expected
    );
}

#[test]
fn vblank_flag_visible_through_2002_and_cleared_by_read() {
    let mut emulator = looping_emulator();

    // Step until the flag reads set
    let mut observed = false;
    for _ in 0..20_000 {
        emulator.step();
        if emulator.bus_mut().read(0x2002) & 0x80 != 0 {
            observed = true;
            break;
        }
    }
    assert!(observed, "vblank flag never observed");

    // The read itself cleared it
    assert_eq!(emulator.bus_mut().read(0x2002) & 0x80, 0);
}

/// Build the sprite-zero scenario from an all-solid tile: sprite 0 at
/// (100, 30) over an opaque background, everything enabled
fn sprite_zero_emulator() -> Emulator {
    // CHR-RAM board so patterns can be written through $2007
    let image = build_ines(&looping_prg(), 0, 0, 0);
    let mut emulator = Emulator::new();
    emulator.load(&image).unwrap();

    // Tile 1: all pixels solid color 1 (low plane $FF, high plane $00)
    set_vram_addr(&mut emulator, 0x0010);
    for _ in 0..8 {
        emulator.bus_mut().write(0x2007, 0xFF);
    }

    // Fill nametable 0 with tile 1
    set_vram_addr(&mut emulator, 0x2000);
    for _ in 0..0x3C0 {
        emulator.bus_mut().write(0x2007, 0x01);
    }

    // Sprite 0: Y=30, tile 1, no flip/priority, X=100
    emulator.bus_mut().write(0x2003, 0x00);
    for byte in [30u8, 0x01, 0x00, 100] {
        emulator.bus_mut().write(0x2004, byte);
    }

    // Zero scroll, then enable background and sprites with no clipping
    emulator.bus_mut().write(0x2000, 0x00);
    emulator.bus_mut().write(0x2005, 0x00);
    emulator.bus_mut().write(0x2005, 0x00);
    emulator.bus_mut().write(0x2001, 0x1E);

    emulator
}

fn set_vram_addr(emulator: &mut Emulator, addr: u16) {
    emulator.bus_mut().read(0x2002); // reset the write toggle
    emulator.bus_mut().write(0x2006, (addr >> 8) as u8);
    emulator.bus_mut().write(0x2006, (addr & 0xFF) as u8);
}

#[test]
fn sprite_zero_hit_fires_on_the_sprite_line() {
    let mut emulator = sprite_zero_emulator();

    let mut hit_scanline = None;
    for _ in 0..200_000 {
        emulator.step();
        if emulator.bus_mut().read(0x2002) & 0x40 != 0 {
            hit_scanline = Some(emulator.bus().ppu().scanline());
            break;
        }
    }

    // The overlap starts at (100, 30); the flag must be up while
    // scanline 30 is still being drawn, well before line 31 begins
    // fetching.
    assert_eq!(hit_scanline, Some(30));
}

#[test]
fn sprite_zero_hit_requires_rendering() {
    let mut emulator = sprite_zero_emulator();
    emulator.bus_mut().write(0x2001, 0x00); // blank the screen

    emulator.run_frame();
    assert_eq!(emulator.bus_mut().read(0x2002) & 0x40, 0);
}

#[test]
fn odd_frames_render_one_dot_short() {
    let mut emulator = sprite_zero_emulator();

    // Settle on a frame boundary, then time two consecutive frames
    emulator.run_frame();
    let parity_cycles: Vec<u64> = (0..2)
        .map(|_| {
            let before = emulator.cpu().cycles;
            emulator.run_frame();
            emulator.cpu().cycles - before
        })
        .collect();

    // One of the two frames runs a dot shorter; the difference across
    // a pair must be at most an instruction of slack but nonzero in
    // dot terms over many frames. Compare total against 2 frames of
    // nominal length minus one dot.
    let total_dots = parity_cycles.iter().sum::<u64>() * 3;
    let nominal = 2 * DOTS * LINES - 1;
    assert!(
        (total_dots as i64 - nominal as i64).abs() <= 12,
        "two frames spanned {} dots, expected about {}",
        total_dots,
        nominal
    );
}

#[test]
fn palette_aliases_visible_through_the_bus() {
    let mut emulator = looping_emulator();

    set_vram_addr(&mut emulator, 0x3F10);
    emulator.bus_mut().write(0x2007, 0x2A);

    set_vram_addr(&mut emulator, 0x3F00);
    assert_eq!(emulator.bus_mut().read(0x2007), 0x2A);

    set_vram_addr(&mut emulator, 0x3F04);
    emulator.bus_mut().write(0x2007, 0x15);
    set_vram_addr(&mut emulator, 0x3F14);
    assert_eq!(emulator.bus_mut().read(0x2007), 0x15);
}

#[test]
fn buffered_reads_lag_by_one_for_nametables() {
    let mut emulator = looping_emulator();

    set_vram_addr(&mut emulator, 0x2400);
    emulator.bus_mut().write(0x2007, 0x77);

    set_vram_addr(&mut emulator, 0x2400);
    let stale = emulator.bus_mut().read(0x2007);
    let fresh = emulator.bus_mut().read(0x2007);
    assert_ne!(stale, 0x77);
    assert_eq!(fresh, 0x77);
}
