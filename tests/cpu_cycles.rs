// CPU cycle-cost properties
//
// Each case assembles a tiny program into RAM and checks that `step`
// charges exactly the documented cycle count, including page-cross and
// branch penalties and the DMA stall.

mod common;

use common::looping_emulator;
use famicore::Emulator;

/// Place a program at $0300 and point PC at it
fn program(emulator: &mut Emulator, bytes: &[u8]) {
    for (offset, &byte) in bytes.iter().enumerate() {
        emulator.bus_mut().write(0x0300 + offset as u16, byte);
    }
    emulator.cpu_mut().pc = 0x0300;
}

#[test]
fn implied_and_immediate_cost_two() {
    let mut emulator = looping_emulator();

    program(&mut emulator, &[0xEA]); // NOP
    assert_eq!(emulator.step(), 2);

    program(&mut emulator, &[0xA9, 0x01]); // LDA #
    assert_eq!(emulator.step(), 2);

    program(&mut emulator, &[0xAA]); // TAX
    assert_eq!(emulator.step(), 2);
}

#[test]
fn zero_page_costs() {
    let mut emulator = looping_emulator();

    program(&mut emulator, &[0xA5, 0x10]); // LDA zp
    assert_eq!(emulator.step(), 3);

    program(&mut emulator, &[0xB5, 0x10]); // LDA zp,X
    assert_eq!(emulator.step(), 4);

    program(&mut emulator, &[0x85, 0x10]); // STA zp
    assert_eq!(emulator.step(), 3);

    program(&mut emulator, &[0xE6, 0x10]); // INC zp
    assert_eq!(emulator.step(), 5);
}

#[test]
fn absolute_indexed_read_pays_for_page_cross() {
    let mut emulator = looping_emulator();

    program(&mut emulator, &[0xBD, 0xF0, 0x03]); // LDA $03F0,X
    emulator.cpu_mut().x = 0x0F; // no crossing
    assert_eq!(emulator.step(), 4);

    program(&mut emulator, &[0xBD, 0xF0, 0x03]);
    emulator.cpu_mut().x = 0x10; // crosses into $0400
    assert_eq!(emulator.step(), 5);
}

#[test]
fn indexed_store_includes_dummy_read_in_base_cost() {
    let mut emulator = looping_emulator();

    // STA abs,X is always 5, crossing or not
    program(&mut emulator, &[0x9D, 0xF0, 0x03]);
    emulator.cpu_mut().x = 0x0F;
    assert_eq!(emulator.step(), 5);

    program(&mut emulator, &[0x9D, 0xF0, 0x03]);
    emulator.cpu_mut().x = 0x10;
    assert_eq!(emulator.step(), 5);

    // STA (zp),Y is always 6
    emulator.bus_mut().write(0x0040, 0xF0);
    emulator.bus_mut().write(0x0041, 0x03);
    program(&mut emulator, &[0x91, 0x40]);
    emulator.cpu_mut().y = 0x10;
    assert_eq!(emulator.step(), 6);
}

#[test]
fn indirect_indexed_read_penalty() {
    let mut emulator = looping_emulator();
    emulator.bus_mut().write(0x0040, 0xF0);
    emulator.bus_mut().write(0x0041, 0x03);

    program(&mut emulator, &[0xB1, 0x40]); // LDA (zp),Y
    emulator.cpu_mut().y = 0x0F;
    assert_eq!(emulator.step(), 5);

    program(&mut emulator, &[0xB1, 0x40]);
    emulator.cpu_mut().y = 0x10;
    assert_eq!(emulator.step(), 6);
}

#[test]
fn branch_penalties() {
    let mut emulator = looping_emulator();

    // Not taken
    program(&mut emulator, &[0x90, 0x10]); // BCC with carry clear? set carry
    emulator.cpu_mut().set_flag(famicore::cpu::flags::CARRY, true);
    assert_eq!(emulator.step(), 2);

    // Taken within the page
    program(&mut emulator, &[0x90, 0x10]);
    emulator.cpu_mut().set_flag(famicore::cpu::flags::CARRY, false);
    assert_eq!(emulator.step(), 3);

    // Taken across a page: branch at $03F0 jumping forward
    for (offset, &byte) in [0x90u8, 0x20].iter().enumerate() {
        emulator.bus_mut().write(0x03F0 + offset as u16, byte);
    }
    emulator.cpu_mut().pc = 0x03F0;
    assert_eq!(emulator.step(), 4);
}

#[test]
fn read_modify_write_costs() {
    let mut emulator = looping_emulator();

    program(&mut emulator, &[0x0A]); // ASL A
    assert_eq!(emulator.step(), 2);

    program(&mut emulator, &[0x0E, 0x10, 0x03]); // ASL abs
    assert_eq!(emulator.step(), 6);

    program(&mut emulator, &[0x1E, 0x10, 0x03]); // ASL abs,X: 7, no penalty
    emulator.cpu_mut().x = 0xF5;
    assert_eq!(emulator.step(), 7);
}

#[test]
fn stack_and_flow_costs() {
    let mut emulator = looping_emulator();

    program(&mut emulator, &[0x48]); // PHA
    assert_eq!(emulator.step(), 3);
    program(&mut emulator, &[0x68]); // PLA
    assert_eq!(emulator.step(), 4);
    program(&mut emulator, &[0x20, 0x00, 0x03]); // JSR
    assert_eq!(emulator.step(), 6);
    program(&mut emulator, &[0x60]); // RTS
    assert_eq!(emulator.step(), 6);
    program(&mut emulator, &[0x4C, 0x00, 0x03]); // JMP abs
    assert_eq!(emulator.step(), 3);
    program(&mut emulator, &[0x6C, 0x10, 0x03]); // JMP (ind)
    assert_eq!(emulator.step(), 5);
}

#[test]
fn oam_dma_stalls_513_or_514() {
    // DMA cost rides on the triggering store: 4 (STA abs) + 513/514
    let mut emulator = looping_emulator();
    program(&mut emulator, &[0x8D, 0x14, 0x40]); // STA $4014
    emulator.cpu_mut().a = 0x02;

    let cycles = emulator.step();
    assert!(
        cycles == 4 + 513 || cycles == 4 + 514,
        "DMA-carrying store took {} cycles",
        cycles
    );
}

#[test]
fn interrupt_service_costs_seven() {
    let mut emulator = looping_emulator();

    // Raise an NMI by enabling it during vblank
    emulator.bus_mut().write(0x2000, 0x80);
    // Advance into vblank: run a frame's worth of steps
    emulator.run_frame();

    // Find the next service: step until a 7-cycle interrupt entry
    // lands on the (unmapped-IRQ) vector $0000... instead, observe the
    // NMI directly: the first step after the NMI latch rises is the
    // 7-cycle service.
    let mut saw_service = false;
    for _ in 0..200_000 {
        let pc_before = emulator.cpu().pc;
        let cycles = emulator.step();
        if cycles == 7 && emulator.cpu().pc != pc_before.wrapping_add(1) {
            saw_service = true;
            break;
        }
    }
    assert!(saw_service, "no interrupt service observed");
}
