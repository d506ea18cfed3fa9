// CPU module - 6502 (2A03) core
//
// Table-driven interpreter: the opcode byte indexes a 256-slot decode
// table, the addressing mode resolves the operand, and a single match
// dispatches the operation. `step` executes exactly one instruction
// (or services one interrupt) and returns its cycle cost including
// page-cross and branch penalties plus any DMA stall the bus charged.
//
// Interrupts are sampled only at instruction boundaries: a pending NMI
// wins over an asserted IRQ, and IRQ service additionally requires the
// interrupt-disable flag to be clear.

pub mod addressing;
pub mod instructions;
pub mod opcodes;

use crate::bus::Bus;
use opcodes::{Op, OPCODE_TABLE};

/// Status register bit masks
///
/// ```text
/// 7  6  5  4  3  2  1  0
/// N  V  U  B  D  I  Z  C
/// ```
///
/// U (unused) always reads 1. B exists only in values pushed to the
/// stack: 1 for BRK/PHP, 0 for hardware interrupts.
pub mod flags {
    pub const CARRY: u8 = 0x01;
    pub const ZERO: u8 = 0x02;
    pub const INTERRUPT_DISABLE: u8 = 0x04;
    pub const DECIMAL: u8 = 0x08; // latched but ignored on the 2A03
    pub const BREAK: u8 = 0x10;
    pub const UNUSED: u8 = 0x20;
    pub const OVERFLOW: u8 = 0x40;
    pub const NEGATIVE: u8 = 0x80;
}

/// Interrupt vector locations
pub mod vectors {
    pub const NMI: u16 = 0xFFFA;
    pub const RESET: u16 = 0xFFFC;
    pub const IRQ: u16 = 0xFFFE;
}

/// The 6502 register file plus the free-running cycle counter
pub struct Cpu {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub status: u8,
    pub cycles: u64,
}

impl Cpu {
    pub fn new() -> Self {
        Cpu {
            a: 0,
            x: 0,
            y: 0,
            sp: 0xFD,
            pc: 0,
            status: flags::UNUSED | flags::INTERRUPT_DISABLE,
            cycles: 0,
        }
    }

    /// Reset signal: PC from the reset vector, SP dropped by 3,
    /// interrupts disabled. Registers are left alone, as on hardware.
    pub fn reset(&mut self, bus: &mut Bus) {
        self.sp = self.sp.wrapping_sub(3);
        self.status |= flags::INTERRUPT_DISABLE;
        self.pc = bus.read_u16(vectors::RESET);
        self.cycles = 7;
    }

    // ========================================
    // Flag helpers
    // ========================================

    #[inline]
    pub fn flag(&self, mask: u8) -> bool {
        self.status & mask != 0
    }

    #[inline]
    pub fn set_flag(&mut self, mask: u8, on: bool) {
        if on {
            self.status |= mask;
        } else {
            self.status &= !mask;
        }
    }

    /// Zero and negative from a result byte
    #[inline]
    pub(crate) fn set_zn(&mut self, value: u8) {
        self.set_flag(flags::ZERO, value == 0);
        self.set_flag(flags::NEGATIVE, value & 0x80 != 0);
    }

    // ========================================
    // Stack ($0100-$01FF, descending)
    // ========================================

    pub(crate) fn push(&mut self, bus: &mut Bus, value: u8) {
        bus.write(0x0100 + self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    pub(crate) fn pop(&mut self, bus: &mut Bus) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        bus.read(0x0100 + self.sp as u16)
    }

    pub(crate) fn push_u16(&mut self, bus: &mut Bus, value: u16) {
        self.push(bus, (value >> 8) as u8);
        self.push(bus, (value & 0xFF) as u8);
    }

    pub(crate) fn pop_u16(&mut self, bus: &mut Bus) -> u16 {
        let low = self.pop(bus) as u16;
        let high = self.pop(bus) as u16;
        (high << 8) | low
    }

    // ========================================
    // Interrupts
    // ========================================

    /// Hardware interrupt entry: 7 cycles, pushes P with B clear
    fn service_interrupt(&mut self, bus: &mut Bus, vector: u16) {
        self.push_u16(bus, self.pc);
        let pushed = (self.status | flags::UNUSED) & !flags::BREAK;
        self.push(bus, pushed);
        self.set_flag(flags::INTERRUPT_DISABLE, true);
        self.pc = bus.read_u16(vector);
    }

    // ========================================
    // Execution
    // ========================================

    /// Run one instruction (or service one interrupt)
    ///
    /// Returns the cycle cost, including penalties and any DMA stall
    /// the bus accumulated. The caller is responsible for advancing
    /// the PPU and APU by this amount.
    pub fn step(&mut self, bus: &mut Bus) -> u32 {
        // Interrupt lines are sampled between instructions only
        if bus.take_nmi() {
            self.service_interrupt(bus, vectors::NMI);
            self.cycles += 7;
            return 7;
        }
        if bus.irq_asserted() && !self.flag(flags::INTERRUPT_DISABLE) {
            self.service_interrupt(bus, vectors::IRQ);
            self.cycles += 7;
            return 7;
        }

        let opcode = bus.read(self.pc);
        let info = &OPCODE_TABLE[opcode as usize];
        if info.op == Op::Illegal {
            panic!(
                "illegal opcode {:02X} at {:04X}: emulated machine is corrupt",
                opcode, self.pc
            );
        }
        self.pc = self.pc.wrapping_add(1);

        let operand = self.resolve_operand(info.mode, bus);

        let mut cycles = info.cycles as u32;
        if info.page_penalty && operand.page_crossed {
            cycles += 1;
        }
        cycles += self.execute(info.op, &operand, bus) as u32;

        // OAM DMA raised by a $4014 write inside this instruction
        if bus.take_oam_dma_pending() {
            let parity = (self.cycles + cycles as u64) & 1;
            cycles += 513 + parity as u32;
        }

        // Stall cycles the DMC charged during earlier bus ticks
        cycles += bus.take_dmc_stall();

        self.cycles += cycles as u64;
        cycles
    }

    /// Format the pre-execution state as a nestest-style log line
    ///
    /// `PC  bytes  MNEMONIC  A:.. X:.. Y:.. P:.. SP:.. CYC:..`
    pub fn trace(&self, bus: &Bus) -> String {
        let opcode = bus.peek(self.pc);
        let info = &OPCODE_TABLE[opcode as usize];

        let operand_bytes: Vec<u8> = (1..info.bytes)
            .map(|offset| bus.peek(self.pc.wrapping_add(offset as u16)))
            .collect();

        let mut raw = format!("{:02X}", opcode);
        for byte in &operand_bytes {
            raw.push_str(&format!(" {:02X}", byte));
        }

        format!(
            "{:04X}  {:<8}  {:<4} {:<26} A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            self.pc,
            raw,
            info.mnemonic,
            self.format_operand(info, &operand_bytes),
            self.a,
            self.x,
            self.y,
            self.status,
            self.sp,
            self.cycles
        )
    }

    fn format_operand(&self, info: &opcodes::OpcodeInfo, bytes: &[u8]) -> String {
        use opcodes::Mode;

        let byte = |index: usize| bytes.get(index).copied().unwrap_or(0);
        match info.mode {
            Mode::Implied => String::new(),
            Mode::Accumulator => "A".to_string(),
            Mode::Immediate => format!("#${:02X}", byte(0)),
            Mode::ZeroPage => format!("${:02X}", byte(0)),
            Mode::ZeroPageX => format!("${:02X},X", byte(0)),
            Mode::ZeroPageY => format!("${:02X},Y", byte(0)),
            Mode::Relative => {
                let target = self
                    .pc
                    .wrapping_add(2)
                    .wrapping_add_signed(byte(0) as i8 as i16);
                format!("${:04X}", target)
            }
            Mode::Absolute => format!("${:02X}{:02X}", byte(1), byte(0)),
            Mode::AbsoluteX => format!("${:02X}{:02X},X", byte(1), byte(0)),
            Mode::AbsoluteY => format!("${:02X}{:02X},Y", byte(1), byte(0)),
            Mode::Indirect => format!("(${:02X}{:02X})", byte(1), byte(0)),
            Mode::IndexedIndirect => format!("(${:02X},X)", byte(0)),
            Mode::IndirectIndexed => format!("(${:02X}),Y", byte(0)),
        }
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}
