// 6502 opcode decode table
//
// 256 slots of (operation, addressing mode, size, base cycles,
// page-cross penalty). The hot loop indexes this with the fetched
// opcode byte; everything else about the instruction follows from the
// entry. Undocumented opcodes decode to `Op::Illegal` and abort in the
// executor - the documented set is closed, so hitting one means the
// emulated machine is already corrupt.

/// Addressing modes of the 6502
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Implied,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Relative,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndexedIndirect,
    IndirectIndexed,
}

/// The 56 documented operations plus the illegal marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs, Clc,
    Cld, Cli, Clv, Cmp, Cpx, Cpy, Dec, Dex, Dey, Eor, Inc, Inx, Iny, Jmp,
    Jsr, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Pla, Plp, Rol, Ror, Rti,
    Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty, Tax, Tay, Tsx, Txa, Txs, Tya,
    Illegal,
}

/// One decode-table entry
#[derive(Debug, Clone, Copy)]
pub struct OpcodeInfo {
    pub op: Op,
    pub mode: Mode,
    pub mnemonic: &'static str,
    /// Instruction size in bytes (opcode + operands)
    pub bytes: u8,
    /// Base cycle cost before penalties
    pub cycles: u8,
    /// Reads in indexed modes pay +1 cycle on a page crossing
    pub page_penalty: bool,
}

const fn entry(
    op: Op,
    mode: Mode,
    mnemonic: &'static str,
    bytes: u8,
    cycles: u8,
    page_penalty: bool,
) -> OpcodeInfo {
    OpcodeInfo {
        op,
        mode,
        mnemonic,
        bytes,
        cycles,
        page_penalty,
    }
}

const ILLEGAL: OpcodeInfo = entry(Op::Illegal, Mode::Implied, "???", 1, 2, false);

/// The decode table, indexed by opcode byte
pub static OPCODE_TABLE: [OpcodeInfo; 256] = {
    use Mode::*;
    use Op::*;

    let mut table = [ILLEGAL; 256];

    // Load / store
    table[0xA9] = entry(Lda, Immediate, "LDA", 2, 2, false);
    table[0xA5] = entry(Lda, ZeroPage, "LDA", 2, 3, false);
    table[0xB5] = entry(Lda, ZeroPageX, "LDA", 2, 4, false);
    table[0xAD] = entry(Lda, Absolute, "LDA", 3, 4, false);
    table[0xBD] = entry(Lda, AbsoluteX, "LDA", 3, 4, true);
    table[0xB9] = entry(Lda, AbsoluteY, "LDA", 3, 4, true);
    table[0xA1] = entry(Lda, IndexedIndirect, "LDA", 2, 6, false);
    table[0xB1] = entry(Lda, IndirectIndexed, "LDA", 2, 5, true);
    table[0xA2] = entry(Ldx, Immediate, "LDX", 2, 2, false);
    table[0xA6] = entry(Ldx, ZeroPage, "LDX", 2, 3, false);
    table[0xB6] = entry(Ldx, ZeroPageY, "LDX", 2, 4, false);
    table[0xAE] = entry(Ldx, Absolute, "LDX", 3, 4, false);
    table[0xBE] = entry(Ldx, AbsoluteY, "LDX", 3, 4, true);
    table[0xA0] = entry(Ldy, Immediate, "LDY", 2, 2, false);
    table[0xA4] = entry(Ldy, ZeroPage, "LDY", 2, 3, false);
    table[0xB4] = entry(Ldy, ZeroPageX, "LDY", 2, 4, false);
    table[0xAC] = entry(Ldy, Absolute, "LDY", 3, 4, false);
    table[0xBC] = entry(Ldy, AbsoluteX, "LDY", 3, 4, true);
    table[0x85] = entry(Sta, ZeroPage, "STA", 2, 3, false);
    table[0x95] = entry(Sta, ZeroPageX, "STA", 2, 4, false);
    table[0x8D] = entry(Sta, Absolute, "STA", 3, 4, false);
    table[0x9D] = entry(Sta, AbsoluteX, "STA", 3, 5, false);
    table[0x99] = entry(Sta, AbsoluteY, "STA", 3, 5, false);
    table[0x81] = entry(Sta, IndexedIndirect, "STA", 2, 6, false);
    table[0x91] = entry(Sta, IndirectIndexed, "STA", 2, 6, false);
    table[0x86] = entry(Stx, ZeroPage, "STX", 2, 3, false);
    table[0x96] = entry(Stx, ZeroPageY, "STX", 2, 4, false);
    table[0x8E] = entry(Stx, Absolute, "STX", 3, 4, false);
    table[0x84] = entry(Sty, ZeroPage, "STY", 2, 3, false);
    table[0x94] = entry(Sty, ZeroPageX, "STY", 2, 4, false);
    table[0x8C] = entry(Sty, Absolute, "STY", 3, 4, false);

    // Arithmetic
    table[0x69] = entry(Adc, Immediate, "ADC", 2, 2, false);
    table[0x65] = entry(Adc, ZeroPage, "ADC", 2, 3, false);
    table[0x75] = entry(Adc, ZeroPageX, "ADC", 2, 4, false);
    table[0x6D] = entry(Adc, Absolute, "ADC", 3, 4, false);
    table[0x7D] = entry(Adc, AbsoluteX, "ADC", 3, 4, true);
    table[0x79] = entry(Adc, AbsoluteY, "ADC", 3, 4, true);
    table[0x61] = entry(Adc, IndexedIndirect, "ADC", 2, 6, false);
    table[0x71] = entry(Adc, IndirectIndexed, "ADC", 2, 5, true);
    table[0xE9] = entry(Sbc, Immediate, "SBC", 2, 2, false);
    table[0xE5] = entry(Sbc, ZeroPage, "SBC", 2, 3, false);
    table[0xF5] = entry(Sbc, ZeroPageX, "SBC", 2, 4, false);
    table[0xED] = entry(Sbc, Absolute, "SBC", 3, 4, false);
    table[0xFD] = entry(Sbc, AbsoluteX, "SBC", 3, 4, true);
    table[0xF9] = entry(Sbc, AbsoluteY, "SBC", 3, 4, true);
    table[0xE1] = entry(Sbc, IndexedIndirect, "SBC", 2, 6, false);
    table[0xF1] = entry(Sbc, IndirectIndexed, "SBC", 2, 5, true);
    table[0xE6] = entry(Inc, ZeroPage, "INC", 2, 5, false);
    table[0xF6] = entry(Inc, ZeroPageX, "INC", 2, 6, false);
    table[0xEE] = entry(Inc, Absolute, "INC", 3, 6, false);
    table[0xFE] = entry(Inc, AbsoluteX, "INC", 3, 7, false);
    table[0xC6] = entry(Dec, ZeroPage, "DEC", 2, 5, false);
    table[0xD6] = entry(Dec, ZeroPageX, "DEC", 2, 6, false);
    table[0xCE] = entry(Dec, Absolute, "DEC", 3, 6, false);
    table[0xDE] = entry(Dec, AbsoluteX, "DEC", 3, 7, false);
    table[0xE8] = entry(Inx, Implied, "INX", 1, 2, false);
    table[0xC8] = entry(Iny, Implied, "INY", 1, 2, false);
    table[0xCA] = entry(Dex, Implied, "DEX", 1, 2, false);
    table[0x88] = entry(Dey, Implied, "DEY", 1, 2, false);

    // Logic
    table[0x29] = entry(And, Immediate, "AND", 2, 2, false);
    table[0x25] = entry(And, ZeroPage, "AND", 2, 3, false);
    table[0x35] = entry(And, ZeroPageX, "AND", 2, 4, false);
    table[0x2D] = entry(And, Absolute, "AND", 3, 4, false);
    table[0x3D] = entry(And, AbsoluteX, "AND", 3, 4, true);
    table[0x39] = entry(And, AbsoluteY, "AND", 3, 4, true);
    table[0x21] = entry(And, IndexedIndirect, "AND", 2, 6, false);
    table[0x31] = entry(And, IndirectIndexed, "AND", 2, 5, true);
    table[0x09] = entry(Ora, Immediate, "ORA", 2, 2, false);
    table[0x05] = entry(Ora, ZeroPage, "ORA", 2, 3, false);
    table[0x15] = entry(Ora, ZeroPageX, "ORA", 2, 4, false);
    table[0x0D] = entry(Ora, Absolute, "ORA", 3, 4, false);
    table[0x1D] = entry(Ora, AbsoluteX, "ORA", 3, 4, true);
    table[0x19] = entry(Ora, AbsoluteY, "ORA", 3, 4, true);
    table[0x01] = entry(Ora, IndexedIndirect, "ORA", 2, 6, false);
    table[0x11] = entry(Ora, IndirectIndexed, "ORA", 2, 5, true);
    table[0x49] = entry(Eor, Immediate, "EOR", 2, 2, false);
    table[0x45] = entry(Eor, ZeroPage, "EOR", 2, 3, false);
    table[0x55] = entry(Eor, ZeroPageX, "EOR", 2, 4, false);
    table[0x4D] = entry(Eor, Absolute, "EOR", 3, 4, false);
    table[0x5D] = entry(Eor, AbsoluteX, "EOR", 3, 4, true);
    table[0x59] = entry(Eor, AbsoluteY, "EOR", 3, 4, true);
    table[0x41] = entry(Eor, IndexedIndirect, "EOR", 2, 6, false);
    table[0x51] = entry(Eor, IndirectIndexed, "EOR", 2, 5, true);
    table[0x24] = entry(Bit, ZeroPage, "BIT", 2, 3, false);
    table[0x2C] = entry(Bit, Absolute, "BIT", 3, 4, false);

    // Shifts and rotates
    table[0x0A] = entry(Asl, Accumulator, "ASL", 1, 2, false);
    table[0x06] = entry(Asl, ZeroPage, "ASL", 2, 5, false);
    table[0x16] = entry(Asl, ZeroPageX, "ASL", 2, 6, false);
    table[0x0E] = entry(Asl, Absolute, "ASL", 3, 6, false);
    table[0x1E] = entry(Asl, AbsoluteX, "ASL", 3, 7, false);
    table[0x4A] = entry(Lsr, Accumulator, "LSR", 1, 2, false);
    table[0x46] = entry(Lsr, ZeroPage, "LSR", 2, 5, false);
    table[0x56] = entry(Lsr, ZeroPageX, "LSR", 2, 6, false);
    table[0x4E] = entry(Lsr, Absolute, "LSR", 3, 6, false);
    table[0x5E] = entry(Lsr, AbsoluteX, "LSR", 3, 7, false);
    table[0x2A] = entry(Rol, Accumulator, "ROL", 1, 2, false);
    table[0x26] = entry(Rol, ZeroPage, "ROL", 2, 5, false);
    table[0x36] = entry(Rol, ZeroPageX, "ROL", 2, 6, false);
    table[0x2E] = entry(Rol, Absolute, "ROL", 3, 6, false);
    table[0x3E] = entry(Rol, AbsoluteX, "ROL", 3, 7, false);
    table[0x6A] = entry(Ror, Accumulator, "ROR", 1, 2, false);
    table[0x66] = entry(Ror, ZeroPage, "ROR", 2, 5, false);
    table[0x76] = entry(Ror, ZeroPageX, "ROR", 2, 6, false);
    table[0x6E] = entry(Ror, Absolute, "ROR", 3, 6, false);
    table[0x7E] = entry(Ror, AbsoluteX, "ROR", 3, 7, false);

    // Compares
    table[0xC9] = entry(Cmp, Immediate, "CMP", 2, 2, false);
    table[0xC5] = entry(Cmp, ZeroPage, "CMP", 2, 3, false);
    table[0xD5] = entry(Cmp, ZeroPageX, "CMP", 2, 4, false);
    table[0xCD] = entry(Cmp, Absolute, "CMP", 3, 4, false);
    table[0xDD] = entry(Cmp, AbsoluteX, "CMP", 3, 4, true);
    table[0xD9] = entry(Cmp, AbsoluteY, "CMP", 3, 4, true);
    table[0xC1] = entry(Cmp, IndexedIndirect, "CMP", 2, 6, false);
    table[0xD1] = entry(Cmp, IndirectIndexed, "CMP", 2, 5, true);
    table[0xE0] = entry(Cpx, Immediate, "CPX", 2, 2, false);
    table[0xE4] = entry(Cpx, ZeroPage, "CPX", 2, 3, false);
    table[0xEC] = entry(Cpx, Absolute, "CPX", 3, 4, false);
    table[0xC0] = entry(Cpy, Immediate, "CPY", 2, 2, false);
    table[0xC4] = entry(Cpy, ZeroPage, "CPY", 2, 3, false);
    table[0xCC] = entry(Cpy, Absolute, "CPY", 3, 4, false);

    // Branches
    table[0x90] = entry(Bcc, Relative, "BCC", 2, 2, false);
    table[0xB0] = entry(Bcs, Relative, "BCS", 2, 2, false);
    table[0xF0] = entry(Beq, Relative, "BEQ", 2, 2, false);
    table[0xD0] = entry(Bne, Relative, "BNE", 2, 2, false);
    table[0x30] = entry(Bmi, Relative, "BMI", 2, 2, false);
    table[0x10] = entry(Bpl, Relative, "BPL", 2, 2, false);
    table[0x50] = entry(Bvc, Relative, "BVC", 2, 2, false);
    table[0x70] = entry(Bvs, Relative, "BVS", 2, 2, false);

    // Jumps and subroutines
    table[0x4C] = entry(Jmp, Absolute, "JMP", 3, 3, false);
    table[0x6C] = entry(Jmp, Indirect, "JMP", 3, 5, false);
    table[0x20] = entry(Jsr, Absolute, "JSR", 3, 6, false);
    table[0x60] = entry(Rts, Implied, "RTS", 1, 6, false);
    table[0x40] = entry(Rti, Implied, "RTI", 1, 6, false);
    table[0x00] = entry(Brk, Implied, "BRK", 1, 7, false);

    // Stack
    table[0x48] = entry(Pha, Implied, "PHA", 1, 3, false);
    table[0x08] = entry(Php, Implied, "PHP", 1, 3, false);
    table[0x68] = entry(Pla, Implied, "PLA", 1, 4, false);
    table[0x28] = entry(Plp, Implied, "PLP", 1, 4, false);

    // Transfers
    table[0xAA] = entry(Tax, Implied, "TAX", 1, 2, false);
    table[0xA8] = entry(Tay, Implied, "TAY", 1, 2, false);
    table[0xBA] = entry(Tsx, Implied, "TSX", 1, 2, false);
    table[0x8A] = entry(Txa, Implied, "TXA", 1, 2, false);
    table[0x9A] = entry(Txs, Implied, "TXS", 1, 2, false);
    table[0x98] = entry(Tya, Implied, "TYA", 1, 2, false);

    // Flags
    table[0x18] = entry(Clc, Implied, "CLC", 1, 2, false);
    table[0x38] = entry(Sec, Implied, "SEC", 1, 2, false);
    table[0x58] = entry(Cli, Implied, "CLI", 1, 2, false);
    table[0x78] = entry(Sei, Implied, "SEI", 1, 2, false);
    table[0xB8] = entry(Clv, Implied, "CLV", 1, 2, false);
    table[0xD8] = entry(Cld, Implied, "CLD", 1, 2, false);
    table[0xF8] = entry(Sed, Implied, "SED", 1, 2, false);

    table[0xEA] = entry(Nop, Implied, "NOP", 1, 2, false);

    table
};
