// The 56 documented 6502 operations
//
// `execute` dispatches on the decoded `Op`; each operation is a small
// method over the resolved operand. Branches return their extra cycle
// cost (1 for taken, 2 for taken across a page); everything else
// returns 0 and relies on the decode table's base cost plus the
// page-cross penalty applied in `step`.

use super::addressing::Operand;
use super::flags;
use super::opcodes::Op;
use super::Cpu;
use crate::bus::Bus;

impl Cpu {
    /// Operand value: inline for immediate/accumulator, else a bus read
    fn load(&self, operand: &Operand, bus: &mut Bus) -> u8 {
        match operand.value {
            Some(value) => value,
            None => bus.read(operand.addr),
        }
    }

    /// Run one decoded operation; returns extra cycles (branches only)
    pub(crate) fn execute(&mut self, op: Op, operand: &Operand, bus: &mut Bus) -> u8 {
        match op {
            // Loads and stores
            Op::Lda => {
                self.a = self.load(operand, bus);
                self.set_zn(self.a);
            }
            Op::Ldx => {
                self.x = self.load(operand, bus);
                self.set_zn(self.x);
            }
            Op::Ldy => {
                self.y = self.load(operand, bus);
                self.set_zn(self.y);
            }
            Op::Sta => bus.write(operand.addr, self.a),
            Op::Stx => bus.write(operand.addr, self.x),
            Op::Sty => bus.write(operand.addr, self.y),

            // Arithmetic
            Op::Adc => self.add_with_carry(self.load(operand, bus)),
            Op::Sbc => self.add_with_carry(!self.load(operand, bus)),
            Op::Inc => {
                let value = self.load(operand, bus).wrapping_add(1);
                bus.write(operand.addr, value);
                self.set_zn(value);
            }
            Op::Dec => {
                let value = self.load(operand, bus).wrapping_sub(1);
                bus.write(operand.addr, value);
                self.set_zn(value);
            }
            Op::Inx => {
                self.x = self.x.wrapping_add(1);
                self.set_zn(self.x);
            }
            Op::Iny => {
                self.y = self.y.wrapping_add(1);
                self.set_zn(self.y);
            }
            Op::Dex => {
                self.x = self.x.wrapping_sub(1);
                self.set_zn(self.x);
            }
            Op::Dey => {
                self.y = self.y.wrapping_sub(1);
                self.set_zn(self.y);
            }

            // Logic
            Op::And => {
                self.a &= self.load(operand, bus);
                self.set_zn(self.a);
            }
            Op::Ora => {
                self.a |= self.load(operand, bus);
                self.set_zn(self.a);
            }
            Op::Eor => {
                self.a ^= self.load(operand, bus);
                self.set_zn(self.a);
            }
            Op::Bit => {
                let value = self.load(operand, bus);
                self.set_flag(flags::ZERO, self.a & value == 0);
                self.set_flag(flags::NEGATIVE, value & 0x80 != 0);
                self.set_flag(flags::OVERFLOW, value & 0x40 != 0);
            }

            // Shifts and rotates
            Op::Asl => self.read_modify_write(operand, bus, |cpu, value| {
                cpu.set_flag(flags::CARRY, value & 0x80 != 0);
                value << 1
            }),
            Op::Lsr => self.read_modify_write(operand, bus, |cpu, value| {
                cpu.set_flag(flags::CARRY, value & 0x01 != 0);
                value >> 1
            }),
            Op::Rol => self.read_modify_write(operand, bus, |cpu, value| {
                let carry_in = cpu.flag(flags::CARRY) as u8;
                cpu.set_flag(flags::CARRY, value & 0x80 != 0);
                (value << 1) | carry_in
            }),
            Op::Ror => self.read_modify_write(operand, bus, |cpu, value| {
                let carry_in = (cpu.flag(flags::CARRY) as u8) << 7;
                cpu.set_flag(flags::CARRY, value & 0x01 != 0);
                (value >> 1) | carry_in
            }),

            // Compares
            Op::Cmp => self.compare(self.a, self.load(operand, bus)),
            Op::Cpx => self.compare(self.x, self.load(operand, bus)),
            Op::Cpy => self.compare(self.y, self.load(operand, bus)),

            // Branches
            Op::Bcc => return self.branch(!self.flag(flags::CARRY), operand),
            Op::Bcs => return self.branch(self.flag(flags::CARRY), operand),
            Op::Bne => return self.branch(!self.flag(flags::ZERO), operand),
            Op::Beq => return self.branch(self.flag(flags::ZERO), operand),
            Op::Bpl => return self.branch(!self.flag(flags::NEGATIVE), operand),
            Op::Bmi => return self.branch(self.flag(flags::NEGATIVE), operand),
            Op::Bvc => return self.branch(!self.flag(flags::OVERFLOW), operand),
            Op::Bvs => return self.branch(self.flag(flags::OVERFLOW), operand),

            // Jumps and subroutines
            Op::Jmp => self.pc = operand.addr,
            Op::Jsr => {
                // Push the address of the last byte of this instruction
                self.push_u16(bus, self.pc.wrapping_sub(1));
                self.pc = operand.addr;
            }
            Op::Rts => self.pc = self.pop_u16(bus).wrapping_add(1),
            Op::Rti => {
                self.pop_status(bus);
                self.pc = self.pop_u16(bus);
            }
            Op::Brk => {
                // The byte after BRK is padding; the pushed PC skips it
                self.push_u16(bus, self.pc.wrapping_add(1));
                self.push(bus, self.status | flags::BREAK | flags::UNUSED);
                self.set_flag(flags::INTERRUPT_DISABLE, true);
                self.pc = bus.read_u16(super::vectors::IRQ);
            }

            // Stack
            Op::Pha => self.push(bus, self.a),
            Op::Php => {
                let pushed = self.status | flags::BREAK | flags::UNUSED;
                self.push(bus, pushed);
            }
            Op::Pla => {
                self.a = self.pop(bus);
                self.set_zn(self.a);
            }
            Op::Plp => self.pop_status(bus),

            // Transfers
            Op::Tax => {
                self.x = self.a;
                self.set_zn(self.x);
            }
            Op::Tay => {
                self.y = self.a;
                self.set_zn(self.y);
            }
            Op::Tsx => {
                self.x = self.sp;
                self.set_zn(self.x);
            }
            Op::Txa => {
                self.a = self.x;
                self.set_zn(self.a);
            }
            Op::Txs => self.sp = self.x,
            Op::Tya => {
                self.a = self.y;
                self.set_zn(self.a);
            }

            // Flags
            Op::Clc => self.set_flag(flags::CARRY, false),
            Op::Sec => self.set_flag(flags::CARRY, true),
            Op::Cli => self.set_flag(flags::INTERRUPT_DISABLE, false),
            Op::Sei => self.set_flag(flags::INTERRUPT_DISABLE, true),
            Op::Clv => self.set_flag(flags::OVERFLOW, false),
            Op::Cld => self.set_flag(flags::DECIMAL, false),
            Op::Sed => self.set_flag(flags::DECIMAL, true),

            Op::Nop => {}

            Op::Illegal => unreachable!("filtered in step"),
        }
        0
    }

    /// ADC core, shared by SBC via operand complement.
    /// Decimal mode is latched but has no arithmetic effect on the 2A03.
    fn add_with_carry(&mut self, value: u8) {
        let carry_in = self.flag(flags::CARRY) as u16;
        let sum = self.a as u16 + value as u16 + carry_in;
        let result = sum as u8;

        self.set_flag(flags::CARRY, sum > 0xFF);
        // Overflow: both inputs share a sign the result does not
        self.set_flag(
            flags::OVERFLOW,
            (!(self.a ^ value) & (self.a ^ result)) & 0x80 != 0,
        );
        self.a = result;
        self.set_zn(result);
    }

    fn compare(&mut self, register: u8, value: u8) {
        let result = register.wrapping_sub(value);
        self.set_flag(flags::CARRY, register >= value);
        self.set_zn(result);
    }

    /// Shared body for the shift/rotate family: operates on the
    /// accumulator or memory depending on the addressing mode
    fn read_modify_write(
        &mut self,
        operand: &Operand,
        bus: &mut Bus,
        transform: impl FnOnce(&mut Cpu, u8) -> u8,
    ) {
        match operand.value {
            Some(value) => {
                let result = transform(self, value);
                self.a = result;
                self.set_zn(result);
            }
            None => {
                let value = bus.read(operand.addr);
                let result = transform(self, value);
                bus.write(operand.addr, result);
                self.set_zn(result);
            }
        }
    }

    /// Take or skip a branch; returns the extra cycles consumed
    fn branch(&mut self, condition: bool, operand: &Operand) -> u8 {
        if !condition {
            return 0;
        }
        self.pc = operand.addr;
        if operand.page_crossed {
            2
        } else {
            1
        }
    }

    /// Pull P from the stack: B is discarded, U forced high
    fn pop_status(&mut self, bus: &mut Bus) {
        let value = self.pop(bus);
        self.status = (value & !flags::BREAK) | flags::UNUSED;
    }
}
