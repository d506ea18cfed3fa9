// PPU video memory map
//
// $0000-$1FFF  pattern tables (cartridge CHR, via the mapper)
// $2000-$2FFF  nametables (2KB internal RAM routed by mirroring)
// $3000-$3EFF  mirror of $2000-$2EFF
// $3F00-$3FFF  palette RAM (32 bytes, mirrored, with sprite-backdrop
//              aliases at $3F10/$3F14/$3F18/$3F1C)

use super::constants::NAMETABLE_SIZE;
use super::Ppu;
use crate::cartridge::Mirroring;

impl Ppu {
    /// Route a nametable address (any $2000-$2FFF offset) to physical
    /// VRAM according to the active mirroring
    pub(crate) fn mirror_nametable(&self, addr: u16) -> usize {
        let addr = (addr & 0x0FFF) as usize;
        let table = addr / NAMETABLE_SIZE;
        let offset = addr % NAMETABLE_SIZE;

        let physical = match self.mirroring() {
            Mirroring::Horizontal => table >> 1,
            Mirroring::Vertical => table & 1,
            Mirroring::SingleScreenA => 0,
            Mirroring::SingleScreenB => 1,
            // Board-supplied RAM backs all four tables
            Mirroring::FourScreen => table,
        };

        physical * NAMETABLE_SIZE + offset
    }

    /// Fold a palette address into the 32-byte RAM, applying the
    /// sprite-backdrop aliases
    pub(crate) fn mirror_palette(addr: u16) -> usize {
        let index = (addr & 0x1F) as usize;
        match index {
            0x10 | 0x14 | 0x18 | 0x1C => index - 0x10,
            _ => index,
        }
    }

    /// Internal video memory read ($0000-$3FFF)
    pub(crate) fn read_vram(&self, addr: u16) -> u8 {
        let addr = addr & 0x3FFF;
        match addr {
            0x0000..=0x1FFF => match &self.mapper {
                Some(mapper) => mapper.borrow().ppu_read(addr),
                None => 0,
            },
            0x2000..=0x3EFF => self.nametable_ram[self.mirror_nametable(addr)],
            _ => self.palette_ram[Self::mirror_palette(addr)],
        }
    }

    /// Internal video memory write ($0000-$3FFF)
    pub(crate) fn write_vram(&mut self, addr: u16, value: u8) {
        let addr = addr & 0x3FFF;
        match addr {
            0x0000..=0x1FFF => {
                if let Some(mapper) = &self.mapper {
                    mapper.borrow_mut().ppu_write(addr, value);
                }
            }
            0x2000..=0x3EFF => {
                let index = self.mirror_nametable(addr);
                self.nametable_ram[index] = value;
            }
            _ => self.palette_ram[Self::mirror_palette(addr)] = value,
        }
    }
}
