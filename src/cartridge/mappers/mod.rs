// Mappers module - cartridge board logic for the supported mapper set
//
// The factory below turns a parsed cartridge into the mapper that owns
// its ROM/RAM and answers bus accesses. Supported boards:
//
// | Mapper | Board  | Banking                                        |
// |--------|--------|------------------------------------------------|
// | 000    | NROM   | none (16KB mirror or flat 32KB)                |
// | 001    | MMC1   | serial shift register, PRG/CHR modes, mirroring|
// | 002    | UxROM  | 16KB PRG select at $8000, last bank fixed      |
// | 003    | CNROM  | 8KB CHR select                                 |
// | 004    | MMC3   | 8KB PRG / 1-2KB CHR banks, scanline IRQ        |

mod mapper0;
mod mapper1;
mod mapper2;
mod mapper3;
mod mapper4;

pub use mapper0::Mapper0;
pub use mapper1::Mapper1;
pub use mapper2::Mapper2;
pub use mapper3::Mapper3;
pub use mapper4::Mapper4;

use super::{Cartridge, Mapper};

/// Error type for mapper creation
#[derive(Debug)]
pub enum MapperError {
    /// The cartridge wants a mapper outside the supported set
    UnsupportedMapper(u8),
}

impl std::fmt::Display for MapperError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapperError::UnsupportedMapper(num) => {
                write!(f, "mapper {} is not supported", num)
            }
        }
    }
}

impl std::error::Error for MapperError {}

/// Build the mapper for a cartridge
///
/// # Errors
/// Returns `MapperError::UnsupportedMapper` for mapper numbers outside
/// {0, 1, 2, 3, 4}.
pub fn create_mapper(cartridge: Cartridge) -> Result<Box<dyn Mapper>, MapperError> {
    match cartridge.mapper {
        0 => Ok(Box::new(Mapper0::new(cartridge))),
        1 => Ok(Box::new(Mapper1::new(cartridge))),
        2 => Ok(Box::new(Mapper2::new(cartridge))),
        3 => Ok(Box::new(Mapper3::new(cartridge))),
        4 => Ok(Box::new(Mapper4::new(cartridge))),
        number => Err(MapperError::UnsupportedMapper(number)),
    }
}
