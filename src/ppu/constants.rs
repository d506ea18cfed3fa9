// PPU timing and geometry constants (NTSC 2C02)

/// Visible frame width in pixels
pub const SCREEN_WIDTH: usize = 256;

/// Visible frame height in pixels
pub const SCREEN_HEIGHT: usize = 240;

/// Dots per scanline (0-340)
pub const DOTS_PER_SCANLINE: u16 = 341;

/// Pre-render scanline index
pub const PRERENDER_SCANLINE: i16 = -1;

/// Last visible scanline
pub const LAST_VISIBLE_SCANLINE: i16 = 239;

/// Scanline on which vblank begins
pub const VBLANK_SCANLINE: i16 = 241;

/// Last scanline of the frame
pub const LAST_SCANLINE: i16 = 260;

/// Internal nametable RAM: four 1KB tables' worth of address space
/// (only two are physical unless the board provides four-screen RAM)
pub const NAMETABLE_SPACE: usize = 0x1000;

/// One nametable (32x30 tiles + 64 attribute bytes)
pub const NAMETABLE_SIZE: usize = 0x400;

/// Palette RAM size
pub const PALETTE_SIZE: usize = 32;

// PPUCTRL bits
pub const CTRL_NMI_ENABLE: u8 = 0x80;
pub const CTRL_SPRITE_SIZE: u8 = 0x20;
pub const CTRL_BG_TABLE: u8 = 0x10;
pub const CTRL_SPRITE_TABLE: u8 = 0x08;
pub const CTRL_INCREMENT_32: u8 = 0x04;

// PPUMASK bits
pub const MASK_SHOW_SPRITES: u8 = 0x10;
pub const MASK_SHOW_BACKGROUND: u8 = 0x08;
pub const MASK_SPRITES_LEFT: u8 = 0x04;
pub const MASK_BACKGROUND_LEFT: u8 = 0x02;

// PPUSTATUS bits
pub const STATUS_VBLANK: u8 = 0x80;
pub const STATUS_SPRITE_ZERO_HIT: u8 = 0x40;
pub const STATUS_SPRITE_OVERFLOW: u8 = 0x20;
