//! APU lookup tables and timing constants (NTSC)

/// Length counter load table, indexed by the 5-bit value in the
/// channel's fourth register
pub const LENGTH_TABLE: [u8; 32] = [
    10, 254, 20, 2, 40, 4, 80, 6, 160, 8, 60, 10, 14, 12, 26, 14, 12, 16, 24, 18, 48, 20, 96, 22,
    192, 24, 72, 26, 16, 28, 32, 30,
];

/// Pulse duty sequences, one 8-step cycle per duty setting
pub const DUTY_SEQUENCES: [[u8; 8]; 4] = [
    [0, 1, 0, 0, 0, 0, 0, 0], // 12.5%
    [0, 1, 1, 0, 0, 0, 0, 0], // 25%
    [0, 1, 1, 1, 1, 0, 0, 0], // 50%
    [1, 0, 0, 1, 1, 1, 1, 1], // 25% negated
];

/// Triangle output sequence: 15 down to 0, then 0 up to 15
pub const TRIANGLE_SEQUENCE: [u8; 32] = [
    15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11,
    12, 13, 14, 15,
];

/// Noise timer periods in CPU cycles, indexed by the 4-bit period field
pub const NOISE_PERIODS: [u16; 16] = [
    4, 8, 16, 32, 64, 96, 128, 160, 202, 254, 380, 508, 762, 1016, 2034, 4068,
];

/// DMC timer periods in CPU cycles, indexed by the 4-bit rate field
pub const DMC_PERIODS: [u16; 16] = [
    428, 380, 340, 320, 286, 254, 226, 214, 190, 160, 142, 128, 106, 84, 72, 54,
];

/// Frame sequencer step positions in CPU cycles (the hardware's
/// half-cycle positions doubled: 3728.5 APU cycles = 7457 CPU cycles)
pub mod frame_steps {
    pub const STEP_1: u32 = 7457;
    pub const STEP_2: u32 = 14913;
    pub const STEP_3: u32 = 22371;
    pub const STEP_4: u32 = 29829;
    /// Sequence length in 4-step mode
    pub const PERIOD_4_STEP: u32 = 29830;
    /// Fifth step position and sequence length in 5-step mode
    pub const STEP_5: u32 = 37281;
    pub const PERIOD_5_STEP: u32 = 37282;
}
