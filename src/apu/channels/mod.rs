//! The five APU sound channels

pub mod dmc;
pub mod noise;
pub mod pulse;
pub mod triangle;

pub use dmc::Dmc;
pub use noise::Noise;
pub use pulse::Pulse;
pub use triangle::Triangle;
