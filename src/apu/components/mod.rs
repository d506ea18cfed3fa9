//! Shared sub-units used by several APU channels

pub mod envelope;
pub mod frame_counter;
pub mod length_counter;
pub mod linear_counter;
pub mod sweep;
pub mod timer;

pub use envelope::Envelope;
pub use frame_counter::{FrameClocks, FrameCounter, SequencerMode};
pub use length_counter::LengthCounter;
pub use linear_counter::LinearCounter;
pub use sweep::{PulseId, Sweep};
pub use timer::Timer;
