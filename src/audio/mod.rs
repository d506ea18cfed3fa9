// Audio module - mixing and sample-rate conversion for APU output

pub mod mixer;
#[cfg(feature = "audio")]
pub mod output;
pub mod resampler;

pub use mixer::Mixer;
#[cfg(feature = "audio")]
pub use output::AudioOutput;
pub use resampler::resample_to_i16;
