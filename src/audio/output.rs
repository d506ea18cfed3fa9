// Audio output - cpal stream fed from the engine's sample queue
//
// The engine produces i16 samples at whatever rate the device wants;
// a shared ring buffer decouples the emulation thread from the audio
// callback. Underruns play silence rather than blocking.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Ring buffer cap: about a quarter second at 48 kHz, enough to ride
/// out scheduling hiccups without audible latency build-up
const MAX_BUFFERED_SAMPLES: usize = 12_000;

/// Errors from setting up the audio device
#[derive(Debug)]
pub enum AudioError {
    NoDevice,
    Build(cpal::BuildStreamError),
    Play(cpal::PlayStreamError),
    Config(cpal::DefaultStreamConfigError),
}

impl std::fmt::Display for AudioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AudioError::NoDevice => write!(f, "no audio output device available"),
            AudioError::Build(err) => write!(f, "failed to build audio stream: {}", err),
            AudioError::Play(err) => write!(f, "failed to start audio stream: {}", err),
            AudioError::Config(err) => write!(f, "failed to query audio config: {}", err),
        }
    }
}

impl std::error::Error for AudioError {}

/// A running audio output stream
pub struct AudioOutput {
    _stream: cpal::Stream,
    queue: Arc<Mutex<VecDeque<i16>>>,
    sample_rate: u32,
    volume: f32,
}

impl AudioOutput {
    /// Open the default output device and start a stream
    pub fn new(volume: f32) -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(AudioError::NoDevice)?;
        let config = device
            .default_output_config()
            .map_err(AudioError::Config)?;

        let sample_rate = config.sample_rate().0;
        let channels = config.channels() as usize;
        let queue = Arc::new(Mutex::new(VecDeque::new()));

        let callback_queue = Arc::clone(&queue);
        let stream = device
            .build_output_stream(
                &config.into(),
                move |data: &mut [f32], _| {
                    let mut queue = callback_queue.lock().unwrap();
                    for frame in data.chunks_mut(channels) {
                        let sample = queue
                            .pop_front()
                            .map(|value| value as f32 / i16::MAX as f32)
                            .unwrap_or(0.0);
                        for channel in frame.iter_mut() {
                            *channel = sample;
                        }
                    }
                },
                |err| eprintln!("audio stream error: {}", err),
                None,
            )
            .map_err(AudioError::Build)?;

        stream.play().map_err(AudioError::Play)?;

        Ok(AudioOutput {
            _stream: stream,
            queue,
            sample_rate,
            volume: volume.clamp(0.0, 1.0),
        })
    }

    /// Rate the engine should resample to
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Queue engine samples for playback, applying the master volume
    pub fn push_samples(&self, samples: &[i16]) {
        let mut queue = self.queue.lock().unwrap();
        for &sample in samples {
            if queue.len() >= MAX_BUFFERED_SAMPLES {
                // Drop the oldest: stay near real time instead of
                // drifting ever further behind
                queue.pop_front();
            }
            queue.push_back((sample as f32 * self.volume) as i16);
        }
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }
}
