use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use thiserror::Error;

use crate::synth::engine::{SynthEngine, CHANNELS};
use crate::SynthConfig;

/// Device-driver failures. There is no recovery path for a headless audio
/// pipeline, so callers are expected to propagate these as fatal.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("no default output device available")]
    NoOutputDevice,
    #[error("failed to open output stream: {0}")]
    Build(#[from] cpal::BuildStreamError),
    #[error("failed to start output stream: {0}")]
    Play(#[from] cpal::PlayStreamError),
    #[error("failed to stop output stream: {0}")]
    Pause(#[from] cpal::PauseStreamError),
}

/// An open stereo f32 output stream driving a [`SynthEngine`].
pub struct OutputStream {
    stream: cpal::Stream,
}

impl OutputStream {
    /// Open the default output device at the configured sample rate and
    /// buffer size.
    ///
    /// The engine moves into the callback closure, making the audio
    /// thread its sole owner from here on. The stream starts paused; call
    /// [`start`](Self::start).
    pub fn open(mut engine: SynthEngine, config: &SynthConfig) -> Result<Self, StreamError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(StreamError::NoOutputDevice)?;

        let stream_config = cpal::StreamConfig {
            channels: CHANNELS as cpal::ChannelCount,
            sample_rate: cpal::SampleRate(config.sample_rate),
            buffer_size: cpal::BufferSize::Fixed(config.frames_per_buffer as cpal::FrameCount),
        };

        let stream = device.build_output_stream(
            &stream_config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| engine.render_block(data),
            |err| tracing::error!("output stream error: {err}"),
            None,
        )?;

        Ok(Self { stream })
    }

    /// Begin periodic render callbacks.
    pub fn start(&self) -> Result<(), StreamError> {
        self.stream.play()?;
        Ok(())
    }

    /// Suspend render callbacks. Dropping the stream closes the device.
    pub fn stop(&self) -> Result<(), StreamError> {
        self.stream.pause()?;
        Ok(())
    }
}
