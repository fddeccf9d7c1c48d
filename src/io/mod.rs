// Purpose - the audio device boundary
// Everything realtime lives in synth::engine; this layer only opens a
// device stream and hands buffers to it.

#[cfg(feature = "cpal")]
pub mod stream;
