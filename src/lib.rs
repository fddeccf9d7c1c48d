//! tablesynth - a minimal lock-free wavetable synthesizer.
//!
//! A fixed set of oscillator voices, each fed by its own bounded
//! single-producer/single-consumer queue of timed note events. A control
//! thread enqueues events; the audio thread drains them inside the render
//! callback, which never blocks, allocates, or takes a lock.

pub mod dsp; // Wavetables, stereo frames, the per-buffer gain ramp
pub mod io; // Audio device output
pub mod synth; // Voices, event queues, the render engine

pub use dsp::wavetable::{Waveform, Wavetable, WavetableBank};
pub use synth::engine::SynthEngine;
pub use synth::event::NoteEvent;
pub use synth::handle::SynthHandle;

/// Stream parameters, fixed for the lifetime of an engine.
///
/// Owned by the process and passed by reference at construction; nothing in
/// the crate reads ambient global state.
#[derive(Debug, Clone, Copy)]
pub struct SynthConfig {
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// Frames the device driver asks for per render callback.
    pub frames_per_buffer: usize,
    /// Samples per wavetable cycle.
    pub table_size: usize,
    /// Capacity of each voice's note queue. Fixed at construction; the
    /// render path never allocates.
    pub queue_capacity: usize,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44_100,
            frames_per_buffer: 210,
            table_size: 210,
            queue_capacity: 1024,
        }
    }
}
