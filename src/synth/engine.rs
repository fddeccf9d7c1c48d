use crossbeam_channel::bounded;
use rtrb::RingBuffer;

use crate::dsp::wavetable::{Waveform, WavetableBank};
use crate::dsp::StereoFrame;
use crate::synth::handle::SynthHandle;
use crate::synth::voice::Voice;
use crate::SynthConfig;

/// Output channel count. The engine renders interleaved stereo.
pub const CHANNELS: usize = 2;

/// The realtime half of the synthesizer.
///
/// Owns every voice. Constructed on the control thread, then moved into
/// the device driver's callback closure, which makes the audio thread its
/// sole owner; the matching [`SynthHandle`] keeps only the queue producers
/// and completion receivers.
pub struct SynthEngine {
    voices: Vec<Voice>,
    sample_rate: u32,
}

impl SynthEngine {
    /// Build an engine with one voice per waveform assignment, wired to a
    /// control handle.
    ///
    /// Each voice gets its own bounded SPSC ring and single-fire
    /// completion channel; nothing on the render path allocates after
    /// this call.
    pub fn new(
        config: &SynthConfig,
        bank: &WavetableBank,
        waveforms: &[Waveform],
    ) -> (SynthEngine, SynthHandle) {
        let mut voices = Vec::with_capacity(waveforms.len());
        let mut events = Vec::with_capacity(waveforms.len());
        let mut finished = Vec::with_capacity(waveforms.len());

        for &waveform in waveforms {
            let (event_tx, event_rx) = RingBuffer::new(config.queue_capacity);
            let (done_tx, done_rx) = bounded(1);

            voices.push(Voice::new(event_rx, bank.get(waveform), done_tx));
            events.push(event_tx);
            finished.push(done_rx);
        }

        let engine = SynthEngine {
            voices,
            sample_rate: config.sample_rate,
        };
        (engine, SynthHandle::new(events, finished))
    }

    /// The render callback body: fill `out` with interleaved stereo
    /// samples in `[-1, 1]`.
    ///
    /// Runs on the audio thread inside the driver's time budget. Three
    /// phases per invocation: refill idle voices from their queues, render
    /// and mix one frame at a time, then account for the buffer. Lock-free
    /// and allocation-free throughout.
    pub fn render_block(&mut self, out: &mut [f32]) {
        out.fill(0.0);

        let frames = out.len() / CHANNELS;
        if frames == 0 || self.voices.is_empty() {
            return;
        }

        // Equal-weight average keeps the sum of full-scale voices inside
        // full scale.
        let scale = 1.0 / self.voices.len() as f32;

        for voice in &mut self.voices {
            voice.refill(self.sample_rate);
        }

        for (i, frame_out) in out.chunks_exact_mut(CHANNELS).enumerate() {
            let mut mix = StereoFrame::SILENCE;
            for voice in &mut self.voices {
                let frame = voice.render_frame(i, frames);
                mix.left += frame.left * scale;
                mix.right += frame.right * scale;
            }
            frame_out[0] = mix.left;
            frame_out[1] = mix.right;
        }

        for voice in &mut self.voices {
            voice.finish_buffer(frames as u64);
        }
    }
}
