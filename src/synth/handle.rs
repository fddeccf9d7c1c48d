use crossbeam_channel::Receiver;
use rtrb::Producer;

use crate::synth::event::NoteEvent;

/// The control-thread surface of the synthesizer.
///
/// Holds the producer end of every voice's event queue plus the matching
/// completion receivers. These methods are the only way non-realtime code
/// can influence playback; none of them touch voice state directly, and
/// none of them block except the teardown waits.
pub struct SynthHandle {
    events: Vec<Producer<NoteEvent>>,
    finished: Vec<Receiver<()>>,
}

impl SynthHandle {
    pub(crate) fn new(events: Vec<Producer<NoteEvent>>, finished: Vec<Receiver<()>>) -> Self {
        Self { events, finished }
    }

    /// Number of voices behind this handle.
    pub fn voices(&self) -> usize {
        self.events.len()
    }

    /// Queue a tone on `voice` for `duration_ms` at `frequency_hz`.
    pub fn play(&mut self, voice: usize, duration_ms: u32, frequency_hz: f64) {
        self.send(
            voice,
            NoteEvent::Note {
                duration_ms,
                frequency_hz,
            },
        );
    }

    /// Queue silence on `voice` for `duration_ms`.
    pub fn rest(&mut self, voice: usize, duration_ms: u32) {
        self.send(voice, NoteEvent::Rest { duration_ms });
    }

    /// Queue the terminal marker on `voice`.
    ///
    /// Once the audio thread consumes it - after every earlier event has
    /// rendered - the voice posts its completion signal.
    pub fn end(&mut self, voice: usize) {
        self.send(voice, NoteEvent::End);
    }

    fn send(&mut self, voice: usize, event: NoteEvent) {
        match self.events.get_mut(voice) {
            // Best effort: a full ring drops the event instead of
            // blocking the caller.
            Some(queue) => {
                let _ = queue.push(event);
            }
            None => {
                tracing::warn!(
                    "ignoring {event:?} for voice {voice}: only {} voices exist",
                    self.events.len()
                );
            }
        }
    }

    /// Block until `voice` consumes an [`NoteEvent::End`].
    ///
    /// Each `End` posts one signal, consumed by exactly one `wait` or one
    /// successful [`poll_finished`](Self::poll_finished). A disconnected
    /// voice counts as finished. Out-of-range indices log and return.
    pub fn wait(&self, voice: usize) {
        match self.finished.get(voice) {
            Some(done) => {
                let _ = done.recv();
            }
            None => {
                tracing::warn!(
                    "cannot wait on voice {voice}: only {} voices exist",
                    self.finished.len()
                );
            }
        }
    }

    /// Non-blocking check for a pending completion signal. Consumes the
    /// signal when it returns true.
    pub fn poll_finished(&self, voice: usize) -> bool {
        self.finished
            .get(voice)
            .is_some_and(|done| done.try_recv().is_ok())
    }

    /// Queue `End` on every voice, then block until each has drained.
    ///
    /// This is the shutdown path: once it returns, every previously queued
    /// event has been rendered and the stream can be stopped without
    /// racing the audio thread.
    pub fn finish(mut self) {
        for voice in 0..self.events.len() {
            self.end(voice);
        }
        for voice in 0..self.finished.len() {
            self.wait(voice);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::wavetable::{Waveform, WavetableBank};
    use crate::synth::engine::SynthEngine;
    use crate::SynthConfig;

    fn handle() -> SynthHandle {
        let config = SynthConfig::default();
        let bank = WavetableBank::new(config.table_size);
        let (_engine, handle) = SynthEngine::new(&config, &bank, &[Waveform::Sine]);
        handle
    }

    #[test]
    fn out_of_range_operations_are_no_ops() {
        let mut handle = handle();

        handle.play(5, 100, 440.0);
        handle.rest(5, 100);
        handle.end(5);
        handle.wait(5);
        assert!(!handle.poll_finished(5));
    }

    #[test]
    fn overflowing_the_queue_drops_instead_of_blocking() {
        let mut handle = handle();

        // Twice the default capacity; the excess is silently discarded.
        for _ in 0..2048 {
            handle.rest(0, 1);
        }
    }

    #[test]
    fn no_completion_before_end_is_consumed() {
        let mut handle = handle();
        handle.end(0);

        // The signal comes from the audio thread, and no engine is
        // rendering here.
        assert!(!handle.poll_finished(0));
    }
}
