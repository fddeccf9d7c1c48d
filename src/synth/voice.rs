use std::sync::Arc;

use crossbeam_channel::Sender;
use rtrb::Consumer;

use crate::dsp::envelope::buffer_gain;
use crate::dsp::wavetable::Wavetable;
use crate::dsp::StereoFrame;
use crate::synth::event::NoteEvent;

/// What a voice is currently rendering.
///
/// `Waiting` never crosses the queue - it is synthesized here when a pop
/// finds the ring empty, and a consumed `End` reduces to it once the
/// completion signal has been posted.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Loaded {
    Tone { frequency_hz: f64 },
    Rest,
    Waiting,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Playback {
    /// No event loaded; the next callback pops the queue.
    Idle,
    Playing {
        loaded: Loaded,
        /// Frames of this event rendered before the current buffer.
        frames_played: u64,
        /// Frame budget of this event, rounded from its millisecond
        /// duration. Zero for `Waiting` and zero-duration events.
        frames_total: u64,
    },
}

/// One oscillator voice.
///
/// Owned exclusively by the audio thread once constructed. The queue
/// consumer is the voice's only link to the control thread; playback state
/// needs no locking because nothing else can reach it.
pub struct Voice {
    events: Consumer<NoteEvent>,
    table: Arc<Wavetable>,
    left_phase: f64,
    right_phase: f64,
    playback: Playback,
    finished: Sender<()>,
}

impl Voice {
    pub(crate) fn new(
        events: Consumer<NoteEvent>,
        table: Arc<Wavetable>,
        finished: Sender<()>,
    ) -> Self {
        Self {
            events,
            table,
            left_phase: 0.0,
            right_phase: 0.0,
            playback: Playback::Idle,
            finished,
        }
    }

    /// Load the next event if the previous one has finished.
    ///
    /// Called once per voice per render callback. An empty queue loads a
    /// silent `Waiting` placeholder rather than blocking; a dequeued `End`
    /// posts the completion signal and also reduces to `Waiting`.
    pub(crate) fn refill(&mut self, sample_rate: u32) {
        if self.playback != Playback::Idle {
            return;
        }

        let event = self.events.pop().ok();
        let frames_total = event.map_or(0, |e| e.frames(sample_rate));
        let loaded = match event {
            Some(NoteEvent::Note { frequency_hz, .. }) => Loaded::Tone { frequency_hz },
            Some(NoteEvent::Rest { .. }) => Loaded::Rest,
            Some(NoteEvent::End) => {
                // try_send keeps the render path non-blocking; a full slot
                // or hung-up receiver is not this thread's problem.
                let _ = self.finished.try_send(());
                Loaded::Waiting
            }
            None => Loaded::Waiting,
        };

        self.playback = Playback::Playing {
            loaded,
            frames_played: 0,
            frames_total,
        };
    }

    /// Produce one stereo frame and advance the phase accumulators.
    ///
    /// `frame_index` is the position inside the current buffer; the gain
    /// ramp is a function of the buffer, not of the whole event.
    pub(crate) fn render_frame(&mut self, frame_index: usize, frames_per_buffer: usize) -> StereoFrame {
        let Playback::Playing {
            loaded,
            frames_played,
            frames_total,
        } = self.playback
        else {
            return StereoFrame::SILENCE;
        };

        match loaded {
            Loaded::Tone { frequency_hz } => {
                let gain = buffer_gain(frames_played, frames_total, frame_index, frames_per_buffer);
                let frame = StereoFrame {
                    left: self.table.sample(self.left_phase) * gain,
                    right: self.table.sample(self.right_phase) * gain,
                };

                let len = self.table.len() as f64;
                let step = frequency_hz / len;
                self.left_phase = (self.left_phase + step) % len;
                self.right_phase = (self.right_phase + step) % len;

                frame
            }
            Loaded::Rest | Loaded::Waiting => StereoFrame::SILENCE,
        }
    }

    /// Account for a rendered buffer and retire the event once its frame
    /// budget is spent.
    ///
    /// `Waiting` placeholders do not accumulate frames; with a zero budget
    /// they retire immediately, so an idle voice re-polls its queue every
    /// callback without ever stalling.
    pub(crate) fn finish_buffer(&mut self, frames: u64) {
        let Playback::Playing {
            loaded,
            mut frames_played,
            frames_total,
        } = self.playback
        else {
            return;
        };

        if loaded != Loaded::Waiting {
            frames_played += frames;
        }

        self.playback = if frames_played >= frames_total {
            Playback::Idle
        } else {
            Playback::Playing {
                loaded,
                frames_played,
                frames_total,
            }
        };
    }
}
