//! Sound cues. The core fires these and forgets them; a sink that has no
//! assets available simply swallows them — audio must never raise an error
//! into the simulation.

/// Named sound effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Laser,
    Kill,
    UfoLow,
    Move1,
    Move2,
    Move3,
    Move4,
    Boom,
}

impl Cue {
    /// The formation step sound cycles move1 → move2 → move3 → move4 → move1.
    pub fn next_move(self) -> Cue {
        match self {
            Cue::Move1 => Cue::Move2,
            Cue::Move2 => Cue::Move3,
            Cue::Move3 => Cue::Move4,
            _ => Cue::Move1,
        }
    }
}

pub trait AudioSink {
    fn play(&mut self, cue: Cue);
}

/// Default sink: no audio backend, every cue is a no-op.
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: Cue) {}
}
