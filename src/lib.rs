//! A terminal Space-Invaders variant: fixed-timestep game loop, lockstep
//! alien formation, rectangular collision detection and a persisted top-10
//! high-score table.
//!
//! The simulation ([`session`], [`formation`], [`entities`], [`geometry`])
//! is pure state transition over in-memory data — randomness and time are
//! injected — so it can be driven headlessly in tests. Terminal rendering,
//! audio and the score file sit behind the narrow traits in [`scene`],
//! [`audio`], [`input`] and [`scoreboard`], wired together by [`scheduler`].

pub mod audio;
pub mod clock;
pub mod config;
pub mod display;
pub mod entities;
pub mod formation;
pub mod geometry;
pub mod input;
pub mod scene;
pub mod scheduler;
pub mod scoreboard;
pub mod session;
pub mod stats;
