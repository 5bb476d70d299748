#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Phase`**: One colored state of the light with its configured duration
//! - **`PhaseSequence`**: An ordered, cyclic list of phases (e.g. green, yellow, red)
//! - **`Speed`**: Multiplier applied to every phase entered after it is selected
//! - **`SequenceController`**: Cycles the phases, one pending wake-up at a time
//! - **`LightRenderer`**: Trait to implement for whatever shows the phases
//! - **`LampBank`**: Ready-made renderer driving one `RgbLed` per phase
//! - **`TimeSource`**: Trait to implement for your timing system
//! - **`ControllerAction`** / **`UiEvent`**: Start, stop and speed input
//!
//! The controller never blocks. `start()` and `service()` return a
//! `ServiceTiming` telling the host when to call `service()` again; with the
//! `std` feature, `runner::run` does that on the current thread.

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

pub mod colors;
pub mod command;
pub mod controller;
pub mod phases;
pub mod renderer;
#[cfg(feature = "std")]
pub mod runner;
pub mod time;
pub mod types;

pub use command::{ControllerAction, STOP_BUTTON_ID, UiEvent};
pub use controller::{
    ControllerError, ControllerState, ErrorObserver, SequenceController, ServiceTiming,
};
pub use phases::{PhaseSequence, PhaseSequenceBuilder};
pub use renderer::{LampBank, LampError, LightRenderer, RenderError, RgbLed};
#[cfg(feature = "std")]
pub use time::{StdInstant, StdTimeSource};
pub use time::{TimeDuration, TimeInstant, TimeSource};
pub use types::{PHASE_ID_LEN, Phase, PhaseId, SequenceError, Speed, UnknownSpeed};

/// Three-phase sequence.
pub type PhaseSequence3<D> = PhaseSequence<D, 3>;
