//! Core types for phase construction.

use crate::time::TimeDuration;
use palette::Srgb;

/// Maximum length of a phase identifier, in bytes.
pub const PHASE_ID_LEN: usize = 16;

/// Identifier naming a phase and the visual target it drives (e.g. `"green"`).
pub type PhaseId = heapless::String<PHASE_ID_LEN>;

/// Builds a [`PhaseId`], failing if `id` does not fit.
pub(crate) fn phase_id(id: &str) -> Option<PhaseId> {
    let mut out = PhaseId::new();
    out.push_str(id).ok()?;
    Some(out)
}

/// One colored state of the light with its configured duration.
#[derive(Debug, Clone, PartialEq)]
pub struct Phase<D: TimeDuration> {
    /// Phase identifier, also used to find its visual target.
    pub id: PhaseId,

    /// Configured duration at normal speed.
    pub duration: D,

    /// Lit color of the phase.
    pub color: Srgb,
}

impl<D: TimeDuration> Phase<D> {
    /// Creates a new phase. Returns `None` if the id is longer than [`PHASE_ID_LEN`].
    #[inline]
    pub fn new(id: &str, duration: D, color: Srgb) -> Option<Self> {
        Some(Self {
            id: phase_id(id)?,
            duration,
            color,
        })
    }
}

/// Playback speed applied to every phase entered after it is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Speed {
    /// Configured durations.
    #[default]
    Normal,

    /// Half the configured durations.
    Fast,
}

impl Speed {
    /// Multiplier as a `(numerator, denominator)` pair.
    pub const fn ratio(self) -> (u64, u64) {
        match self {
            Speed::Normal => (1, 1),
            Speed::Fast => (1, 2),
        }
    }

    /// Applies the multiplier to a configured duration.
    ///
    /// `Normal` returns `duration` untouched. Scaled durations never drop
    /// below 1 ms, so a lit phase always waits.
    pub fn scale<D: TimeDuration>(self, duration: D) -> D {
        let (num, den) = self.ratio();
        if num == den {
            return duration;
        }
        D::from_millis((duration.as_millis().saturating_mul(num) / den).max(1))
    }

    /// Maps a speed selector id to a speed: `"normal"` is `Normal`, any other
    /// option plays fast.
    pub fn from_tag(tag: &str) -> Self {
        if tag == Speed::Normal.tag() {
            Speed::Normal
        } else {
            Speed::Fast
        }
    }

    /// The UI tag for this speed.
    pub const fn tag(self) -> &'static str {
        match self {
            Speed::Normal => "normal",
            Speed::Fast => "fast",
        }
    }
}

/// Returned when a speed tag names no known speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnknownSpeed;

impl core::fmt::Display for UnknownSpeed {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "unknown speed, expected \"normal\" or \"fast\"")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for UnknownSpeed {}

impl core::str::FromStr for Speed {
    type Err = UnknownSpeed;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Speed::Normal),
            "fast" => Ok(Speed::Fast),
            _ => Err(UnknownSpeed),
        }
    }
}

/// Phase list validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequenceError {
    /// No phases provided.
    EmptySequence,

    /// A phase has zero duration.
    ZeroDuration,

    /// Sequence capacity exceeded.
    CapacityExceeded,

    /// Phase id longer than [`PHASE_ID_LEN`].
    IdTooLong,
}

impl core::fmt::Display for SequenceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SequenceError::EmptySequence => {
                write!(f, "sequence must have at least one phase")
            }
            SequenceError::ZeroDuration => {
                write!(f, "phase durations must be greater than zero")
            }
            SequenceError::CapacityExceeded => {
                write!(f, "sequence capacity exceeded")
            }
            SequenceError::IdTooLong => {
                write!(f, "phase id longer than {} bytes", PHASE_ID_LEN)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SequenceError {}
