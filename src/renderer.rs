//! Rendering collaborators.
//!
//! [`LightRenderer`] is what the controller talks to. [`LampBank`] is a stock
//! renderer that drives one [`RgbLed`] per phase, lit when active and dimmed
//! otherwise.

use crate::colors::{DEFAULT_DIM_LEVEL, dimmed};
use crate::time::TimeDuration;
use crate::types::{Phase, PhaseId, phase_id};
use heapless::Vec;
use palette::Srgb;

/// Turns a phase's visual indicator on and off.
pub trait LightRenderer {
    /// Makes the phase's indicator active.
    ///
    /// # Errors
    /// * `TargetNotFound` - No visual element exists for the phase id
    fn activate<D: TimeDuration>(&mut self, phase: &Phase<D>) -> Result<(), RenderError>;

    /// Inverse of [`activate`](LightRenderer::activate).
    fn deactivate<D: TimeDuration>(&mut self, phase: &Phase<D>) -> Result<(), RenderError>;
}

/// Errors reported by renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderError {
    /// The visual target for this phase id does not exist.
    TargetNotFound(PhaseId),
}

impl core::fmt::Display for RenderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RenderError::TargetNotFound(id) => {
                write!(f, "no render target for phase \"{}\"", id)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RenderError {}

/// Trait for abstracting RGB LED hardware.
///
/// Implement this for your lamp hardware (GPIO, PWM, SPI, etc.). Color
/// components are in the range 0.0-1.0.
pub trait RgbLed {
    /// Sets the LED to the specified RGB color.
    fn set_color(&mut self, color: Srgb);
}

/// Errors that can occur while assembling a [`LampBank`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LampError {
    /// A lamp is already registered for this phase id.
    DuplicateLamp(PhaseId),

    /// The bank is full and cannot accept more lamps.
    BankFull,

    /// Phase id longer than [`PHASE_ID_LEN`](crate::PHASE_ID_LEN).
    IdTooLong,
}

impl core::fmt::Display for LampError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LampError::DuplicateLamp(id) => {
                write!(f, "a lamp for phase \"{}\" already exists", id)
            }
            LampError::BankFull => write!(f, "lamp bank is full"),
            LampError::IdTooLong => write!(f, "phase id too long"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LampError {}

/// One lamp per phase, keyed by phase id.
///
/// # Type Parameters
/// * `L` - LED implementation type (same for every lamp in the bank)
/// * `K` - Maximum number of lamps
pub struct LampBank<L: RgbLed, const K: usize> {
    lamps: Vec<(PhaseId, L), K>,
    dim_level: f32,
}

impl<L: RgbLed, const K: usize> LampBank<L, K> {
    /// Creates an empty bank with the default dim level.
    pub fn new() -> Self {
        Self {
            lamps: Vec::new(),
            dim_level: DEFAULT_DIM_LEVEL,
        }
    }

    /// Sets the brightness of inactive lamps (0.0-1.0).
    ///
    /// Applies to lamps dimmed from now on.
    pub fn with_dim_level(mut self, level: f32) -> Self {
        self.dim_level = level.clamp(0.0, 1.0);
        self
    }

    /// Registers the lamp for phase `id` and shows it dimmed in `color`.
    ///
    /// # Errors
    /// * `DuplicateLamp` - A lamp already exists for this id
    /// * `BankFull` - The bank holds `K` lamps already
    /// * `IdTooLong` - The id does not fit in a [`PhaseId`]
    pub fn add_lamp(&mut self, id: &str, mut led: L, color: Srgb) -> Result<(), LampError> {
        let id = phase_id(id).ok_or(LampError::IdTooLong)?;

        if self.contains(&id) {
            return Err(LampError::DuplicateLamp(id));
        }

        led.set_color(dimmed(color, self.dim_level));
        self.lamps
            .push((id, led))
            .map_err(|_| LampError::BankFull)
    }

    /// Returns true if a lamp is registered for `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.lamps.iter().any(|(lamp_id, _)| lamp_id.as_str() == id)
    }

    /// Returns the lamp registered for `id`.
    pub fn lamp(&self, id: &str) -> Option<&L> {
        self.lamps
            .iter()
            .find(|(lamp_id, _)| lamp_id.as_str() == id)
            .map(|(_, led)| led)
    }

    /// Returns the number of lamps.
    pub fn len(&self) -> usize {
        self.lamps.len()
    }

    /// Returns true if no lamps are registered.
    pub fn is_empty(&self) -> bool {
        self.lamps.is_empty()
    }

    fn lamp_mut(&mut self, id: &PhaseId) -> Result<&mut L, RenderError> {
        self.lamps
            .iter_mut()
            .find(|(lamp_id, _)| *lamp_id == *id)
            .map(|(_, led)| led)
            .ok_or_else(|| RenderError::TargetNotFound(id.clone()))
    }
}

impl<L: RgbLed, const K: usize> Default for LampBank<L, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: RgbLed, const K: usize> LightRenderer for LampBank<L, K> {
    fn activate<D: TimeDuration>(&mut self, phase: &Phase<D>) -> Result<(), RenderError> {
        self.lamp_mut(&phase.id)?.set_color(phase.color);
        Ok(())
    }

    fn deactivate<D: TimeDuration>(&mut self, phase: &Phase<D>) -> Result<(), RenderError> {
        let level = self.dim_level;
        self.lamp_mut(&phase.id)?.set_color(dimmed(phase.color, level));
        Ok(())
    }
}
