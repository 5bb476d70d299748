//! Validated, cyclic phase lists.

use crate::colors::{GREEN, RED, YELLOW};
use crate::time::TimeDuration;
use crate::types::{Phase, SequenceError, phase_id};
use heapless::Vec;
use palette::Srgb;

/// An ordered, cyclic list of phases.
///
/// After the last phase the cycle restarts at the first. Every phase has a
/// non-zero duration and the list is never empty.
///
/// # Type Parameters
/// * `D` - The duration type (e.g., `core::time::Duration`)
/// * `N` - Maximum number of phases this sequence can hold
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseSequence<D: TimeDuration, const N: usize> {
    phases: Vec<Phase<D>, N>,
}

impl<D: TimeDuration, const N: usize> PhaseSequence<D, N> {
    /// Creates a new sequence builder.
    pub fn builder() -> PhaseSequenceBuilder<D, N> {
        PhaseSequenceBuilder::new()
    }

    /// The three-phase traffic light: green 5000 ms, yellow 2500 ms, red 5000 ms.
    ///
    /// # Errors
    /// * `CapacityExceeded` - `N` is smaller than 3
    pub fn traffic_light() -> Result<Self, SequenceError> {
        Self::builder()
            .phase("green", D::from_millis(5000), GREEN)?
            .phase("yellow", D::from_millis(2500), YELLOW)?
            .phase("red", D::from_millis(5000), RED)?
            .build()
    }

    /// Returns the phase at the given index.
    pub fn get(&self, index: usize) -> Option<&Phase<D>> {
        self.phases.get(index)
    }

    /// Index of the phase following `index`, wrapping to the first.
    #[inline]
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.phases.len()
    }

    /// Returns the number of phases.
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    /// Always false for a built sequence.
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Iterates over the phases in order.
    pub fn iter(&self) -> core::slice::Iter<'_, Phase<D>> {
        self.phases.iter()
    }
}

impl<D: TimeDuration, const N: usize> core::ops::Index<usize> for PhaseSequence<D, N> {
    type Output = Phase<D>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.phases[index]
    }
}

impl<'a, D: TimeDuration, const N: usize> IntoIterator for &'a PhaseSequence<D, N> {
    type Item = &'a Phase<D>;
    type IntoIter = core::slice::Iter<'a, Phase<D>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Builder for constructing validated phase sequences.
#[derive(Debug)]
pub struct PhaseSequenceBuilder<D: TimeDuration, const N: usize> {
    phases: Vec<Phase<D>, N>,
}

impl<D: TimeDuration, const N: usize> PhaseSequenceBuilder<D, N> {
    /// Creates a new empty builder.
    pub fn new() -> Self {
        Self { phases: Vec::new() }
    }

    /// Appends a phase.
    ///
    /// # Errors
    /// * `IdTooLong` - The id does not fit in a [`PhaseId`](crate::PhaseId)
    /// * `CapacityExceeded` - More than `N` phases
    pub fn phase(mut self, id: &str, duration: D, color: Srgb) -> Result<Self, SequenceError> {
        let id = phase_id(id).ok_or(SequenceError::IdTooLong)?;
        self.phases
            .push(Phase {
                id,
                duration,
                color,
            })
            .map_err(|_| SequenceError::CapacityExceeded)?;
        Ok(self)
    }

    /// Builds and validates the sequence.
    ///
    /// # Errors
    /// * `EmptySequence` - No phases were added
    /// * `ZeroDuration` - A phase has zero duration
    pub fn build(self) -> Result<PhaseSequence<D, N>, SequenceError> {
        if self.phases.is_empty() {
            return Err(SequenceError::EmptySequence);
        }

        if self.phases.iter().any(|p| p.duration.as_millis() == 0) {
            return Err(SequenceError::ZeroDuration);
        }

        Ok(PhaseSequence {
            phases: self.phases,
        })
    }
}

impl<D: TimeDuration, const N: usize> Default for PhaseSequenceBuilder<D, N> {
    fn default() -> Self {
        Self::new()
    }
}
