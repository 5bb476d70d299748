//! Phase sequencing state machine.
//!
//! Provides [`SequenceController`], which cycles through a [`PhaseSequence`]
//! one phase at a time. The controller never sleeps itself: every operation
//! that arms a wake-up returns the delay after which [`SequenceController::service`]
//! must be called. Only one wake-up is ever pending, so two phase chains can
//! never overlap.

use crate::command::ControllerAction;
use crate::phases::PhaseSequence;
use crate::renderer::{LightRenderer, RenderError};
use crate::time::{TimeDuration, TimeInstant, TimeSource};
use crate::types::{Phase, Speed};

/// Coarse state of a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerState {
    /// Nothing lit, no wake-up pending.
    Idle,
    /// Cycling. One phase is lit and its wake-up is pending.
    Running,
    /// Stop requested. The lit phase goes dark at its pending wake-up.
    Stopping,
}

/// When the controller needs to be serviced again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServiceTiming<D> {
    /// A phase is lit. Call `service` again after this delay.
    Delay(D),

    /// No wake-up pending. Nothing to do until the next `start`.
    Stopped,
}

/// Errors that can occur during controller operations.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerError {
    /// `start` called while already running.
    AlreadyRunning,
    /// The renderer failed; the cycle was aborted.
    Render(RenderError),
}

impl core::fmt::Display for ControllerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ControllerError::AlreadyRunning => write!(f, "sequence is already running"),
            ControllerError::Render(err) => write!(f, "phase loop aborted: {}", err),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ControllerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ControllerError::AlreadyRunning => None,
            ControllerError::Render(err) => Some(err),
        }
    }
}

impl From<RenderError> for ControllerError {
    fn from(err: RenderError) -> Self {
        ControllerError::Render(err)
    }
}

/// Callback notified when a renderer failure aborts the cycle.
pub type ErrorObserver = fn(&ControllerError);

/// The single pending wake-up: when the lit phase was entered and for how long
/// it stays lit. The duration is committed on entry, so speed changes never
/// touch it.
struct Wake<I: TimeInstant> {
    entered_at: I,
    duration: I::Duration,
}

/// Cycles a phase list on a light renderer.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `R` - Renderer implementation type
/// * `T` - Time source implementation type
/// * `N` - Maximum number of phases
pub struct SequenceController<'t, I: TimeInstant, R: LightRenderer, T: TimeSource<I>, const N: usize> {
    phases: PhaseSequence<I::Duration, N>,
    renderer: R,
    time_source: &'t T,
    running: bool,
    current: usize,
    wake: Option<Wake<I>>,
    speed: Speed,
    last_error: Option<ControllerError>,
    on_error: Option<ErrorObserver>,
}

impl<'t, I: TimeInstant, R: LightRenderer, T: TimeSource<I>, const N: usize>
    SequenceController<'t, I, R, T, N>
{
    /// Creates an idle controller at normal speed. Nothing is rendered until `start`.
    pub fn new(phases: PhaseSequence<I::Duration, N>, renderer: R, time_source: &'t T) -> Self {
        Self {
            phases,
            renderer,
            time_source,
            running: false,
            current: 0,
            wake: None,
            speed: Speed::Normal,
            last_error: None,
            on_error: None,
        }
    }

    /// Registers the callback notified when a renderer failure aborts the cycle.
    pub fn set_error_observer(&mut self, observer: ErrorObserver) {
        self.on_error = Some(observer);
    }

    /// Dispatches a UI action.
    ///
    /// `Start` while already running is ignored.
    ///
    /// # Returns
    /// * `Ok(ServiceTiming)` - When to service next
    /// * `Err` - The renderer failed and the cycle was aborted
    pub fn handle_action(
        &mut self,
        action: ControllerAction,
    ) -> Result<ServiceTiming<I::Duration>, ControllerError> {
        match action {
            ControllerAction::Start => match self.start() {
                Err(ControllerError::AlreadyRunning) => Ok(self.timing()),
                result => result,
            },
            ControllerAction::Stop => {
                self.stop();
                Ok(self.timing())
            }
            ControllerAction::SetSpeed(speed) => {
                self.set_speed(speed);
                Ok(self.timing())
            }
        }
    }

    /// Starts the cycle at the first phase and lights it.
    ///
    /// If a stop is still waiting for its phase boundary, the lit phase is
    /// turned off first so the old chain cannot outlive the new one.
    ///
    /// # Returns
    /// * `Ok(ServiceTiming::Delay(d))` - Service after `d`
    /// * `Err(AlreadyRunning)` - Already running, nothing changed
    /// * `Err(Render(..))` - The renderer failed, controller is stopped
    pub fn start(&mut self) -> Result<ServiceTiming<I::Duration>, ControllerError> {
        if self.running {
            return Err(ControllerError::AlreadyRunning);
        }

        if self.wake.take().is_some() {
            if let Err(err) = self.renderer.deactivate(&self.phases[self.current]) {
                return Err(self.abort(err));
            }
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("starting sequence at {} speed", self.speed);

        self.running = true;
        self.current = 0;
        self.enter_current()
    }

    /// Requests a stop. Callable in any state.
    ///
    /// The lit phase stays lit until its wake-up; `service` then turns it off
    /// and ends the cycle. No phase is activated after this call.
    pub fn stop(&mut self) {
        #[cfg(feature = "defmt")]
        if self.running {
            defmt::debug!("stop requested during phase {}", self.current);
        }

        self.running = false;
    }

    /// Sets the speed used for every phase entered from now on.
    pub fn set_speed(&mut self, speed: Speed) {
        #[cfg(feature = "defmt")]
        defmt::debug!("speed set to {}", speed);

        self.speed = speed;
    }

    /// Handles a wake-up.
    ///
    /// Before the lit phase's duration has elapsed this only reports the
    /// remaining delay. Afterwards the phase is turned off and, if still
    /// running, the next phase is lit.
    ///
    /// # Returns
    /// * `Ok(ServiceTiming::Delay(d))` - Service again after `d`
    /// * `Ok(ServiceTiming::Stopped)` - Cycle ended (or was never started)
    /// * `Err(Render(..))` - The renderer failed, controller is stopped
    pub fn service(&mut self) -> Result<ServiceTiming<I::Duration>, ControllerError> {
        let Some(wake) = &self.wake else {
            return Ok(ServiceTiming::Stopped);
        };

        let elapsed = self.time_source.now().duration_since(wake.entered_at);
        if elapsed < wake.duration {
            return Ok(ServiceTiming::Delay(wake.duration.saturating_sub(elapsed)));
        }

        self.wake = None;
        if let Err(err) = self.renderer.deactivate(&self.phases[self.current]) {
            return Err(self.abort(err));
        }

        if !self.running {
            #[cfg(feature = "defmt")]
            defmt::debug!("sequence stopped after phase {}", self.current);

            return Ok(ServiceTiming::Stopped);
        }

        self.current = self.phases.next_index(self.current);
        self.enter_current()
    }

    /// Time until the next wake-up, without servicing.
    pub fn timing(&self) -> ServiceTiming<I::Duration> {
        match &self.wake {
            Some(wake) => {
                let elapsed = self.time_source.now().duration_since(wake.entered_at);
                ServiceTiming::Delay(wake.duration.saturating_sub(elapsed))
            }
            None => ServiceTiming::Stopped,
        }
    }

    /// Lights the current phase and arms its wake-up.
    fn enter_current(&mut self) -> Result<ServiceTiming<I::Duration>, ControllerError> {
        let phase = &self.phases[self.current];
        let duration = self.speed.scale(phase.duration);
        let entered_at = self.time_source.now();

        if let Err(err) = self.renderer.activate(phase) {
            return Err(self.abort(err));
        }

        self.wake = Some(Wake {
            entered_at,
            duration,
        });
        Ok(ServiceTiming::Delay(duration))
    }

    /// Ends the cycle after a renderer failure. No retry.
    fn abort(&mut self, err: RenderError) -> ControllerError {
        self.running = false;
        self.wake = None;

        let err = ControllerError::Render(err);

        #[cfg(feature = "defmt")]
        defmt::warn!("{}", err);

        if let Some(observer) = self.on_error {
            observer(&err);
        }
        self.last_error = Some(err.clone());
        err
    }

    /// Returns the coarse controller state.
    pub fn state(&self) -> ControllerState {
        match (self.running, self.wake.is_some()) {
            (true, _) => ControllerState::Running,
            (false, true) => ControllerState::Stopping,
            (false, false) => ControllerState::Idle,
        }
    }

    /// Returns true between `start` and `stop` (or an aborting failure).
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Index of the current (or last) phase.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The phase that is lit right now, if any.
    pub fn current_phase(&self) -> Option<&Phase<I::Duration>> {
        self.wake.as_ref().map(|_| &self.phases[self.current])
    }

    /// Returns the selected speed.
    pub fn speed(&self) -> Speed {
        self.speed
    }

    /// Returns the phase list.
    pub fn phases(&self) -> &PhaseSequence<I::Duration, N> {
        &self.phases
    }

    /// The error that aborted the most recent cycle, if any.
    pub fn last_error(&self) -> Option<&ControllerError> {
        self.last_error.as_ref()
    }

    /// Returns a reference to the renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Consumes the controller, returning the renderer.
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
