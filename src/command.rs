//! Command-based control for the controller.

use crate::types::Speed;

/// Id of the button that stops the sequence. Every other button starts it.
pub const STOP_BUTTON_ID: &str = "stopBtn";

/// Actions for controlling a [`SequenceController`](crate::SequenceController).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerAction {
    /// Start the cycle. Ignored if already running.
    Start,
    /// Stop at the next phase boundary.
    Stop,
    /// Change the speed of phases entered from now on.
    SetSpeed(Speed),
}

/// Raw input from the host UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent<'a> {
    /// A button was clicked; carries the button id.
    ButtonClicked(&'a str),
    /// A speed option was selected; carries the option id.
    SpeedSelected(&'a str),
}

impl UiEvent<'_> {
    /// Translates the event into a controller action.
    ///
    /// Speed options other than `"normal"` select [`Speed::Fast`].
    pub fn action(&self) -> ControllerAction {
        match *self {
            UiEvent::ButtonClicked(STOP_BUTTON_ID) => ControllerAction::Stop,
            UiEvent::ButtonClicked(_) => ControllerAction::Start,
            UiEvent::SpeedSelected(tag) => ControllerAction::SetSpeed(Speed::from_tag(tag)),
        }
    }
}
