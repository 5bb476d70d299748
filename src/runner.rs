//! Blocking host driver for a [`SequenceController`].
//!
//! Waits on a channel of [`ControllerAction`]s with the controller's next
//! wake-up as the timeout, so actions are handled as they arrive and phases
//! advance when their time is up. Only available with the `std` feature.

use crate::command::ControllerAction;
use crate::controller::{ControllerError, SequenceController, ServiceTiming};
use crate::renderer::LightRenderer;
use crate::time::{TimeInstant, TimeSource};
use core::time::Duration;
use std::sync::mpsc::{Receiver, RecvTimeoutError};

/// Drives `controller` until every sender of `actions` is dropped.
///
/// A renderer failure ends the current cycle but not the loop: it keeps
/// waiting for the next action, so a later `Start` can try again. Once the
/// channel closes, the controller is stopped and the lit phase is allowed to
/// finish before returning.
///
/// # Returns
/// The most recent renderer failure seen while running, if any. Failures are
/// also delivered to the controller's error observer as they happen.
pub fn run<I, R, T, const N: usize>(
    controller: &mut SequenceController<'_, I, R, T, N>,
    actions: &Receiver<ControllerAction>,
) -> Option<ControllerError>
where
    I: TimeInstant<Duration = Duration>,
    R: LightRenderer,
    T: TimeSource<I>,
{
    let mut timing = controller.timing();
    let mut failure = None;

    loop {
        let received = match timing {
            ServiceTiming::Delay(delay) => actions.recv_timeout(delay),
            ServiceTiming::Stopped => actions.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        let result = match received {
            Ok(action) => controller.handle_action(action),
            Err(RecvTimeoutError::Timeout) => controller.service(),
            Err(RecvTimeoutError::Disconnected) => break,
        };
        timing = match result {
            Ok(timing) => timing,
            Err(err) => {
                failure = Some(err);
                ServiceTiming::Stopped
            }
        };
    }

    controller.stop();
    loop {
        match controller.service() {
            Ok(ServiceTiming::Delay(delay)) => std::thread::sleep(delay),
            Ok(ServiceTiming::Stopped) => break,
            Err(err) => {
                failure = Some(err);
                break;
            }
        }
    }

    failure
}
