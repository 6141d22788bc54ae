//! Debouncing for interactive inputs.
//!
//! Every pushed value restarts a quiet window. When the window elapses
//! without new input, the latest value is emitted, unless it equals the
//! value emitted last time.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{sleep, Instant};
use tracing::trace;

/// Input side of a debounced stream.
///
/// Dropping the debouncer flushes any pending value and closes the output.
pub struct Debouncer<T> {
    input: mpsc::UnboundedSender<T>,
}

impl<T> Debouncer<T>
where
    T: Clone + PartialEq + Send + 'static,
{
    /// Spawn the timer task on the current runtime and return the input
    /// handle together with the output stream
    pub fn new(quiet: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (input, inbox) = mpsc::unbounded_channel();
        let (output, outbox) = mpsc::unbounded_channel();
        tokio::spawn(run(quiet, inbox, output));
        (Self { input }, outbox)
    }

    /// Feed a value; returns false once the output side is gone
    pub fn push(&self, value: T) -> bool {
        self.input.send(value).is_ok()
    }
}

async fn run<T>(quiet: Duration, mut inbox: mpsc::UnboundedReceiver<T>, output: mpsc::UnboundedSender<T>)
where
    T: Clone + PartialEq,
{
    let mut pending: Option<T> = None;
    let mut last_emitted: Option<T> = None;
    let timer = sleep(quiet);
    tokio::pin!(timer);

    loop {
        tokio::select! {
            received = inbox.recv() => match received {
                Some(value) => {
                    pending = Some(value);
                    timer.as_mut().reset(Instant::now() + quiet);
                }
                None => break,
            },
            () = &mut timer, if pending.is_some() => {
                if let Some(value) = pending.take() {
                    if !emit(value, &mut last_emitted, &output) {
                        return;
                    }
                }
            }
        }
    }

    if let Some(value) = pending.take() {
        emit(value, &mut last_emitted, &output);
    }
}

/// Send `value` unless it repeats the last emission; false if nobody listens
fn emit<T: Clone + PartialEq>(value: T, last_emitted: &mut Option<T>, output: &mpsc::UnboundedSender<T>) -> bool {
    if last_emitted.as_ref() == Some(&value) {
        trace!("Suppressing repeated value");
        return true;
    }
    *last_emitted = Some(value.clone());
    output.send(value).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(1000);

    #[tokio::test(start_paused = true)]
    async fn test_emits_after_quiet_period() {
        let (debouncer, mut output) = Debouncer::new(QUIET);

        debouncer.push("1986".to_string());
        sleep(Duration::from_millis(999)).await;
        assert!(output.try_recv().is_err());

        sleep(Duration::from_millis(2)).await;
        assert_eq!(output.try_recv().unwrap(), "1986");
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_input_restarts_window() {
        let (debouncer, mut output) = Debouncer::new(QUIET);

        debouncer.push("19".to_string());
        sleep(Duration::from_millis(600)).await;
        debouncer.push("198".to_string());
        sleep(Duration::from_millis(600)).await;
        debouncer.push("1986".to_string());
        sleep(Duration::from_millis(600)).await;
        assert!(output.try_recv().is_err());

        sleep(Duration::from_millis(500)).await;
        assert_eq!(output.try_recv().unwrap(), "1986");
        assert!(output.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_suppresses_repeated_values() {
        let (debouncer, mut output) = Debouncer::new(QUIET);

        debouncer.push(1990);
        sleep(Duration::from_millis(1100)).await;
        assert_eq!(output.try_recv().unwrap(), 1990);

        debouncer.push(1990);
        sleep(Duration::from_millis(1100)).await;
        assert!(output.try_recv().is_err());

        debouncer.push(1991);
        sleep(Duration::from_millis(1100)).await;
        assert_eq!(output.try_recv().unwrap(), 1991);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_flushes_pending_value() {
        let (debouncer, mut output) = Debouncer::new(QUIET);

        debouncer.push(7);
        drop(debouncer);

        assert_eq!(output.recv().await, Some(7));
        assert_eq!(output.recv().await, None);
    }
}
