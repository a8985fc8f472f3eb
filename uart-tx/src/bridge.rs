//! Task/interrupt rendezvous.
//!
//! The sending task starts a buffer through [`Transmitter::start`] and gets a
//! [`Transfer`] back. If the buffer had more than one byte the transfer points
//! at a [`Completion`] that the transmit interrupt resolves when the last byte
//! is written; the task waits on it without holding the transmitter.
//!
//! There is exactly one completion slot, matching the single buffer in flight.

use core::cell::Cell;
use core::future::poll_fn;
use core::task::Poll;

use critical_section::Mutex;
use rtic_common::waker_registration::CriticalSectionWakerRegistration;

use crate::engine::{Progress, TransmitEngine};
use crate::error::TxError;
use crate::hal::SerialTxHw;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    /// Nothing armed, or the outcome was already collected.
    Idle,
    /// Armed, the interrupt has not finished yet.
    Waiting,
    /// Set by the interrupt (or an abort), not yet collected.
    Done(Result<(), TxError>),
}

/// Single-slot completion event shared between one waiting task and the
/// transmit interrupt.
///
/// Can live in a `static`. `arm` clears the event, `resolve` sets it and wakes
/// whichever task registered last, `wait` parks until it is set and collects
/// the outcome.
pub struct Completion {
    slot: Mutex<Cell<Slot>>,
    waker: CriticalSectionWakerRegistration,
}

impl Completion {
    /// A completion with nothing armed.
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(Cell::new(Slot::Idle)),
            waker: CriticalSectionWakerRegistration::new(),
        }
    }

    /// Clears the event. Any outcome that was never collected is dropped.
    pub fn arm(&self) {
        critical_section::with(|cs| self.slot.borrow(cs).set(Slot::Waiting));
    }

    /// Sets the event and wakes the waiting task, if one is parked.
    ///
    /// Never blocks; meant to be called from the transmit interrupt.
    pub fn resolve(&self, outcome: Result<(), TxError>) {
        critical_section::with(|cs| self.slot.borrow(cs).set(Slot::Done(outcome)));
        self.waker.wake();
    }

    /// The outcome, if the event is set. Does not collect it.
    pub fn try_outcome(&self) -> Option<Result<(), TxError>> {
        match critical_section::with(|cs| self.slot.borrow(cs).get()) {
            Slot::Done(outcome) => Some(outcome),
            Slot::Idle | Slot::Waiting => None,
        }
    }

    /// Whether the event is armed and not yet set.
    pub fn is_waiting(&self) -> bool {
        critical_section::with(|cs| self.slot.borrow(cs).get()) == Slot::Waiting
    }

    fn take(&self) -> Option<Result<(), TxError>> {
        critical_section::with(|cs| {
            let slot = self.slot.borrow(cs);
            match slot.get() {
                Slot::Done(outcome) => {
                    slot.set(Slot::Idle);
                    Some(outcome)
                }
                Slot::Idle | Slot::Waiting => None,
            }
        })
    }

    /// Waits until the event is set and collects the outcome.
    ///
    /// Returns immediately if it is already set.
    pub async fn wait(&self) -> Result<(), TxError> {
        poll_fn(|cx| {
            // register before looking, so a resolve landing in between still
            // finds a waker to wake
            self.waker.register(cx.waker());
            match self.take() {
                Some(outcome) => Poll::Ready(outcome),
                None => Poll::Pending,
            }
        })
        .await
    }

    /// Spins until the event is set and collects the outcome.
    ///
    /// For callers without an executor. Must not be used from a context the
    /// transmit interrupt cannot preempt.
    pub fn wait_blocking(&self) -> Result<(), TxError> {
        loop {
            if let Some(outcome) = self.take() {
                return outcome;
            }
            core::hint::spin_loop();
        }
    }
}

impl Default for Completion {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to a started buffer.
///
/// Buffers of zero or one byte are finished by the time [`Transmitter::start`]
/// returns; their handle resolves immediately.
#[must_use = "wait for the transfer before starting the next one"]
pub struct Transfer<'c> {
    completion: Option<&'c Completion>,
}

impl<'c> Transfer<'c> {
    fn finished() -> Self {
        Self { completion: None }
    }

    fn deferred(completion: &'c Completion) -> Self {
        Self {
            completion: Some(completion),
        }
    }

    /// Whether the rest of the buffer was handed to the interrupt, i.e.
    /// whether waiting can actually park.
    pub fn is_pending(&self) -> bool {
        self.completion.is_some()
    }

    /// The outcome if the transfer already finished.
    pub fn try_outcome(&self) -> Option<Result<(), TxError>> {
        match self.completion {
            Some(completion) => completion.try_outcome(),
            None => Some(Ok(())),
        }
    }

    /// Waits for the interrupt to write the last byte.
    pub async fn wait(self) -> Result<(), TxError> {
        match self.completion {
            Some(completion) => completion.wait().await,
            None => Ok(()),
        }
    }

    /// Spinning version of [`Transfer::wait`].
    pub fn wait_blocking(self) -> Result<(), TxError> {
        match self.completion {
            Some(completion) => completion.wait_blocking(),
            None => Ok(()),
        }
    }
}

/// Transmit engine and completion event behind one interface.
///
/// `'a` is the lifetime of the buffers handed to [`Transmitter::start`],
/// `'c` the lifetime of the [`Completion`] (usually both `'static` on target).
pub struct Transmitter<'a, 'c, H> {
    engine: TransmitEngine<'a, H>,
    completion: &'c Completion,
}

impl<'a, 'c, H> Transmitter<'a, 'c, H>
where
    H: SerialTxHw,
{
    /// Wraps the hardware and the completion the interrupt will resolve.
    pub fn new(hw: H, completion: &'c Completion) -> Self {
        Self {
            engine: TransmitEngine::new(hw),
            completion,
        }
    }

    /// Starts sending `data` and returns the handle to wait on.
    ///
    /// Must be called with the transmit interrupt masked (i.e. under the
    /// resource lock it shares with [`Transmitter::on_interrupt`]): the
    /// completion is armed after the engine armed the interrupt, and the
    /// interrupt must not get to resolve it before that.
    pub fn start(&mut self, data: &'a [u8]) -> Result<Transfer<'c>, TxError> {
        if self.engine.begin_transmission(data)? {
            self.completion.arm();
            Ok(Transfer::deferred(self.completion))
        } else {
            Ok(Transfer::finished())
        }
    }

    /// Transmit interrupt handler body.
    ///
    /// Returns `true` when this call wrote the last byte and woke the waiter.
    pub fn on_interrupt(&mut self) -> bool {
        let completed = self.engine.on_transmit_ready();
        if completed {
            self.completion.resolve(Ok(()));
        }
        completed
    }

    /// Abandons the buffer in flight and wakes the waiting task with
    /// [`TxError::Aborted`].
    pub fn abort(&mut self) -> Result<Progress, TxError> {
        let progress = self.engine.abort()?;
        self.completion.resolve(Err(TxError::Aborted {
            sent: progress.sent,
            total: progress.total,
        }));
        Ok(progress)
    }

    /// Whether a buffer is in flight.
    pub fn is_busy(&self) -> bool {
        self.engine.is_busy()
    }

    /// Progress of the current or last buffer.
    pub fn progress(&self) -> Progress {
        self.engine.progress()
    }

    /// The wrapped hardware.
    pub fn hardware(&self) -> &H {
        self.engine.hardware()
    }

    /// The wrapped hardware, mutably.
    pub fn hardware_mut(&mut self) -> &mut H {
        self.engine.hardware_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeUart;

    #[test]
    fn short_buffers_finish_immediately() {
        let completion = Completion::new();
        let mut serial = Transmitter::new(FakeUart::ready(), &completion);

        for data in [&b""[..], &b"x"[..]] {
            let transfer = serial.start(data).unwrap();
            assert!(!transfer.is_pending());
            assert_eq!(transfer.try_outcome(), Some(Ok(())));
            assert_eq!(transfer.wait_blocking(), Ok(()));
        }
        assert!(!completion.is_waiting());
        assert_eq!(serial.hardware().written, b"x");
    }

    #[test]
    fn last_byte_resolves_the_completion() {
        let completion = Completion::new();
        let mut serial = Transmitter::new(FakeUart::ready(), &completion);

        let transfer = serial.start(b"Hi").unwrap();
        assert!(transfer.is_pending());
        assert!(completion.is_waiting());
        assert_eq!(transfer.try_outcome(), None);

        assert!(serial.on_interrupt());
        assert_eq!(transfer.try_outcome(), Some(Ok(())));
        assert_eq!(transfer.wait_blocking(), Ok(()));
        assert_eq!(completion.try_outcome(), None);
        assert_eq!(serial.hardware().written, b"Hi");
    }

    #[test]
    fn spurious_interrupts_leave_the_waiter_parked() {
        let completion = Completion::new();
        let mut serial = Transmitter::new(FakeUart::ready(), &completion);
        let transfer = serial.start(b"abc").unwrap();

        serial.hardware_mut().ready = false;
        assert!(!serial.on_interrupt());
        assert!(!serial.on_interrupt());
        assert!(completion.is_waiting());

        serial.hardware_mut().ready = true;
        assert!(!serial.on_interrupt());
        assert_eq!(transfer.try_outcome(), None);
        assert!(serial.on_interrupt());
        assert_eq!(transfer.wait_blocking(), Ok(()));
    }

    #[test]
    fn busy_start_keeps_the_armed_completion() {
        let completion = Completion::new();
        let mut serial = Transmitter::new(FakeUart::ready(), &completion);
        let first = serial.start(b"Hola").unwrap();

        assert_eq!(
            serial.start(b"Mundo").err(),
            Some(TxError::Busy { sent: 1, total: 4 })
        );
        assert!(completion.is_waiting());

        while !serial.on_interrupt() {}
        assert_eq!(first.wait_blocking(), Ok(()));
        assert_eq!(serial.hardware().written, b"Hola");
    }

    #[test]
    fn abort_resolves_with_progress() {
        let completion = Completion::new();
        let mut serial = Transmitter::new(FakeUart::ready(), &completion);
        let transfer = serial.start(b"Mundo").unwrap();
        serial.on_interrupt();

        assert_eq!(serial.abort(), Ok(Progress { sent: 2, total: 5 }));
        assert_eq!(
            transfer.wait_blocking(),
            Err(TxError::Aborted { sent: 2, total: 5 })
        );
        assert_eq!(serial.abort(), Err(TxError::Idle));
        assert!(!serial.hardware().armed);
    }

    #[test]
    fn rearming_drops_an_uncollected_outcome() {
        let completion = Completion::new();
        completion.resolve(Ok(()));
        assert_eq!(completion.try_outcome(), Some(Ok(())));

        completion.arm();
        assert_eq!(completion.try_outcome(), None);
        assert!(completion.is_waiting());
    }
}
