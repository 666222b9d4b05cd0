//! Debounced digital inputs.
//!
//! Edge callbacks run in interrupt context: they only take a critical
//! section, decide whether the edge is accepted and push an [`InputEvent`]
//! into a bounded queue. The orchestrator drains the queue on its own
//! schedule, so no handler work ever happens inside the interrupt.

use core::cell::RefCell;

use critical_section::Mutex;
use embassy_time::{Duration, Instant};
use heapless::{Deque, Vec};

use crate::error::RegistrationError;

/// Index of a physical input (button)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputId(pub u8);

/// An accepted edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub input: InputId,
    /// Level after the edge
    pub level: bool,
    pub at: Instant,
}

/// Destination for accepted edges. Must not block.
pub trait EventSink {
    fn dispatch(&self, event: InputEvent);
}

/// Bounded event queue shared between interrupt context and the orchestrator.
///
/// Backed by a fixed-size `heapless::Deque` behind a critical section.
pub struct EventQueue<const SIZE: usize> {
    inner: Mutex<RefCell<Deque<InputEvent, SIZE>>>,
}

impl<const SIZE: usize> EventQueue<SIZE> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    pub const fn sender(&self) -> EventSender<'_, SIZE> {
        EventSender { queue: self }
    }

    pub const fn receiver(&self) -> EventReceiver<'_, SIZE> {
        EventReceiver { queue: self }
    }

    /// Push an event, handing it back when the queue is full
    pub fn try_send(&self, event: InputEvent) -> Result<(), InputEvent> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().push_back(event))
    }

    pub fn try_receive(&self) -> Option<InputEvent> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().pop_front())
    }
}

impl<const SIZE: usize> Default for EventQueue<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
pub struct EventSender<'a, const SIZE: usize> {
    queue: &'a EventQueue<SIZE>,
}

impl<const SIZE: usize> EventSink for EventSender<'_, SIZE> {
    fn dispatch(&self, event: InputEvent) {
        if self.queue.try_send(event).is_err() {
            log::warn!("input queue full, dropping event from {:?}", event.input);
        }
    }
}

#[derive(Clone, Copy)]
pub struct EventReceiver<'a, const SIZE: usize> {
    queue: &'a EventQueue<SIZE>,
}

impl<const SIZE: usize> EventReceiver<'_, SIZE> {
    pub fn try_receive(&self) -> Option<InputEvent> {
        self.queue.try_receive()
    }
}

#[derive(Debug, Clone, Copy)]
struct InputState {
    input: InputId,
    min_interval: Duration,
    last_accepted: Option<Instant>,
}

/// Rate-limits raw edges per input and forwards the accepted ones
///
/// The first edge of an input is always accepted. Later edges are accepted
/// once at least the input's minimum interval has passed since the last
/// accepted edge.
pub struct Debouncer<S: EventSink, const INPUTS: usize> {
    sink: S,
    inputs: Mutex<RefCell<Vec<InputState, INPUTS>>>,
}

impl<S: EventSink, const INPUTS: usize> Debouncer<S, INPUTS> {
    pub const fn new(sink: S) -> Self {
        Self {
            sink,
            inputs: Mutex::new(RefCell::new(Vec::new())),
        }
    }

    /// Start tracking `input`. Registering again replaces the interval and
    /// forgets the last accepted edge.
    pub fn register(
        &self,
        input: InputId,
        min_interval: Duration,
    ) -> Result<(), RegistrationError> {
        critical_section::with(|cs| {
            let mut inputs = self.inputs.borrow(cs).borrow_mut();
            let state = InputState {
                input,
                min_interval,
                last_accepted: None,
            };
            if let Some(existing) = inputs.iter_mut().find(|state| state.input == input) {
                *existing = state;
                return Ok(());
            }
            inputs.push(state).map_err(|_| RegistrationError(input))
        })
    }

    /// Raw edge from the hardware. Returns whether it was accepted.
    pub fn on_transition(&self, input: InputId, level: bool, now: Instant) -> bool {
        let accepted = critical_section::with(|cs| {
            let mut inputs = self.inputs.borrow(cs).borrow_mut();
            let Some(state) = inputs.iter_mut().find(|state| state.input == input) else {
                return false;
            };
            let settled = state.last_accepted.is_none_or(|last| {
                now.saturating_duration_since(last) >= state.min_interval
            });
            if settled {
                state.last_accepted = Some(now);
            }
            settled
        });

        if accepted {
            self.sink.dispatch(InputEvent {
                input,
                level,
                at: now,
            });
        }
        accepted
    }
}
