//! Free-list and creation bookkeeping shared by the blocking and the async
//! pool. The type itself is not synchronized: each pool wraps it in its own
//! mutex and pairs it with a [`Signal`] to wake waiters.

use std::collections::VecDeque;

use parking_lot::Mutex;

use crate::Status;

/// Outcome of [`Slots::checkout()`].
#[derive(Debug)]
pub(crate) enum Checkout<T> {
    /// An idle object was taken from the free-list.
    Idle(T),
    /// A creation slot was reserved; the caller must run the maker and
    /// then either [`Slots::commit()`] or [`Slots::abort()`].
    Create,
    /// The free-list is empty and every creation slot is taken.
    Exhausted,
}

#[derive(Debug)]
pub(crate) struct Slots<T> {
    /// Idle objects. Released objects are pushed to the back and handed out
    /// from the front, so the object idle longest is reused first.
    free: VecDeque<T>,
    /// Objects successfully created so far. Never decreases.
    created: usize,
    /// Constructions currently running outside the lock.
    creating: usize,
    max_size: Option<usize>,
}

impl<T> Slots<T> {
    pub(crate) fn new(max_size: Option<usize>) -> Self {
        Self {
            free: VecDeque::new(),
            created: 0,
            creating: 0,
            max_size,
        }
    }

    pub(crate) fn checkout(&mut self) -> Checkout<T> {
        if let Some(obj) = self.free.pop_front() {
            return Checkout::Idle(obj);
        }
        match self.max_size {
            Some(max_size) if self.created + self.creating >= max_size => Checkout::Exhausted,
            _ => {
                self.creating += 1;
                Checkout::Create
            }
        }
    }

    pub(crate) fn commit(&mut self) {
        debug_assert!(self.creating > 0);
        self.creating -= 1;
        self.created += 1;
    }

    pub(crate) fn abort(&mut self) {
        debug_assert!(self.creating > 0);
        self.creating -= 1;
    }

    /// Returns `obj` to the free-list, or hands it back untouched if the
    /// free-list already holds `max_size` objects.
    pub(crate) fn checkin(&mut self, obj: T) -> Result<(), T> {
        if matches!(self.max_size, Some(max_size) if self.free.len() >= max_size) {
            return Err(obj);
        }
        self.free.push_back(obj);
        Ok(())
    }

    pub(crate) fn len(&self) -> usize {
        self.free.len()
    }

    pub(crate) fn max_size(&self) -> Option<usize> {
        self.max_size
    }

    pub(crate) fn status(&self) -> Status {
        Status {
            max_size: self.max_size,
            size: self.free.len(),
            created: self.created,
        }
    }
}

/// Wakes one task or thread waiting for an object.
pub(crate) trait Signal {
    fn notify_one(&self);
}

#[cfg(feature = "sync")]
impl Signal for parking_lot::Condvar {
    fn notify_one(&self) {
        let _ = parking_lot::Condvar::notify_one(self);
    }
}

#[cfg(feature = "aio")]
impl Signal for tokio::sync::Notify {
    fn notify_one(&self) {
        tokio::sync::Notify::notify_one(self);
    }
}

/// A creation slot reserved by [`Checkout::Create`].
///
/// Dropping it without calling [`Reservation::commit()`] gives the slot back
/// and wakes one waiter, which covers maker errors, panics and cancelled
/// futures alike.
pub(crate) struct Reservation<'a, T, S: Signal> {
    slots: &'a Mutex<Slots<T>>,
    signal: &'a S,
    armed: bool,
}

impl<'a, T, S: Signal> Reservation<'a, T, S> {
    pub(crate) fn new(slots: &'a Mutex<Slots<T>>, signal: &'a S) -> Self {
        Self {
            slots,
            signal,
            armed: true,
        }
    }

    pub(crate) fn commit(mut self) {
        self.armed = false;
        self.slots.lock().commit();
    }
}

impl<T, S: Signal> Drop for Reservation<'_, T, S> {
    fn drop(&mut self) {
        if self.armed {
            self.slots.lock().abort();
            self.signal.notify_one();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_idle<T: std::fmt::Debug>(checkout: Checkout<T>) -> T {
        match checkout {
            Checkout::Idle(obj) => obj,
            other => panic!("expected Idle, got {:?}", other),
        }
    }

    #[test]
    fn unbounded_always_creates() {
        let mut slots = Slots::<u32>::new(None);
        for _ in 0..100 {
            assert!(matches!(slots.checkout(), Checkout::Create));
            slots.commit();
        }
        assert_eq!(slots.status().created, 100);
        for i in 0..100 {
            assert!(slots.checkin(i).is_ok());
        }
        assert_eq!(slots.len(), 100);
    }

    #[test]
    fn free_list_is_fifo() {
        let mut slots = Slots::new(None);
        slots.checkin('a').unwrap();
        slots.checkin('b').unwrap();
        assert_eq!(assert_idle(slots.checkout()), 'a');
        assert_eq!(assert_idle(slots.checkout()), 'b');
    }

    #[test]
    fn bounded_gate_counts_in_flight_creations() {
        let mut slots = Slots::<u32>::new(Some(2));
        assert!(matches!(slots.checkout(), Checkout::Create));
        assert!(matches!(slots.checkout(), Checkout::Create));
        assert!(matches!(slots.checkout(), Checkout::Exhausted));

        slots.abort();
        assert!(matches!(slots.checkout(), Checkout::Create));
        slots.commit();
        slots.commit();
        assert_eq!(slots.status().created, 2);
        assert!(matches!(slots.checkout(), Checkout::Exhausted));
    }

    #[test]
    fn checkin_rejects_when_full() {
        let mut slots = Slots::new(Some(1));
        slots.checkin(1).unwrap();
        assert_eq!(slots.checkin(2), Err(2));
        assert_eq!(slots.len(), 1);
        assert_eq!(assert_idle(slots.checkout()), 1);
    }

    struct Counter(std::sync::atomic::AtomicUsize);

    impl Signal for Counter {
        fn notify_one(&self) {
            let _ = self.0.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        }
    }

    #[test]
    fn dropped_reservation_is_rolled_back() {
        let slots = Mutex::new(Slots::<u32>::new(Some(1)));
        let signal = Counter(Default::default());

        assert!(matches!(slots.lock().checkout(), Checkout::Create));
        drop(Reservation::new(&slots, &signal));
        assert_eq!(signal.0.load(std::sync::atomic::Ordering::SeqCst), 1);
        assert_eq!(slots.lock().status().created, 0);

        assert!(matches!(slots.lock().checkout(), Checkout::Create));
        Reservation::new(&slots, &signal).commit();
        assert_eq!(signal.0.load(std::sync::atomic::Ordering::SeqCst), 1);
        assert_eq!(slots.lock().status().created, 1);
        assert!(matches!(slots.lock().checkout(), Checkout::Exhausted));
    }
}
