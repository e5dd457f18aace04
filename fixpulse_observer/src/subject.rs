// Implements the subject side of the observer pattern with a fixed
// number of observer slots, so subjects can live in static memory and
// dispatch events without dynamic allocation.

// Licensed under the Apache License, Version 2.0
// Copyright 2024 Anton Khrustalev, creapunk.com

/// Observer callback invoked on every notification.
pub type Callback = fn();

/// Error returned when attaching to a fully occupied subject.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CapacityError;

/// Notification hub with `N` observer slots.
///
/// Observers are plain function pointers; the same function may be
/// attached more than once and is then called once per slot.
#[derive(Debug)]
pub struct Subject<const N: usize> {
    observers: [Option<Callback>; N],
    count: usize,
}

impl<const N: usize> Subject<N> {
    /// Creates a subject with no observers attached.
    pub const fn new() -> Self {
        Self {
            observers: [None; N],
            count: 0,
        }
    }

    /// Number of currently attached observers.
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Attaches an observer to the next free slot.
    ///
    /// Fails when all slots are taken; the subject is unchanged in that
    /// case.
    pub fn attach(&mut self, callback: Callback) -> Result<(), CapacityError> {
        if self.count == N {
            return Err(CapacityError);
        }
        self.observers[self.count] = Some(callback);
        self.count += 1;
        Ok(())
    }

    /// Detaches the first slot holding `callback`.
    ///
    /// Returns `false` when the callback is not attached. Later slots
    /// move up, so the remaining observers keep their attach order.
    pub fn detach(&mut self, callback: Callback) -> bool {
        let mut idx = 0;
        while idx < self.count {
            if self.observers[idx] == Some(callback) {
                for tail in idx..self.count - 1 {
                    self.observers[tail] = self.observers[tail + 1];
                }
                self.count -= 1;
                self.observers[self.count] = None;
                return true;
            }
            idx += 1;
        }
        false
    }

    /// Calls every attached observer once, in attach order.
    pub fn notify(&self) {
        for slot in self.observers.iter().take(self.count) {
            if let Some(callback) = slot {
                callback();
            }
        }
    }
}

impl<const N: usize> Default for Subject<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn attach_alone_does_not_call_the_observer() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        fn observer() {
            CALLS.fetch_add(1, Ordering::Relaxed);
        }

        let mut subject: Subject<4> = Subject::new();
        subject.attach(observer).unwrap();
        assert_eq!(subject.count(), 1);
        assert_eq!(CALLS.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn notify_calls_every_observer_once_per_round() {
        static CALLS_A: AtomicUsize = AtomicUsize::new(0);
        static CALLS_B: AtomicUsize = AtomicUsize::new(0);
        fn observer_a() {
            CALLS_A.fetch_add(1, Ordering::Relaxed);
        }
        fn observer_b() {
            CALLS_B.fetch_add(1, Ordering::Relaxed);
        }

        let mut subject: Subject<4> = Subject::new();
        subject.attach(observer_a).unwrap();
        subject.attach(observer_b).unwrap();

        subject.notify();
        assert_eq!(CALLS_A.load(Ordering::Relaxed), 1);
        assert_eq!(CALLS_B.load(Ordering::Relaxed), 1);

        subject.notify();
        assert_eq!(CALLS_A.load(Ordering::Relaxed), 2);
        assert_eq!(CALLS_B.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn observers_run_in_attach_order() {
        static ORDER: AtomicUsize = AtomicUsize::new(0);
        fn first() {
            let seen = ORDER.load(Ordering::Relaxed);
            ORDER.store(seen * 10 + 1, Ordering::Relaxed);
        }
        fn second() {
            let seen = ORDER.load(Ordering::Relaxed);
            ORDER.store(seen * 10 + 2, Ordering::Relaxed);
        }
        fn third() {
            let seen = ORDER.load(Ordering::Relaxed);
            ORDER.store(seen * 10 + 3, Ordering::Relaxed);
        }

        let mut subject: Subject<4> = Subject::new();
        subject.attach(first).unwrap();
        subject.attach(second).unwrap();
        subject.attach(third).unwrap();
        subject.notify();
        assert_eq!(ORDER.load(Ordering::Relaxed), 123);
    }

    #[test]
    fn attach_fails_when_all_slots_are_taken() {
        fn observer() {}

        let mut subject: Subject<2> = Subject::new();
        assert!(subject.attach(observer).is_ok());
        assert!(subject.attach(observer).is_ok());
        assert_eq!(subject.attach(observer), Err(CapacityError));
        assert_eq!(subject.count(), 2);
    }

    #[test]
    fn detach_removes_only_the_matching_observer() {
        static CALLS_A: AtomicUsize = AtomicUsize::new(0);
        static CALLS_B: AtomicUsize = AtomicUsize::new(0);
        static CALLS_C: AtomicUsize = AtomicUsize::new(0);
        fn observer_a() {
            CALLS_A.fetch_add(1, Ordering::Relaxed);
        }
        fn observer_b() {
            CALLS_B.fetch_add(1, Ordering::Relaxed);
        }
        fn observer_c() {
            CALLS_C.fetch_add(1, Ordering::Relaxed);
        }

        let mut subject: Subject<4> = Subject::new();
        subject.attach(observer_a).unwrap();
        subject.attach(observer_b).unwrap();
        subject.attach(observer_c).unwrap();
        subject.notify();

        assert!(subject.detach(observer_b));
        subject.notify();
        assert_eq!(CALLS_A.load(Ordering::Relaxed), 2);
        assert_eq!(CALLS_B.load(Ordering::Relaxed), 1);
        assert_eq!(CALLS_C.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn detaching_an_unknown_observer_changes_nothing() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        fn attached() {
            CALLS.fetch_add(1, Ordering::Relaxed);
        }
        fn stranger() {}

        let mut subject: Subject<4> = Subject::new();
        subject.attach(attached).unwrap();
        assert!(!subject.detach(stranger));

        assert!(subject.detach(attached));
        assert!(!subject.detach(attached));

        subject.notify();
        assert_eq!(CALLS.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn detached_slots_can_be_reused() {
        fn observer_a() {}
        fn observer_b() {}

        let mut subject: Subject<1> = Subject::new();
        subject.attach(observer_a).unwrap();
        assert_eq!(subject.attach(observer_b), Err(CapacityError));

        assert!(subject.detach(observer_a));
        assert!(subject.attach(observer_b).is_ok());
        assert_eq!(subject.count(), 1);
    }
}
