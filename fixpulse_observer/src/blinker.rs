// Implements a tick driven blinker that toggles its output state at a
// fixed period and notifies attached observers on every edge. Serves as
// the reference user of the subject module.

// Licensed under the Apache License, Version 2.0
// Copyright 2024 Anton Khrustalev, creapunk.com

use crate::subject::Subject;

/// Output state of the blinker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlinkState {
    /// Output inactive
    #[default]
    Off,
    /// Output active
    On,
}

/// Periodic toggle driven by an external tick source.
///
/// Every `period` calls to [`tick`](Self::tick) the output state flips
/// and all observers attached to [`subject`](Self::subject) are
/// notified once.
#[derive(Debug)]
pub struct Blinker<const N: usize> {
    /// Observers notified on every state change
    pub subject: Subject<N>,
    period: u32,
    counter: u32,
    state: BlinkState,
}

impl<const N: usize> Blinker<N> {
    /// Creates a blinker that starts out [`BlinkState::Off`] and toggles
    /// every `period` ticks.
    pub const fn new(period: u32) -> Self {
        Self {
            subject: Subject::new(),
            period,
            counter: 0,
            state: BlinkState::Off,
        }
    }

    /// Current output state.
    pub const fn state(&self) -> BlinkState {
        self.state
    }

    /// Advances the tick counter by one.
    ///
    /// Once the period elapses the counter restarts, the output state
    /// toggles and the observers are notified.
    pub fn tick(&mut self) {
        self.counter += 1;

        if self.counter >= self.period {
            self.counter = 0;

            self.state = match self.state {
                BlinkState::Off => BlinkState::On,
                BlinkState::On => BlinkState::Off,
            };
            self.subject.notify();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn toggles_and_notifies_once_the_period_elapses() {
        static EDGES: AtomicUsize = AtomicUsize::new(0);
        fn on_edge() {
            EDGES.fetch_add(1, Ordering::Relaxed);
        }

        let mut blinker: Blinker<1> = Blinker::new(3);
        blinker.subject.attach(on_edge).unwrap();
        assert_eq!(blinker.state(), BlinkState::Off);

        blinker.tick();
        blinker.tick();
        assert_eq!(blinker.state(), BlinkState::Off);
        assert_eq!(EDGES.load(Ordering::Relaxed), 0);

        blinker.tick();
        assert_eq!(blinker.state(), BlinkState::On);
        assert_eq!(EDGES.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn keeps_alternating_between_the_states() {
        let mut blinker: Blinker<1> = Blinker::new(2);

        let mut states = [BlinkState::Off; 4];
        for slot in states.iter_mut() {
            blinker.tick();
            blinker.tick();
            *slot = blinker.state();
        }
        assert_eq!(
            states,
            [
                BlinkState::On,
                BlinkState::Off,
                BlinkState::On,
                BlinkState::Off,
            ]
        );
    }

    #[test]
    fn period_of_one_toggles_on_every_tick() {
        static EDGES: AtomicUsize = AtomicUsize::new(0);
        fn on_edge() {
            EDGES.fetch_add(1, Ordering::Relaxed);
        }

        let mut blinker: Blinker<1> = Blinker::new(1);
        blinker.subject.attach(on_edge).unwrap();

        blinker.tick();
        assert_eq!(blinker.state(), BlinkState::On);
        blinker.tick();
        assert_eq!(blinker.state(), BlinkState::Off);
        assert_eq!(EDGES.load(Ordering::Relaxed), 2);
    }
}
