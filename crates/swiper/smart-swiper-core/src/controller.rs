//! Auto-play timer lifecycle.
//!
//! The controller never runs a clock itself. It tracks at most one pending
//! auto-advance ([`TimerHandle`]) and reports the resulting [`Schedule`]
//! after every mutation; the owning swiper advances it via `update(dt)` or
//! fires it when a host timer elapses. Every reschedule bumps the
//! generation, so handles from an earlier schedule are recognisably stale.

use serde::{Deserialize, Serialize};

/// Identifies one scheduled auto-advance.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TimerHandle {
    generation: u64,
    delay_ms: u32,
}

impl TimerHandle {
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// How long after scheduling the advance is due.
    #[inline]
    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }
}

/// Timer state after a controller mutation.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Schedule {
    /// Nothing pending and not paused (auto-play off).
    Stopped,
    /// One auto-advance pending.
    Scheduled(TimerHandle),
    /// Paused; nothing pending regardless of `auto`.
    Paused,
}

impl Schedule {
    pub fn handle(&self) -> Option<TimerHandle> {
        match self {
            Schedule::Scheduled(h) => Some(*h),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug)]
struct Pending {
    handle: TimerHandle,
    elapsed_ms: u32,
}

/// Auto / pause / stay state with its single pending timer.
#[derive(Clone, Debug)]
pub struct Controller {
    auto: bool,
    paused: bool,
    stay_ms: u32,
    generation: u64,
    pending: Option<Pending>,
}

impl Controller {
    /// New controllers start paused; the swiper unpauses on `init()`.
    pub fn new(auto: bool, stay_ms: u32) -> Self {
        Self {
            auto,
            paused: true,
            stay_ms,
            generation: 0,
            pending: None,
        }
    }

    #[inline]
    pub fn is_auto(&self) -> bool {
        self.auto
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn stay_ms(&self) -> u32 {
        self.stay_ms
    }

    /// Number of schedules made so far.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn pending(&self) -> Option<TimerHandle> {
        self.pending.map(|p| p.handle)
    }

    pub fn schedule(&self) -> Schedule {
        if self.paused {
            Schedule::Paused
        } else if let Some(p) = self.pending {
            Schedule::Scheduled(p.handle)
        } else {
            Schedule::Stopped
        }
    }

    /// Enabling starts auto-play unless paused; disabling cancels the
    /// pending advance. No-op when unchanged.
    pub fn set_auto(&mut self, auto: bool) -> Schedule {
        if self.auto != auto {
            self.auto = auto;
            if !self.paused {
                if auto {
                    self.play();
                } else {
                    self.cancel();
                }
            }
        }
        self.schedule()
    }

    /// Pausing cancels the pending advance but keeps `auto`; resuming
    /// reschedules when `auto` is on. No-op when unchanged.
    pub fn set_pause(&mut self, paused: bool) -> Schedule {
        if self.paused != paused {
            self.paused = paused;
            if paused {
                self.cancel();
            } else if self.auto {
                self.play();
            }
        }
        self.schedule()
    }

    /// New period; the pending advance is replaced by one with the new
    /// period when auto-play is running. No-op when unchanged.
    pub fn set_stay(&mut self, stay_ms: u32) -> Schedule {
        if self.stay_ms != stay_ms {
            self.stay_ms = stay_ms;
            self.cancel();
            if self.auto && !self.paused {
                self.play();
            }
        }
        self.schedule()
    }

    /// Replace any pending advance with a fresh one of period `stay_ms`.
    pub(crate) fn play(&mut self) -> Schedule {
        self.generation = self.generation.wrapping_add(1);
        self.pending = Some(Pending {
            handle: TimerHandle {
                generation: self.generation,
                delay_ms: self.stay_ms,
            },
            elapsed_ms: 0,
        });
        self.schedule()
    }

    pub(crate) fn cancel(&mut self) {
        self.pending = None;
    }

    /// Whether the auto-advance should be re-armed after firing.
    #[inline]
    pub(crate) fn keeps_running(&self) -> bool {
        self.auto && !self.paused
    }

    /// Consume `handle` if it is the pending advance.
    pub(crate) fn take(&mut self, handle: TimerHandle) -> bool {
        match self.pending {
            Some(p) if p.handle == handle => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Let `dt_ms` pass. When the pending advance falls due it is removed
    /// and returned with the time left over past its deadline.
    pub(crate) fn take_due(&mut self, dt_ms: u32) -> Option<(TimerHandle, u32)> {
        let pending = self.pending.as_mut()?;
        pending.elapsed_ms = pending.elapsed_ms.saturating_add(dt_ms);
        if pending.elapsed_ms < pending.handle.delay_ms {
            return None;
        }
        let carry = pending.elapsed_ms - pending.handle.delay_ms;
        let handle = pending.handle;
        self.pending = None;
        Some((handle, carry))
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(false, crate::config::DEFAULT_STAY_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running(auto: bool, stay: u32) -> Controller {
        let mut c = Controller::new(auto, stay);
        c.set_pause(false);
        c
    }

    #[test]
    fn starts_paused_without_pending_timer() {
        let c = Controller::new(true, 1000);
        assert_eq!(c.schedule(), Schedule::Paused);
        assert!(c.pending().is_none());
    }

    #[test]
    fn unpausing_with_auto_schedules_once() {
        let c = running(true, 1000);
        let h = c.pending().unwrap();
        assert_eq!(h.delay_ms(), 1000);
        assert_eq!(c.generation(), 1);
        assert_eq!(c.schedule(), Schedule::Scheduled(h));
    }

    #[test]
    fn setters_are_idempotent() {
        let mut c = running(true, 1000);
        let before = c.generation();
        c.set_auto(true);
        c.set_pause(false);
        c.set_stay(1000);
        assert_eq!(c.generation(), before);
    }

    #[test]
    fn disabling_auto_cancels() {
        let mut c = running(true, 1000);
        assert_eq!(c.set_auto(false), Schedule::Stopped);
        assert!(c.pending().is_none());
    }

    #[test]
    fn pause_keeps_auto_and_resume_reschedules() {
        let mut c = running(true, 1000);
        assert_eq!(c.set_pause(true), Schedule::Paused);
        assert!(c.is_auto());
        assert!(c.pending().is_none());
        let resumed = c.set_pause(false);
        assert!(matches!(resumed, Schedule::Scheduled(_)));
    }

    #[test]
    fn enabling_auto_while_paused_does_not_schedule() {
        let mut c = Controller::new(false, 1000);
        assert_eq!(c.set_auto(true), Schedule::Paused);
        assert_eq!(c.generation(), 0);
    }

    #[test]
    fn stay_change_replaces_pending_timer() {
        let mut c = running(true, 1000);
        let old = c.pending().unwrap();
        let new = c.set_stay(250).handle().unwrap();
        assert_ne!(old, new);
        assert_eq!(new.delay_ms(), 250);
        assert_eq!(c.generation(), old.generation() + 1);
        assert!(!c.take(old));
        assert!(c.take(new));
    }

    #[test]
    fn stay_change_without_auto_only_records_period() {
        let mut c = running(false, 1000);
        assert_eq!(c.set_stay(300), Schedule::Stopped);
        assert_eq!(c.stay_ms(), 300);
        assert_eq!(c.generation(), 0);
    }

    #[test]
    fn take_due_reports_overshoot() {
        let mut c = running(true, 100);
        assert!(c.take_due(60).is_none());
        let (h, carry) = c.take_due(70).unwrap();
        assert_eq!(h.delay_ms(), 100);
        assert_eq!(carry, 30);
        assert!(c.pending().is_none());
    }
}
