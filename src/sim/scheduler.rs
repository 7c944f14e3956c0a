//! Cooperative timer scheduler
//!
//! Timers are keyed by event: arming an event that already has a timer
//! replaces it, so re-arming never stacks firings. The clock only moves when
//! the session advances it, and each timer fires at most once per advance.
//! Fired events and directly posted events share one FIFO queue that the
//! session drains once per tick.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Timed gameplay triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerEvent {
    /// Hero emits a volley
    HeroFire,
    /// Hero loses post-respawn invincibility
    HeroInvincibilityOff,
    /// A parked supply is thrown into play
    ThrowSupply,
    /// Hero bullets revert to the normal tier
    BulletEnhanceOff,
    /// Hero finished its destroy sequence
    HeroDead,
}

#[derive(Debug, Clone)]
struct Timer {
    event: TimerEvent,
    deadline_us: u64,
    /// `None` for one-shot timers
    period_us: Option<u64>,
    /// Arm order, breaks deadline ties
    seq: u64,
}

/// Timer wheel plus the ready queue
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now_us: u64,
    timers: Vec<Timer>,
    ready: VecDeque<TimerEvent>,
    next_seq: u64,
}

fn ms_to_us(ms: u64) -> u64 {
    ms.saturating_mul(1000)
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scheduler clock in microseconds
    pub fn now_us(&self) -> u64 {
        self.now_us
    }

    /// Fire `event` once, `delay_ms` from now
    pub fn arm_once(&mut self, event: TimerEvent, delay_ms: u64) {
        self.arm(event, ms_to_us(delay_ms), None);
    }

    /// Fire `event` every `period_ms` until cancelled
    pub fn arm_periodic(&mut self, event: TimerEvent, period_ms: u64) {
        let period = ms_to_us(period_ms).max(1);
        self.arm(event, period, Some(period));
    }

    fn arm(&mut self, event: TimerEvent, delay_us: u64, period_us: Option<u64>) {
        self.timers.retain(|t| t.event != event);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.push(Timer {
            event,
            deadline_us: self.now_us.saturating_add(delay_us),
            period_us,
            seq,
        });
    }

    /// Disarm the timer for `event`; returns whether one was pending
    pub fn cancel(&mut self, event: TimerEvent) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.event != event);
        self.timers.len() != before
    }

    pub fn is_armed(&self, event: TimerEvent) -> bool {
        self.timers.iter().any(|t| t.event == event)
    }

    /// Microseconds until `event` fires, if armed
    pub fn remaining_us(&self, event: TimerEvent) -> Option<u64> {
        self.timers
            .iter()
            .find(|t| t.event == event)
            .map(|t| t.deadline_us.saturating_sub(self.now_us))
    }

    /// Queue an event for the next drain
    pub fn post(&mut self, event: TimerEvent) {
        self.ready.push_back(event);
    }

    /// Move the clock forward and queue every timer that came due.
    ///
    /// One-shot timers are removed when they fire. A periodic timer that
    /// missed several periods fires once and is rescheduled a full period
    /// after the current time.
    pub fn advance(&mut self, dt_us: u64) {
        self.now_us = self.now_us.saturating_add(dt_us);
        let now = self.now_us;

        let mut due: Vec<(u64, u64, TimerEvent)> = self
            .timers
            .iter()
            .filter(|t| t.deadline_us <= now)
            .map(|t| (t.deadline_us, t.seq, t.event))
            .collect();
        if due.is_empty() {
            return;
        }
        due.sort_unstable_by_key(|&(deadline, seq, _)| (deadline, seq));

        self.timers.retain_mut(|t| {
            if t.deadline_us > now {
                return true;
            }
            match t.period_us {
                Some(period) => {
                    t.deadline_us += period;
                    if t.deadline_us <= now {
                        t.deadline_us = now + period;
                    }
                    true
                }
                None => false,
            }
        });

        for (_, _, event) in due {
            log::trace!("Timer fired: {event:?}");
            self.ready.push_back(event);
        }
    }

    /// Take every queued event in firing order
    pub fn drain(&mut self) -> Vec<TimerEvent> {
        self.ready.drain(..).collect()
    }

}
