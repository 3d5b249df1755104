//! Millisecond timer manager, driven by `TimerTick` messages from the MAC
//! layer. Timers fire exactly once; periodic behavior is built by restarting
//! from the callback.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use lte_msgq::{DestLayer, LayerMsg, LayerMsgInner, Msgq};

/// Reserved id, never handed out by `start_timer`
pub const INVALID_TIMER_ID: u32 = u32::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerError {
    NotFound,
    BadAlloc,
}

/// Invoked with the timer id once the timer expires
pub type TimerCallback = Box<dyn FnOnce(u32) + Send>;

struct Timer {
    expiry_ms: u32,
    elapsed_ms: u32,
    callback: TimerCallback,
}

impl Timer {
    fn increment(&mut self) {
        self.elapsed_ms += 1;
    }

    fn expired(&self) -> bool {
        self.elapsed_ms >= self.expiry_ms
    }

    fn reset(&mut self) {
        self.elapsed_ms = 0;
    }
}

#[derive(Default)]
struct TimerTable {
    map: HashMap<u32, Timer>,
    next_id: u32,
}

/// Cheaply cloneable handle to the shared timer table, so expiry callbacks
/// can re-enter the public API.
#[derive(Clone, Default)]
pub struct TimerMgr {
    table: Arc<Mutex<TimerTable>>,
}

impl TimerMgr {
    pub fn new() -> Self {
        TimerMgr::default()
    }

    /// Attach the tick handler to the inbound queue from the MAC layer
    pub fn start(&self, from_mac: &mut Msgq) {
        let mgr = self.clone();
        from_mac.attach_rx(move |msg| mgr.handle_msg(msg));
    }

    fn handle_msg(&self, msg: LayerMsg) {
        if !msg.is_for(DestLayer::TimerMgr) {
            tracing::warn!("timer_mgr: received message for invalid layer ({:?})", msg.dest_layer);
            return;
        }
        match msg.msg {
            LayerMsgInner::TimerTick => self.handle_tick(),
            other => tracing::warn!("timer_mgr: received invalid message {}", other),
        }
    }

    /// Allocate the next free id (linear probe from the cursor, skipping the
    /// reserved id) and arm a timer for `expiry_ms` milliseconds.
    pub fn start_timer(&self, expiry_ms: u32, callback: TimerCallback) -> Result<u32, TimerError> {
        let mut table = self.table.lock().expect("timer table poisoned");
        if table.map.len() >= INVALID_TIMER_ID as usize {
            return Err(TimerError::BadAlloc);
        }
        while table.next_id == INVALID_TIMER_ID || table.map.contains_key(&table.next_id) {
            table.next_id = table.next_id.wrapping_add(1);
        }
        let timer_id = table.next_id;
        table.map.insert(timer_id, Timer { expiry_ms, elapsed_ms: 0, callback });
        table.next_id = table.next_id.wrapping_add(1);
        Ok(timer_id)
    }

    pub fn stop_timer(&self, timer_id: u32) -> Result<(), TimerError> {
        let mut table = self.table.lock().expect("timer table poisoned");
        match table.map.remove(&timer_id) {
            Some(_) => Ok(()),
            None => Err(TimerError::NotFound),
        }
    }

    pub fn reset_timer(&self, timer_id: u32) -> Result<(), TimerError> {
        let mut table = self.table.lock().expect("timer table poisoned");
        match table.map.get_mut(&timer_id) {
            Some(timer) => {
                timer.reset();
                Ok(())
            }
            None => Err(TimerError::NotFound),
        }
    }

    /// Advance every live timer by one millisecond and fire the expired ones.
    ///
    /// Expired entries are drained from the table under the lock and their
    /// callbacks run after it is released, so a callback may start, stop or
    /// reset timers freely. A `reset_timer` or `stop_timer` aimed at the
    /// timer currently expiring returns `NotFound`: its entry is already
    /// gone by the time the callback runs.
    pub fn handle_tick(&self) {
        let expired: Vec<(u32, TimerCallback)> = {
            let mut table = self.table.lock().expect("timer table poisoned");
            let mut expired_ids = Vec::new();
            for (id, timer) in table.map.iter_mut() {
                timer.increment();
                if timer.expired() {
                    expired_ids.push(*id);
                }
            }
            expired_ids
                .into_iter()
                .filter_map(|id| table.map.remove(&id).map(|t| (id, t.callback)))
                .collect()
        };

        for (id, callback) in expired {
            tracing::debug!("timer_mgr: timer {} expired", id);
            callback(id);
        }
    }

    pub fn num_timers(&self) -> usize {
        self.table.lock().expect("timer table poisoned").map.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn counting_cb(counter: &Arc<AtomicU32>) -> TimerCallback {
        let counter = counter.clone();
        Box::new(move |_id| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_expiry_fires_exactly_once() {
        let mgr = TimerMgr::new();
        let fired = Arc::new(AtomicU32::new(0));
        mgr.start_timer(3, counting_cb(&fired)).unwrap();

        mgr.handle_tick();
        mgr.handle_tick();
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        mgr.handle_tick();
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(mgr.num_timers(), 0);

        // an extra tick must not fire it again
        mgr.handle_tick();
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_reset_restarts_the_countdown() {
        let mgr = TimerMgr::new();
        let fired = Arc::new(AtomicU32::new(0));
        let id = mgr.start_timer(3, counting_cb(&fired)).unwrap();

        mgr.handle_tick();
        mgr.handle_tick();
        mgr.reset_timer(id).unwrap();
        mgr.handle_tick();
        mgr.handle_tick();
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        mgr.handle_tick();
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_stop_timer() {
        let mgr = TimerMgr::new();
        let fired = Arc::new(AtomicU32::new(0));
        let id = mgr.start_timer(1, counting_cb(&fired)).unwrap();

        mgr.stop_timer(id).unwrap();
        mgr.handle_tick();
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert_eq!(mgr.stop_timer(id), Err(TimerError::NotFound));
        assert_eq!(mgr.reset_timer(id), Err(TimerError::NotFound));
    }

    #[test]
    fn test_ids_unique_and_never_invalid() {
        let mgr = TimerMgr::new();
        let mut ids = std::collections::HashSet::new();
        for _ in 0..100 {
            let id = mgr.start_timer(1000, Box::new(|_| {})).unwrap();
            assert_ne!(id, INVALID_TIMER_ID);
            assert!(ids.insert(id), "duplicate timer id {}", id);
        }
        assert_eq!(mgr.num_timers(), 100);
    }

    #[test]
    fn test_id_probing_skips_live_ids() {
        let mgr = TimerMgr::new();
        let a = mgr.start_timer(1000, Box::new(|_| {})).unwrap();
        let b = mgr.start_timer(1000, Box::new(|_| {})).unwrap();
        assert_ne!(a, b);

        // force the cursor back over a live id
        mgr.table.lock().unwrap().next_id = a;
        let c = mgr.start_timer(1000, Box::new(|_| {})).unwrap();
        assert_ne!(c, a);
        assert_ne!(c, b);
    }

    #[test]
    fn test_callback_may_start_timers_reentrantly() {
        let mgr = TimerMgr::new();
        let fired = Arc::new(AtomicU32::new(0));

        let mgr2 = mgr.clone();
        let fired2 = fired.clone();
        mgr.start_timer(
            1,
            Box::new(move |_| {
                fired2.fetch_add(1, Ordering::SeqCst);
                let fired3 = fired2.clone();
                mgr2.start_timer(1, Box::new(move |_| {
                    fired3.fetch_add(1, Ordering::SeqCst);
                }))
                .unwrap();
            }),
        )
        .unwrap();

        mgr.handle_tick();
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(mgr.num_timers(), 1);
        mgr.handle_tick();
        assert_eq!(fired.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_callback_stop_of_expiring_timer_is_noop() {
        let mgr = TimerMgr::new();
        let result = Arc::new(Mutex::new(None));

        let mgr2 = mgr.clone();
        let result2 = result.clone();
        mgr.start_timer(
            1,
            Box::new(move |id| {
                *result2.lock().unwrap() = Some(mgr2.stop_timer(id));
            }),
        )
        .unwrap();

        mgr.handle_tick();
        assert_eq!(*result.lock().unwrap(), Some(Err(TimerError::NotFound)));
    }
}
