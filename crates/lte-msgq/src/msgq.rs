use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::messages::{DestLayer, LayerMsg, LayerMsgInner};

/// Point-to-point inter-layer message queue: any number of senders, exactly
/// one attached receiver, at-least-once in-order delivery.
///
/// `attach_rx` hands the receive side to a dedicated named thread which
/// delivers every message to the callback. The thread exits when every
/// sender handle (the queue itself included) has been dropped.
pub struct Msgq {
    name: &'static str,
    tx: Option<Sender<LayerMsg>>,
    rx: Option<Receiver<LayerMsg>>,
    rx_thread: Option<thread::JoinHandle<()>>,
}

impl Msgq {
    pub fn new(name: &'static str) -> Self {
        let (tx, rx) = unbounded::<LayerMsg>();
        Msgq {
            name,
            tx: Some(tx),
            rx: Some(rx),
            rx_thread: None,
        }
    }

    /// A cloneable send handle for this queue
    pub fn sender(&self) -> MsgqSender {
        MsgqSender {
            name: self.name,
            tx: self.tx.as_ref().expect("msgq sender already shut down").clone(),
        }
    }

    pub fn send(&self, dest_layer: DestLayer, msg: LayerMsgInner) {
        self.sender().send(dest_layer, msg);
    }

    /// Attach the single receiver. Panics when called twice.
    pub fn attach_rx<F>(&mut self, mut cb: F)
    where
        F: FnMut(LayerMsg) + Send + 'static,
    {
        let rx = self.rx.take().expect("msgq receiver already attached");
        let name = self.name;
        let handle = thread::Builder::new()
            .name(format!("msgq-{}", name))
            .spawn(move || {
                while let Ok(msg) = rx.recv() {
                    tracing::trace!("msgq {}: deliver {}", name, msg.msg);
                    cb(msg);
                }
                tracing::debug!("msgq {}: all senders gone, receiver exiting", name);
            })
            .expect("failed to spawn msgq receiver thread");
        self.rx_thread = Some(handle);
    }
}

impl Drop for Msgq {
    fn drop(&mut self) {
        // Drop our send handle first so the receiver thread can drain and
        // exit once the remaining senders are gone
        self.tx.take();

        if let Some(handle) = self.rx_thread.take() {
            let timeout = Duration::from_secs(3);
            let start = Instant::now();
            loop {
                if handle.is_finished() {
                    let _ = handle.join();
                    break;
                }
                if start.elapsed() >= timeout {
                    tracing::warn!("msgq {}: receiver thread did not finish in time, abandoning", self.name);
                    break;
                }
                thread::sleep(Duration::from_millis(10));
            }
        }
    }
}

/// Send half of a `Msgq`, freely cloneable across threads
#[derive(Clone)]
pub struct MsgqSender {
    name: &'static str,
    tx: Sender<LayerMsg>,
}

impl MsgqSender {
    pub fn send(&self, dest_layer: DestLayer, msg: LayerMsgInner) {
        tracing::trace!("msgq {}: send {}", self.name, msg);
        if self.tx.send(LayerMsg { dest_layer, msg }).is_err() {
            tracing::warn!("msgq {}: send with no attached receiver left", self.name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_send_and_receive_in_order() {
        let mut q = Msgq::new("test");
        let (done_tx, done_rx) = mpsc::channel();
        q.attach_rx(move |msg| {
            done_tx.send(msg).unwrap();
        });

        let sender = q.sender();
        sender.send(DestLayer::TimerMgr, LayerMsgInner::TimerTick);
        sender.send(
            DestLayer::Pdcp,
            LayerMsgInner::PdcpDataSduReady { c_rnti: 61, rb_id: crate::RbId::Drb1 },
        );

        let first = done_rx.recv_timeout(Duration::from_secs(1)).unwrap();
        assert_eq!(first.msg, LayerMsgInner::TimerTick);
        assert!(first.is_for(DestLayer::TimerMgr));
        assert!(!first.is_for(DestLayer::Pdcp));

        let second = done_rx.recv_timeout(Duration::from_secs(1)).unwrap();
        assert!(matches!(second.msg, LayerMsgInner::PdcpDataSduReady { c_rnti: 61, .. }));
    }

    #[test]
    fn test_any_layer_matches_every_handler() {
        let msg = LayerMsg { dest_layer: DestLayer::Any, msg: LayerMsgInner::TimerTick };
        assert!(msg.is_for(DestLayer::TimerMgr));
        assert!(msg.is_for(DestLayer::Gw));
    }

    #[test]
    #[should_panic(expected = "msgq receiver already attached")]
    fn test_double_attach_panics() {
        let mut q = Msgq::new("test-double");
        q.attach_rx(|_| {});
        q.attach_rx(|_| {});
    }
}
