//! IP gateway: bridges the kernel TUN device to the per-user per-bearer
//! PDCP queues.
//!
//! Uplink: the RX thread reads IP packets from the TUN device, resolves the
//! destination address to a user's DRB1 and posts `PdcpDataSduReady`.
//! Downlink: `GwDataReady` messages drain one queued byte message from the
//! named bearer onto the TUN device.

pub mod uplink;

use std::net::Ipv4Addr;
use std::os::unix::io::RawFd;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use lte_config::SharedConfig;
use lte_core::MAX_MSG_SIZE;
use lte_msgq::{DestLayer, LayerMsg, LayerMsgInner, Msgq, MsgqSender, RbId};

use crate::tun;
use crate::user_mgr::UserMgr;
use uplink::RxAction;

/// Interface name of the gateway TUN device
pub const TUN_DEVICE_NAME: &str = "tun_openlte";

/// How long the RX thread blocks in poll() before re-checking the stop flag
const RX_POLL_TIMEOUT_MS: i32 = 100;

#[derive(Debug, PartialEq, Eq)]
pub enum GwError {
    AlreadyStarted,
    CantStart(String),
}

struct Running {
    tun_fd: RawFd,
    rx_thread: thread::JoinHandle<()>,
}

/// The gateway component. Collaborators are injected at construction; the
/// message queues arrive with `start`.
pub struct Gw {
    config: SharedConfig,
    user_mgr: Arc<UserMgr>,
    started: Arc<AtomicBool>,
    state: Mutex<Option<Running>>,
}

impl Gw {
    pub fn new(config: SharedConfig, user_mgr: Arc<UserMgr>) -> Self {
        Gw {
            config,
            user_mgr,
            started: Arc::new(AtomicBool::new(false)),
            state: Mutex::new(None),
        }
    }

    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }

    /// Bring up the TUN device, attach the downlink handler to `from_pdcp`
    /// and spawn the RX thread. No I/O happens before this succeeds.
    pub fn start(&self, from_pdcp: &mut Msgq, to_pdcp: MsgqSender) -> Result<(), GwError> {
        let mut state = self.state.lock().expect("gw state poisoned");
        if state.is_some() {
            return Err(GwError::AlreadyStarted);
        }

        let ip_addr = self.config.config().gw.ip_addr_start;

        // Construct the TUN device and bring the interface up
        let tun_fd = tun::tun_open(TUN_DEVICE_NAME).map_err(GwError::CantStart)?;
        if let Err(e) = tun::configure_ipv4(TUN_DEVICE_NAME, ip_addr) {
            tun::tun_close(tun_fd);
            return Err(GwError::CantStart(e));
        }
        tracing::info!("gw: {} up at {}/24", TUN_DEVICE_NAME, ip_addr);

        // Downlink path: drain bearer queues onto the TUN device
        let user_mgr = self.user_mgr.clone();
        from_pdcp.attach_rx(move |msg| handle_pdcp_msg(&user_mgr, tun_fd, msg));

        self.started.store(true, Ordering::SeqCst);

        // Uplink path
        let started = self.started.clone();
        let user_mgr = self.user_mgr.clone();
        let rx_thread = thread::Builder::new()
            .name("gw-rx".to_string())
            .spawn(move || receive_loop(started, tun_fd, user_mgr, to_pdcp))
            .expect("failed to spawn gw rx thread");

        *state = Some(Running { tun_fd, rx_thread });
        Ok(())
    }

    /// Idempotent. Flips the started flag under the state lock, then joins
    /// the RX thread and closes the TUN device with the lock released.
    pub fn stop(&self) {
        let running = {
            let mut state = self.state.lock().expect("gw state poisoned");
            self.started.store(false, Ordering::SeqCst);
            state.take()
        };

        if let Some(running) = running {
            if let Err(e) = running.rx_thread.join() {
                tracing::error!("gw: rx thread panicked: {:?}", e);
            }
            tun::tun_close(running.tun_fd);
            tracing::info!("gw: stopped");
        }
    }
}

impl Drop for Gw {
    fn drop(&mut self) {
        self.stop();
    }
}

fn handle_pdcp_msg(user_mgr: &UserMgr, tun_fd: RawFd, msg: LayerMsg) {
    if !msg.is_for(DestLayer::Gw) {
        tracing::warn!("gw: received message for invalid layer ({:?})", msg.dest_layer);
        return;
    }
    match msg.msg {
        LayerMsgInner::GwDataReady { c_rnti, rb_id } => handle_gw_data(user_mgr, tun_fd, c_rnti, rb_id),
        other => tracing::error!("gw: received invalid PDCP message {}", other),
    }
}

fn handle_gw_data(user_mgr: &UserMgr, tun_fd: RawFd, c_rnti: u16, rb_id: RbId) {
    let Some(user) = user_mgr.find_user_by_c_rnti(c_rnti) else {
        tracing::warn!("gw: data ready for unknown c_rnti={}", c_rnti);
        return;
    };
    let Some(rb) = user.get_drb(rb_id) else {
        tracing::warn!("gw: data ready for missing bearer {} of c_rnti={}", rb_id, c_rnti);
        return;
    };
    let Some(data) = rb.get_next_gw_data_msg() else {
        return;
    };

    tracing::debug!("gw: {} byte downlink message for c_rnti={} rb={}", data.len(), c_rnti, rb_id);

    // A short write loses the packet but does not tear the gateway down
    match tun::tun_write(tun_fd, &data) {
        Ok(n) if n == data.len() => {}
        Ok(n) => tracing::error!("gw: short write to TUN device ({} of {} bytes)", n, data.len()),
        Err(e) => tracing::error!("gw: write failure: {}", e),
    }
}

fn receive_loop(started: Arc<AtomicBool>, tun_fd: RawFd, user_mgr: Arc<UserMgr>, to_pdcp: MsgqSender) {
    // The last two cores are reserved for MAC and PHY/radio
    let num_cpus = thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
    if num_cpus >= 4 {
        tun::pin_current_thread(num_cpus - 3);
    }

    let mut buf = vec![0u8; MAX_MSG_SIZE];
    let mut idx = 0usize;

    while started.load(Ordering::SeqCst) {
        let n_bytes = match tun::poll_read(tun_fd, &mut buf[idx..], RX_POLL_TIMEOUT_MS) {
            Ok(None) => continue, // poll timeout, re-check the stop flag
            Ok(Some(0)) => {
                tracing::error!("gw rx: TUN device closed");
                break;
            }
            Ok(Some(n)) => n,
            Err(e) => {
                if started.load(Ordering::SeqCst) {
                    tracing::error!("gw rx: {}", e);
                }
                break;
            }
        };

        let total = idx + n_bytes;
        match uplink::classify_packet(&buf[..total], n_bytes, total) {
            RxAction::Accumulate { idx: keep } => {
                if keep != total {
                    // Only the most recent chunk survives; slide it to the front
                    buf.copy_within(total - keep..total, 0);
                }
                idx = keep;
            }
            RxAction::Discard => {
                idx = 0;
            }
            RxAction::Deliver { daddr, len } => {
                idx = 0;
                deliver_uplink(&user_mgr, &to_pdcp, daddr, &buf[..len]);
            }
        }
    }
}

fn deliver_uplink(user_mgr: &UserMgr, to_pdcp: &MsgqSender, daddr: Ipv4Addr, packet: &[u8]) {
    // Lookup failure drops the packet silently (radio best-effort)
    let Some(user) = user_mgr.find_user_by_ip(daddr) else {
        tracing::trace!("gw rx: no user for {}, dropping {} bytes", daddr, packet.len());
        return;
    };
    let Some(rb) = user.get_drb(RbId::Drb1) else {
        return;
    };

    tracing::debug!("gw rx: {} byte IP packet for c_rnti={} rb={}", packet.len(), user.c_rnti(), rb.rb_id());

    rb.queue_pdcp_data_sdu(packet.to_vec());
    to_pdcp.send(
        DestLayer::Pdcp,
        LayerMsgInner::PdcpDataSduReady { c_rnti: user.c_rnti(), rb_id: rb.rb_id() },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use lte_config::StackConfig;

    #[test]
    fn test_gw_constructs_stopped() {
        let cfg = SharedConfig::from_config(StackConfig::default());
        let gw = Gw::new(cfg, Arc::new(UserMgr::new()));
        assert!(!gw.is_started());
        // stop on a never-started gateway is a no-op
        gw.stop();
        assert!(!gw.is_started());
    }
}
