//! Registry of attached users and their radio bearers. The gateway resolves
//! uplink destinations here; PDCP owns the other end of each bearer queue.

use std::collections::{HashMap, VecDeque};
use std::net::Ipv4Addr;
use std::sync::{Arc, Mutex, RwLock};

use lte_msgq::RbId;

/// A single radio bearer with its gateway-facing queues. Both queues hand
/// out messages in arrival order.
pub struct RadioBearer {
    rb_id: RbId,
    /// Uplink: gateway -> PDCP
    pdcp_sdu_queue: Mutex<VecDeque<Vec<u8>>>,
    /// Downlink: PDCP -> gateway
    gw_data_queue: Mutex<VecDeque<Vec<u8>>>,
}

impl RadioBearer {
    fn new(rb_id: RbId) -> Self {
        RadioBearer {
            rb_id,
            pdcp_sdu_queue: Mutex::new(VecDeque::new()),
            gw_data_queue: Mutex::new(VecDeque::new()),
        }
    }

    pub fn rb_id(&self) -> RbId {
        self.rb_id
    }

    pub fn queue_pdcp_data_sdu(&self, sdu: Vec<u8>) {
        self.pdcp_sdu_queue.lock().expect("pdcp sdu queue poisoned").push_back(sdu);
    }

    pub fn get_next_pdcp_data_sdu(&self) -> Option<Vec<u8>> {
        self.pdcp_sdu_queue.lock().expect("pdcp sdu queue poisoned").pop_front()
    }

    pub fn queue_gw_data(&self, msg: Vec<u8>) {
        self.gw_data_queue.lock().expect("gw data queue poisoned").push_back(msg);
    }

    /// Remove and return the oldest queued downlink message
    pub fn get_next_gw_data_msg(&self) -> Option<Vec<u8>> {
        self.gw_data_queue.lock().expect("gw data queue poisoned").pop_front()
    }
}

/// One attached user with its assigned IP address and data bearers
pub struct User {
    c_rnti: u16,
    ip_addr: Ipv4Addr,
    drbs: HashMap<RbId, Arc<RadioBearer>>,
}

impl User {
    fn new(c_rnti: u16, ip_addr: Ipv4Addr) -> Self {
        let mut drbs = HashMap::new();
        drbs.insert(RbId::Drb1, Arc::new(RadioBearer::new(RbId::Drb1)));
        User { c_rnti, ip_addr, drbs }
    }

    pub fn c_rnti(&self) -> u16 {
        self.c_rnti
    }

    pub fn ip_addr(&self) -> Ipv4Addr {
        self.ip_addr
    }

    pub fn get_drb(&self, rb_id: RbId) -> Option<Arc<RadioBearer>> {
        self.drbs.get(&rb_id).cloned()
    }
}

/// Thread-safe user registry, indexed by C-RNTI and by assigned IP address
#[derive(Default)]
pub struct UserMgr {
    inner: RwLock<UserMgrInner>,
}

#[derive(Default)]
struct UserMgrInner {
    by_c_rnti: HashMap<u16, Arc<User>>,
    by_ip: HashMap<Ipv4Addr, Arc<User>>,
}

impl UserMgr {
    pub fn new() -> Self {
        UserMgr::default()
    }

    /// Attach a user. Each user gets a DRB1 bearer on creation.
    pub fn add_user(&self, c_rnti: u16, ip_addr: Ipv4Addr) -> Arc<User> {
        let user = Arc::new(User::new(c_rnti, ip_addr));
        let mut inner = self.inner.write().expect("user registry poisoned");
        inner.by_c_rnti.insert(c_rnti, user.clone());
        inner.by_ip.insert(ip_addr, user.clone());
        tracing::info!("user_mgr: added user c_rnti={} ip={}", c_rnti, ip_addr);
        user
    }

    pub fn remove_user(&self, c_rnti: u16) {
        let mut inner = self.inner.write().expect("user registry poisoned");
        if let Some(user) = inner.by_c_rnti.remove(&c_rnti) {
            inner.by_ip.remove(&user.ip_addr());
            tracing::info!("user_mgr: removed user c_rnti={}", c_rnti);
        }
    }

    pub fn find_user_by_ip(&self, ip_addr: Ipv4Addr) -> Option<Arc<User>> {
        self.inner.read().expect("user registry poisoned").by_ip.get(&ip_addr).cloned()
    }

    pub fn find_user_by_c_rnti(&self, c_rnti: u16) -> Option<Arc<User>> {
        self.inner.read().expect("user registry poisoned").by_c_rnti.get(&c_rnti).cloned()
    }

    pub fn num_users(&self) -> usize {
        self.inner.read().expect("user registry poisoned").by_c_rnti.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_ip_and_c_rnti() {
        let mgr = UserMgr::new();
        let ip = Ipv4Addr::new(10, 0, 5, 2);
        mgr.add_user(61, ip);

        let user = mgr.find_user_by_ip(ip).expect("user should resolve by ip");
        assert_eq!(user.c_rnti(), 61);
        assert!(mgr.find_user_by_c_rnti(61).is_some());
        assert!(mgr.find_user_by_ip(Ipv4Addr::new(10, 0, 5, 3)).is_none());

        mgr.remove_user(61);
        assert!(mgr.find_user_by_ip(ip).is_none());
        assert_eq!(mgr.num_users(), 0);
    }

    #[test]
    fn test_drb1_exists_on_creation() {
        let mgr = UserMgr::new();
        let user = mgr.add_user(70, Ipv4Addr::new(10, 0, 5, 4));
        assert!(user.get_drb(RbId::Drb1).is_some());
        assert!(user.get_drb(RbId::Drb2).is_none());
    }

    #[test]
    fn test_bearer_queue_ordering() {
        let mgr = UserMgr::new();
        let user = mgr.add_user(71, Ipv4Addr::new(10, 0, 5, 5));
        let rb = user.get_drb(RbId::Drb1).unwrap();

        rb.queue_pdcp_data_sdu(vec![1]);
        rb.queue_pdcp_data_sdu(vec![2]);
        assert_eq!(rb.get_next_pdcp_data_sdu(), Some(vec![1]));
        assert_eq!(rb.get_next_pdcp_data_sdu(), Some(vec![2]));
        assert_eq!(rb.get_next_pdcp_data_sdu(), None);

        rb.queue_gw_data(vec![3]);
        rb.queue_gw_data(vec![4]);
        assert_eq!(rb.get_next_gw_data_msg(), Some(vec![3]));
        assert_eq!(rb.get_next_gw_data_msg(), Some(vec![4]));
        assert_eq!(rb.get_next_gw_data_msg(), None);
    }
}
