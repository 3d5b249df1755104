//! Stateful components of the LTE FDD base-station stack: the IP gateway
//! bridging a TUN device to the per-bearer PDCP queues, the millisecond
//! timer manager, and the user/bearer registry they share.

pub mod gw;
pub mod timer_mgr;
pub mod tun;
pub mod user_mgr;

pub use gw::{Gw, GwError};
pub use timer_mgr::{TimerError, TimerMgr, INVALID_TIMER_ID};
pub use user_mgr::{RadioBearer, User, UserMgr};
