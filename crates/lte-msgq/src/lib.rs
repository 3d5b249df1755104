//! Inter-layer message bus for the LTE FDD base-station stack
//!
//! Point-to-point queues carrying tagged records between layers; each queue
//! has exactly one attached receiver.

pub mod messages;
pub mod msgq;

pub use messages::{DestLayer, LayerMsg, LayerMsgInner, RbId};
pub use msgq::{Msgq, MsgqSender};
