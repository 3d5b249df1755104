use core::fmt::Display;

/// Layers addressed by the message bus. A handler ignores messages whose
/// destination is neither its own layer nor `Any`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestLayer {
    TimerMgr,
    Pdcp,
    Gw,
    Any,
}

/// Radio bearer identities on the Uu interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RbId {
    Srb0,
    Srb1,
    Srb2,
    Drb1,
    Drb2,
}

impl Display for RbId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RbId::Srb0 => write!(f, "SRB0"),
            RbId::Srb1 => write!(f, "SRB1"),
            RbId::Srb2 => write!(f, "SRB2"),
            RbId::Drb1 => write!(f, "DRB1"),
            RbId::Drb2 => write!(f, "DRB2"),
        }
    }
}

/// Exhaustive list of message payloads carried on the bus
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerMsgInner {
    /// 1 ms timer tick, posted by the MAC layer
    TimerTick,
    /// A downlink byte message is queued on the named bearer
    GwDataReady { c_rnti: u16, rb_id: RbId },
    /// An uplink IP packet is queued on the named bearer
    PdcpDataSduReady { c_rnti: u16, rb_id: RbId },
}

impl Display for LayerMsgInner {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LayerMsgInner::TimerTick => write!(f, "TimerTick"),
            LayerMsgInner::GwDataReady { c_rnti, rb_id } => {
                write!(f, "GwDataReady(c_rnti={}, rb={})", c_rnti, rb_id)
            }
            LayerMsgInner::PdcpDataSduReady { c_rnti, rb_id } => {
                write!(f, "PdcpDataSduReady(c_rnti={}, rb={})", c_rnti, rb_id)
            }
        }
    }
}

/// A tagged record on the bus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerMsg {
    pub dest_layer: DestLayer,
    pub msg: LayerMsgInner,
}

impl LayerMsg {
    /// True when a handler for `layer` should process this message
    pub fn is_for(&self, layer: DestLayer) -> bool {
        self.dest_layer == layer || self.dest_layer == DestLayer::Any
    }
}
