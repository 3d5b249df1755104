/// 36.321 §6.1.2: transport channel a MAC multiplexing PDU is carried on.
/// Selects the LCID namespace and which control elements a subheader may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacChanType {
    Dlsch,
    Ulsch,
    Mch,
}

impl core::fmt::Display for MacChanType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MacChanType::Dlsch => write!(f, "DL-SCH"),
            MacChanType::Ulsch => write!(f, "UL-SCH"),
            MacChanType::Mch => write!(f, "MCH"),
        }
    }
}
