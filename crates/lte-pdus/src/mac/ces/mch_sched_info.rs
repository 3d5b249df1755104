use lte_core::{BitReader, BitWriter, PduCodecErr};

/// Upper bound on scheduling entries per CE
pub const MAX_MCH_SCHED_ITEMS: usize = 16;

/// One MTCH stop entry: 5-bit LCID plus 11-bit stop subframe, 16 bits total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MchSchedItem {
    pub lcid: u8,
    pub stop_mch: u16,
}

/// 36.321 §6.1.3.7 MCH Scheduling Information control element
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MchSchedulingInfo {
    pub items: Vec<MchSchedItem>,
}

impl MchSchedulingInfo {
    /// The item count is not in the CE body; the caller derives it from the
    /// subheader length field (or from the remaining octets for a final
    /// subheader) and passes it in.
    pub fn from_bitbuf(buf: &mut BitReader, n_items: usize) -> Result<Self, PduCodecErr> {
        if n_items > MAX_MCH_SCHED_ITEMS {
            return Err(PduCodecErr::TooManyEntries { field: "mch_sched_items", count: n_items });
        }
        let mut items = Vec::with_capacity(n_items);
        for _ in 0..n_items {
            let lcid = buf.read_field(5, "lcid")? as u8;
            let stop_mch = buf.read_field(11, "stop_mch")? as u16;
            items.push(MchSchedItem { lcid, stop_mch });
        }
        Ok(MchSchedulingInfo { items })
    }

    pub fn to_bitbuf(&self, buf: &mut BitWriter) -> Result<(), PduCodecErr> {
        if self.items.len() > MAX_MCH_SCHED_ITEMS {
            return Err(PduCodecErr::TooManyEntries { field: "mch_sched_items", count: self.items.len() });
        }
        for item in &self.items {
            buf.push_value(item.lcid as u32, 5);
            buf.push_value(item.stop_mch as u32, 11);
        }
        Ok(())
    }

    /// Octet length of the CE body (2 bytes per entry)
    pub fn wire_len_bytes(&self) -> usize {
        self.items.len() * 2
    }
}
