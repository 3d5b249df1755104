use lte_core::{BitReader, BitWriter, PduCodecErr};

/// 36.321 §6.1.3.5 Timing Advance Command control element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimingAdvanceCommand {
    /// 6 bits
    pub ta: u8,
}

impl TimingAdvanceCommand {
    pub fn from_bitbuf(buf: &mut BitReader) -> Result<Self, PduCodecErr> {
        buf.read_field(2, "reserved")?;
        let ta = buf.read_field(6, "ta")? as u8;
        Ok(TimingAdvanceCommand { ta })
    }

    pub fn to_bitbuf(&self, buf: &mut BitWriter) {
        buf.push_value(0, 2); // R
        buf.push_value(self.ta as u32, 6);
    }
}
