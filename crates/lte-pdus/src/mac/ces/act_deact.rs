use lte_core::{BitReader, BitWriter, PduCodecErr};

/// 36.321 §6.1.3.8 Activation/Deactivation control element: one
/// activation bit per SCell index, C7 first on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActivationDeactivation {
    pub c7: bool,
    pub c6: bool,
    pub c5: bool,
    pub c4: bool,
    pub c3: bool,
    pub c2: bool,
    pub c1: bool,
}

impl ActivationDeactivation {
    pub fn from_bitbuf(buf: &mut BitReader) -> Result<Self, PduCodecErr> {
        let s = ActivationDeactivation {
            c7: buf.read_field(1, "c7")? != 0,
            c6: buf.read_field(1, "c6")? != 0,
            c5: buf.read_field(1, "c5")? != 0,
            c4: buf.read_field(1, "c4")? != 0,
            c3: buf.read_field(1, "c3")? != 0,
            c2: buf.read_field(1, "c2")? != 0,
            c1: buf.read_field(1, "c1")? != 0,
        };
        buf.read_field(1, "reserved")?;
        Ok(s)
    }

    pub fn to_bitbuf(&self, buf: &mut BitWriter) {
        buf.push_value(self.c7 as u32, 1);
        buf.push_value(self.c6 as u32, 1);
        buf.push_value(self.c5 as u32, 1);
        buf.push_value(self.c4 as u32, 1);
        buf.push_value(self.c3 as u32, 1);
        buf.push_value(self.c2 as u32, 1);
        buf.push_value(self.c1 as u32, 1);
        buf.push_value(0, 1); // R
    }
}
