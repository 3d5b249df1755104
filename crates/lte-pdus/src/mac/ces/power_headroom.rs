use lte_core::{BitReader, BitWriter, PduCodecErr};

/// 36.321 §6.1.3.6 Power Headroom control element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PowerHeadroom {
    /// 6 bits
    pub ph: u8,
}

impl PowerHeadroom {
    pub fn from_bitbuf(buf: &mut BitReader) -> Result<Self, PduCodecErr> {
        buf.read_field(2, "reserved")?;
        let ph = buf.read_field(6, "ph")? as u8;
        Ok(PowerHeadroom { ph })
    }

    pub fn to_bitbuf(&self, buf: &mut BitWriter) {
        buf.push_value(0, 2); // R
        buf.push_value(self.ph as u32, 6);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_headroom_roundtrip() {
        let ce = PowerHeadroom { ph: 0x2A };
        let mut w = BitWriter::new();
        ce.to_bitbuf(&mut w);
        assert_eq!(w.dump_hex(), "2A");

        let bytes = w.into_bytes();
        let mut r = BitReader::new(&bytes);
        assert_eq!(PowerHeadroom::from_bitbuf(&mut r).unwrap(), ce);
    }
}
