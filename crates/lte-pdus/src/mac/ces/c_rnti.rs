use lte_core::{BitReader, BitWriter, PduCodecErr};

/// 36.321 §6.1.3.2 C-RNTI control element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CRnti {
    pub c_rnti: u16,
}

impl CRnti {
    pub fn from_bitbuf(buf: &mut BitReader) -> Result<Self, PduCodecErr> {
        let c_rnti = buf.read_field(16, "c_rnti")? as u16;
        Ok(CRnti { c_rnti })
    }

    pub fn to_bitbuf(&self, buf: &mut BitWriter) {
        buf.push_value(self.c_rnti as u32, 16);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_c_rnti_roundtrip() {
        let ce = CRnti { c_rnti: 0xBEEF };
        let mut w = BitWriter::new();
        ce.to_bitbuf(&mut w);
        assert_eq!(w.dump_hex(), "BEEF");

        let bytes = w.into_bytes();
        let mut r = BitReader::new(&bytes);
        assert_eq!(CRnti::from_bitbuf(&mut r).unwrap(), ce);
    }
}
