use lte_core::{BitReader, BitWriter, PduCodecErr};

/// One cell entry of the Extended Power Headroom CE.
/// `p_cmax` is on the wire (preceded by 2 reserved bits) iff `v` is false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EphCell {
    pub p: bool,
    pub v: bool,
    /// 6 bits
    pub ph: u8,
    /// 6 bits, present iff v == false
    pub p_cmax: Option<u8>,
}

impl EphCell {
    pub fn from_bitbuf(buf: &mut BitReader) -> Result<Self, PduCodecErr> {
        let p = buf.read_field(1, "p")? != 0;
        let v = buf.read_field(1, "v")? != 0;
        let ph = buf.read_field(6, "ph")? as u8;
        let p_cmax = if !v {
            buf.read_field(2, "reserved")?;
            Some(buf.read_field(6, "p_cmax")? as u8)
        } else {
            None
        };
        Ok(EphCell { p, v, ph, p_cmax })
    }

    pub fn to_bitbuf(&self, buf: &mut BitWriter) {
        buf.push_value(self.p as u32, 1);
        buf.push_value(self.v as u32, 1);
        buf.push_value(self.ph as u32, 6);
        if !self.v {
            buf.push_value(0, 2); // R
            buf.push_value(self.p_cmax.expect("p_cmax must be set when v=0") as u32, 6);
        }
    }

    /// Octets this entry occupies on the wire
    pub fn wire_len_bytes(&self) -> usize {
        if self.v {
            1
        } else {
            2
        }
    }
}

/// 36.321 §6.1.3.6a Extended Power Headroom control element.
///
/// The bit stream alone does not say whether a PCell Type 2 entry is present;
/// that depends on whether the UE is configured for simultaneous PUCCH/PUSCH,
/// so the decoder takes that configuration as a parameter. The encoder is
/// driven by `pcell_type_2` being set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExtPowerHeadroom {
    /// Present iff the UE is configured for simultaneous PUCCH/PUSCH
    pub pcell_type_2: Option<EphCell>,
    pub pcell_type_1: EphCell,
    /// SCell entries by index; presence bits on the wire are derived from these
    pub scell: [Option<EphCell>; 7],
}

impl ExtPowerHeadroom {
    pub fn from_bitbuf(buf: &mut BitReader, simultaneous_pucch_pusch: bool) -> Result<Self, PduCodecErr> {
        // SCell presence indicators, wire order index 6 down to 0
        let mut present = [false; 7];
        for i in 0..7 {
            present[6 - i] = buf.read_field(1, "scell_present")? != 0;
        }
        buf.read_field(1, "reserved")?;

        let pcell_type_2 = if simultaneous_pucch_pusch {
            Some(EphCell::from_bitbuf(buf)?)
        } else {
            None
        };
        let pcell_type_1 = EphCell::from_bitbuf(buf)?;

        let mut scell = [None; 7];
        for (i, slot) in scell.iter_mut().enumerate() {
            if present[i] {
                *slot = Some(EphCell::from_bitbuf(buf)?);
            }
        }

        Ok(ExtPowerHeadroom { pcell_type_2, pcell_type_1, scell })
    }

    pub fn to_bitbuf(&self, buf: &mut BitWriter) {
        for i in 0..7 {
            buf.push_value(self.scell[6 - i].is_some() as u32, 1);
        }
        buf.push_value(0, 1); // R

        if let Some(cell) = &self.pcell_type_2 {
            cell.to_bitbuf(buf);
        }
        self.pcell_type_1.to_bitbuf(buf);
        for cell in self.scell.iter().flatten() {
            cell.to_bitbuf(buf);
        }
    }

    /// Octet length of the CE body, as carried in the subheader length field
    pub fn wire_len_bytes(&self) -> usize {
        let mut len = 1; // SCell presence byte
        if let Some(cell) = &self.pcell_type_2 {
            len += cell.wire_len_bytes();
        }
        len += self.pcell_type_1.wire_len_bytes();
        for cell in self.scell.iter().flatten() {
            len += cell.wire_len_bytes();
        }
        len
    }
}
