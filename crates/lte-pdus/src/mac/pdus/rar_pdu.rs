use lte_core::{BitReader, BitWriter, PduCodecErr};

/// 36.321 §6.1.5 Random Access Response, one subheader plus (for the RAPID
/// form) the MAC RAR body. The T bit after E selects the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rar {
    /// Backoff Indicator subheader (T=0)
    BackoffIndicator {
        /// 4 bits
        bi: u8,
    },
    /// RAPID subheader (T=1) followed by the 6-octet grant body
    Rapid {
        /// 6 bits, echoes the random access preamble
        rapid: u8,
        /// 11 bits
        timing_adv_cmd: u16,
        hopping_flag: bool,
        /// 10 bits, uplink resource block assignment
        rba: u16,
        /// 4 bits
        mcs: u8,
        /// 3 bits
        tpc_command: u8,
        ul_delay: bool,
        csi_req: bool,
        temp_c_rnti: u16,
    },
}

impl Rar {
    pub fn from_bitbuf(buf: &mut BitReader) -> Result<Self, PduCodecErr> {
        buf.read_field(1, "e_bit")?;
        let t_bit = buf.read_field(1, "t_bit")?;

        if t_bit == 0 {
            buf.read_field(2, "reserved")?;
            let bi = buf.read_field(4, "backoff_indicator")? as u8;
            return Ok(Rar::BackoffIndicator { bi });
        }

        let rapid = buf.read_field(6, "rapid")? as u8;
        buf.read_field(1, "reserved")?;
        let timing_adv_cmd = buf.read_field(11, "timing_adv_cmd")? as u16;
        let hopping_flag = buf.read_field(1, "hopping_flag")? != 0;
        let rba = buf.read_field(10, "rba")? as u16;
        let mcs = buf.read_field(4, "mcs")? as u8;
        let tpc_command = buf.read_field(3, "tpc_command")? as u8;
        let ul_delay = buf.read_field(1, "ul_delay")? != 0;
        let csi_req = buf.read_field(1, "csi_req")? != 0;
        let temp_c_rnti = buf.read_field(16, "temp_c_rnti")? as u16;

        Ok(Rar::Rapid {
            rapid,
            timing_adv_cmd,
            hopping_flag,
            rba,
            mcs,
            tpc_command,
            ul_delay,
            csi_req,
            temp_c_rnti,
        })
    }

    pub fn to_bitbuf(&self, buf: &mut BitWriter) {
        match *self {
            Rar::BackoffIndicator { bi } => {
                buf.push_value(0, 1); // E
                buf.push_value(0, 1); // T
                buf.push_value(0, 2); // R
                buf.push_value(bi as u32, 4);
            }
            Rar::Rapid {
                rapid,
                timing_adv_cmd,
                hopping_flag,
                rba,
                mcs,
                tpc_command,
                ul_delay,
                csi_req,
                temp_c_rnti,
            } => {
                buf.push_value(0, 1); // E
                buf.push_value(1, 1); // T
                buf.push_value(rapid as u32, 6);

                buf.push_value(0, 1); // R
                buf.push_value(timing_adv_cmd as u32, 11);
                buf.push_value(hopping_flag as u32, 1);
                buf.push_value(rba as u32, 10);
                buf.push_value(mcs as u32, 4);
                buf.push_value(tpc_command as u32, 3);
                buf.push_value(ul_delay as u32, 1);
                buf.push_value(csi_req as u32, 1);
                buf.push_value(temp_c_rnti as u32, 16);
            }
        }
    }
}

/// A Random Access Response PDU. The codec currently supports exactly one
/// RAR per PDU; encoding any other count fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RarPdu {
    pub rars: Vec<Rar>,
}

impl RarPdu {
    pub fn single(rar: Rar) -> Self {
        RarPdu { rars: vec![rar] }
    }

    pub fn to_bitbuf(&self, buf: &mut BitWriter) -> Result<(), PduCodecErr> {
        if self.rars.len() != 1 {
            return Err(PduCodecErr::InvalidValue { field: "rars", value: self.rars.len() as u64 });
        }
        self.rars[0].to_bitbuf(buf);
        Ok(())
    }

    pub fn from_bitbuf(buf: &mut BitReader) -> Result<Self, PduCodecErr> {
        Ok(RarPdu::single(Rar::from_bitbuf(buf)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rar_bi_wire() {
        let pdu = RarPdu::single(Rar::BackoffIndicator { bi: 5 });
        let mut w = BitWriter::new();
        pdu.to_bitbuf(&mut w).unwrap();
        assert_eq!(w.dump_hex(), "05");

        let bytes = w.into_bytes();
        let mut r = BitReader::new(&bytes);
        assert_eq!(RarPdu::from_bitbuf(&mut r).unwrap(), pdu);
    }

    #[test]
    fn test_rar_rapid_roundtrip() {
        let rar = Rar::Rapid {
            rapid: 1,
            timing_adv_cmd: 2,
            hopping_flag: false,
            rba: 3,
            mcs: 4,
            tpc_command: 5,
            ul_delay: false,
            csi_req: true,
            temp_c_rnti: 0x1234,
        };
        let pdu = RarPdu::single(rar);
        let mut w = BitWriter::new();
        pdu.to_bitbuf(&mut w).unwrap();
        assert_eq!(w.len_bits(), 56); // 7 octets

        let bytes = w.into_bytes();
        let mut r = BitReader::new(&bytes);
        let decoded = RarPdu::from_bitbuf(&mut r).unwrap();
        assert_eq!(decoded, pdu);
        assert_eq!(r.bits_remaining(), 0);
    }

    #[test]
    fn test_rar_rapid_field_packing() {
        let rar = Rar::Rapid {
            rapid: 0x3F,
            timing_adv_cmd: 0,
            hopping_flag: false,
            rba: 0,
            mcs: 0,
            tpc_command: 0,
            ul_delay: false,
            csi_req: false,
            temp_c_rnti: 0xFFFF,
        };
        let mut w = BitWriter::new();
        rar.to_bitbuf(&mut w);
        // header octet: E=0 T=1 RAPID=111111
        assert_eq!(w.as_bytes()[0], 0x7F);
        // the last two octets carry the temporary C-RNTI
        assert_eq!(&w.as_bytes()[5..7], &[0xFF, 0xFF]);
    }

    #[test]
    fn test_rar_pdu_rejects_multiple_rars() {
        let pdu = RarPdu {
            rars: vec![Rar::BackoffIndicator { bi: 1 }, Rar::BackoffIndicator { bi: 2 }],
        };
        let mut w = BitWriter::new();
        assert_eq!(
            pdu.to_bitbuf(&mut w),
            Err(PduCodecErr::InvalidValue { field: "rars", value: 2 })
        );
    }

    #[test]
    fn test_rar_truncated() {
        let data = [0x40u8]; // T=1 but no body
        let mut r = BitReader::new(&data);
        assert!(matches!(Rar::from_bitbuf(&mut r), Err(PduCodecErr::BufferEnded { .. })));
    }
}
