use core::fmt;

use lte_core::{BitReader, BitWriter, PduCodecErr};

use crate::mac::ces::{
    ActivationDeactivation, CRnti, ExtPowerHeadroom, LongBsr, MchSchedulingInfo, PowerHeadroom, ShortBsr,
    TimingAdvanceCommand, TruncatedBsr, UeContentionResolutionId,
};
use crate::mac::enums::{LcidClass, MacChanType};

/// Upper bound on subheaders per multiplexing PDU
pub const MAX_PDU_SUBHEADERS: usize = 16;

/// Payload of one MAC subheader. Which variants are legal depends on the
/// PDU's channel type and the subheader's LCID (see `LcidClass::classify`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubheaderPayload {
    Sdu(Vec<u8>),
    ActDeact(ActivationDeactivation),
    UeConResId(UeContentionResolutionId),
    TaCommand(TimingAdvanceCommand),
    DrxCommand,
    Padding,
    ExtPowerHeadroom(ExtPowerHeadroom),
    PowerHeadroom(PowerHeadroom),
    CRnti(CRnti),
    TruncatedBsr(TruncatedBsr),
    ShortBsr(ShortBsr),
    LongBsr(LongBsr),
    MchSchedInfo(MchSchedulingInfo),
}

impl SubheaderPayload {
    fn matches_class(&self, class: LcidClass) -> bool {
        matches!(
            (self, class),
            (SubheaderPayload::Sdu(_), LcidClass::Sdu)
                | (SubheaderPayload::ActDeact(_), LcidClass::ActDeact)
                | (SubheaderPayload::UeConResId(_), LcidClass::UeConResId)
                | (SubheaderPayload::TaCommand(_), LcidClass::TaCommand)
                | (SubheaderPayload::DrxCommand, LcidClass::DrxCommand)
                | (SubheaderPayload::Padding, LcidClass::Padding)
                | (SubheaderPayload::ExtPowerHeadroom(_), LcidClass::ExtPowerHeadroom)
                | (SubheaderPayload::PowerHeadroom(_), LcidClass::PowerHeadroom)
                | (SubheaderPayload::CRnti(_), LcidClass::CRnti)
                | (SubheaderPayload::TruncatedBsr(_), LcidClass::TruncatedBsr)
                | (SubheaderPayload::ShortBsr(_), LcidClass::ShortBsr)
                | (SubheaderPayload::LongBsr(_), LcidClass::LongBsr)
                | (SubheaderPayload::MchSchedInfo(_), LcidClass::MchSchedInfo)
        )
    }

    /// Value carried in the subheader length field for this payload
    fn wire_len_bytes(&self) -> usize {
        match self {
            SubheaderPayload::Sdu(sdu) => sdu.len(),
            SubheaderPayload::ExtPowerHeadroom(eph) => eph.wire_len_bytes(),
            SubheaderPayload::MchSchedInfo(info) => info.wire_len_bytes(),
            _ => 0,
        }
    }
}

/// One subheader of a multiplexing PDU
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacSubheader {
    /// 5 bits
    pub lcid: u8,
    pub payload: SubheaderPayload,
}

/// 36.321 §6.1.2 DL-SCH / UL-SCH / MCH MAC PDU: a train of subheaders
/// followed by the matching train of control elements and SDUs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacPdu {
    pub chan_type: MacChanType,
    pub subheaders: Vec<MacSubheader>,
}

/// F/L length field: 7-bit form below 128, 15-bit form otherwise
fn pack_length(length: usize, buf: &mut BitWriter) -> Result<(), PduCodecErr> {
    if length >= 1 << 15 {
        return Err(PduCodecErr::InvalidValue { field: "length", value: length as u64 });
    }
    if length < 128 {
        buf.push_value(0, 1); // F
        buf.push_value(length as u32, 7);
    } else {
        buf.push_value(1, 1); // F
        buf.push_value(length as u32, 15);
    }
    Ok(())
}

/// A final subheader (E=0) carries no length field and yields 0; the caller
/// then sizes the payload from the remainder of the PDU.
fn unpack_length(buf: &mut BitReader, e_bit: bool) -> Result<usize, PduCodecErr> {
    if !e_bit {
        return Ok(0);
    }
    if buf.read_field(1, "f_bit")? != 0 {
        Ok(buf.read_field(15, "length")? as usize)
    } else {
        Ok(buf.read_field(7, "length")? as usize)
    }
}

impl MacPdu {
    pub fn to_bitbuf(&self, buf: &mut BitWriter) -> Result<(), PduCodecErr> {
        if self.subheaders.len() > MAX_PDU_SUBHEADERS {
            return Err(PduCodecErr::TooManyEntries { field: "subheaders", count: self.subheaders.len() });
        }

        // Reject payloads that are illegal for their (channel, LCID) slot
        // before anything hits the wire
        for sh in &self.subheaders {
            let class = LcidClass::classify(self.chan_type, sh.lcid);
            if !sh.payload.matches_class(class) {
                return Err(PduCodecErr::InvalidValue { field: "payload", value: sh.lcid as u64 });
            }
        }

        // Subheader train. The last subheader has E=0 and never a length.
        let n = self.subheaders.len();
        for (i, sh) in self.subheaders.iter().enumerate() {
            let last = i + 1 == n;
            buf.push_value(0, 2); // R
            buf.push_value(!last as u32, 1); // E
            buf.push_value(sh.lcid as u32, 5);
            if last {
                continue;
            }
            let class = LcidClass::classify(self.chan_type, sh.lcid);
            if class.has_length_field(self.chan_type) {
                pack_length(sh.payload.wire_len_bytes(), buf)?;
            }
        }

        // Payload train
        for sh in &self.subheaders {
            match &sh.payload {
                SubheaderPayload::Sdu(sdu) => buf.push_bytes(sdu),
                SubheaderPayload::ActDeact(ce) => ce.to_bitbuf(buf),
                SubheaderPayload::UeConResId(ce) => ce.to_bitbuf(buf),
                SubheaderPayload::TaCommand(ce) => ce.to_bitbuf(buf),
                SubheaderPayload::ExtPowerHeadroom(ce) => ce.to_bitbuf(buf),
                SubheaderPayload::PowerHeadroom(ce) => ce.to_bitbuf(buf),
                SubheaderPayload::CRnti(ce) => ce.to_bitbuf(buf),
                SubheaderPayload::TruncatedBsr(ce) | SubheaderPayload::ShortBsr(ce) => ce.to_bitbuf(buf),
                SubheaderPayload::LongBsr(ce) => ce.to_bitbuf(buf),
                SubheaderPayload::MchSchedInfo(ce) => ce.to_bitbuf(buf)?,
                // DRX Command and padding have no content
                SubheaderPayload::DrxCommand | SubheaderPayload::Padding => {}
            }
        }

        Ok(())
    }

    /// `simultaneous_pucch_pusch` resolves the Extended Power Headroom
    /// ambiguity: the decoder cannot tell from the bits whether a PCell
    /// Type 2 entry is present (see `ExtPowerHeadroom::from_bitbuf`).
    pub fn from_bitbuf(
        chan_type: MacChanType,
        buf: &mut BitReader,
        simultaneous_pucch_pusch: bool,
    ) -> Result<MacPdu, PduCodecErr> {
        // Subheader train: (lcid, recorded length), terminated by E=0
        let mut heads: Vec<(u8, usize)> = Vec::new();
        let mut e_bit = true;
        while e_bit {
            if heads.len() == MAX_PDU_SUBHEADERS {
                return Err(PduCodecErr::TooManyEntries { field: "subheaders", count: heads.len() + 1 });
            }
            buf.read_field(2, "reserved")?;
            e_bit = buf.read_field(1, "e_bit")? != 0;
            let lcid = buf.read_field(5, "lcid")? as u8;
            let class = LcidClass::classify(chan_type, lcid);
            let length = if class.has_length_field(chan_type) {
                unpack_length(buf, e_bit)?
            } else {
                0
            };
            heads.push((lcid, length));
        }

        // Payload train
        let n = heads.len();
        let mut subheaders = Vec::with_capacity(n);
        for (i, (lcid, length)) in heads.into_iter().enumerate() {
            let last = i + 1 == n;
            let payload = match LcidClass::classify(chan_type, lcid) {
                LcidClass::ActDeact => SubheaderPayload::ActDeact(ActivationDeactivation::from_bitbuf(buf)?),
                LcidClass::UeConResId => {
                    SubheaderPayload::UeConResId(UeContentionResolutionId::from_bitbuf(buf)?)
                }
                LcidClass::TaCommand => SubheaderPayload::TaCommand(TimingAdvanceCommand::from_bitbuf(buf)?),
                LcidClass::DrxCommand => SubheaderPayload::DrxCommand,
                LcidClass::Padding => SubheaderPayload::Padding,
                LcidClass::ExtPowerHeadroom => SubheaderPayload::ExtPowerHeadroom(ExtPowerHeadroom::from_bitbuf(
                    buf,
                    simultaneous_pucch_pusch,
                )?),
                LcidClass::PowerHeadroom => SubheaderPayload::PowerHeadroom(PowerHeadroom::from_bitbuf(buf)?),
                LcidClass::CRnti => SubheaderPayload::CRnti(CRnti::from_bitbuf(buf)?),
                LcidClass::TruncatedBsr => SubheaderPayload::TruncatedBsr(TruncatedBsr::from_bitbuf(buf)?),
                LcidClass::ShortBsr => SubheaderPayload::ShortBsr(ShortBsr::from_bitbuf(buf)?),
                LcidClass::LongBsr => SubheaderPayload::LongBsr(LongBsr::from_bitbuf(buf)?),
                LcidClass::MchSchedInfo => {
                    let n_items = if length == 0 {
                        // Only the final subheader may derive its size from
                        // the remaining octets
                        if !last {
                            return Err(PduCodecErr::InconsistentLength { expected: 2, found: 0 });
                        }
                        (buf.bits_remaining() / 8) / 2
                    } else {
                        length / 2
                    };
                    SubheaderPayload::MchSchedInfo(MchSchedulingInfo::from_bitbuf(buf, n_items)?)
                }
                LcidClass::Sdu => {
                    // A zero recorded size marks a tail subheader consuming
                    // the rest of the PDU
                    let n_bytes = if length == 0 { buf.bits_remaining() / 8 } else { length };
                    SubheaderPayload::Sdu(buf.read_bytes(n_bytes, "sdu")?)
                }
            };
            subheaders.push(MacSubheader { lcid, payload });
        }

        Ok(MacPdu { chan_type, subheaders })
    }
}

impl fmt::Display for MacPdu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MacPdu {{ chan: {}, subheaders: [", self.chan_type)?;
        for (i, sh) in self.subheaders.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match &sh.payload {
                SubheaderPayload::Sdu(sdu) => write!(f, "lcid={} sdu[{}]", sh.lcid, sdu.len())?,
                other => write!(f, "lcid={} {:?}", sh.lcid, other)?,
            }
        }
        write!(f, "] }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mac::ces::{EphCell, MchSchedItem};
    use crate::mac::enums::lcid::*;

    fn roundtrip(pdu: &MacPdu, simultaneous_pucch_pusch: bool) -> MacPdu {
        let mut w = BitWriter::new();
        pdu.to_bitbuf(&mut w).unwrap();
        let bytes = w.into_bytes();
        let mut r = BitReader::new(&bytes);
        let decoded = MacPdu::from_bitbuf(pdu.chan_type, &mut r, simultaneous_pucch_pusch).unwrap();
        assert_eq!(r.bits_remaining(), 0);
        decoded
    }

    #[test]
    fn test_dlsch_single_sdu_wire() {
        // Final subheader carries no length: header 0x01, then the SDU bytes
        let pdu = MacPdu {
            chan_type: MacChanType::Dlsch,
            subheaders: vec![MacSubheader {
                lcid: DLSCH_DCCH_LCID,
                payload: SubheaderPayload::Sdu(vec![0xAB, 0xCD]),
            }],
        };
        let mut w = BitWriter::new();
        pdu.to_bitbuf(&mut w).unwrap();
        assert_eq!(w.dump_hex(), "01ABCD");

        assert_eq!(roundtrip(&pdu, false), pdu);
    }

    #[test]
    fn test_ulsch_short_bsr_then_sdu_wire() {
        let pdu = MacPdu {
            chan_type: MacChanType::Ulsch,
            subheaders: vec![
                MacSubheader {
                    lcid: ULSCH_SHORT_BSR_LCID,
                    payload: SubheaderPayload::ShortBsr(ShortBsr {
                        lcg_id: 2,
                        min_buffer_size: 11,
                        max_buffer_size: 12,
                    }),
                },
                MacSubheader {
                    lcid: ULSCH_DCCH_LCID,
                    payload: SubheaderPayload::Sdu(vec![0xFF]),
                },
            ],
        };
        let mut w = BitWriter::new();
        pdu.to_bitbuf(&mut w).unwrap();
        assert_eq!(w.dump_hex(), "3D0182FF");

        // BSR payloads decode to the quantization interval, so compare fields
        let decoded = roundtrip(&pdu, false);
        assert_eq!(decoded.subheaders.len(), 2);
        match &decoded.subheaders[0].payload {
            SubheaderPayload::ShortBsr(bsr) => {
                assert_eq!(bsr.lcg_id, 2);
                assert_eq!(bsr.min_buffer_size, 10);
                assert_eq!(bsr.max_buffer_size, 12);
            }
            other => panic!("expected ShortBsr, got {:?}", other),
        }
        assert_eq!(decoded.subheaders[1].payload, SubheaderPayload::Sdu(vec![0xFF]));
    }

    #[test]
    fn test_dlsch_ta_command_only_wire() {
        let pdu = MacPdu {
            chan_type: MacChanType::Dlsch,
            subheaders: vec![MacSubheader {
                lcid: DLSCH_TA_COMMAND_LCID,
                payload: SubheaderPayload::TaCommand(TimingAdvanceCommand { ta: 31 }),
            }],
        };
        let mut w = BitWriter::new();
        pdu.to_bitbuf(&mut w).unwrap();
        assert_eq!(w.dump_hex(), "1D1F");

        assert_eq!(roundtrip(&pdu, false), pdu);
    }

    #[test]
    fn test_dlsch_ce_train_roundtrip() {
        let pdu = MacPdu {
            chan_type: MacChanType::Dlsch,
            subheaders: vec![
                MacSubheader {
                    lcid: DLSCH_ACTIVATION_DEACTIVATION_LCID,
                    payload: SubheaderPayload::ActDeact(ActivationDeactivation {
                        c1: true,
                        c4: true,
                        ..Default::default()
                    }),
                },
                MacSubheader {
                    lcid: DLSCH_UE_CONTENTION_RESOLUTION_ID_LCID,
                    payload: SubheaderPayload::UeConResId(UeContentionResolutionId { id: 0xA1B2_C3D4_E5F6 }),
                },
                MacSubheader {
                    lcid: DLSCH_DRX_COMMAND_LCID,
                    payload: SubheaderPayload::DrxCommand,
                },
                MacSubheader {
                    lcid: DLSCH_DCCH_LCID,
                    payload: SubheaderPayload::Sdu(vec![1, 2, 3, 4, 5]),
                },
            ],
        };
        assert_eq!(roundtrip(&pdu, false), pdu);
    }

    #[test]
    fn test_ulsch_eph_roundtrip_with_length() {
        // EPH is the one UL-SCH CE that carries a length field mid-train
        let mut scell = [None; 7];
        scell[2] = Some(EphCell { p: true, v: false, ph: 12, p_cmax: Some(34) });
        let pdu = MacPdu {
            chan_type: MacChanType::Ulsch,
            subheaders: vec![
                MacSubheader {
                    lcid: ULSCH_EXT_POWER_HEADROOM_REPORT_LCID,
                    payload: SubheaderPayload::ExtPowerHeadroom(ExtPowerHeadroom {
                        pcell_type_2: None,
                        pcell_type_1: EphCell { p: false, v: false, ph: 40, p_cmax: Some(21) },
                        scell,
                    }),
                },
                MacSubheader {
                    lcid: ULSCH_C_RNTI_LCID,
                    payload: SubheaderPayload::CRnti(CRnti { c_rnti: 0x1234 }),
                },
                MacSubheader {
                    lcid: ULSCH_DCCH_LCID,
                    payload: SubheaderPayload::Sdu(vec![0xDE, 0xAD]),
                },
            ],
        };
        assert_eq!(roundtrip(&pdu, false), pdu);

        // Header train: 3 subheaders, EPH length byte present (len 5 < 128)
        // sh0: R/E/LCID + F/L = 2 bytes, sh1: 1 byte, sh2 (last): 1 byte
        let mut w = BitWriter::new();
        pdu.to_bitbuf(&mut w).unwrap();
        let bytes = w.as_bytes();
        assert_eq!(bytes[1], 5); // F=0, L=5
    }

    #[test]
    fn test_ulsch_power_headroom_and_long_bsr() {
        let pdu = MacPdu {
            chan_type: MacChanType::Ulsch,
            subheaders: vec![
                MacSubheader {
                    lcid: ULSCH_POWER_HEADROOM_REPORT_LCID,
                    payload: SubheaderPayload::PowerHeadroom(PowerHeadroom { ph: 63 }),
                },
                MacSubheader {
                    lcid: ULSCH_LONG_BSR_LCID,
                    payload: SubheaderPayload::LongBsr(LongBsr {
                        min_buffer_size: [150_000; 4],
                        max_buffer_size: [150_000; 4],
                    }),
                },
            ],
        };
        // The 150000-byte bucket is the one BSR value that survives a strict
        // equality round-trip
        assert_eq!(roundtrip(&pdu, false), pdu);
    }

    #[test]
    fn test_mch_sched_info_final_subheader_sizes_from_remainder() {
        let pdu = MacPdu {
            chan_type: MacChanType::Mch,
            subheaders: vec![MacSubheader {
                lcid: MCH_SCHEDULING_INFORMATION_LCID,
                payload: SubheaderPayload::MchSchedInfo(MchSchedulingInfo {
                    items: vec![
                        MchSchedItem { lcid: 3, stop_mch: 500 },
                        MchSchedItem { lcid: 4, stop_mch: 1000 },
                        MchSchedItem { lcid: 5, stop_mch: 2047 },
                    ],
                }),
            }],
        };
        assert_eq!(roundtrip(&pdu, false), pdu);
    }

    #[test]
    fn test_mch_sched_info_mid_train() {
        let pdu = MacPdu {
            chan_type: MacChanType::Mch,
            subheaders: vec![
                MacSubheader {
                    lcid: MCH_SCHEDULING_INFORMATION_LCID,
                    payload: SubheaderPayload::MchSchedInfo(MchSchedulingInfo {
                        items: vec![MchSchedItem { lcid: 1, stop_mch: 7 }],
                    }),
                },
                MacSubheader {
                    lcid: 0x01,
                    payload: SubheaderPayload::Sdu(vec![9, 8, 7]),
                },
            ],
        };
        assert_eq!(roundtrip(&pdu, false), pdu);
    }

    #[test]
    fn test_mch_sched_info_zero_length_mid_train_rejected() {
        // Hand-build a header train where the scheduling info subheader is
        // not last but claims zero length
        let mut w = BitWriter::new();
        w.push_value(0, 2);
        w.push_value(1, 1); // E=1
        w.push_value(MCH_SCHEDULING_INFORMATION_LCID as u32, 5);
        w.push_value(0, 1); // F
        w.push_value(0, 7); // L=0
        w.push_value(0, 2);
        w.push_value(0, 1); // E=0
        w.push_value(0x01, 5);
        w.push_value(0xAA, 8); // payload byte for the tail SDU

        let bytes = w.into_bytes();
        let mut r = BitReader::new(&bytes);
        assert_eq!(
            MacPdu::from_bitbuf(MacChanType::Mch, &mut r, false),
            Err(PduCodecErr::InconsistentLength { expected: 2, found: 0 })
        );
    }

    #[test]
    fn test_unknown_dl_lcid_decodes_as_sdu() {
        // LCID 0x0A has no CE on DL-SCH; bytes pass through
        let mut w = BitWriter::new();
        w.push_value(0, 2);
        w.push_value(0, 1);
        w.push_value(0x0A, 5);
        w.push_value(0x55, 8);
        w.push_value(0x66, 8);

        let bytes = w.into_bytes();
        let mut r = BitReader::new(&bytes);
        let pdu = MacPdu::from_bitbuf(MacChanType::Dlsch, &mut r, false).unwrap();
        assert_eq!(pdu.subheaders.len(), 1);
        assert_eq!(pdu.subheaders[0].payload, SubheaderPayload::Sdu(vec![0x55, 0x66]));
    }

    #[test]
    fn test_padding_produces_and_consumes_nothing() {
        let pdu = MacPdu {
            chan_type: MacChanType::Ulsch,
            subheaders: vec![
                MacSubheader {
                    lcid: ULSCH_SHORT_BSR_LCID,
                    payload: SubheaderPayload::ShortBsr(ShortBsr {
                        lcg_id: 0,
                        min_buffer_size: 150_000,
                        max_buffer_size: 150_000,
                    }),
                },
                MacSubheader { lcid: ULSCH_PADDING_LCID, payload: SubheaderPayload::Padding },
            ],
        };
        let mut w = BitWriter::new();
        pdu.to_bitbuf(&mut w).unwrap();
        // two header bytes + one BSR byte
        assert_eq!(w.len_bits(), 24);
        assert_eq!(roundtrip(&pdu, false), pdu);
    }

    #[test]
    fn test_length_field_idempotence() {
        for length in [0usize, 1, 42, 127, 128, 129, 1000, 16383, 32767] {
            let mut w = BitWriter::new();
            pack_length(length, &mut w).unwrap();
            assert_eq!(w.len_bits(), if length < 128 { 8 } else { 16 });

            let bytes = w.into_bytes();
            let mut r = BitReader::new(&bytes);
            assert_eq!(unpack_length(&mut r, true).unwrap(), length);
        }
        assert!(pack_length(1 << 15, &mut BitWriter::new()).is_err());
    }

    #[test]
    fn test_subheader_cap() {
        let pdu = MacPdu {
            chan_type: MacChanType::Dlsch,
            subheaders: vec![
                MacSubheader { lcid: 0x01, payload: SubheaderPayload::Sdu(vec![0]) };
                MAX_PDU_SUBHEADERS + 1
            ],
        };
        let mut w = BitWriter::new();
        assert_eq!(
            pdu.to_bitbuf(&mut w),
            Err(PduCodecErr::TooManyEntries { field: "subheaders", count: MAX_PDU_SUBHEADERS + 1 })
        );
    }

    #[test]
    fn test_payload_illegal_for_lcid() {
        // A TA command payload under the DRX LCID must not encode
        let pdu = MacPdu {
            chan_type: MacChanType::Dlsch,
            subheaders: vec![MacSubheader {
                lcid: DLSCH_DRX_COMMAND_LCID,
                payload: SubheaderPayload::TaCommand(TimingAdvanceCommand { ta: 1 }),
            }],
        };
        let mut w = BitWriter::new();
        assert_eq!(
            pdu.to_bitbuf(&mut w),
            Err(PduCodecErr::InvalidValue { field: "payload", value: DLSCH_DRX_COMMAND_LCID as u64 })
        );
    }

    #[test]
    fn test_truncated_header_train() {
        // E=1 promises another subheader that never arrives
        let mut w = BitWriter::new();
        w.push_value(0, 2);
        w.push_value(1, 1);
        w.push_value(ULSCH_C_RNTI_LCID as u32, 5);

        let bytes = w.into_bytes();
        let mut r = BitReader::new(&bytes);
        assert!(matches!(
            MacPdu::from_bitbuf(MacChanType::Ulsch, &mut r, false),
            Err(PduCodecErr::BufferEnded { .. })
        ));
    }

    #[test]
    fn test_sdu_with_long_form_length() {
        let sdu: Vec<u8> = (0..200u16).map(|v| v as u8).collect();
        let pdu = MacPdu {
            chan_type: MacChanType::Dlsch,
            subheaders: vec![
                MacSubheader { lcid: 0x02, payload: SubheaderPayload::Sdu(sdu) },
                MacSubheader { lcid: 0x03, payload: SubheaderPayload::Sdu(vec![0x11]) },
            ],
        };
        assert_eq!(roundtrip(&pdu, false), pdu);
    }

    #[test]
    fn test_ulsch_eph_roundtrip_simultaneous_pucch_pusch() {
        let pdu = MacPdu {
            chan_type: MacChanType::Ulsch,
            subheaders: vec![MacSubheader {
                lcid: ULSCH_EXT_POWER_HEADROOM_REPORT_LCID,
                payload: SubheaderPayload::ExtPowerHeadroom(ExtPowerHeadroom {
                    pcell_type_2: Some(EphCell { p: true, v: true, ph: 17, p_cmax: None }),
                    pcell_type_1: EphCell { p: false, v: true, ph: 3, p_cmax: None },
                    scell: [None; 7],
                }),
            }],
        };
        assert_eq!(roundtrip(&pdu, true), pdu);
    }
}
