use lte_core::{BitReader, BitWriter, PduCodecErr};

/// 36.321 §6.1.3.1 Buffer Size levels, upper bound in bytes per 6-bit index.
/// Index 63 is the ">= 150000 bytes" bucket.
pub const BSR_MAX_BUFFER_SIZE: [u32; 64] = [
         0,     10,     12,     14,     17,     19,     22,     26,
        31,     36,     42,     49,     57,     67,     78,     91,
       107,    125,    146,    171,    200,    234,    274,    321,
       376,    440,    515,    603,    706,    826,    967,   1132,
      1326,   1552,   1817,   2127,   2490,   2915,   3413,   3995,
      4677,   5476,   6411,   7505,   8787,  10287,  12043,  14099,
     16507,  19325,  22624,  26487,  31009,  36304,  42502,  49759,
     58255,  68201,  79864,  93479, 109439, 128125, 150000, 150000,
];

/// Lower bound in bytes per 6-bit index (exclusive)
pub const BSR_MIN_BUFFER_SIZE: [u32; 64] = [
         0,      0,     10,     12,     14,     17,     19,     22,
        26,     31,     36,     42,     49,     57,     67,     78,
        91,    107,    125,    146,    171,    200,    234,    274,
       321,    376,    440,    515,    603,    706,    826,    967,
      1132,   1326,   1552,   1817,   2127,   2490,   2915,   3413,
      3995,   4677,   5476,   6411,   7505,   8787,  10287,  12043,
     14099,  16507,  19325,  22624,  26487,  31009,  36304,  42502,
     49759,  58255,  68201,  79864,  93479, 109439, 128125, 150000,
];

/// Quantize a `[min, max]` buffer occupancy onto the 6-bit buffer size index:
/// the last index whose interval covers the range. 63 when no index does.
pub fn buffer_size_index(min_buffer_size: u32, max_buffer_size: u32) -> u8 {
    let mut idx = 0u8;
    for i in 0..64 {
        if min_buffer_size > BSR_MIN_BUFFER_SIZE[i] && max_buffer_size <= BSR_MAX_BUFFER_SIZE[i] {
            idx = i as u8;
        }
    }
    if idx == 0 {
        63
    } else {
        idx
    }
}

/// 36.321 §6.1.3.1 Short Buffer Status Report: one LCG ID field and one
/// corresponding Buffer Size field. Unpacking reports the quantization
/// interval rather than a single byte count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShortBsr {
    /// 2 bits
    pub lcg_id: u8,
    pub min_buffer_size: u32,
    pub max_buffer_size: u32,
}

/// The Truncated BSR shares the Short BSR layout
pub type TruncatedBsr = ShortBsr;

impl ShortBsr {
    pub fn from_bitbuf(buf: &mut BitReader) -> Result<Self, PduCodecErr> {
        let lcg_id = buf.read_field(2, "lcg_id")? as u8;
        let idx = buf.read_field(6, "buffer_size_idx")? as usize;
        Ok(ShortBsr {
            lcg_id,
            min_buffer_size: BSR_MIN_BUFFER_SIZE[idx],
            max_buffer_size: BSR_MAX_BUFFER_SIZE[idx],
        })
    }

    pub fn to_bitbuf(&self, buf: &mut BitWriter) {
        buf.push_value(self.lcg_id as u32, 2);
        buf.push_value(buffer_size_index(self.min_buffer_size, self.max_buffer_size) as u32, 6);
    }
}

/// 36.321 §6.1.3.1 Long Buffer Status Report: four Buffer Size fields for
/// LCG IDs #0 through #3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LongBsr {
    pub min_buffer_size: [u32; 4],
    pub max_buffer_size: [u32; 4],
}

impl LongBsr {
    pub fn from_bitbuf(buf: &mut BitReader) -> Result<Self, PduCodecErr> {
        let mut s = LongBsr::default();
        for lcg in 0..4 {
            let idx = buf.read_field(6, "buffer_size_idx")? as usize;
            s.min_buffer_size[lcg] = BSR_MIN_BUFFER_SIZE[idx];
            s.max_buffer_size[lcg] = BSR_MAX_BUFFER_SIZE[idx];
        }
        Ok(s)
    }

    pub fn to_bitbuf(&self, buf: &mut BitWriter) {
        for lcg in 0..4 {
            let idx = buffer_size_index(self.min_buffer_size[lcg], self.max_buffer_size[lcg]);
            buf.push_value(idx as u32, 6);
        }
    }
}
