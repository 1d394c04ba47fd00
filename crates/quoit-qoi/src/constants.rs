pub const QOI_OP_INDEX: u8 = 0x00;
// 00xxxxxx
pub const QOI_OP_DIFF: u8 = 0x40;
// 01xxxxxx
pub const QOI_OP_LUMA: u8 = 0x80;
// 10xxxxxx
pub const QOI_OP_RUN: u8 = 0xc0;
// 11xxxxxx
pub const QOI_OP_RGB: u8 = 0xfe;
// 11111110
pub const QOI_OP_RGBA: u8 = 0xff; // 11111111

pub const QOI_MASK_2: u8 = 0xc0; // (11)000000

pub const QOI_MAGIC: [u8; 4] = *b"qoif";
pub const QOI_HEADER_SIZE: usize = 14;
pub const QOI_PADDING: usize = 8;
pub const QOI_END_MARKER: [u8; QOI_PADDING] = [0, 0, 0, 0, 0, 0, 0, 1];

/// Slots in the pixel history cache
pub const QOI_CACHE_SIZE: usize = 64;
/// Longest run a single RUN chunk can carry, 6 bit field with a bias of 1,
/// minus the two values taken by the RGB and RGBA tags
pub const QOI_MAX_RUN: usize = 62;
