/// Stable algorithm IDs (u8) as carried on the wire by the transport layer.
pub mod algorithm_ids {
    pub const NONE: u8    = 0;
    pub const DEFLATE: u8 = 1;
    pub const GZIP: u8    = 2;
    pub const ZSTD: u8    = 3;
    /// First out-of-range id.
    pub const COUNT: u8   = 4;
}

/// Capacity of each output block handed to a codec.
pub const DEFAULT_BLOCK_SIZE: usize = 1024;
/// Smallest usable block. A zlib sync flush needs more than 6 bytes of
/// output space to complete; smaller blocks re-flush forever.
pub const MIN_BLOCK_SIZE: usize = 16;
/// Upper sanity bound for a configured block size (16 MiB).
pub const MAX_BLOCK_SIZE: usize = 16 * 1024 * 1024;

/// Default compression levels.
pub const DEFAULT_LEVEL_DEFLATE: u32 = 6;
pub const DEFAULT_LEVEL_ZSTD: i32 = 5;

/// zlib window size (32 KiB); gzip framing is selected separately.
pub const DEFLATE_WINDOW_BITS: u8 = 15;
