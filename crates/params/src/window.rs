//! Window sizing for the buffered stream adapters

/// Capacity of each fixed window buffer owned by an adapter
pub const DEFAULT_WINDOW_CAPACITY: usize = 4096;

/// Largest block size the single padding-length byte can encode
pub const MAX_PADDED_BLOCK_SIZE: usize = u8::MAX as usize;

/// Number of whole blocks a block adapter window must be able to hold.
///
/// The block decryptor withholds one block while it accumulates the next.
pub const MIN_WINDOW_BLOCKS: usize = 2;
