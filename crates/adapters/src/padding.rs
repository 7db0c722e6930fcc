//! Block padding trailer
//!
//! A trailer of `n` bytes (`1 <= n <= block_size`) is `n - 1` zero bytes
//! followed by one byte holding `n`. Input that is already block aligned
//! still receives a full block of padding, so the trailer is never empty.

use subtle::{Choice, ConstantTimeEq};

use dcrypt_stream_api::error::{Error, Result};

/// Trailer length for `data_len` bytes of payload
pub fn pad_len(data_len: usize, block_size: usize) -> usize {
    block_size - (data_len % block_size)
}

/// Writes the trailer for `data_len` payload bytes into `spare`.
///
/// Returns the trailer length. Fails with [`Error::BufferExhausted`] when
/// the trailer does not fit, which means the window is too small for the
/// block size.
pub fn write_trailer(spare: &mut [u8], data_len: usize, block_size: usize) -> Result<usize> {
    let n = pad_len(data_len, block_size);
    if n > spare.len() || n > usize::from(u8::MAX) {
        return Err(Error::BufferExhausted {
            context: "padding trailer",
            required: n,
            capacity: spare.len(),
        });
    }
    spare[..n - 1].fill(0);
    spare[n - 1] = n as u8;
    Ok(n)
}

/// Verifies the trailer at the end of `tail` and returns its length.
///
/// `tail` is the plaintext of the final block(s). Fails with
/// [`Error::Corrupted`] when the length byte is zero, exceeds `block_size`
/// or the tail, or any fill byte is non-zero.
pub fn strip(tail: &[u8], block_size: usize) -> Result<usize> {
    let Some(&last) = tail.last() else {
        return Err(corrupted("no plaintext to strip padding from".into()));
    };
    let n = usize::from(last);
    if n == 0 || n > block_size || n > tail.len() {
        return Err(corrupted(format!(
            "padding length {} is invalid for block size {}",
            n, block_size
        )));
    }

    let fill = &tail[tail.len() - n..tail.len() - 1];
    let zeroed = fill
        .iter()
        .fold(Choice::from(1u8), |acc, byte| acc & byte.ct_eq(&0));
    if !bool::from(zeroed) {
        return Err(corrupted("padding fill bytes are not zero".into()));
    }
    Ok(n)
}

fn corrupted(details: String) -> Error {
    Error::Corrupted {
        context: "padding",
        details,
    }
}
