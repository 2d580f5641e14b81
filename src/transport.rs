//! Output transport
//!
//! Streams a rendered payload to a sink in fixed-size chunks, awaiting each
//! write before issuing the next. Some sinks silently drop data when written
//! faster than they drain (seen on slow virtualized stdout streams), so the
//! acknowledged chunking is a backpressure discipline, not an optimization;
//! do not collapse it into a single unbounded write.

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::{Error, Result};

/// Default chunk size, the empirically safe value for slow stream sinks
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Deliver `payload` to `sink` in `chunk_size`-byte acknowledged writes.
///
/// Chunks go out strictly in offset order. The first failed write aborts the
/// remainder and surfaces [`Error::Transport`]; success means every byte was
/// accepted by the sink.
pub async fn deliver<W>(sink: &mut W, payload: &[u8], chunk_size: usize) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    // chunks() panics on zero
    let chunk_size = chunk_size.max(1);

    for chunk in payload.chunks(chunk_size) {
        sink.write_all(chunk).await.map_err(Error::Transport)?;
        sink.flush().await.map_err(Error::Transport)?;
    }

    Ok(())
}
