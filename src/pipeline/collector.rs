// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use bytes::{Bytes, BytesMut};
use futures::{Stream, TryStreamExt};

use crate::errors::HandlerResult;

/// Drain a chunked byte stream into one contiguous buffer.
///
/// The chunk type may be any byte-like type (`Bytes`, `Vec<u8>`, `&[u8]`,
/// `String`, ...), but one stream carries a single chunk type. A source that
/// yields mixed kinds converts them to `Bytes` before collection. Chunks are
/// copied in arrival order, so the result has exactly the concatenated
/// length. A transport error ends collection with an I/O error.
///
/// The whole object is buffered in memory; there is no size limit.
pub async fn collect_stream<S, B>(stream: S) -> HandlerResult<Bytes>
where
    S: Stream<Item = std::io::Result<B>>,
    B: AsRef<[u8]>,
{
    let buffer = stream
        .try_fold(BytesMut::new(), |mut buffer, chunk| async move {
            buffer.extend_from_slice(chunk.as_ref());
            Ok::<_, std::io::Error>(buffer)
        })
        .await?;

    Ok(buffer.freeze())
}
