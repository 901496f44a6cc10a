//! Decoded text stream over raw object bytes.

use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll, ready};

use cairn_object::ByteStream;
use futures::{Stream, StreamExt, TryStreamExt};

use crate::encoding::{Decoder, TextEncoding};
use crate::error::{Error, Result};

/// Text content of a resource, decoded chunk by chunk as bytes arrive.
///
/// The first error ends the stream: a fetch failure surfaces as
/// [`Error::StorageAccess`] and invalid input as [`Error::Decode`].
pub struct TextStream {
    path: String,
    bytes: ByteStream,
    decoder: Decoder,
    done: bool,
}

impl TextStream {
    /// Wraps `bytes` fetched from `path`, decoding with `encoding`.
    pub fn new(path: impl Into<String>, encoding: TextEncoding, bytes: ByteStream) -> Self {
        Self {
            path: path.into(),
            bytes,
            decoder: encoding.decoder(),
            done: false,
        }
    }

    /// Absolute path of the resource being read.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Encoding used for decoding.
    pub fn encoding(&self) -> TextEncoding {
        self.decoder.encoding()
    }

    /// Drains the stream into a single string.
    pub async fn read_to_string(self) -> Result<String> {
        self.try_fold(String::new(), |mut text, chunk| async move {
            text.push_str(&chunk);
            Ok(text)
        })
        .await
    }

    fn decode_error(&self, offset: u64) -> Error {
        Error::Decode {
            path: self.path.clone(),
            encoding: self.decoder.encoding(),
            offset,
        }
    }
}

impl Stream for TextStream {
    type Item = Result<String>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            if this.done {
                return Poll::Ready(None);
            }

            match ready!(this.bytes.poll_next_unpin(cx)) {
                Some(Ok(chunk)) => match this.decoder.decode(&chunk) {
                    Ok(text) if text.is_empty() => continue,
                    Ok(text) => return Poll::Ready(Some(Ok(text))),
                    Err(e) => {
                        this.done = true;
                        return Poll::Ready(Some(Err(this.decode_error(e.offset))));
                    }
                },
                Some(Err(source)) => {
                    this.done = true;
                    let error = Error::storage_access(this.path.clone(), source);
                    return Poll::Ready(Some(Err(error)));
                }
                None => {
                    this.done = true;
                    if let Err(e) = this.decoder.finish() {
                        return Poll::Ready(Some(Err(this.decode_error(e.offset))));
                    }
                }
            }
        }
    }
}

impl fmt::Debug for TextStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextStream")
            .field("path", &self.path)
            .field("encoding", &self.decoder.encoding())
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use futures::stream;

    use super::*;

    fn byte_stream(chunks: Vec<Result<Bytes, cairn_object::Error>>) -> ByteStream {
        stream::iter(chunks).boxed()
    }

    #[tokio::test]
    async fn decodes_across_chunks() {
        let bytes = "V1 · init".as_bytes();
        let (head, tail) = bytes.split_at(4);
        let stream = TextStream::new(
            "bucket/V1__init.sql",
            TextEncoding::Utf8,
            byte_stream(vec![
                Ok(Bytes::copy_from_slice(head)),
                Ok(Bytes::copy_from_slice(tail)),
            ]),
        );

        assert_eq!(stream.read_to_string().await.unwrap(), "V1 · init");
    }

    #[tokio::test]
    async fn fetch_failure_mid_stream_is_reported() {
        let mut stream = TextStream::new(
            "bucket/V1__init.sql",
            TextEncoding::Utf8,
            byte_stream(vec![
                Ok(Bytes::from_static(b"create ")),
                Err(cairn_object::Error::connection("reset by peer", "test", true)),
                Ok(Bytes::from_static(b"table")),
            ]),
        );

        assert_eq!(stream.next().await.unwrap().unwrap(), "create ");
        let err = stream.next().await.unwrap().unwrap_err();
        assert!(err.is_storage_access());
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn read_to_string_never_returns_partial_content() {
        let stream = TextStream::new(
            "bucket/V1__init.sql",
            TextEncoding::Utf8,
            byte_stream(vec![
                Ok(Bytes::from_static(b"create ")),
                Err(cairn_object::Error::connection("reset by peer", "test", true)),
            ]),
        );

        assert!(stream.read_to_string().await.is_err());
    }

    #[tokio::test]
    async fn truncated_input_is_a_decode_error() {
        let stream = TextStream::new(
            "bucket/R__view.sql",
            TextEncoding::Utf8,
            byte_stream(vec![Ok(Bytes::from_static(b"ok \xe2\x80"))]),
        );

        let err = stream.read_to_string().await.unwrap_err();
        assert!(matches!(
            err,
            Error::Decode { offset: 3, encoding: TextEncoding::Utf8, .. }
        ));
    }
}
