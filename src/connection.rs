// ABOUTME: Framed PDU I/O over a byte stream for the simulated SMSC sessions
// ABOUTME: Buffered reader for inbound PDUs plus a shared, lock-guarded writer for outbound ones

use crate::codec::{CodecError, Pdu};
use bytes::{Buf, BytesMut};
use std::io::{self, Cursor};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufWriter};
use tokio::sync::Mutex;
use tracing::debug;

/// Reading half of a session's socket.
///
/// Owned exclusively by the session's read loop, so PDUs are handed out
/// strictly in arrival order.
#[derive(Debug)]
pub struct PduReader<R> {
    stream: R,

    // The buffer for reading frames. Bytes past the end of the PDU just
    // parsed stay here for the next call to `read_pdu`.
    buffer: BytesMut,
}

impl<R: AsyncRead + Unpin> PduReader<R> {
    pub fn new(stream: R) -> Self {
        PduReader {
            stream,
            buffer: BytesMut::with_capacity(4 * 1024),
        }
    }

    /// Read a single PDU from the underlying stream.
    ///
    /// Waits until the whole header and then `command_length - 16` body bytes
    /// have arrived. Returns `None` once the peer closes the stream, including
    /// when it closes in the middle of a PDU; the partial bytes are dropped.
    pub async fn read_pdu(&mut self) -> Result<Option<Pdu>, CodecError> {
        loop {
            if let Some(pdu) = self.parse_pdu()? {
                return Ok(Some(pdu));
            }

            // `0` indicates "end of stream".
            if 0 == self.stream.read_buf(&mut self.buffer).await? {
                if !self.buffer.is_empty() {
                    debug!(
                        pending = self.buffer.len(),
                        "peer closed the stream inside a PDU"
                    );
                }
                return Ok(None);
            }
        }
    }

    /// Tries to parse a PDU from the buffer. `Ok(None)` means more data is
    /// needed; `Err` means the header is unusable and the session must end.
    fn parse_pdu(&mut self) -> Result<Option<Pdu>, CodecError> {
        let mut buf = Cursor::new(&self.buffer[..]);

        match Pdu::parse(&mut buf) {
            Ok(pdu) => {
                let len = pdu.header.command_length as usize;
                self.buffer.advance(len);
                Ok(Some(pdu))
            }
            Err(CodecError::Incomplete) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Writing half of a session's socket.
///
/// Cloned into every task that emits PDUs on the session (the read loop and
/// each pending delivery receipt). All writes go through one async mutex, so
/// a PDU is always written and flushed as a unit.
#[derive(Debug)]
pub struct PduWriter<W> {
    stream: Arc<Mutex<BufWriter<W>>>,
}

impl<W> Clone for PduWriter<W> {
    fn clone(&self) -> Self {
        PduWriter {
            stream: Arc::clone(&self.stream),
        }
    }
}

impl<W: AsyncWrite + Unpin> PduWriter<W> {
    pub fn new(stream: W) -> Self {
        PduWriter {
            stream: Arc::new(Mutex::new(BufWriter::new(stream))),
        }
    }

    /// Write header and body as one logical write.
    pub async fn write_pdu(&self, pdu: &Pdu) -> io::Result<()> {
        let bytes = pdu.to_bytes();
        let mut stream = self.stream.lock().await;
        stream.write_all(&bytes).await?;
        stream.flush().await
    }

    /// No task is in the middle of writing.
    #[cfg(test)]
    pub(crate) fn is_idle(&self) -> bool {
        self.stream.try_lock().is_ok()
    }

    /// Flush and close the write direction of the socket.
    pub async fn shutdown(&self) -> io::Result<()> {
        let mut stream = self.stream.lock().await;
        stream.shutdown().await
    }
}
