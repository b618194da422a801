//! Stream line readers (non-UTF8-safe).
//!
//! gallery-dl prints whatever file names a site hands it, which is not always
//! valid UTF-8. `BufReader::lines()` would end the reader on the first bad
//! byte, so lines are read as bytes and decoded lossily.

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, trace};

/// Strip the line ending and decode lossily.
fn decode_line(buf: &mut Vec<u8>) -> String {
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    String::from_utf8_lossy(buf).into_owned()
}

/// Forward every line of `stream` into `tx` until EOF or until the receiver
/// is dropped.
#[cfg_attr(not(unix), allow(dead_code))]
pub fn spawn_line_reader(
    stream: impl AsyncRead + Unpin + Send + 'static,
    stream_type: &'static str,
    tx: mpsc::Sender<String>,
) {
    tokio::spawn(async move {
        let mut reader = BufReader::new(stream);
        let mut buf: Vec<u8> = Vec::with_capacity(1024);

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => break,
                Ok(_) => {
                    let line = decode_line(&mut buf);
                    trace!(%stream_type, "{line}");
                    if tx.send(line).await.is_err() {
                        debug!(%stream_type, "line receiver dropped; stopping reader");
                        break;
                    }
                }
                Err(e) => {
                    debug!(%stream_type, error = %e, "stream reader exiting due to read error");
                    break;
                }
            }
        }
    });
}

/// Blocking variant of [`spawn_line_reader`] for platforms without an async
/// pipe type.
#[cfg(not(unix))]
pub fn spawn_blocking_line_reader(
    stream: impl std::io::Read + Send + 'static,
    stream_type: &'static str,
    tx: mpsc::Sender<String>,
) {
    use std::io::BufRead;

    tokio::task::spawn_blocking(move || {
        let mut reader = std::io::BufReader::new(stream);
        let mut buf: Vec<u8> = Vec::with_capacity(1024);

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {
                    let line = decode_line(&mut buf);
                    if tx.blocking_send(line).is_err() {
                        debug!(%stream_type, "line receiver dropped; stopping reader");
                        break;
                    }
                }
                Err(e) => {
                    debug!(%stream_type, error = %e, "stream reader exiting due to read error");
                    break;
                }
            }
        }
    });
}
