//! Verbatim byte forwarding for streamed responses

use std::io::{self, ErrorKind, Read, Write};

const CHUNK_SIZE: usize = 8 * 1024;

/// Copy `upstream` to `out` chunk by chunk until upstream ends.
///
/// Each chunk is flushed as soon as it is written so events reach the caller
/// without buffering delay. Returns the number of bytes forwarded. A read
/// error ends the stream and is returned to the caller.
pub fn pump<R, W>(upstream: &mut R, out: &mut W) -> io::Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut buf = [0u8; CHUNK_SIZE];
    let mut forwarded = 0u64;

    loop {
        let n = match upstream.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                tracing::error!(forwarded, "Stream error: {}", e);
                return Err(e);
            }
        };
        out.write_all(&buf[..n])?;
        out.flush()?;
        forwarded += n as u64;
    }

    out.flush()?;
    tracing::debug!(forwarded, "upstream stream ended");
    Ok(forwarded)
}
