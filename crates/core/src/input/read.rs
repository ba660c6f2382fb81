use std::fs;
use std::io::{self, Read};
use std::path::Path;

use crate::error::RejectReason;
use crate::types::CheckOptions;

const READ_CHUNK: usize = 16 * 1024;
const MAX_PREALLOC: u64 = 1024 * 1024;

/// Size and content checks shared by on-disk and in-memory inputs.
pub(crate) fn screen_bytes(bytes: &[u8], options: &CheckOptions) -> Result<(), RejectReason> {
    if let Some(max_file_size) = options.max_file_size
        && bytes.len() as u64 > max_file_size
    {
        return Err(RejectReason::TooLarge {
            size: bytes.len() as u64,
            max: max_file_size,
        });
    }
    if options.skip_binary && bytes.contains(&0) {
        return Err(RejectReason::Binary);
    }
    Ok(())
}

/// Reads one input file, honouring the size cap and the binary check.
///
/// The size is checked against metadata first and again while reading, so a
/// file that grows after `stat` is still cut off at `max_file_size + 1` bytes.
pub(crate) fn read_source(path: &Path, options: &CheckOptions) -> Result<Vec<u8>, RejectReason> {
    let metadata = fs::metadata(path).map_err(|err| RejectReason::from_io(&err))?;
    if !metadata.is_file() {
        return Err(RejectReason::Unreadable("not a regular file".to_string()));
    }

    let max_file_size = options.max_file_size;
    if let Some(max) = max_file_size
        && metadata.len() > max
    {
        return Err(RejectReason::TooLarge {
            size: metadata.len(),
            max,
        });
    }

    let mut file = fs::File::open(path).map_err(|err| RejectReason::from_io(&err))?;

    let mut bytes: Vec<u8> = Vec::with_capacity(metadata.len().min(MAX_PREALLOC) as usize);
    let mut total_read: u64 = 0;
    let mut buf = [0u8; READ_CHUNK];
    loop {
        let mut limit = buf.len() as u64;
        if let Some(max) = max_file_size {
            let remaining = max.saturating_add(1).saturating_sub(total_read);
            limit = limit.min(remaining);
        }
        if limit == 0 {
            break;
        }

        let n = match file.read(&mut buf[..limit as usize]) {
            Ok(n) => n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(RejectReason::from_io(&err)),
        };
        if n == 0 {
            break;
        }
        if options.skip_binary && buf[..n].contains(&0) {
            return Err(RejectReason::Binary);
        }
        bytes.extend_from_slice(&buf[..n]);
        total_read = total_read.saturating_add(n as u64);
    }

    if let Some(max) = max_file_size
        && total_read > max
    {
        return Err(RejectReason::TooLarge {
            size: total_read,
            max,
        });
    }

    Ok(bytes)
}
