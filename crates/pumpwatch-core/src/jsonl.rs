use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::SinkError;

/// Serialize each record as one JSON line, truncating any existing file.
///
/// Missing parent directories are created. Returns the number of records
/// written.
///
/// # Errors
///
/// Returns `SinkError` when the file cannot be created or written, or when
/// a record fails to serialize. Either case can leave a partial file
/// behind.
pub fn write_jsonl<T, I>(path: &Path, records: I) -> Result<usize, SinkError>
where
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let io_err = |source: std::io::Error| SinkError::Io {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);

    let mut count = 0usize;
    for record in records {
        let line = serde_json::to_string(&record).map_err(|source| SinkError::Serialize {
            path: path.display().to_string(),
            source,
        })?;
        writeln!(writer, "{line}").map_err(io_err)?;
        count += 1;
    }

    writer.flush().map_err(io_err)?;
    tracing::info!(path = %path.display(), count, "wrote JSON Lines file");
    Ok(count)
}
