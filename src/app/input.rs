//! Input line streaming.

use std::path::Path;
use std::pin::Pin;

use anyhow::{Context, Result};
use futures::Stream;
use log::{info, warn};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

/// Lines of the input file, read lazily.
pub type InputLines = Pin<Box<dyn Stream<Item = String> + Send>>;

/// Opens the domain list at `path`, or stdin when `path` is `-`.
///
/// Lines are yielded as read; unreadable lines (e.g. invalid UTF-8) are
/// logged and skipped.
///
/// # Errors
///
/// Returns an error if the file cannot be opened.
pub async fn open_input(path: &Path) -> Result<InputLines> {
    let reader: Box<dyn AsyncRead + Unpin + Send> = if path.as_os_str() == "-" {
        info!("Reading domains from stdin");
        Box::new(tokio::io::stdin())
    } else {
        let file = tokio::fs::File::open(path)
            .await
            .with_context(|| format!("Failed to open input file: {}", path.display()))?;
        Box::new(file)
    };

    Ok(lines_of(reader))
}

/// Streams the lines of any async reader.
pub fn lines_of<R>(reader: R) -> InputLines
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let lines = BufReader::new(reader).lines();
    Box::pin(futures::stream::unfold(lines, |mut lines| async move {
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => return Some((line, lines)),
                Ok(None) => return None,
                Err(e) => warn!("Failed to read line from input: {e}"),
            }
        }
    }))
}

/// True for lines that name a domain: not blank and not a `#` comment.
pub fn is_domain_line(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && !trimmed.starts_with('#')
}
