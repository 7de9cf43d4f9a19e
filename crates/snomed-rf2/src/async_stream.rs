//! Bridges the synchronous `csv` reader into an async, cancellable stream.
//!
//! Each RF2 file family is streamed by a [`Rf2Stream`]: a blocking task
//! owns the `csv::Reader` and feeds parsed rows to the async side
//! through a bounded channel, so the consumer never waits on file I/O
//! on the runtime's worker threads and memory stays bounded by the
//! channel capacity rather than the file size.

use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::parser::Rf2Record;
use crate::types::{ParseStats, Rf2Error, Rf2Result};

/// Channel capacity between the blocking reader task and the async
/// consumer. Bounds in-flight memory to a small constant regardless of
/// file size.
const CHANNEL_CAPACITY: usize = 16;

/// One parsed row plus its 1-based yielded-row sequence number.
///
/// The sequence number counts only successfully-parsed rows; malformed
/// rows are dropped without advancing it (see [`ParseStats::malformed`]).
pub struct Rf2Row<T> {
    /// 1-based count of rows yielded so far, including this one.
    pub line_number: u64,
    /// The parsed record.
    pub record: T,
}

/// An async, cancellable stream of parsed RF2 rows from one file.
pub struct Rf2Stream<T> {
    rx: mpsc::Receiver<Rf2Result<Rf2Row<T>>>,
    handle: Option<JoinHandle<ParseStats>>,
}

impl<T: Rf2Record + Send + 'static> Rf2Stream<T> {
    /// Opens `path` and begins streaming in a blocking task.
    ///
    /// Header validation and all file I/O happen off the async runtime.
    /// Cancellation is checked before every row read; dropping the
    /// stream also stops the blocking task once its next `send` fails.
    pub fn open(path: impl AsRef<Path>, cancel: CancellationToken) -> Self {
        let path: PathBuf = path.as_ref().to_path_buf();
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);

        let handle = tokio::task::spawn_blocking(move || Self::run(path, cancel, tx));

        Rf2Stream {
            rx,
            handle: Some(handle),
        }
    }

    fn run(
        path: PathBuf,
        cancel: CancellationToken,
        tx: mpsc::Sender<Rf2Result<Rf2Row<T>>>,
    ) -> ParseStats {
        let mut stats = ParseStats::default();

        let file = match std::fs::File::open(&path) {
            Ok(f) => f,
            Err(e) => {
                let _ = tx.blocking_send(Err(Rf2Error::Io(e)));
                return stats;
            }
        };
        let buffered = std::io::BufReader::with_capacity(64 * 1024, file);

        let mut reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::None)
            .from_reader(buffered);

        let mut record = StringRecord::new();
        loop {
            if cancel.is_cancelled() {
                break;
            }

            match reader.read_record(&mut record) {
                Ok(true) => {
                    stats.lines_read += 1;

                    if record.iter().all(|f| f.trim().is_empty()) {
                        continue;
                    }

                    match T::from_record(&record) {
                        Ok(parsed) => {
                            stats.yielded += 1;
                            let row = Rf2Row {
                                line_number: stats.yielded as u64,
                                record: parsed,
                            };
                            if tx.blocking_send(Ok(row)).is_err() {
                                // Receiver dropped: stream was abandoned.
                                break;
                            }
                        }
                        Err(_) => {
                            // Malformed row, silently dropped.
                            continue;
                        }
                    }
                }
                Ok(false) => break,
                Err(e) => {
                    let _ = tx.blocking_send(Err(Rf2Error::Csv(e)));
                    break;
                }
            }
        }

        stats
    }

    /// Awaits the next row, or `None` at end of stream.
    pub async fn next(&mut self) -> Option<Rf2Result<Rf2Row<T>>> {
        self.rx.recv().await
    }

    /// Consumes the stream and returns the final parse statistics.
    ///
    /// Must be called after `next()` has returned `None` (or the caller
    /// has stopped polling), so the blocking task has finished and its
    /// join handle is ready.
    pub async fn into_stats(mut self) -> ParseStats {
        self.rx.close();
        if let Some(handle) = self.handle.take() {
            handle.await.unwrap_or_default()
        } else {
            ParseStats::default()
        }
    }
}
