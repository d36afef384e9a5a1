// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! PDF storage helpers for the BookTrack follow-up system.
//!
//! Uploaded scans are written under the configured upload directory with a
//! deterministic name derived from the book number, the book-date year,
//! and the PDF sequence number:
//!
//! ```text
//! {bookNo}.{year}.{count+1}-{YYYY-MM-DD_HH-MM-SS}.pdf
//! ```
//!
//! The name scheme must stay bit-exact: stored paths reference it and the
//! scanner-side tooling expects it. A pre-existing file at the computed
//! destination is a hard failure, never an overwrite.
//!
//! The original scanner-side copy of an upload is removed best-effort a
//! few seconds after the upload lands, from a detached task. Its outcome
//! never reaches the request that spawned it.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{Datelike, Local, NaiveDate};
use tracing::{info, warn};

/// Delay before the scanner-side source file is removed.
///
/// The scanner software may still hold the file open right after an
/// upload; the delay sidesteps that lock.
const SOURCE_CLEANUP_DELAY: Duration = Duration::from_secs(3);

/// Errors from PDF storage operations.
#[derive(Debug, thiserror::Error)]
pub enum FileStorageError {
    /// The computed destination path already exists.
    #[error("PDF already exists at {path}")]
    AlreadyExists {
        /// The colliding destination path.
        path: String,
    },
    /// The book date could not be parsed for year extraction.
    #[error("invalid book date '{value}'; expected YYYY-MM-DD")]
    InvalidBookDate {
        /// The offending value.
        value: String,
    },
    /// An underlying filesystem operation failed.
    #[error("file storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Writes an uploaded PDF into `dest_dir` under its deterministic name.
///
/// `count` is the number of PDF rows the book already has; the filename
/// carries `count + 1`. The timestamp component uses local time, so two
/// sequential saves of the same book never collide unless they land in
/// the same second — and even then the existence check turns that into an
/// explicit error rather than an overwrite.
///
/// Returns the full destination path as stored in the PDF row.
///
/// # Errors
///
/// Returns `AlreadyExists` on a true path collision, `InvalidBookDate`
/// if `book_date` is not `YYYY-MM-DD`, or `Io` on any write failure.
pub fn save_book_pdf(
    content: &[u8],
    book_no: &str,
    book_date: &str,
    count: i64,
    dest_dir: &Path,
) -> Result<PathBuf, FileStorageError> {
    let year: i32 = NaiveDate::parse_from_str(book_date, "%Y-%m-%d")
        .map_err(|_| FileStorageError::InvalidBookDate {
            value: book_date.to_string(),
        })?
        .year();
    let timestamp: String = Local::now().format("%Y-%m-%d_%H-%M-%S").to_string();
    let filename: String = format!("{book_no}.{year}.{}-{timestamp}.pdf", count + 1);
    let destination: PathBuf = dest_dir.join(&filename);

    // create_new makes the existence check and the open one atomic step.
    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&destination)
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::AlreadyExists {
                FileStorageError::AlreadyExists {
                    path: destination.display().to_string(),
                }
            } else {
                FileStorageError::Io(e)
            }
        })?;
    file.write_all(content)?;

    info!(path = %destination.display(), "Stored uploaded PDF");
    Ok(destination)
}

/// Schedules the best-effort removal of a scanner-side source file.
///
/// The file is expected at `{source_dir}/{username}/{original_name}`. The
/// removal runs on a detached task after a short delay; failures are
/// logged and swallowed. The upload that triggered this has already been
/// persisted, so nothing here may surface to the caller.
pub fn spawn_source_cleanup(source_dir: &Path, username: &str, original_name: &str) {
    if original_name.is_empty() {
        return;
    }
    let scanner_path: PathBuf = source_dir.join(username).join(original_name);
    tokio::spawn(async move {
        tokio::time::sleep(SOURCE_CLEANUP_DELAY).await;
        match std::fs::remove_file(&scanner_path) {
            Ok(()) => info!(path = %scanner_path.display(), "Deleted scanner source file"),
            Err(e) => {
                warn!(
                    path = %scanner_path.display(),
                    error = %e,
                    "Could not delete scanner source file"
                );
            }
        }
    });
}

/// Removes a stored PDF file, treating a missing file as success.
///
/// Used by PDF deletion: the database row is authoritative, so a backing
/// file that is already gone must not fail the operation.
///
/// # Errors
///
/// Returns `Io` only for failures other than the file being absent.
pub fn remove_stored_pdf(path: &Path) -> Result<(), FileStorageError> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            info!(path = %path.display(), "Deleted stored PDF");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "Stored PDF already missing");
            Ok(())
        }
        Err(e) => Err(FileStorageError::Io(e)),
    }
}
