// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! PDF association service: metadata listing, supplement upload, and
//! deletion.

use std::path::Path;

use tracing::{info, warn};

use booktrack_persistence::{BookRecord, NewPdf, Persistence, PersistenceError};

use crate::books::today_string;
use crate::error::ApiError;
use crate::request_response::{DeletePdfRequest, PdfFileResponse};

/// The PDF association service.
pub struct PdfService;

impl PdfService {
    /// Lists the PDF metadata rows for a book number, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_for_book_no(
        persistence: &mut Persistence,
        book_no: &str,
    ) -> Result<Vec<PdfFileResponse>, ApiError> {
        Ok(persistence
            .pdfs_for_book_no(book_no.trim())?
            .into_iter()
            .map(|p| PdfFileResponse {
                id: p.pdf_id,
                book_no: p.book_no,
                pdf: p.pdf,
                current_date: p.current_date,
                username: p.username,
            })
            .collect())
    }

    /// Resolves the stored file path for a PDF row.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the row does not exist or carries
    /// no path.
    pub fn file_path(persistence: &mut Persistence, pdf_id: i64) -> Result<String, ApiError> {
        let record = persistence
            .pdf_by_id(pdf_id)?
            .ok_or(PersistenceError::PdfNotFound(pdf_id))?;
        record
            .pdf
            .ok_or_else(|| ApiError::ResourceNotFound {
                resource_type: String::from("PDF"),
                message: format!("PDF {pdf_id} has no stored path"),
            })
    }

    /// Appends a supplement PDF to an existing book.
    ///
    /// The sequence number comes from the current row count; the file is
    /// written first, then the metadata row, and the scanner-side source
    /// copy is scheduled for best-effort deletion.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for a missing book, a conflict on a
    /// filename collision, and an internal error for persistence
    /// failures.
    pub fn add_supplement(
        persistence: &mut Persistence,
        upload_dir: &Path,
        source_dir: &Path,
        book_id: i64,
        user_id: i64,
        file_bytes: &[u8],
        original_filename: &str,
    ) -> Result<PdfFileResponse, ApiError> {
        let book: BookRecord = persistence
            .get_book(book_id)?
            .ok_or(PersistenceError::BookNotFound(book_id))?;
        let book_no: String = book.book_no.clone().unwrap_or_default();
        let book_date: String = book.book_date.ok_or_else(|| ApiError::InvalidInput {
            field: String::from("bookDate"),
            message: String::from("Book has no date to derive the PDF name from"),
        })?;

        let count: i64 = persistence.pdf_count_for_book(book_id)?;
        let path = booktrack_files::save_book_pdf(
            file_bytes,
            &book_no,
            &book_date,
            count,
            upload_dir,
        )?;

        let today: String = today_string();
        let new_pdf: NewPdf = NewPdf {
            book_id,
            book_no: Some(book_no.clone()),
            count_pdf: i32::try_from(count).map_err(|_| ApiError::Internal {
                message: String::from("PDF count out of range"),
            })?,
            pdf: path.display().to_string(),
            user_id: Some(user_id),
            current_date: Some(today.clone()),
        };
        let pdf_id: i64 = persistence.insert_pdf(&new_pdf)?;

        if let Some(user) = persistence.get_user_by_id(user_id)? {
            booktrack_files::spawn_source_cleanup(source_dir, &user.username, original_filename);
        }

        info!(pdf_id, book_id, "Added supplement PDF");
        Ok(PdfFileResponse {
            id: pdf_id,
            book_no: Some(book_no),
            pdf: Some(new_pdf.pdf),
            current_date: Some(today),
            username: None,
        })
    }

    /// Deletes a PDF row and best-effort removes its backing file.
    ///
    /// The database row is authoritative: a backing file that is already
    /// missing — or that cannot be removed — never fails the deletion.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the row does not exist.
    pub fn delete_pdf(
        persistence: &mut Persistence,
        request: &DeletePdfRequest,
    ) -> Result<(), ApiError> {
        let rows_affected: usize = persistence.delete_pdf(request.id)?;
        if rows_affected == 0 {
            return Err(PersistenceError::PdfNotFound(request.id).into());
        }

        if let Err(e) = booktrack_files::remove_stored_pdf(Path::new(&request.pdf)) {
            warn!(pdf_id = request.id, error = %e, "Could not remove stored PDF file");
        }

        info!(pdf_id = request.id, "Deleted PDF");
        Ok(())
    }
}
