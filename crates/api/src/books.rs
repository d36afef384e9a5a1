// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Book follow-up services: creation, update, listing, lookups, counts.

use std::collections::HashMap;
use std::path::Path;

use chrono::{Duration, Utc};
use tracing::info;

use booktrack_domain::{
    BookPatch, BookStatus, BookType, DomainError, parse_department_ids, validate_date,
    year_of_date,
};
use booktrack_persistence::{
    BookChanges, BookFilters, BookRecord, CreatedBook, NewBook, NewPdf, Persistence, UpdatedBook,
};

use crate::error::ApiError;
use crate::request_response::{
    BookResponse, BookStatusCounts, BookTypeCounts, CreateBookInput, CreateBookResponse,
    DepartmentInfo, ExistsResponse, PaginatedBooks, PdfFileResponse, UpdateBookResponse,
    UserBookCountResponse,
};

/// Today's date as the system's `YYYY-MM-DD` string.
pub(crate) fn today_string() -> String {
    Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Today's date in the organization's UTC+3 wall clock.
fn today_utc3() -> chrono::NaiveDate {
    (Utc::now() + Duration::hours(3)).date_naive()
}

/// Validates page/limit against the listing contract.
fn validate_pagination(page: i64, limit: i64) -> Result<(), DomainError> {
    if page < 1 {
        return Err(DomainError::InvalidPage { page });
    }
    if !(1..=100).contains(&limit) {
        return Err(DomainError::InvalidLimit { limit });
    }
    Ok(())
}

/// Trims an optional filter value, dropping empties.
fn clean_filter(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Total pages for a (total, limit) pair.
pub(crate) const fn total_pages(total: i64, limit: i64) -> i64 {
    (total + limit - 1) / limit
}

/// Assembles wire responses for a batch of book records.
///
/// Loads the full department set (via the bridge table) and/or the PDF
/// map (grouped by book number) in one query each, then distributes them
/// across the rows.
pub(crate) fn build_responses(
    persistence: &mut Persistence,
    records: Vec<BookRecord>,
    include_departments: bool,
    include_pdfs: bool,
) -> Result<Vec<BookResponse>, ApiError> {
    let ids: Vec<i64> = records.iter().map(|r| r.book_id).collect();

    let mut assoc_map: HashMap<i64, Vec<DepartmentInfo>> = HashMap::new();
    if include_departments {
        for a in persistence.associations_for_books(&ids)? {
            assoc_map.entry(a.book_id).or_default().push(DepartmentInfo {
                de_id: a.de_id,
                department_name: a.department_name,
                co_id: a.co_id,
                committee_name: a.committee_name,
            });
        }
    }

    let mut pdf_map: HashMap<String, Vec<PdfFileResponse>> = HashMap::new();
    if include_pdfs {
        let book_nos: Vec<String> = records.iter().filter_map(|r| r.book_no.clone()).collect();
        for p in persistence.pdfs_for_book_nos(&book_nos)? {
            if let Some(no) = p.book_no.clone() {
                pdf_map.entry(no).or_default().push(PdfFileResponse {
                    id: p.pdf_id,
                    book_no: p.book_no,
                    pdf: p.pdf,
                    current_date: p.current_date,
                    username: p.username,
                });
            }
        }
    }

    Ok(records
        .into_iter()
        .map(|record| {
            let all_departments: Vec<DepartmentInfo> =
                assoc_map.get(&record.book_id).cloned().unwrap_or_default();
            let pdf_files: Vec<PdfFileResponse> = record
                .book_no
                .as_ref()
                .and_then(|no| pdf_map.get(no).cloned())
                .unwrap_or_default();
            to_response(record, all_departments, pdf_files)
        })
        .collect())
}

/// Converts one record plus its loaded associations into the wire shape.
fn to_response(
    record: BookRecord,
    all_departments: Vec<DepartmentInfo>,
    pdf_files: Vec<PdfFileResponse>,
) -> BookResponse {
    let department_names: Option<String> = if all_departments.is_empty() {
        None
    } else {
        Some(
            all_departments
                .iter()
                .filter_map(|d| d.department_name.clone())
                .collect::<Vec<String>>()
                .join(", "),
        )
    };
    let department_count: i64 = all_departments.len() as i64;

    BookResponse {
        id: record.book_id,
        book_type: record.book_type,
        book_no: record.book_no,
        book_date: record.book_date,
        directory_name: record.directory_name,
        incoming_no: record.incoming_no,
        incoming_date: record.incoming_date,
        subject: record.subject,
        destination: record.destination,
        book_action: record.book_action,
        book_status: record.book_status.map(|s| BookStatus::normalize(&s)),
        notes: record.notes,
        current_date: record.current_date,
        user_id: record.user_id,
        username: record.username,
        junction_id: None,
        co_id: record.co_id,
        committee_name: record.committee_name,
        de_id: record.de_id,
        department_name: record.department_name,
        all_departments,
        department_names,
        department_count,
        count_of_late_books: None,
        count_of_pdfs: None,
        pdf_files,
    }
}

/// The book follow-up service.
pub struct BookFollowUpService;

impl BookFollowUpService {
    /// Creates a book with its junctions, bridges, and first PDF.
    ///
    /// The uploaded file is written under its deterministic name before
    /// the database transaction runs; the scanner-side source copy is
    /// scheduled for best-effort deletion afterwards.
    ///
    /// # Errors
    ///
    /// Returns a client error for malformed dates or department ids, a
    /// conflict if the destination filename already exists, and an
    /// internal error for any persistence failure (which rolls the whole
    /// transaction back).
    pub fn create_book(
        persistence: &mut Persistence,
        upload_dir: &Path,
        source_dir: &Path,
        input: &CreateBookInput,
    ) -> Result<CreateBookResponse, ApiError> {
        validate_date(&input.book_date)?;
        if let Some(d) = &input.incoming_date {
            validate_date(d)?;
        }
        let de_ids: Vec<i64> = parse_department_ids(&input.de_ids)?;

        let book_type: BookType = BookType::parse(&input.book_type);
        // Secret books never carry incoming information.
        let (incoming_no, incoming_date) = if book_type.is_secret() {
            (None, None)
        } else {
            (input.incoming_no.clone(), input.incoming_date.clone())
        };

        let today: String = today_string();
        let book_no: String = input.book_no.trim().to_string();
        let book: NewBook = NewBook {
            book_type: Some(book_type.as_str().to_string()),
            book_no: Some(book_no.clone()),
            book_date: Some(input.book_date.clone()),
            directory_name: input.directory_name.clone(),
            incoming_no,
            incoming_date,
            subject: input.subject.clone(),
            destination: input.destination.clone(),
            book_action: input.book_action.clone(),
            book_status: input.book_status.as_deref().map(BookStatus::normalize),
            notes: input.notes.clone(),
            user_id: Some(input.user_id),
            current_date: Some(today.clone()),
        };

        // A new book has no prior PDFs, so the sequence count is zero.
        let pdf_path = booktrack_files::save_book_pdf(
            &input.file_bytes,
            &book_no,
            &input.book_date,
            0,
            upload_dir,
        )?;

        let created: CreatedBook = persistence.create_book(
            &book,
            input.co_id,
            &de_ids,
            &pdf_path.display().to_string(),
            &today,
        )?;

        if let Some(user) = persistence.get_user_by_id(input.user_id)? {
            booktrack_files::spawn_source_cleanup(
                source_dir,
                &user.username,
                &input.original_filename,
            );
        }

        info!(book_id = created.book_id, "Created book");
        Ok(CreateBookResponse {
            message: String::from("Book and PDF saved successfully"),
            book_id: created.book_id,
            junction_ids: created.junction_ids,
            bridge_ids: created.bridge_ids,
        })
    }

    /// Applies a sparse update, optionally rewriting the department set
    /// and appending a PDF.
    ///
    /// # Errors
    ///
    /// Returns a client error for an empty patch, a half-supplied
    /// committee/department pairing, a file without a user id, or
    /// malformed dates; `ResourceNotFound` for a missing book; internal
    /// errors roll the transaction back.
    pub fn update_book(
        persistence: &mut Persistence,
        upload_dir: &Path,
        source_dir: &Path,
        book_id: i64,
        patch: &BookPatch,
        file: Option<&(Vec<u8>, String)>,
    ) -> Result<UpdateBookResponse, ApiError> {
        patch.validate()?;
        if patch.is_column_empty() && !patch.has_pairing() && file.is_none() {
            return Err(DomainError::EmptyUpdate.into());
        }
        if file.is_some() && patch.user_id.is_none() {
            return Err(DomainError::MissingUserForFile.into());
        }

        let pairing: Option<(i64, Vec<i64>)> = match (patch.co_id, &patch.de_ids) {
            (Some(co_id), Some(raw)) => Some((co_id, parse_department_ids(raw)?)),
            _ => None,
        };

        let today: String = today_string();
        let changes: BookChanges = BookChanges {
            book_type: patch
                .book_type
                .as_deref()
                .map(|t| BookType::parse(t).as_str().to_string()),
            book_no: patch.book_no.clone(),
            book_date: patch.book_date.clone(),
            directory_name: patch.directory_name.clone(),
            incoming_no: patch.incoming_no.clone(),
            incoming_date: patch.incoming_date.clone(),
            subject: patch.subject.clone(),
            destination: patch.destination.clone(),
            book_action: patch.book_action.clone(),
            book_status: patch.book_status.as_deref().map(BookStatus::normalize),
            notes: patch.notes.clone(),
            user_id: patch.user_id,
            current_date: Some(today.clone()),
        };

        let pdf: Option<NewPdf> = match file {
            Some((bytes, _)) => {
                let existing: BookRecord =
                    persistence
                        .get_book(book_id)?
                        .ok_or(booktrack_persistence::PersistenceError::BookNotFound(
                            book_id,
                        ))?;
                // The filename reflects the post-update number and date.
                let effective_no: String = patch
                    .book_no
                    .clone()
                    .or(existing.book_no)
                    .unwrap_or_default();
                let effective_date: String = patch
                    .book_date
                    .clone()
                    .or(existing.book_date)
                    .ok_or_else(|| ApiError::InvalidInput {
                        field: String::from("bookDate"),
                        message: String::from("Book has no date to derive the PDF name from"),
                    })?;
                let count: i64 = persistence.pdf_count_for_book(book_id)?;
                let path = booktrack_files::save_book_pdf(
                    bytes,
                    &effective_no,
                    &effective_date,
                    count,
                    upload_dir,
                )?;
                Some(NewPdf {
                    book_id,
                    book_no: Some(effective_no),
                    count_pdf: i32::try_from(count).map_err(|_| ApiError::Internal {
                        message: String::from("PDF count out of range"),
                    })?,
                    pdf: path.display().to_string(),
                    user_id: patch.user_id,
                    current_date: Some(today.clone()),
                })
            }
            None => None,
        };

        let updated: UpdatedBook =
            persistence.update_book(book_id, &changes, pairing.as_ref(), pdf.as_ref())?;

        if let (Some((_, original_name)), Some(user_id)) = (file, patch.user_id) {
            if let Some(user) = persistence.get_user_by_id(user_id)? {
                booktrack_files::spawn_source_cleanup(source_dir, &user.username, original_name);
            }
        }

        info!(book_id = updated.book_id, "Updated book");
        Ok(UpdateBookResponse {
            message: String::from("Book updated successfully"),
            book_id: updated.book_id,
        })
    }

    /// Fetches one book with its full department set, PDFs, and counts.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the book does not exist.
    pub fn get_book_with_pdfs(
        persistence: &mut Persistence,
        book_id: i64,
    ) -> Result<BookResponse, ApiError> {
        let record: BookRecord = persistence.get_book(book_id)?.ok_or(
            booktrack_persistence::PersistenceError::BookNotFound(book_id),
        )?;
        let junction_id: Option<i64> = record.junction_id;

        let mut responses: Vec<BookResponse> =
            build_responses(persistence, vec![record], true, false)?;
        let mut response: BookResponse = responses.remove(0);

        // This view loads PDFs by owning book id, not book number, so
        // supplements attached to the same number in another year do not
        // leak in.
        let pdfs = persistence.pdfs_for_book_id(book_id)?;
        response.pdf_files = pdfs
            .into_iter()
            .map(|p| PdfFileResponse {
                id: p.pdf_id,
                book_no: p.book_no,
                pdf: p.pdf,
                current_date: p.current_date,
                username: p.username,
            })
            .collect();
        response.count_of_pdfs = Some(response.pdf_files.len() as i64);
        response.junction_id = junction_id;
        Ok(response)
    }

    /// Retrieves one page of the filtered listing.
    ///
    /// # Errors
    ///
    /// Returns a client error for a bad page/limit, an internal error
    /// for query failures.
    pub fn list_books(
        persistence: &mut Persistence,
        filters: BookFilters,
        page: i64,
        limit: i64,
    ) -> Result<PaginatedBooks, ApiError> {
        validate_pagination(page, limit)?;
        let filters: BookFilters = BookFilters {
            book_no: clean_filter(filters.book_no),
            book_status: clean_filter(filters.book_status).map(|s| BookStatus::normalize(&s)),
            book_type: clean_filter(filters.book_type),
            directory_name: clean_filter(filters.directory_name),
            subject: clean_filter(filters.subject),
            incoming_no: clean_filter(filters.incoming_no),
        };

        let (records, total) = persistence.list_filtered_books(&filters, page, limit)?;
        let data: Vec<BookResponse> = build_responses(persistence, records, true, true)?;

        Ok(PaginatedBooks {
            data,
            total,
            page,
            limit,
            total_pages: total_pages(total, limit),
        })
    }

    /// Retrieves one page of a user's late (still pending) books.
    ///
    /// Each row carries the days elapsed since its incoming date in the
    /// organization's UTC+3 wall clock, and an empty PDF list — this
    /// view never loads PDFs.
    ///
    /// # Errors
    ///
    /// Returns a client error for a bad page/limit, an internal error
    /// for query failures.
    pub fn late_books(
        persistence: &mut Persistence,
        user_id: i64,
        page: i64,
        limit: i64,
    ) -> Result<PaginatedBooks, ApiError> {
        validate_pagination(page, limit)?;

        let (records, total) = persistence.late_books(user_id, page, limit)?;
        let today: chrono::NaiveDate = today_utc3();
        let mut data: Vec<BookResponse> = build_responses(persistence, records, true, false)?;
        for row in &mut data {
            let days_late: i64 = row
                .incoming_date
                .as_deref()
                .and_then(|d| chrono::NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
                .map_or(0, |d| (today - d).num_days());
            row.count_of_late_books = Some(days_late);
        }

        Ok(PaginatedBooks {
            data,
            total,
            page,
            limit,
            total_pages: total_pages(total, limit),
        })
    }

    /// Lists all distinct book numbers.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn all_book_numbers(persistence: &mut Persistence) -> Result<Vec<String>, ApiError> {
        Ok(persistence.distinct_book_numbers()?)
    }

    /// Lists all distinct non-null incoming numbers.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn all_incoming_numbers(persistence: &mut Persistence) -> Result<Vec<String>, ApiError> {
        Ok(persistence.distinct_incoming_numbers()?)
    }

    /// Lists distinct directory names matching a substring.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn directory_names(
        persistence: &mut Persistence,
        search: &str,
    ) -> Result<Vec<String>, ApiError> {
        Ok(persistence.search_directory_names(search.trim())?)
    }

    /// Application-level uniqueness probe over (type, number, year).
    ///
    /// # Errors
    ///
    /// Returns a client error for a malformed date.
    pub fn check_book_no_exists(
        persistence: &mut Persistence,
        book_no: &str,
        book_type: &str,
        book_date: &str,
    ) -> Result<ExistsResponse, ApiError> {
        let year: i32 = year_of_date(book_date)?;
        let exists: bool =
            persistence.book_no_exists(book_no.trim(), book_type.trim(), year)?;
        Ok(ExistsResponse { exists })
    }

    /// Dashboard counts by book type.
    ///
    /// # Errors
    ///
    /// Returns an error if the queries fail.
    pub fn book_type_counts(persistence: &mut Persistence) -> Result<BookTypeCounts, ApiError> {
        Ok(BookTypeCounts {
            external: persistence.count_books_with_type(BookType::External.as_str())?,
            internal: persistence.count_books_with_type(BookType::Internal.as_str())?,
            fax: persistence.count_books_with_type(BookType::Fax.as_str())?,
        })
    }

    /// Dashboard counts by book status.
    ///
    /// # Errors
    ///
    /// Returns an error if the queries fail.
    pub fn book_status_counts(
        persistence: &mut Persistence,
    ) -> Result<BookStatusCounts, ApiError> {
        Ok(BookStatusCounts {
            accomplished: persistence.count_books_with_status(BookStatus::Accomplished.as_str())?,
            pending: persistence.count_books_with_status(BookStatus::Pending.as_str())?,
            deliberation: persistence.count_books_with_status(BookStatus::Deliberation.as_str())?,
        })
    }

    /// Dashboard per-user book counts, busiest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn user_book_counts(
        persistence: &mut Persistence,
    ) -> Result<Vec<UserBookCountResponse>, ApiError> {
        Ok(persistence
            .count_books_per_user()?
            .into_iter()
            .map(|c| UserBookCountResponse {
                username: c.username,
                book_count: c.book_count,
            })
            .collect())
    }
}
