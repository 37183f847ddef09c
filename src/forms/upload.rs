use actix_multipart::form::{MultipartForm, tempfile::TempFile};

#[derive(MultipartForm)]
/// Spreadsheet uploaded to an import endpoint.
pub struct UploadSpreadsheetForm {
    #[multipart(limit = "10MB")]
    pub file: TempFile,
}

impl UploadSpreadsheetForm {
    /// Original file name as sent by the browser, used to pick the reader.
    pub fn file_name(&self) -> &str {
        self.file.file_name.as_deref().unwrap_or_default()
    }
}
