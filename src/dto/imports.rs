use serde::Serialize;

/// Outcome of a spreadsheet import.
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    pub failed: usize,
    /// Row-level problems that did not stop the row from being imported.
    pub warnings: Vec<String>,
    /// One message per row that could not be stored.
    pub errors: Vec<String>,
}

impl ImportReport {
    pub fn new(warnings: Vec<String>) -> Self {
        Self {
            warnings,
            ..Self::default()
        }
    }

    pub fn success(&mut self) {
        self.imported += 1;
    }

    pub fn failure(&mut self, name: &str, message: impl std::fmt::Display) {
        self.failed += 1;
        self.errors.push(format!("{name}: {message}"));
    }

    pub fn warn(&mut self, message: String) {
        self.warnings.push(message);
    }
}
