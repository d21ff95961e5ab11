use crate::model::Review;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Soft outcome worth telling the user about, e.g. a review that was
    /// already deleted.
    Info,
    /// A pipeline or mutation failed; the affected region keeps its
    /// last-good content.
    Error,
}

/// A user-visible message scoped to the region it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub region: &'static str,
    pub severity: Severity,
    pub message: String,
}

impl Notice {
    pub fn error(region: &'static str, message: impl Into<String>) -> Self {
        Self { region, severity: Severity::Error, message: message.into() }
    }

    pub fn info(region: &'static str, message: impl Into<String>) -> Self {
        Self { region, severity: Severity::Info, message: message.into() }
    }
}

/// The textual render regions of the page: the weather header, the
/// residence list, the review list, and accumulated notices. The shell
/// redraws from this after every action and drains the notices it has
/// shown.
#[derive(Debug, Default)]
pub struct Dashboard {
    pub city_line: Option<String>,
    pub weather_line: Option<String>,
    pub residences: Vec<String>,
    pub reviews: Vec<Review>,
    notices: Vec<Notice>,
}

impl Dashboard {
    pub fn push_notice(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}
