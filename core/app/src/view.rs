//! Filtering and ordering of a listing for display.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use filedock_common::{Error, FileItem};

/// Field a listing is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Last modification time.
    #[default]
    Date,
    /// Object key.
    Name,
    /// Size in bytes.
    Size,
    /// File extension.
    Type,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Name => "name",
            Self::Size => "size",
            Self::Type => "type",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "date" => Ok(Self::Date),
            "name" => Ok(Self::Name),
            "size" => Ok(Self::Size),
            "type" => Ok(Self::Type),
            other => Err(Error::InvalidInput(format!(
                "Unknown sort key '{}'. Expected date, name, size or type.",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// How a listing is presented: a key filter plus an ordering.
///
/// The default shows everything, newest first.
#[derive(Debug, Clone, Default)]
pub struct ListView {
    /// Case-insensitive substring the key must contain. Empty matches all.
    pub search: String,
    pub sort: SortKey,
    pub order: SortOrder,
}

impl ListView {
    /// Filter and order `files`. Keys in `pinned` come first regardless of
    /// the ordering; ties keep listing order.
    pub fn apply(&self, files: &[FileItem], pinned: &[String]) -> Vec<FileItem> {
        let needle = self.search.to_lowercase();
        let mut shown: Vec<FileItem> = files
            .iter()
            .filter(|file| file.key.to_lowercase().contains(&needle))
            .cloned()
            .collect();

        let is_pinned = |file: &FileItem| pinned.iter().any(|k| k == &file.key);
        shown.sort_by(|a, b| {
            is_pinned(b)
                .cmp(&is_pinned(a))
                .then_with(|| self.compare(a, b))
        });
        shown
    }

    fn compare(&self, a: &FileItem, b: &FileItem) -> Ordering {
        match self.sort {
            SortKey::Date => match (a.modified_at(), b.modified_at()) {
                (Some(x), Some(y)) => self.order.apply(x.cmp(&y)),
                // Unparseable timestamps trail in either direction.
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            SortKey::Name => self.order.apply(compare_text(&a.key, &b.key)),
            SortKey::Size => self.order.apply(a.size.cmp(&b.size)),
            SortKey::Type => self.order.apply(compare_text(extension(&a.key), extension(&b.key))),
        }
    }
}

/// Text after the last dot, or the whole key when it has none.
fn extension(key: &str) -> &str {
    key.rsplit('.').next().unwrap_or(key)
}

/// Case-insensitive comparison with a case-sensitive tie-break.
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
