//! Table naming schemes for the entry store.

use std::fmt;
use std::str::FromStr;

use crate::error::FlaskrError;

/// Naming scheme of the entries table.
///
/// Both schemes have the same shape (`id`, `title`, `text`) and support
/// identical operations; only the table and id column names differ.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Schema {
    /// `entries(id, title, text)`.
    #[default]
    Entries,
    /// `flaskr(post_id, title, text)`.
    Flaskr,
}

impl Schema {
    /// Table name.
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::Entries => "entries",
            Self::Flaskr => "flaskr",
        }
    }

    /// Primary key column name.
    #[must_use]
    pub const fn id_column(self) -> &'static str {
        match self {
            Self::Entries => "id",
            Self::Flaskr => "post_id",
        }
    }

    /// `CREATE TABLE IF NOT EXISTS` statement for this scheme.
    ///
    /// `AUTOINCREMENT` keeps ids monotonic even after the newest row is
    /// deleted.
    #[must_use]
    pub fn create_table_sql(self) -> String {
        format!(
            "CREATE TABLE IF NOT EXISTS {table} (\
             {id} INTEGER PRIMARY KEY AUTOINCREMENT, \
             title TEXT NOT NULL, \
             text TEXT NOT NULL)",
            table = self.table(),
            id = self.id_column(),
        )
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

impl FromStr for Schema {
    type Err = FlaskrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "entries" => Ok(Self::Entries),
            "flaskr" => Ok(Self::Flaskr),
            other => Err(FlaskrError::Config(format!(
                "unknown STORE_SCHEMA {other:?} (expected \"entries\" or \"flaskr\")"
            ))),
        }
    }
}
