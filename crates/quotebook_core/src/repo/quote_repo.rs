//! Quote repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD, filter, search and random-pick APIs over the `quotes` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Every caller-supplied value is bound as a statement parameter; no input
//!   is ever spliced into SQL text.
//! - Write paths call `Quote::validate()` before SQL mutations.
//! - Read paths reject invalid persisted rows instead of masking them.
//! - Statements and cursors live only for the duration of one call.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::{register_functions, DbError, FOLD_FUNCTION};
use crate::model::quote::{Quote, QuoteId, QuoteValidationError};
use rusqlite::{params, Connection, OptionalExtension, Params, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const QUOTE_SELECT_SQL: &str = "SELECT
    id,
    text,
    author,
    category
FROM quotes";

const REQUIRED_QUOTE_COLUMNS: &[&str] = &["id", "text", "author", "category"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for quote persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(QuoteValidationError),
    Db(DbError),
    NotFound(QuoteId),
    InvalidData(String),
    /// Connection has not been migrated to the schema this binary expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl RepoError {
    /// Returns whether the underlying store is temporarily unreachable.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Db(err) if err.is_transient())
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "quote not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted quote data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it with open_db()"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<QuoteValidationError> for RepoError {
    fn from(value: QuoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface over the quote store.
pub trait QuoteRepository {
    /// Returns every stored quote ordered by id.
    fn find_all(&self) -> RepoResult<Vec<Quote>>;
    /// Returns the quote with `id`, or `None`.
    fn find_by_id(&self, id: QuoteId) -> RepoResult<Option<Quote>>;
    /// Inserts when `quote.id` is `None`, otherwise replaces the stored row.
    ///
    /// Returns the persisted form. Replacing a missing id is `NotFound`.
    fn save(&self, quote: &Quote) -> RepoResult<Quote>;
    /// Hard-deletes one quote. Deleting a missing id is `NotFound`.
    fn delete_by_id(&self, id: QuoteId) -> RepoResult<()>;
    /// Exact, case-sensitive category match.
    fn find_by_category(&self, category: &str) -> RepoResult<Vec<Quote>>;
    /// Exact, case-sensitive author match.
    fn find_by_author(&self, author: &str) -> RepoResult<Vec<Quote>>;
    /// Exact match on both category and author.
    fn find_by_category_and_author(&self, category: &str, author: &str)
        -> RepoResult<Vec<Quote>>;
    /// Case-insensitive (Unicode lowercase) substring match on text or author.
    fn search(&self, term: &str) -> RepoResult<Vec<Quote>>;
    /// One pseudo-uniformly chosen quote, or `None` when the store is empty.
    fn find_random(&self) -> RepoResult<Option<Quote>>;
    /// Number of stored quotes.
    fn count(&self) -> RepoResult<u64>;
}

/// SQLite-backed quote repository.
pub struct SqliteQuoteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteQuoteRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `PRAGMA user_version` differs from the
    ///   latest migration.
    /// - `MissingRequiredTable`/`MissingRequiredColumn` when the schema was
    ///   altered outside the migration path.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        register_functions(conn)?;
        Ok(Self { conn })
    }

    fn query_quotes<P: Params>(&self, sql: &str, params: P) -> RepoResult<Vec<Quote>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut quotes = Vec::new();

        while let Some(row) = rows.next()? {
            quotes.push(parse_quote_row(row)?);
        }

        Ok(quotes)
    }

    fn query_one<P: Params>(&self, sql: &str, params: P) -> RepoResult<Option<Quote>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_quote_row(row)?));
        }

        Ok(None)
    }

    fn insert(&self, quote: &Quote) -> RepoResult<Quote> {
        self.conn.execute(
            "INSERT INTO quotes (text, author, category) VALUES (?1, ?2, ?3);",
            params![
                quote.text.as_str(),
                quote.author.as_str(),
                quote.category.as_str()
            ],
        )?;

        Ok(quote.with_id(self.conn.last_insert_rowid()))
    }

    fn replace(&self, id: QuoteId, quote: &Quote) -> RepoResult<Quote> {
        let changed = self.conn.execute(
            "UPDATE quotes
             SET
                text = ?1,
                author = ?2,
                category = ?3
             WHERE id = ?4;",
            params![
                quote.text.as_str(),
                quote.author.as_str(),
                quote.category.as_str(),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(quote.with_id(id))
    }
}

impl QuoteRepository for SqliteQuoteRepository<'_> {
    fn find_all(&self) -> RepoResult<Vec<Quote>> {
        self.query_quotes(&format!("{QUOTE_SELECT_SQL} ORDER BY id ASC;"), [])
    }

    fn find_by_id(&self, id: QuoteId) -> RepoResult<Option<Quote>> {
        self.query_one(&format!("{QUOTE_SELECT_SQL} WHERE id = ?1;"), [id])
    }

    fn save(&self, quote: &Quote) -> RepoResult<Quote> {
        quote.validate()?;

        match quote.id {
            Some(id) => self.replace(id, quote),
            None => self.insert(quote),
        }
    }

    fn delete_by_id(&self, id: QuoteId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM quotes WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn find_by_category(&self, category: &str) -> RepoResult<Vec<Quote>> {
        self.query_quotes(
            &format!("{QUOTE_SELECT_SQL} WHERE category = ?1 ORDER BY id ASC;"),
            [category],
        )
    }

    fn find_by_author(&self, author: &str) -> RepoResult<Vec<Quote>> {
        self.query_quotes(
            &format!("{QUOTE_SELECT_SQL} WHERE author = ?1 ORDER BY id ASC;"),
            [author],
        )
    }

    fn find_by_category_and_author(
        &self,
        category: &str,
        author: &str,
    ) -> RepoResult<Vec<Quote>> {
        self.query_quotes(
            &format!("{QUOTE_SELECT_SQL} WHERE category = ?1 AND author = ?2 ORDER BY id ASC;"),
            [category, author],
        )
    }

    fn search(&self, term: &str) -> RepoResult<Vec<Quote>> {
        // instr() treats the bound term as a literal, so LIKE wildcards in
        // user input match themselves.
        self.query_quotes(
            &format!(
                "{QUOTE_SELECT_SQL}
                 WHERE instr({FOLD_FUNCTION}(text), {FOLD_FUNCTION}(?1)) > 0
                    OR instr({FOLD_FUNCTION}(author), {FOLD_FUNCTION}(?1)) > 0
                 ORDER BY id ASC;"
            ),
            [term],
        )
    }

    fn find_random(&self) -> RepoResult<Option<Quote>> {
        self.query_one(&format!("{QUOTE_SELECT_SQL} ORDER BY RANDOM() LIMIT 1;"), [])
    }

    fn count(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM quotes;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative quote count `{count}`")))
    }
}

fn parse_quote_row(row: &Row<'_>) -> RepoResult<Quote> {
    let quote = Quote {
        id: Some(row.get("id")?),
        text: row.get("text")?,
        author: row.get("author")?,
        category: row.get("category")?,
    };
    quote.validate().map_err(|err| {
        RepoError::InvalidData(format!(
            "quote {} failed validation: {err}",
            quote.id.unwrap_or_default()
        ))
    })?;
    Ok(quote)
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let table_exists = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'quotes';",
            [],
            |row| row.get::<_, i64>(0),
        )
        .optional()?
        .is_some();
    if !table_exists {
        return Err(RepoError::MissingRequiredTable("quotes"));
    }

    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info('quotes');")?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    for &column in REQUIRED_QUOTE_COLUMNS {
        if !columns.iter().any(|name| name == column) {
            return Err(RepoError::MissingRequiredColumn {
                table: "quotes",
                column,
            });
        }
    }

    Ok(())
}
