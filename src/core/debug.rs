//! Diagnostic rendering of queries as SQL text.

use crate::errors::Result;
use sea_orm::{DbBackend, QueryTrait};
use std::io::Write;

/// Writes the SQL for `query`, wrapped in triple quotes and followed by a newline.
pub fn write_statement<W, Q>(out: &mut W, query: &Q, backend: DbBackend) -> Result<()>
where
    W: Write,
    Q: QueryTrait,
{
    let statement = query.build(backend);
    writeln!(out, "\"\"\"{statement}\"\"\"")?;
    Ok(())
}

/// Prints the `SQLite` SQL for `query` to stdout.
pub fn print_statement<Q: QueryTrait>(query: &Q) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    write_statement(&mut stdout, query, DbBackend::Sqlite)
}
