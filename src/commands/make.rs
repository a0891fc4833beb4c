//! Migration file scaffolding.
//!
//! Generates timestamped `.up.sql`/`.down.sql` file pairs in the migration
//! directory, optionally filled with a create-table stub.

use crate::error::{DbError, DbResult};
use chrono::Utc;
use clap::ValueEnum;
use std::fs;
use std::path::Path;
use tracing::info;

/// Type of file the `make` command can generate.
///
/// Only `migration` is currently implemented; the other values fail with an
/// unsupported file type error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FileType {
    Migration,
    View,
    Procedure,
    Function,
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Migration => "migration",
            Self::View => "view",
            Self::Procedure => "procedure",
            Self::Function => "function",
        };
        write!(f, "{}", name)
    }
}

/// Options for file generation.
#[derive(Debug, Clone, Default)]
pub struct MakeOptions {
    /// Generate a create table stub instead of empty files.
    pub create: bool,
    /// Name of the table/view/routine to migrate; defaults to the file name.
    pub object_name: Option<String>,
}

/// Make files based on the given name and type.
///
/// Returns the generated file names, one line of CLI output each.
pub fn make_files(
    directory: &Path,
    name: &str,
    file_type: FileType,
    options: &MakeOptions,
) -> DbResult<Vec<String>> {
    match file_type {
        FileType::Migration => make_migration(directory, name, options),
        other => Err(DbError::unsupported_file_type(other.to_string())),
    }
}

/// Create a migration file pair from the template.
fn make_migration(directory: &Path, name: &str, options: &MakeOptions) -> DbResult<Vec<String>> {
    fs::create_dir_all(directory)?;

    let timestamp = Utc::now().format("%Y%m%d%H%M%S");
    let stem = format!("{}_{}", timestamp, name);
    let up_filename = format!("{}.up.sql", stem);
    let down_filename = format!("{}.down.sql", stem);

    let object_name = options.object_name.as_deref().unwrap_or(name);
    let (up_sql, down_sql) = if options.create {
        (create_up_sql(object_name), create_down_sql(object_name))
    } else {
        (String::new(), String::new())
    };

    fs::write(directory.join(&up_filename), up_sql)?;
    fs::write(directory.join(&down_filename), down_sql)?;

    info!(
        directory = %directory.display(),
        migration = %stem,
        "Created migration files"
    );

    Ok(vec![up_filename, down_filename])
}

fn create_up_sql(table: &str) -> String {
    format!("CREATE TABLE {} (\n);\n", table)
}

fn create_down_sql(table: &str) -> String {
    format!("DROP TABLE {};\n", table)
}
