//! Turns `documented` doc comments into `#` comments of a generated config.

use std::any::type_name;

use documented::{Documented, DocumentedFields};
use toml_edit::{ArrayOfTables, Decor, Item, RawString, Table};
use tracing::warn;

use crate::error::{ConfigError, Result};

fn comment_block(docs: &str) -> String {
    let mut block = String::new();
    for line in docs.lines() {
        block.push('#');
        if !line.is_empty() {
            block.push(' ');
            block.push_str(line);
        }
        block.push('\n');
    }
    block
}

/// Adds `docs` as comment lines in front of whatever `decor` already holds.
/// A non-blank existing prefix is separated from the new block by an empty
/// comment line.
pub fn append_docs_as_toml_comments(decor: &mut Decor, docs: &str) {
    let block = comment_block(docs);
    let existing = decor
        .prefix()
        .and_then(RawString::as_str)
        .unwrap_or_default()
        .to_string();

    let prefix = match existing.lines().last() {
        None => block,
        Some(last) if last.trim().is_empty() => existing + &block,
        Some(_) => existing + "#\n" + &block,
    };
    decor.set_prefix(prefix);
}

/// Writes the field docs of `T` above each key of `table`, and the type's own
/// docs above the table header unless it is the document root.
pub fn annotate_toml_table<T>(table: &mut Table, is_root: bool) -> Result<()>
where
    T: Documented + DocumentedFields,
{
    if !is_root {
        append_docs_as_toml_comments(table.decor_mut(), T::DOCS);
    }

    for (mut key, item) in table.iter_mut() {
        let name = key.get().to_string();
        let Ok(docs) = T::get_field_docs(&name) else {
            warn!(
                "Field '{}' found in TOML but not documented on '{}'",
                name,
                type_name::<T>()
            );
            continue;
        };

        let decor = match item {
            Item::None => return Err(ConfigError::UnexpectedTomlItem(name)),
            Item::Value(_) => Some(key.leaf_decor_mut()),
            Item::Table(sub_table) => Some(sub_table.decor_mut()),
            Item::ArrayOfTables(array) => array.iter_mut().next().map(Table::decor_mut),
        };
        if let Some(decor) = decor {
            append_docs_as_toml_comments(decor, docs);
        }
    }

    Ok(())
}

/// Annotates only the first table of `array`; every entry has the same
/// fields, so repeating the docs would just be noise.
pub fn annotate_toml_array_of_tables<T>(array: &mut ArrayOfTables) -> Result<()>
where
    T: Documented + DocumentedFields,
{
    match array.iter_mut().next() {
        Some(first) => {
            annotate_toml_table::<T>(first, false)
                .map_err(|err| ConfigError::AnnotateFirstTable(err.to_string()))
        }
        None => Ok(()),
    }
}
