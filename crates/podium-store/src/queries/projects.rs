//! Project query functions.

use rusqlite::Connection;

use podium_types::address::Address;
use podium_types::project::Project;

use crate::tables::TablesConfig;
use crate::{Result, StoreError};

/// Insert a project. Returns the store-assigned id.
pub fn insert(
    conn: &Connection,
    tables: &TablesConfig,
    name: &str,
    description: &str,
    creator: &Address,
    created_at: u64,
) -> Result<i64> {
    conn.execute(
        &format!(
            "INSERT INTO {} (name, description, creator, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            tables.projects
        ),
        rusqlite::params![name, description, creator.as_str(), created_at as i64],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Get a project by id.
pub fn get(conn: &Connection, tables: &TablesConfig, id: i64) -> Result<Project> {
    conn.query_row(
        &format!(
            "SELECT id, name, description, creator, created_at
             FROM {} WHERE id = ?1",
            tables.projects
        ),
        [id],
        |row| {
            Ok(Project {
                id: row.get(0)?,
                name: row.get(1)?,
                description: row.get(2)?,
                creator: crate::queries::address_col(row, 3)?,
                created_at: row.get::<_, i64>(4)? as u64,
            })
        },
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound(format!("project {id}")),
        other => StoreError::Sqlite(other),
    })
}

/// List all projects in insertion order.
pub fn list(conn: &Connection, tables: &TablesConfig) -> Result<Vec<Project>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT id, name, description, creator, created_at
         FROM {} ORDER BY id",
        tables.projects
    ))?;

    let rows = stmt
        .query_map([], |row| {
            Ok(Project {
                id: row.get(0)?,
                name: row.get(1)?,
                description: row.get(2)?,
                creator: crate::queries::address_col(row, 3)?,
                created_at: row.get::<_, i64>(4)? as u64,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> (Connection, TablesConfig) {
        let tables = TablesConfig::default();
        let conn = crate::open_memory(&tables).expect("open test store");
        (conn, tables)
    }

    fn addr(last: &str) -> Address {
        Address::parse(&format!("0x{:0>40}", last)).expect("test address")
    }

    #[test]
    fn test_insert_and_get() {
        let (conn, tables) = test_db();
        let creator = addr("a1");

        let id = insert(&conn, &tables, "Widget", "A widget project", &creator, 1000)
            .expect("insert");
        let project = get(&conn, &tables, id).expect("get");

        assert_eq!(project.id, id);
        assert_eq!(project.name, "Widget");
        assert_eq!(project.description, "A widget project");
        assert_eq!(project.creator, creator);
        assert_eq!(project.created_at, 1000);
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let (conn, tables) = test_db();
        let result = get(&conn, &tables, 42);
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_ids_are_monotonic() {
        let (conn, tables) = test_db();
        let creator = addr("a1");

        let first = insert(&conn, &tables, "One", "first", &creator, 100).expect("insert");
        let second = insert(&conn, &tables, "Two", "second", &creator, 200).expect("insert");
        assert!(second > first);
    }

    #[test]
    fn test_list_in_insertion_order() {
        let (conn, tables) = test_db();
        insert(&conn, &tables, "One", "first", &addr("a1"), 100).expect("insert");
        insert(&conn, &tables, "Two", "second", &addr("a2"), 200).expect("insert");

        let projects = list(&conn, &tables).expect("list");
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].name, "One");
        assert_eq!(projects[1].name, "Two");
    }
}
