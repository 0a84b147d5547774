//! Catalog schema scripts.
//!
//! Script `n` in `SCRIPTS` upgrades the schema from version `n` to `n + 1`.
//! Scripts are append-only: never edit or reorder a shipped one.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

const SCRIPTS: &[&str] = &[include_str!("0001_products.sql")];

/// Schema version this build migrates to.
pub fn latest_version() -> u32 {
    SCRIPTS.len() as u32
}

/// Reads the schema version recorded on `conn`.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

/// Runs every pending script in one transaction and returns how many ran.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<u32> {
    let found = schema_version(conn)?;
    let supported = latest_version();
    if found > supported {
        return Err(DbError::SchemaTooNew { found, supported });
    }

    let pending = &SCRIPTS[found as usize..];
    if pending.is_empty() {
        return Ok(0);
    }

    let tx = conn.transaction()?;
    for (version, script) in (found + 1..).zip(pending) {
        tx.execute_batch(script)
            .map_err(|source| DbError::Migration { version, source })?;
        tx.pragma_update(None, "user_version", version)?;
    }
    tx.commit()?;

    info!("event=db_migrate module=db status=ok from={found} to={supported}");
    Ok(supported - found)
}

#[cfg(test)]
mod tests {
    use super::{apply_migrations, latest_version, schema_version};
    use rusqlite::Connection;

    #[test]
    fn fresh_connection_runs_every_script_once() {
        let mut conn = Connection::open_in_memory().unwrap();

        assert_eq!(apply_migrations(&mut conn).unwrap(), latest_version());
        assert_eq!(apply_migrations(&mut conn).unwrap(), 0);
        assert_eq!(schema_version(&conn).unwrap(), latest_version());
    }
}
