//! SQLite schema creation and migration.

use rusqlite::Connection;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Migration error: expected version {expected}, found {found}")]
    VersionMismatch { expected: i32, found: i32 },
}

/// Current schema version. Increment when adding migrations.
pub const CURRENT_VERSION: i32 = 2;

/// Create all tables and indexes if they don't exist.
///
/// This is idempotent, so it is safe to call on an existing database.
pub fn create_schema(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(SCHEMA_SQL)?;
    set_schema_version(conn, CURRENT_VERSION)?;
    Ok(())
}

/// Open or create a store database at the given path.
pub fn open_database(path: &std::path::Path) -> Result<Connection, SchemaError> {
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;

    let version = get_schema_version(&conn)?;
    if version == 0 {
        create_schema(&conn)?;
    } else if version != CURRENT_VERSION {
        migrate(&conn, version)?;
    }

    Ok(conn)
}

/// Open an in-memory database with the full schema. Useful for testing.
pub fn open_memory() -> Result<Connection, SchemaError> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Get the current schema version, or 0 if no schema exists.
pub fn get_schema_version(conn: &Connection) -> Result<i32, SchemaError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;

    if !exists {
        return Ok(0);
    }

    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

/// Record a schema version.
fn set_schema_version(conn: &Connection, version: i32) -> Result<(), SchemaError> {
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

/// Run migrations from `from_version` up to `CURRENT_VERSION`.
fn migrate(conn: &Connection, from_version: i32) -> Result<(), SchemaError> {
    if from_version > CURRENT_VERSION {
        return Err(SchemaError::VersionMismatch {
            expected: CURRENT_VERSION,
            found: from_version,
        });
    }

    let mut version = from_version;
    while version < CURRENT_VERSION {
        if version == 1 {
            // v2: one link row per developer/game pair
            conn.execute_batch(
                "DELETE FROM desarrollador_videojuego WHERE id NOT IN (
                     SELECT MIN(id) FROM desarrollador_videojuego
                     GROUP BY id_desarrollador, id_videojuego
                 );
                 CREATE UNIQUE INDEX IF NOT EXISTS idx_dev_game_pair
                     ON desarrollador_videojuego(id_desarrollador, id_videojuego);",
            )?;
        }
        version += 1;
        set_schema_version(conn, version)?;
    }

    Ok(())
}

/// Foreign keys carry no `ON DELETE` action: deleting a referenced row fails
/// with `SQLITE_CONSTRAINT_FOREIGNKEY` instead of cascading.
const SCHEMA_SQL: &str = r#"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- Developers
CREATE TABLE IF NOT EXISTS developer (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    nombre TEXT NOT NULL,
    email TEXT NOT NULL,
    experiencia INTEGER NOT NULL CHECK (experiencia >= 0),
    tipo TEXT NOT NULL
);

-- Games. Prices are stored as decimal strings to keep them exact.
CREATE TABLE IF NOT EXISTS videojuego (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    titulo TEXT NOT NULL,
    genero TEXT NOT NULL,
    precio TEXT NOT NULL,
    plataforma TEXT NOT NULL,
    fecha_lanzamiento TEXT NOT NULL
);

-- Developer <-> game links, owned by the game side
CREATE TABLE IF NOT EXISTS desarrollador_videojuego (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    id_desarrollador INTEGER NOT NULL REFERENCES developer(id),
    id_videojuego INTEGER NOT NULL REFERENCES videojuego(id)
);
CREATE UNIQUE INDEX IF NOT EXISTS idx_dev_game_pair
    ON desarrollador_videojuego(id_desarrollador, id_videojuego);
CREATE INDEX IF NOT EXISTS idx_dev_game_game ON desarrollador_videojuego(id_videojuego);

-- Ratings
CREATE TABLE IF NOT EXISTS puntuacion (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    fuente TEXT NOT NULL,
    nota_videojuego TEXT NOT NULL,
    fecha_nota TEXT NOT NULL,
    id_videojuego INTEGER NOT NULL REFERENCES videojuego(id)
);
CREATE INDEX IF NOT EXISTS idx_rating_game ON puntuacion(id_videojuego);

-- Customers
CREATE TABLE IF NOT EXISTS usuario (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    nombre TEXT NOT NULL,
    apellidos TEXT NOT NULL,
    dni TEXT NOT NULL,
    direccion TEXT NOT NULL,
    email TEXT NOT NULL,
    telefono TEXT NOT NULL
);

-- Purchase tickets
CREATE TABLE IF NOT EXISTS ticket (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    codigo_ticket TEXT NOT NULL UNIQUE,
    forma_pago TEXT NOT NULL,
    fecha_ticket TEXT NOT NULL,
    total TEXT NOT NULL,
    id_usuario INTEGER NOT NULL REFERENCES usuario(id)
);
CREATE INDEX IF NOT EXISTS idx_ticket_customer ON ticket(id_usuario);

-- Ticket lines
CREATE TABLE IF NOT EXISTS ticket_videojuego (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    cantidad INTEGER NOT NULL CHECK (cantidad >= 1),
    total TEXT NOT NULL,
    id_videojuego INTEGER NOT NULL REFERENCES videojuego(id),
    id_ticket INTEGER NOT NULL REFERENCES ticket(id)
);
CREATE INDEX IF NOT EXISTS idx_line_ticket ON ticket_videojuego(id_ticket);
CREATE INDEX IF NOT EXISTS idx_line_game ON ticket_videojuego(id_videojuego);
"#;
