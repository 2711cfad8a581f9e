//! SQL DDL for initializing the database schema, one dialect per engine.

use razas_dbpool::EngineKind;

/// SQLite schema includes:
/// - `raza` table (breed catalog, keyed by code)
/// - `animal` table (one row per animal, references `raza`)
/// - `producto` table (soft-deleted via `deleted_at`)
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS raza (
    cod_raza TEXT PRIMARY KEY NOT NULL,
    descripcion TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS animal (
    cod_animal TEXT PRIMARY KEY NOT NULL,
    descripcion TEXT NOT NULL,
    sexo TEXT NOT NULL,
    edad INTEGER NOT NULL,
    cod_raza TEXT NOT NULL REFERENCES raza(cod_raza),
    color_pelaje TEXT NOT NULL,
    color_ojos TEXT NOT NULL,
    image TEXT NULL
);

CREATE INDEX IF NOT EXISTS idx_animal_cod_raza ON animal(cod_raza);

CREATE TABLE IF NOT EXISTS producto (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    codigo TEXT NOT NULL,
    nombre TEXT NOT NULL,
    descripcion TEXT NOT NULL,
    cantidad INTEGER NOT NULL,
    precio REAL NOT NULL,
    impuesto REAL NOT NULL,
    deleted_at TEXT NULL, -- RFC3339
    created_at TEXT NOT NULL, -- RFC3339
    updated_at TEXT NOT NULL -- RFC3339
);
"#;

pub const MYSQL_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS raza (
    cod_raza VARCHAR(50) NOT NULL PRIMARY KEY,
    descripcion VARCHAR(255) NOT NULL
);

CREATE TABLE IF NOT EXISTS animal (
    cod_animal VARCHAR(50) NOT NULL PRIMARY KEY,
    descripcion VARCHAR(255) NOT NULL,
    sexo VARCHAR(10) NOT NULL,
    edad BIGINT NOT NULL,
    cod_raza VARCHAR(50) NOT NULL,
    color_pelaje VARCHAR(100) NOT NULL,
    color_ojos VARCHAR(100) NOT NULL,
    image VARCHAR(512) NULL,
    INDEX idx_animal_cod_raza (cod_raza),
    FOREIGN KEY (cod_raza) REFERENCES raza(cod_raza)
);

CREATE TABLE IF NOT EXISTS producto (
    id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
    codigo VARCHAR(50) NOT NULL,
    nombre VARCHAR(255) NOT NULL,
    descripcion TEXT NOT NULL,
    cantidad BIGINT NOT NULL,
    precio DOUBLE NOT NULL,
    impuesto DOUBLE NOT NULL,
    deleted_at VARCHAR(64) NULL,
    created_at VARCHAR(64) NOT NULL,
    updated_at VARCHAR(64) NOT NULL
);
"#;

pub const POSTGRES_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS raza (
    cod_raza VARCHAR(50) PRIMARY KEY NOT NULL,
    descripcion VARCHAR(255) NOT NULL
);

CREATE TABLE IF NOT EXISTS animal (
    cod_animal VARCHAR(50) PRIMARY KEY NOT NULL,
    descripcion VARCHAR(255) NOT NULL,
    sexo VARCHAR(10) NOT NULL,
    edad BIGINT NOT NULL,
    cod_raza VARCHAR(50) NOT NULL REFERENCES raza(cod_raza),
    color_pelaje VARCHAR(100) NOT NULL,
    color_ojos VARCHAR(100) NOT NULL,
    image VARCHAR(512) NULL
);

CREATE INDEX IF NOT EXISTS idx_animal_cod_raza ON animal(cod_raza);

CREATE TABLE IF NOT EXISTS producto (
    id BIGSERIAL PRIMARY KEY,
    codigo VARCHAR(50) NOT NULL,
    nombre VARCHAR(255) NOT NULL,
    descripcion TEXT NOT NULL,
    cantidad BIGINT NOT NULL,
    precio DOUBLE PRECISION NOT NULL,
    impuesto DOUBLE PRECISION NOT NULL,
    deleted_at VARCHAR(64) NULL,
    created_at VARCHAR(64) NOT NULL,
    updated_at VARCHAR(64) NOT NULL
);
"#;

pub fn init_script(engine: EngineKind) -> &'static str {
    match engine {
        EngineKind::Sqlite => SQLITE_INIT,
        EngineKind::MySql => MYSQL_INIT,
        EngineKind::Postgres => POSTGRES_INIT,
    }
}

/// Splits a script into individual statements.
pub fn statements(script: &str) -> impl Iterator<Item = &str> {
    script.split(';').map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_dialect_creates_all_tables() {
        for engine in [EngineKind::Sqlite, EngineKind::MySql, EngineKind::Postgres] {
            let creates: Vec<_> = statements(init_script(engine))
                .filter(|s| s.starts_with("CREATE TABLE"))
                .collect();
            assert_eq!(creates.len(), 3, "{engine}");
        }
    }
}
