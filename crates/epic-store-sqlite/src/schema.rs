//! SQL schema for the Epic Events SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Login identities. Deleting one removes its employee.
CREATE TABLE IF NOT EXISTS users (
    user_id       TEXT PRIMARY KEY,
    email         TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,     -- argon2 PHC string
    created_at    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS employees (
    employee_id TEXT PRIMARY KEY,
    user_id     TEXT NOT NULL UNIQUE REFERENCES users(user_id) ON DELETE CASCADE,
    first_name  TEXT NOT NULL,
    last_name   TEXT NOT NULL,
    role        TEXT NOT NULL CHECK (role IN ('SA', 'SU', 'MA'))
);

CREATE TABLE IF NOT EXISTS clients (
    client_id    TEXT PRIMARY KEY,
    email        TEXT NOT NULL UNIQUE,
    first_name   TEXT NOT NULL,
    last_name    TEXT NOT NULL,
    phone        TEXT NOT NULL,
    company_name TEXT NOT NULL,
    employee_id  TEXT REFERENCES employees(employee_id) ON DELETE SET NULL,
    created_on   TEXT NOT NULL,
    last_update  TEXT NOT NULL
);

-- One contract per client. Amounts are integer cents.
CREATE TABLE IF NOT EXISTS contracts (
    contract_id TEXT PRIMARY KEY,
    client_id   TEXT NOT NULL UNIQUE REFERENCES clients(client_id) ON DELETE CASCADE,
    employee_id TEXT NOT NULL REFERENCES employees(employee_id) ON DELETE CASCADE,
    total_costs INTEGER NOT NULL CHECK (total_costs >= 0),
    amount_paid INTEGER NOT NULL CHECK (amount_paid >= 0),
    state       TEXT NOT NULL CHECK (state IN ('S', 'D')),
    created_on  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS events (
    event_id    TEXT PRIMARY KEY,
    contract_id TEXT NOT NULL REFERENCES contracts(contract_id) ON DELETE CASCADE,
    employee_id TEXT NOT NULL REFERENCES employees(employee_id) ON DELETE CASCADE,
    date        TEXT NOT NULL,
    name        TEXT NOT NULL,
    location    TEXT NOT NULL,
    max_guests  INTEGER NOT NULL CHECK (max_guests >= 1),
    notes       TEXT NOT NULL DEFAULT '',
    created_on  TEXT NOT NULL,
    UNIQUE (contract_id, name)
);

CREATE INDEX IF NOT EXISTS clients_employee_idx   ON clients(employee_id);
CREATE INDEX IF NOT EXISTS contracts_employee_idx ON contracts(employee_id);
CREATE INDEX IF NOT EXISTS events_contract_idx    ON events(contract_id);
CREATE INDEX IF NOT EXISTS events_employee_idx    ON events(employee_id);

PRAGMA user_version = 1;
";
