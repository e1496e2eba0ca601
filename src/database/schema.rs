//! Esquema de la base de datos
//!
//! `orders.vehicle_id` no lleva clave foránea: la referencia al vehículo es débil
//! y sobrevive al borrado del vehículo.

pub const SCHEMA_STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS vehicles (
        id              UUID PRIMARY KEY,
        brand           TEXT NOT NULL,
        model           TEXT NOT NULL,
        price           NUMERIC(14, 2) NOT NULL CHECK (price >= 0),
        year            INTEGER,
        mileage         BIGINT CHECK (mileage >= 0),
        transmission    TEXT,
        fuel_type       TEXT,
        steering_side   TEXT,
        category        TEXT,
        comments        TEXT,
        features        TEXT[] NOT NULL DEFAULT '{}',
        images          TEXT[] NOT NULL DEFAULT '{}',
        kind            TEXT NOT NULL CHECK (kind IN ('stock', 'selection')),
        selection_group TEXT CHECK (selection_group IN ('nouveaux', 'soldes', 'vedettes')),
        created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        CHECK ((kind = 'selection') = (selection_group IS NOT NULL))
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_vehicles_created_at ON vehicles (created_at DESC)",
    "CREATE INDEX IF NOT EXISTS idx_vehicles_kind_group ON vehicles (kind, selection_group)",
    r#"
    CREATE TABLE IF NOT EXISTS orders (
        id              UUID PRIMARY KEY,
        vehicle_id      UUID NOT NULL,
        full_name       TEXT NOT NULL,
        phone           TEXT NOT NULL,
        address         TEXT NOT NULL,
        payment_method  TEXT NOT NULL,
        delivery_date   DATE NOT NULL,
        delivery_time   TEXT NOT NULL,
        status          TEXT NOT NULL DEFAULT 'En attente',
        created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_orders_created_at ON orders (created_at DESC)",
    "CREATE INDEX IF NOT EXISTS idx_orders_status ON orders (status)",
];
