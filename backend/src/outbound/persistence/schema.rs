//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation.

diesel::table! {
    /// Country aggregates.
    ///
    /// `name` carries a case-insensitive unique index; `uuid` is the
    /// externally visible identifier.
    countries (id) {
        /// Primary key: server-assigned surrogate.
        id -> Int4,
        /// Opaque external identifier (UUID v4).
        uuid -> Uuid,
        /// Unique country name.
        name -> Varchar,
        /// Resident population.
        population -> Int4,
    }
}

diesel::table! {
    /// States owned by a country.
    states (id) {
        /// Primary key: server-assigned surrogate.
        id -> Int4,
        /// Opaque external identifier (UUID v4).
        uuid -> Uuid,
        /// State name.
        name -> Varchar,
        /// Resident population.
        population -> Int4,
        /// Owning country (FK).
        country_id -> Int4,
    }
}

diesel::table! {
    /// Registered user identities.
    users (id) {
        /// Primary key: server-assigned surrogate.
        id -> Int4,
        /// Opaque external identifier (UUID v4).
        uuid -> Uuid,
        /// Unique login name.
        username -> Varchar,
        /// HMAC-SHA512 of the password under `password_salt`.
        password_hash -> Bytea,
        /// Per-user random salt generated at registration.
        password_salt -> Bytea,
        /// Given name.
        first_name -> Varchar,
        /// Optional middle name.
        middle_name -> Nullable<Varchar>,
        /// Family name.
        last_name -> Varchar,
        /// Contact email.
        email -> Varchar,
        /// Registration timestamp.
        registered_at -> Timestamptz,
        /// Last profile update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(states -> countries (country_id));

diesel::allow_tables_to_appear_in_same_query!(countries, states, users);
