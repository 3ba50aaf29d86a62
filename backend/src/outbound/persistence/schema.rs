//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered users.
    users (id) {
        /// Store-assigned identifier (`BIGSERIAL`).
        id -> Int8,
        /// Given name.
        first_name -> Varchar,
        /// Family name.
        last_name -> Varchar,
        /// Contact address.
        email -> Varchar,
        /// Calendar birth date.
        birth_date -> Date,
    }
}
