//! Diesel schema for registered users.

diesel::table! {
    /// Registered user accounts.
    users (id) {
        /// Internal user identifier.
        id -> Uuid,
        /// Unique display name used at login.
        #[max_length = 255]
        display_name -> Varchar,
        /// Encoded credential hash.
        credential_hash -> Text,
        /// Registration timestamp.
        created_at -> Timestamptz,
    }
}
