//! Diesel schema for task persistence.

diesel::table! {
    /// Task records, private or scoped to a group.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Free-form description.
        description -> Text,
        /// Referenced group; null for private tasks.
        group_id -> Nullable<Uuid>,
        /// Creating user.
        created_by -> Uuid,
        /// Optional start day.
        start_date -> Nullable<Date>,
        /// Optional end day.
        end_date -> Nullable<Date>,
        /// Stored fallback status.
        #[max_length = 32]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
