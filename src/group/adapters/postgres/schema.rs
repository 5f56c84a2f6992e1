//! Diesel schema for groups.

diesel::table! {
    /// Groups with their owner, member set, and invite code.
    groups (id) {
        /// Internal group identifier.
        id -> Uuid,
        /// Group name.
        #[max_length = 255]
        name -> Varchar,
        /// Owning user.
        owner_id -> Uuid,
        /// Member user identifiers in join order, owner included.
        members -> Array<Uuid>,
        /// Unique invite code.
        #[max_length = 64]
        invite_code -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
