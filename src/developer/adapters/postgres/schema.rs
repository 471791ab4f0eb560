//! Diesel schema for developer roster persistence.

diesel::table! {
    /// Developer records.
    developers (id) {
        /// Internal developer identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 100]
        name -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Skills held by each developer.
    developer_skills (developer_id, skill_id) {
        /// Owning developer.
        developer_id -> Uuid,
        /// Held skill.
        skill_id -> Uuid,
    }
}

diesel::joinable!(developer_skills -> developers (developer_id));
diesel::allow_tables_to_appear_in_same_query!(developers, developer_skills);
