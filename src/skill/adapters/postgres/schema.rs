//! Diesel schema for skill catalog persistence.

diesel::table! {
    /// Catalogued skills.
    skills (id) {
        /// Internal skill identifier.
        id -> Uuid,
        /// Unique skill name.
        #[max_length = 50]
        name -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
