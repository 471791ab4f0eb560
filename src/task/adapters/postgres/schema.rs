//! Diesel schema for task tree persistence.

diesel::table! {
    /// Task nodes; top-level tasks have no parent.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Task title.
        title -> Text,
        /// Workflow status wire value.
        #[max_length = 20]
        status -> Varchar,
        /// Parent node, fixed at creation.
        parent_id -> Nullable<Uuid>,
        /// Assigned developer, if any.
        assigned_developer_id -> Nullable<Uuid>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
        /// Insertion sequence used for sibling order and tie-breaks.
        seq -> Int8,
    }
}

diesel::table! {
    /// Skills required by each task node.
    task_skills (task_id, skill_id) {
        /// Owning task.
        task_id -> Uuid,
        /// Required skill.
        skill_id -> Uuid,
    }
}

diesel::joinable!(task_skills -> tasks (task_id));
diesel::allow_tables_to_appear_in_same_query!(tasks, task_skills);
