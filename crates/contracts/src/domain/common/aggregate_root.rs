/// Record owned by one backend collection.
///
/// Gives every master/production record a stable index and the REST
/// collection it lives in, so list pages and the HTTP layer can be written
/// once for all of them.
pub trait AggregateRoot {
    /// Server-issued id type
    type Id: Copy + std::fmt::Display;

    // ============================================================================
    // Instance data
    // ============================================================================

    fn id(&self) -> Self::Id;

    /// Label used in confirm prompts and lists
    fn description(&self) -> String;

    // ============================================================================
    // Class metadata
    // ============================================================================

    /// Index in the system (e.g. "a001")
    fn aggregate_index() -> &'static str;

    /// REST collection name (e.g. "mandor")
    fn collection_name() -> &'static str;

    /// Singular UI name
    fn element_name() -> &'static str;

    /// Plural UI name
    fn list_name() -> &'static str;

    // ============================================================================
    // Defaults
    // ============================================================================

    /// "a001_mandor"
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }

    /// "/api/mandor"
    fn collection_path() -> String {
        format!("/api/{}", Self::collection_name())
    }

    /// "/api/mandor/7"
    fn item_path(id: Self::Id) -> String {
        format!("{}/{}", Self::collection_path(), id)
    }
}
