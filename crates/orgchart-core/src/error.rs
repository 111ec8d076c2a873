pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Chart construction was attempted without a mount selector.
    #[error("missing id for root")]
    MissingRootSelector,

    /// The mount selector did not resolve to an element in the host tree.
    #[error("root DOM node not found (id: {selector})")]
    RootNotFound { selector: String },

    /// Two nodes in the supplied tree share an id. Ids are the reconciler's
    /// match keys, so uniqueness is enforced at construction instead of
    /// producing an undefined render.
    #[error("duplicate node id: {id}")]
    DuplicateNodeId { id: String },

    #[error("unknown node id: {id}")]
    UnknownNode { id: String },

    #[error("invalid chart model: {message}")]
    InvalidModel { message: String },

    #[error("chart model JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
