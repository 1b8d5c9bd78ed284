//! Error classification for the flow-network facade.
//!
//! Every fallible operation on [`crate::flow_network::FlowNetwork`] returns a
//! [`FlowError`] rather than panicking; internal inconsistencies that indicate
//! a broken invariant (not a caller mistake) still use `debug_assert!` /
//! `unreachable!`.

use thiserror::Error;

/// Non-fatal failure of a facade operation.
///
/// All four kinds leave the network unchanged: the caller gets an `Err`
/// back, and `FlowNetwork::prompt` is set to the same human-readable text.
#[derive(Error, Debug)]
pub enum FlowError {
    /// Caller supplied an invalid argument: negative id, non-positive
    /// capacity, a self-loop, a duplicate vertex/edge, or a reference to a
    /// vertex/edge that does not exist.
    #[error("{0}")]
    Validation(String),

    /// An algorithm was invoked without both source and sink set.
    #[error("{0}")]
    State(String),

    /// `save_network` / `load_network` hit an I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `save_network` / `load_network` hit a (de)serialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),
}

pub type FlowResult<T> = Result<T, FlowError>;
