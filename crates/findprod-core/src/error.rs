// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use thiserror::Error;

/// Setup-time failures. Nothing in the coordination path returns an error:
/// once workers are spawned a run always completes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FindProdError {
    /// A size, count, index or range was outside its accepted bounds.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// More workers than elements were requested; at least one segment would
    /// be empty.
    #[error("degenerate segment: {thread_count} workers for {array_len} elements")]
    DegenerateSegment {
        /// Requested array length.
        array_len: usize,
        /// Requested worker count.
        thread_count: usize,
    },
}

impl FindProdError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
