#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Application-level error payload the server attaches to rejected
/// requests. The message is written for end users and shown verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ErrorBody {
    pub message: String,
}
