use thiserror::Error;

/// Error returned by [`SplayTree::try_join`](crate::SplayTree::try_join).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinError {
    /// Some key of the receiving tree is not less than some key of the joined tree.
    #[error("joined tree must only hold keys greater than every key of the receiving tree")]
    Overlap,
}
