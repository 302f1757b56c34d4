//! Diff rules between the stored snapshot and the freshly scraped state.

use crate::models::Comment;

/// Whether the last comment differs from the one seen last time.
///
/// `previous` is `None` both when the production was never observed and
/// when it had no comment, so a comment-less production never fires while
/// a deleted last comment does.
pub fn has_new_comment(previous: Option<&Comment>, current: Option<&Comment>) -> bool {
    previous != current
}
