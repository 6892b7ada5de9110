//! Dashboard comment constants and validation functions.
//!
//! Shared by the DB and API layers: content normalization, authorship
//! checks, and the reply-cascade mode used when deleting a comment.

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::types::DbId;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Maximum length (in characters) of a comment's trimmed content.
pub const MAX_COMMENT_LENGTH: usize = 10_000;

/// Only the comment and its direct replies are removed.
pub const CASCADE_DIRECT: &str = "direct";

/// The comment and its entire reply subtree are removed.
pub const CASCADE_RECURSIVE: &str = "recursive";

/// All valid cascade mode values.
pub const VALID_CASCADE_MODES: &[&str] = &[CASCADE_DIRECT, CASCADE_RECURSIVE];

/* --------------------------------------------------------------------------
Delete cascade
-------------------------------------------------------------------------- */

/// How far a comment deletion reaches into its replies.
///
/// `Direct` removes the comment and every comment whose `parent_id` equals
/// it; replies to those replies are left in place with a dangling parent.
/// `Recursive` removes the whole thread below the comment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeleteCascade {
    #[default]
    Direct,
    Recursive,
}

impl DeleteCascade {
    pub fn as_str(self) -> &'static str {
        match self {
            DeleteCascade::Direct => CASCADE_DIRECT,
            DeleteCascade::Recursive => CASCADE_RECURSIVE,
        }
    }
}

impl fmt::Display for DeleteCascade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeleteCascade {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            CASCADE_DIRECT => Ok(DeleteCascade::Direct),
            CASCADE_RECURSIVE => Ok(DeleteCascade::Recursive),
            other => Err(CoreError::Validation(format!(
                "Invalid cascade mode '{other}'. Must be one of: {}",
                VALID_CASCADE_MODES.join(", ")
            ))),
        }
    }
}

/* --------------------------------------------------------------------------
Validation functions
-------------------------------------------------------------------------- */

/// Validate comment content and return the trimmed text to store.
///
/// Whitespace-only content is rejected the same way as empty content.
pub fn normalize_comment_content(content: &str) -> Result<String, CoreError> {
    let trimmed = content.trim();

    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Comment content is required".to_string(),
        ));
    }

    if trimmed.chars().count() > MAX_COMMENT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Comment exceeds maximum length of {MAX_COMMENT_LENGTH} characters"
        )));
    }

    Ok(trimmed.to_string())
}

/// Reject an edit or delete performed by anyone other than the author.
pub fn ensure_comment_author(author_id: DbId, acting_user_id: DbId) -> Result<(), CoreError> {
    if author_id != acting_user_id {
        return Err(CoreError::Forbidden(
            "Only the author can modify this comment".to_string(),
        ));
    }
    Ok(())
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn test_content_is_trimmed() {
        let content = normalize_comment_content("  Looks good to me \n").unwrap();
        assert_eq!(content, "Looks good to me");
    }

    #[test]
    fn test_empty_content_rejected() {
        assert_matches!(normalize_comment_content(""), Err(CoreError::Validation(_)));
    }

    #[test]
    fn test_whitespace_only_content_rejected() {
        let result = normalize_comment_content(" \t\n  ");
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Comment content is required"));
    }

    #[test]
    fn test_content_at_limit_accepted() {
        let content = "a".repeat(MAX_COMMENT_LENGTH);
        assert!(normalize_comment_content(&content).is_ok());
    }

    #[test]
    fn test_content_over_limit_rejected() {
        let content = "a".repeat(MAX_COMMENT_LENGTH + 1);
        assert_matches!(
            normalize_comment_content(&content),
            Err(CoreError::Validation(msg)) if msg.contains("maximum length")
        );
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // Each 'é' is two bytes in UTF-8.
        let content = "é".repeat(MAX_COMMENT_LENGTH);
        assert!(normalize_comment_content(&content).is_ok());
    }

    #[test]
    fn test_author_may_modify() {
        let user = Uuid::new_v4();
        assert!(ensure_comment_author(user, user).is_ok());
    }

    #[test]
    fn test_other_user_forbidden() {
        let result = ensure_comment_author(Uuid::new_v4(), Uuid::new_v4());
        assert_matches!(result, Err(CoreError::Forbidden(_)));
    }

    #[test]
    fn test_cascade_mode_parsing() {
        assert_eq!("direct".parse::<DeleteCascade>().unwrap(), DeleteCascade::Direct);
        assert_eq!(
            " Recursive ".parse::<DeleteCascade>().unwrap(),
            DeleteCascade::Recursive
        );
        assert!("everything".parse::<DeleteCascade>().is_err());
    }

    #[test]
    fn test_cascade_mode_defaults_to_direct() {
        assert_eq!(DeleteCascade::default(), DeleteCascade::Direct);
        assert_eq!(DeleteCascade::default().to_string(), CASCADE_DIRECT);
    }
}
