//! Typed ID definitions for the persisted entities.
//!
//! ```rust
//! use page_analyzer_core::common::{UrlCheckId, UrlId};
//!
//! let url_id = UrlId::from_i64(1);
//! let check_id = UrlCheckId::from_i64(1);
//!
//! // This would be a compile error:
//! // let wrong: UrlCheckId = url_id;
//! # let _ = (url_id, check_id);
//! ```

pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for submitted urls.
pub struct UrlEntity;

/// Marker type for recorded url checks.
pub struct UrlCheckEntity;

// ============================================================================
// Type aliases
// ============================================================================

pub type UrlId = Id<UrlEntity>;
pub type UrlCheckId = Id<UrlCheckEntity>;
