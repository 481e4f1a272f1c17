//! Data model
//!
//! - `ids`: typed identifiers parsed from hex wire strings
//! - `activity`: feed records and the typed event view over them
//! - `records`: posts, comments, blogs and reactions as stored on chain

pub mod activity;
pub mod error;
pub mod ids;
pub mod records;

pub use activity::{Activity, ActivityEvent};
pub use error::{ActivityError, IdParseError};
pub use ids::{parse_hex_u64, AccountId, BlogId, CommentId, PostId, ReactionId};
pub use records::{Blog, Comment, Created, Post, PostExtension, Reaction, ReactionKind};
