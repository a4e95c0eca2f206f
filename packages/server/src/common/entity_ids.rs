//! Typed ID definitions for all domain entities.

pub use super::id::Id;

/// Marker type for registered users (post and comment authors).
pub struct User;

/// Marker type for Category entities.
pub struct Category;

/// Marker type for Location entities.
pub struct Location;

/// Marker type for Post entities.
pub struct Post;

/// Marker type for Comment entities.
pub struct Comment;

pub type UserId = Id<User>;
pub type CategoryId = Id<Category>;
pub type LocationId = Id<Location>;
pub type PostId = Id<Post>;
pub type CommentId = Id<Comment>;
