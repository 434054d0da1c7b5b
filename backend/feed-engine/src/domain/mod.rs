pub mod models;

pub use models::{Comment, NewComment, NewPost, Post, User, MAX_POST_CHARS};
