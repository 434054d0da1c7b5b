use chrono::{DateTime, Utc};
use data_store::Record;
use serde::{Deserialize, Serialize};

/// Maximum post length accepted by the composer
pub const MAX_POST_CHARS: usize = 500;

/// User entity - cached read-only by the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub profile_picture: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub followers: Vec<String>,
    #[serde(default)]
    pub following: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Post entity - `likes` holds each liker once, `comments` holds comment ids in order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub user_id: String,
    pub content: String,
    #[serde(default)]
    pub media_urls: Vec<String>,
    #[serde(default)]
    pub likes: Vec<String>,
    #[serde(default)]
    pub comments: Vec<String>,
    #[serde(default)]
    pub shares: u32,
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn is_liked_by(&self, user_id: &str) -> bool {
        self.likes.iter().any(|id| id == user_id)
    }

    /// Likes after setting `user_id`'s membership, with set semantics
    pub fn likes_with(&self, user_id: &str, liked: bool) -> Vec<String> {
        let mut likes: Vec<String> = Vec::with_capacity(self.likes.len() + 1);
        for id in &self.likes {
            if id != user_id && !likes.contains(id) {
                likes.push(id.clone());
            }
        }
        if liked {
            likes.push(user_id.to_string());
        }
        likes
    }
}

/// Comment entity - belongs to a post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub user_id: String,
    pub content: String,
    #[serde(default)]
    pub likes: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields sent to the posts collection on create
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub user_id: String,
    pub content: String,
    pub media_urls: Vec<String>,
    pub likes: Vec<String>,
    pub comments: Vec<String>,
    pub shares: u32,
}

impl NewPost {
    pub fn text(user_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            content: content.into(),
            media_urls: Vec::new(),
            likes: Vec::new(),
            comments: Vec::new(),
            shares: 0,
        }
    }
}

/// Fields sent to the comments collection on create
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub post_id: String,
    pub user_id: String,
    pub content: String,
    pub likes: Vec<String>,
}

impl Record for User {
    const KIND: &'static str = "User";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Post {
    const KIND: &'static str = "Post";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Comment {
    const KIND: &'static str = "Comment";

    fn id(&self) -> &str {
        &self.id
    }
}
