use crate::domain::models::{Comment, Post, User};
use anyhow::{Context, Result};

const USERS_JSON: &str = include_str!("../../fixtures/users.json");
const POSTS_JSON: &str = include_str!("../../fixtures/posts.json");
const COMMENTS_JSON: &str = include_str!("../../fixtures/comments.json");

/// Initial contents of the simulated backend
#[derive(Debug, Clone, Default)]
pub struct Seed {
    pub users: Vec<User>,
    pub posts: Vec<Post>,
    pub comments: Vec<Comment>,
}

impl Seed {
    /// Bundled mock dataset
    pub fn fixtures() -> Result<Self> {
        Ok(Self {
            users: serde_json::from_str(USERS_JSON).context("Failed to parse users fixture")?,
            posts: serde_json::from_str(POSTS_JSON).context("Failed to parse posts fixture")?,
            comments: serde_json::from_str(COMMENTS_JSON)
                .context("Failed to parse comments fixture")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_are_consistent() {
        let seed = Seed::fixtures().unwrap();
        assert_eq!(seed.users.len(), 3);
        assert_eq!(seed.posts.len(), 3);

        // Every referenced comment exists and points back at its post
        for post in &seed.posts {
            for comment_id in &post.comments {
                let comment = seed
                    .comments
                    .iter()
                    .find(|c| &c.id == comment_id)
                    .expect("dangling comment id in fixtures");
                assert_eq!(comment.post_id, post.id);
            }
        }
    }
}
