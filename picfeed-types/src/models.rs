use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::password::Password;
use crate::views::{
    self, CommentView, FollowerView, LikeView, MediaView, PostView, SavedPostView, UserView,
};

/// Column width limits, enforced by CHECK constraints in the store.
pub const USER_NAME_MAX_LEN: usize = 50;
pub const USER_EMAIL_MAX_LEN: usize = 120;
pub const POST_CAPTION_MAX_LEN: usize = 255;
pub const MEDIA_URL_MAX_LEN: usize = 255;
pub const MEDIA_TYPE_MAX_LEN: usize = 50;
pub const COMMENT_CONTENT_MAX_LEN: usize = 255;

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: Password,
    pub is_active: bool,
}

impl User {
    /// Public projection. Only `id` and `email` leave the record.
    pub fn serialize(&self) -> UserView {
        UserView {
            id: self.id,
            email: self.email.clone(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<Value> {
        views::to_json(&self.serialize())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: i64,
    pub caption: Option<String>,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn serialize(&self) -> PostView {
        PostView {
            id: self.id,
            caption: self.caption.clone(),
            user_id: self.user_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<Value> {
        views::to_json(&self.serialize())
    }
}

/// A media attachment. `media_type` is free text ("image", "video", ...)
/// and is exposed under the `type` key.
#[derive(Debug, Clone, PartialEq)]
pub struct Media {
    pub id: i64,
    pub url: String,
    pub media_type: String,
    pub post_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Media {
    pub fn serialize(&self) -> MediaView {
        MediaView {
            id: self.id,
            url: self.url.clone(),
            media_type: self.media_type.clone(),
            post_id: self.post_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<Value> {
        views::to_json(&self.serialize())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub id: i64,
    pub content: String,
    pub user_id: i64,
    pub post_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn serialize(&self) -> CommentView {
        CommentView {
            id: self.id,
            content: self.content.clone(),
            user_id: self.user_id,
            post_id: self.post_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<Value> {
        views::to_json(&self.serialize())
    }
}

/// Directed follow edge: `user_from` follows `user_to`.
#[derive(Debug, Clone, PartialEq)]
pub struct Follower {
    pub id: i64,
    pub user_from: i64,
    pub user_to: i64,
    pub created_at: DateTime<Utc>,
}

impl Follower {
    pub fn serialize(&self) -> FollowerView {
        FollowerView {
            id: self.id,
            user_from: self.user_from,
            user_to: self.user_to,
            created_at: self.created_at,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<Value> {
        views::to_json(&self.serialize())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Like {
    pub id: i64,
    pub user_id: i64,
    pub post_id: i64,
    pub created_at: DateTime<Utc>,
}

impl Like {
    pub fn serialize(&self) -> LikeView {
        LikeView {
            id: self.id,
            user_id: self.user_id,
            post_id: self.post_id,
            created_at: self.created_at,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<Value> {
        views::to_json(&self.serialize())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SavedPost {
    pub id: i64,
    pub user_id: i64,
    pub post_id: i64,
    pub created_at: DateTime<Utc>,
}

impl SavedPost {
    pub fn serialize(&self) -> SavedPostView {
        SavedPostView {
            id: self.id,
            user_id: self.user_id,
            post_id: self.post_id,
            created_at: self.created_at,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<Value> {
        views::to_json(&self.serialize())
    }
}

// Insert forms: every column except the auto-assigned id and the
// engine-generated timestamps.

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: Password,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub caption: Option<String>,
    pub user_id: i64,
}

#[derive(Debug, Clone)]
pub struct NewMedia {
    pub url: String,
    pub media_type: String,
    pub post_id: i64,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub content: String,
    pub user_id: i64,
    pub post_id: i64,
}

#[derive(Debug, Clone, Copy)]
pub struct NewFollower {
    pub user_from: i64,
    pub user_to: i64,
}

#[derive(Debug, Clone, Copy)]
pub struct NewLike {
    pub user_id: i64,
    pub post_id: i64,
}

#[derive(Debug, Clone, Copy)]
pub struct NewSavedPost {
    pub user_id: i64,
    pub post_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).single().expect("valid timestamp")
    }

    fn keys(value: &Value) -> Vec<String> {
        value
            .as_object()
            .expect("projection should be a JSON object")
            .keys()
            .cloned()
            .collect()
    }

    #[test]
    fn test_user_serialize_is_id_and_email_only() {
        let user = User {
            id: 1,
            name: "Ann".to_string(),
            email: "ann@x.com".to_string(),
            password: Password::new("p"),
            is_active: true,
        };

        let json = user.to_json().unwrap();
        assert_eq!(keys(&json), vec!["id", "email"]);
        assert_eq!(json["id"], 1);
        assert_eq!(json["email"], "ann@x.com");
        assert_eq!(
            serde_json::to_string(&user.serialize()).unwrap(),
            r#"{"id":1,"email":"ann@x.com"}"#
        );
    }

    #[test]
    fn test_post_serialize_fields() {
        let post = Post {
            id: 7,
            caption: Some("sunset".to_string()),
            user_id: 1,
            created_at: ts(1_700_000_000),
            updated_at: ts(1_700_000_060),
        };

        let json = post.to_json().unwrap();
        assert_eq!(
            keys(&json),
            vec!["id", "caption", "user_id", "created_at", "updated_at"]
        );
        assert_eq!(json["caption"], "sunset");
        assert_eq!(json["user_id"], 1);
        assert_eq!(json["created_at"], "2023-11-14T22:13:20.000Z");
        assert_eq!(json["updated_at"], "2023-11-14T22:14:20.000Z");
    }

    #[test]
    fn test_post_without_caption_serializes_null() {
        let post = Post {
            id: 2,
            caption: None,
            user_id: 1,
            created_at: ts(0),
            updated_at: ts(0),
        };

        let json = post.to_json().unwrap();
        assert!(json["caption"].is_null());
        assert!(json.as_object().unwrap().contains_key("caption"));
    }

    #[test]
    fn test_media_serialize_uses_type_key() {
        let media = Media {
            id: 3,
            url: "https://cdn.example.com/a.jpg".to_string(),
            media_type: "image".to_string(),
            post_id: 7,
            created_at: ts(0),
            updated_at: ts(0),
        };

        let json = media.to_json().unwrap();
        assert_eq!(
            keys(&json),
            vec!["id", "url", "type", "post_id", "created_at", "updated_at"]
        );
        assert_eq!(json["type"], "image");
        assert!(json.get("media_type").is_none());
    }

    #[test]
    fn test_comment_serialize_fields() {
        let comment = Comment {
            id: 4,
            content: "nice".to_string(),
            user_id: 2,
            post_id: 7,
            created_at: ts(0),
            updated_at: ts(0),
        };

        assert_eq!(
            keys(&comment.to_json().unwrap()),
            vec!["id", "content", "user_id", "post_id", "created_at", "updated_at"]
        );
    }

    #[test]
    fn test_edge_records_serialize_fields() {
        let follower = Follower {
            id: 1,
            user_from: 2,
            user_to: 3,
            created_at: ts(0),
        };
        let like = Like {
            id: 1,
            user_id: 2,
            post_id: 3,
            created_at: ts(0),
        };
        let saved = SavedPost {
            id: 1,
            user_id: 2,
            post_id: 3,
            created_at: ts(0),
        };

        assert_eq!(
            keys(&follower.to_json().unwrap()),
            vec!["id", "user_from", "user_to", "created_at"]
        );
        assert_eq!(
            keys(&like.to_json().unwrap()),
            vec!["id", "user_id", "post_id", "created_at"]
        );
        assert_eq!(
            keys(&saved.to_json().unwrap()),
            vec!["id", "user_id", "post_id", "created_at"]
        );
    }

    #[test]
    fn test_view_round_trips_timestamp() {
        let post = Post {
            id: 9,
            caption: None,
            user_id: 1,
            created_at: ts(1_700_000_000),
            updated_at: ts(1_700_000_000),
        };
        let text = serde_json::to_string(&post.serialize()).unwrap();
        let back: PostView = serde_json::from_str(&text).unwrap();
        assert_eq!(back, post.serialize());
    }

    proptest! {
        #[test]
        fn prop_user_projection_never_exposes_password(
            id in any::<i64>(),
            name in ".{0,50}",
            email in "[a-z0-9.]{1,20}@[a-z]{1,10}\\.[a-z]{2,4}",
            password in ".{0,64}",
            is_active in any::<bool>()
        ) {
            let user = User {
                id,
                name,
                email: email.clone(),
                password: Password::new(password),
                is_active,
            };

            let json = user.to_json().unwrap();
            let object = json.as_object().unwrap();
            prop_assert!(!object.contains_key("password"));
            prop_assert_eq!(object.len(), 2);
            prop_assert_eq!(object["id"].as_i64(), Some(id));
            prop_assert_eq!(object["email"].as_str(), Some(email.as_str()));
        }

        #[test]
        fn prop_comment_projection_value_types(
            id in any::<i64>(),
            content in ".{0,255}",
            user_id in any::<i64>(),
            post_id in any::<i64>(),
            secs in 0i64..4_000_000_000
        ) {
            let comment = Comment {
                id,
                content: content.clone(),
                user_id,
                post_id,
                created_at: ts(secs),
                updated_at: ts(secs),
            };

            let json = comment.to_json().unwrap();
            prop_assert_eq!(json["id"].as_i64(), Some(id));
            prop_assert_eq!(json["content"].as_str(), Some(content.as_str()));
            prop_assert_eq!(json["user_id"].as_i64(), Some(user_id));
            prop_assert_eq!(json["post_id"].as_i64(), Some(post_id));
            prop_assert!(json["created_at"].is_string());
            prop_assert!(json["updated_at"].is_string());
        }
    }
}
