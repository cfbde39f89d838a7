use anyhow::Result;

use picfeed_store::db::repositories::{
    CommentRepository, FollowerRepository, LikeRepository, MediaRepository, PostRepository,
    SavedPostRepository, UserRepository,
};
use picfeed_store::{Database, StoreError};
use picfeed_types::{
    NewComment, NewFollower, NewLike, NewMedia, NewPost, NewSavedPost, NewUser, Password,
};

fn setup() -> Result<Database> {
    let db = Database::in_memory()?;
    db.initialize()?;
    Ok(db)
}

fn keys(value: &serde_json::Value) -> Vec<String> {
    value.as_object().map(|o| o.keys().cloned().collect()).unwrap_or_default()
}

/// Walk one of every entity through the store and check the projection of
/// what comes back out.
#[test]
fn test_every_entity_projects_its_contract_fields() -> Result<()> {
    let db = setup()?;
    let users = UserRepository::new(db.pool.clone());
    let posts = PostRepository::new(db.pool.clone());
    let media = MediaRepository::new(db.pool.clone());
    let comments = CommentRepository::new(db.pool.clone());
    let followers = FollowerRepository::new(db.pool.clone());
    let likes = LikeRepository::new(db.pool.clone());
    let saved = SavedPostRepository::new(db.pool.clone());

    let ann = users.create(&NewUser {
        name: "Ann".to_string(),
        email: "ann@x.com".to_string(),
        password: Password::new("p"),
        is_active: true,
    })?;
    let ben = users.create(&NewUser {
        name: "Ben".to_string(),
        email: "ben@x.com".to_string(),
        password: Password::new("q"),
        is_active: false,
    })?;
    let post = posts.create(&NewPost {
        caption: Some("beach day".to_string()),
        user_id: ann.id,
    })?;
    let photo = media.create(&NewMedia {
        url: "https://cdn.example.com/beach.jpg".to_string(),
        media_type: "image".to_string(),
        post_id: post.id,
    })?;
    let comment = comments.create(&NewComment {
        content: "jealous".to_string(),
        user_id: ben.id,
        post_id: post.id,
    })?;
    let follow = followers.follow(&NewFollower {
        user_from: ben.id,
        user_to: ann.id,
    })?;
    let like = likes.create(&NewLike {
        user_id: ben.id,
        post_id: post.id,
    })?;
    let bookmark = saved.create(&NewSavedPost {
        user_id: ben.id,
        post_id: post.id,
    })?;

    let user_json = ann.to_json()?;
    assert_eq!(keys(&user_json), vec!["id", "email"]);
    assert_eq!(user_json, serde_json::json!({ "id": ann.id, "email": "ann@x.com" }));

    let post_json = post.to_json()?;
    assert_eq!(keys(&post_json), vec!["id", "caption", "user_id", "created_at", "updated_at"]);
    assert!(post_json["id"].is_i64());
    assert!(post_json["caption"].is_string());
    assert!(post_json["created_at"].is_string());

    assert_eq!(
        keys(&photo.to_json()?),
        vec!["id", "url", "type", "post_id", "created_at", "updated_at"]
    );
    assert_eq!(
        keys(&comment.to_json()?),
        vec!["id", "content", "user_id", "post_id", "created_at", "updated_at"]
    );
    assert_eq!(keys(&follow.to_json()?), vec!["id", "user_from", "user_to", "created_at"]);
    assert_eq!(keys(&like.to_json()?), vec!["id", "user_id", "post_id", "created_at"]);
    assert_eq!(keys(&bookmark.to_json()?), vec!["id", "user_id", "post_id", "created_at"]);

    // Timestamps read back from SQLite survive the RFC 3339 round trip
    let reloaded = posts.get_by_id(post.id)?.expect("post should exist");
    assert_eq!(reloaded.to_json()?, post_json);

    Ok(())
}

#[test]
fn test_no_user_projection_contains_password() -> Result<()> {
    let db = setup()?;
    db.seed_demo_data()?;
    let users = UserRepository::new(db.pool.clone());

    let all = users.list_all()?;
    assert_eq!(all.len(), 3);
    for user in all {
        let json = user.to_json()?;
        assert!(json.get("password").is_none());
        assert!(!json.to_string().contains(user.password.expose()));
    }
    Ok(())
}

#[test]
fn test_post_for_missing_user_is_rejected() -> Result<()> {
    let db = setup()?;
    let posts = PostRepository::new(db.pool.clone());

    let result = posts.create(&NewPost {
        caption: None,
        user_id: 42,
    });
    assert!(matches!(result, Err(StoreError::ForeignKeyViolation(_))));
    Ok(())
}

#[test]
fn test_duplicate_email_is_rejected() -> Result<()> {
    let db = setup()?;
    let users = UserRepository::new(db.pool.clone());
    let new_user = NewUser {
        name: "Ann".to_string(),
        email: "ann@x.com".to_string(),
        password: Password::new("p"),
        is_active: true,
    };

    users.create(&new_user)?;
    let second = users.create(&new_user);
    assert!(matches!(second, Err(StoreError::UniqueViolation(_))));
    Ok(())
}

/// The schema declares no uniqueness on follow edges. Both inserts must
/// succeed; if this starts failing, someone added a constraint.
#[test]
fn test_duplicate_follower_edges_are_accepted() -> Result<()> {
    let db = setup()?;
    db.seed_demo_data()?;
    let followers = FollowerRepository::new(db.pool.clone());
    let edge = NewFollower {
        user_from: 3,
        user_to: 2,
    };

    let first = followers.follow(&edge)?;
    let second = followers.follow(&edge)?;
    assert_ne!(first.id, second.id);
    assert_eq!(
        followers
            .following_of(3)?
            .iter()
            .filter(|f| f.user_to == 2)
            .count(),
        2
    );
    Ok(())
}

#[test]
fn test_children_must_be_removed_before_parent() -> Result<()> {
    let db = setup()?;
    db.seed_demo_data()?;
    let users = UserRepository::new(db.pool.clone());
    let posts = PostRepository::new(db.pool.clone());
    let comments = CommentRepository::new(db.pool.clone());
    let media = MediaRepository::new(db.pool.clone());
    let likes = LikeRepository::new(db.pool.clone());
    let saved = SavedPostRepository::new(db.pool.clone());

    // Post 3 (Ben's) has a comment, media, a like, and a save
    assert!(matches!(posts.delete(3), Err(StoreError::ForeignKeyViolation(_))));

    for comment in comments.get_by_post(3)? {
        comments.delete(comment.id)?;
    }
    for item in media.get_by_post(3)? {
        media.delete(item.id)?;
    }
    for like in likes.get_by_post(3)? {
        likes.delete(like.id)?;
    }
    for bookmark in saved.get_by_post(3)? {
        saved.delete(bookmark.id)?;
    }
    posts.delete(3)?;
    assert!(posts.get_by_id(3)?.is_none());

    // Ben's comments, likes, and follow edges still reference the user row
    assert!(matches!(users.delete(2), Err(StoreError::ForeignKeyViolation(_))));
    Ok(())
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        // Whatever a user row holds, the stored-and-reloaded projection is
        // exactly {id, email}.
        #[test]
        fn prop_stored_user_projects_id_and_email(
            name in "[A-Za-z ]{1,50}",
            email in "[a-z0-9]{1,30}@[a-z]{1,20}\\.[a-z]{2,5}",
            password in "\\PC{0,40}",
            is_active in any::<bool>()
        ) {
            let db = setup().unwrap();
            let users = UserRepository::new(db.pool.clone());
            let created = users.create(&NewUser {
                name,
                email: email.clone(),
                password: Password::new(password),
                is_active,
            }).unwrap();

            let reloaded = users.get_by_id(created.id).unwrap().unwrap();
            prop_assert_eq!(&reloaded, &created);
            prop_assert_eq!(
                reloaded.to_json().unwrap(),
                serde_json::json!({ "id": created.id, "email": email })
            );
        }
    }
}
