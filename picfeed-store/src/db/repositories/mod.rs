mod user_repository;
mod post_repository;
mod media_repository;
mod comment_repository;
mod follower_repository;
mod like_repository;
mod saved_post_repository;

pub use user_repository::UserRepository;
pub use post_repository::PostRepository;
pub use media_repository::MediaRepository;
pub use comment_repository::CommentRepository;
pub use follower_repository::FollowerRepository;
pub use like_repository::LikeRepository;
pub use saved_post_repository::SavedPostRepository;
