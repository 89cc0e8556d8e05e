use std::sync::Arc;

use chirp_core::comments::CommentService;
use chirp_core::likes::LikeService;
use chirp_core::posts::PostService;
use chirp_core::store::{CommentStore, CredentialStore, LikeStore, PostStore};
use chirp_core::users::UserService;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub users: UserService,
    pub posts: PostService,
    pub comments: CommentService,
    pub likes: LikeService,
    /// Verifies access tokens in the auth middleware.
    pub jwt_secret: String,
}

impl AppStateInner {
    /// Wire every service to one backing store.
    pub fn new<S>(store: Arc<S>, jwt_secret: impl Into<String>) -> Self
    where
        S: CredentialStore + PostStore + CommentStore + LikeStore + 'static,
    {
        let jwt_secret = jwt_secret.into();
        let credentials: Arc<dyn CredentialStore> = store.clone();
        let posts: Arc<dyn PostStore> = store.clone();
        let comments: Arc<dyn CommentStore> = store.clone();
        let likes: Arc<dyn LikeStore> = store;

        Self {
            users: UserService::new(credentials, jwt_secret.clone()),
            posts: PostService::new(posts.clone()),
            comments: CommentService::new(comments.clone(), posts.clone()),
            likes: LikeService::new(likes, posts, comments),
            jwt_secret,
        }
    }
}
