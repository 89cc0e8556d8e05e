use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::middleware::require_auth;
use crate::state::AppState;
use crate::{auth, comments, likes, posts, users};

/// Every route. CORS and request tracing are layered on by the binary.
pub fn build_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh))
        .route("/auth/logout", post(auth::logout))
        .route("/users/{id}", get(users::get_user))
        .route("/posts", get(posts::list_posts))
        .route("/posts/{id}", get(posts::get_post))
        .route("/posts/{id}/comments", get(comments::list_comments))
        .route("/posts/{id}/likes/count", get(likes::count_post_likes))
        .route("/comments/{id}", get(comments::get_comment))
        .route("/comments/{id}/likes/count", get(likes::count_comment_likes));

    let protected_routes = Router::new()
        .route("/posts", post(posts::create_post))
        .route("/posts/{id}", put(posts::update_post).delete(posts::delete_post))
        .route("/posts/{id}/comments", post(comments::create_comment))
        .route("/posts/{id}/likes", post(likes::like_post).delete(likes::unlike_post))
        .route(
            "/comments/{id}",
            put(comments::update_comment).delete(comments::delete_comment),
        )
        .route(
            "/comments/{id}/likes",
            post(likes::like_comment).delete(likes::unlike_comment),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}
