use std::sync::Arc;

use tracing::debug;

use crate::error::{ServiceError, ServiceResult};
use crate::store::{CommentStore, LikeStore, LikeTarget, PostStore, is_duplicate};

pub struct LikeService {
    likes: Arc<dyn LikeStore>,
    posts: Arc<dyn PostStore>,
    comments: Arc<dyn CommentStore>,
}

impl LikeService {
    pub fn new(
        likes: Arc<dyn LikeStore>,
        posts: Arc<dyn PostStore>,
        comments: Arc<dyn CommentStore>,
    ) -> Self {
        Self {
            likes,
            posts,
            comments,
        }
    }

    /// Conflict when the user already likes the target.
    pub fn like(&self, user_id: i64, target: LikeTarget) -> ServiceResult<()> {
        self.ensure_exists(target)?;

        let already_liked = || ServiceError::Conflict(format!("{} already liked", target.kind()));
        if self.likes.is_liked(target, user_id)? {
            return Err(already_liked());
        }

        // a concurrent like can land between the check and the insert
        match self.likes.like(target, user_id) {
            Err(e) if is_duplicate(&e) => return Err(already_liked()),
            other => other?,
        }
        debug!("User {} liked {:?}", user_id, target);
        Ok(())
    }

    /// Not-found when there is no like to remove.
    pub fn unlike(&self, user_id: i64, target: LikeTarget) -> ServiceResult<()> {
        if !self.likes.is_liked(target, user_id)? {
            return Err(ServiceError::not_found(format!("{} not liked yet", target.kind())));
        }

        self.likes.unlike(target, user_id)?;
        debug!("User {} unliked {:?}", user_id, target);
        Ok(())
    }

    pub fn count(&self, target: LikeTarget) -> ServiceResult<i64> {
        Ok(self.likes.count_likes(target)?)
    }

    fn ensure_exists(&self, target: LikeTarget) -> ServiceResult<()> {
        let exists = match target {
            LikeTarget::Post(id) => self.posts.get_post(id)?.is_some(),
            LikeTarget::Comment(id) => self.comments.get_comment(id)?.is_some(),
        };
        if !exists {
            return Err(ServiceError::not_found(format!("{} not found", target.kind())));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::store::{CommentStore, CredentialStore, LikeStore, PostStore};

    fn setup() -> (LikeService, i64, i64, i64) {
        let store = Arc::new(MemoryStore::new());
        let alice = store.create_user("alice", "a@example.com", "hash").unwrap();
        let post = store.create_post(alice, "title", "content").unwrap();
        let comment = store.create_comment(post, alice, "first").unwrap();
        let service = LikeService::new(store.clone(), store.clone(), store);
        (service, alice, post, comment)
    }

    #[test]
    fn double_like_conflicts() {
        let (service, alice, post, _) = setup();
        service.like(alice, LikeTarget::Post(post)).unwrap();

        match service.like(alice, LikeTarget::Post(post)) {
            Err(ServiceError::Conflict(msg)) => assert_eq!(msg, "post already liked"),
            other => panic!("expected conflict, got {:?}", other),
        }
        assert_eq!(service.count(LikeTarget::Post(post)).unwrap(), 1);
    }

    #[test]
    fn unlike_without_like_is_not_found() {
        let (service, alice, post, comment) = setup();

        match service.unlike(alice, LikeTarget::Post(post)) {
            Err(ServiceError::NotFound(msg)) => assert_eq!(msg, "post not liked yet"),
            other => panic!("expected not found, got {:?}", other),
        }

        service.like(alice, LikeTarget::Comment(comment)).unwrap();
        service.unlike(alice, LikeTarget::Comment(comment)).unwrap();
        assert_eq!(service.count(LikeTarget::Comment(comment)).unwrap(), 0);
        assert!(matches!(
            service.unlike(alice, LikeTarget::Comment(comment)),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn liking_missing_target_is_not_found() {
        let (service, alice, _, _) = setup();
        assert!(matches!(
            service.like(alice, LikeTarget::Post(777)),
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            service.like(alice, LikeTarget::Comment(777)),
            Err(ServiceError::NotFound(_))
        ));
    }

    #[test]
    fn like_racing_another_like_is_conflict() {
        let store = Arc::new(MemoryStore::new());
        let alice = store.create_user("alice", "a@example.com", "hash").unwrap();
        let post = store.create_post(alice, "title", "content").unwrap();
        let service = LikeService::new(store.clone(), store.clone(), store.clone());

        // the other request inserted its row after our existence check ran
        store.like(LikeTarget::Post(post), alice).unwrap();
        store.skip_duplicate_lookups();

        match service.like(alice, LikeTarget::Post(post)) {
            Err(ServiceError::Conflict(msg)) => assert_eq!(msg, "post already liked"),
            other => panic!("expected conflict, got {:?}", other),
        }
    }

    #[test]
    fn count_of_unknown_target_is_zero() {
        let (service, _, _, _) = setup();
        assert_eq!(service.count(LikeTarget::Post(12345)).unwrap(), 0);
    }
}
