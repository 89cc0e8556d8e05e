use chirp_types::models::{Comment, Post};

use crate::error::{ServiceError, ServiceResult};

/// A resource created by (and mutable only by) one user.
pub trait Owned {
    /// Singular noun used in error messages.
    const KIND: &'static str;

    fn owner_id(&self) -> i64;
}

impl Owned for Post {
    const KIND: &'static str = "post";

    fn owner_id(&self) -> i64 {
        self.user_id
    }
}

impl Owned for Comment {
    const KIND: &'static str = "comment";

    fn owner_id(&self) -> i64 {
        self.user_id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Update,
    Delete,
}

impl Mutation {
    fn verb(self) -> &'static str {
        match self {
            Mutation::Update => "update",
            Mutation::Delete => "delete",
        }
    }
}

pub fn can_mutate<R: Owned>(resource: &R, acting_user_id: i64) -> bool {
    resource.owner_id() == acting_user_id
}

/// Not-found when the lookup came back empty, forbidden when the caller is
/// not the owner, otherwise hands the resource back.
pub fn authorize<R: Owned>(
    resource: Option<R>,
    acting_user_id: i64,
    mutation: Mutation,
) -> ServiceResult<R> {
    let resource =
        resource.ok_or_else(|| ServiceError::not_found(format!("{} not found", R::KIND)))?;

    if !can_mutate(&resource, acting_user_id) {
        return Err(ServiceError::Forbidden(format!(
            "you can only {} your own {}s",
            mutation.verb(),
            R::KIND
        )));
    }

    Ok(resource)
}
