//! User entity <-> model mapper

use gate_core::entities::{User, UserRole};
use gate_core::DomainError;

use crate::models::UserModel;

use super::bad_column;

impl TryFrom<UserModel> for User {
    type Error = DomainError;

    fn try_from(model: UserModel) -> Result<Self, Self::Error> {
        let role = model
            .role
            .parse::<UserRole>()
            .map_err(|_| bad_column("users", "role", &model.role))?;

        Ok(User {
            id: model.id,
            username: model.username,
            api_key: model.api_key,
            role,
            credits: model.credits,
            created_at: model.created_at,
        })
    }
}
