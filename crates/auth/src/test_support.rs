//! In-memory user repository for unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use leaguehub_core::league::User;
use leaguehub_core::storage::{RepositoryError, Result, UserRepository};

use crate::{AuthConfig, AuthState};

#[derive(Default)]
pub struct InMemoryUsers {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn get_user(&self, id: i64) -> Result<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn create_user(&self, user: &User) -> Result<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "User",
                id: user.email.clone(),
            });
        }
        let mut stored = user.clone();
        stored.id = users.len() as i64 + 1;
        users.push(stored.clone());
        Ok(stored)
    }

    async fn set_favorite_team(&self, user_id: i64, team_id: Option<i64>) -> Result<()> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or(RepositoryError::NotFound {
                entity_type: "User",
                id: user_id.to_string(),
            })?;
        user.favorite_team_id = team_id;
        Ok(())
    }
}

pub fn auth_state() -> AuthState {
    AuthState::new(Arc::new(InMemoryUsers::default()), AuthConfig::new("test-secret"))
}
