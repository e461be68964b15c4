/*
 * Responsibility
 * - users の read-only lookup (username / secret)
 * - 起動時に固定された in-memory の user set を提供
 * - 実ストアへの差し替えは UserRepo trait の実装追加で行う
 */
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Basic,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Basic => "basic",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub id: u32,
    pub username: String,
    pub password: String,
    pub role: Role,
    pub secret: String,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print credentials
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("role", &self.role)
            .finish()
    }
}

/// Read-only lookup over the user set.
pub trait UserRepo: Send + Sync {
    fn find_by_username(&self, username: &str) -> Option<User>;
    fn find_by_secret(&self, secret: &str) -> Option<User>;
}

/// Fixed user list. Lookups are linear scans; the set is small and never changes.
#[derive(Debug, Clone)]
pub struct InMemoryUserRepo {
    users: Vec<User>,
}

impl InMemoryUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    pub fn seeded() -> Self {
        Self::new(vec![
            User {
                id: 1,
                username: "admin".to_string(),
                password: "admin123".to_string(),
                role: Role::Admin,
                secret: "admin-secret-123".to_string(),
            },
            User {
                id: 2,
                username: "user".to_string(),
                password: "user123".to_string(),
                role: Role::Basic,
                secret: "user-secret-456".to_string(),
            },
        ])
    }

    #[cfg(test)]
    pub fn users(&self) -> &[User] {
        &self.users
    }
}

impl UserRepo for InMemoryUserRepo {
    fn find_by_username(&self, username: &str) -> Option<User> {
        self.users.iter().find(|u| u.username == username).cloned()
    }

    fn find_by_secret(&self, secret: &str) -> Option<User> {
        self.users.iter().find(|u| u.secret == secret).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_keys_are_unique() {
        let repo = InMemoryUserRepo::seeded();
        let users = repo.users();
        for (i, a) in users.iter().enumerate() {
            assert!(a.id > 0);
            assert!(!a.username.is_empty());
            for b in &users[i + 1..] {
                assert_ne!(a.id, b.id);
                assert_ne!(a.username, b.username);
                assert_ne!(a.secret, b.secret);
            }
        }
    }

    #[test]
    fn finds_by_username_and_secret() {
        let repo = InMemoryUserRepo::seeded();

        let admin = repo.find_by_username("admin").unwrap();
        assert_eq!(admin.id, 1);
        assert_eq!(admin.role, Role::Admin);

        let basic = repo.find_by_secret("user-secret-456").unwrap();
        assert_eq!(basic.username, "user");

        assert!(repo.find_by_username("nobody").is_none());
        assert!(repo.find_by_secret("admin123").is_none());
    }

    #[test]
    fn debug_hides_credentials() {
        let repo = InMemoryUserRepo::seeded();
        let out = format!("{:?}", repo.find_by_username("admin").unwrap());
        assert!(!out.contains("admin123"));
        assert!(!out.contains("admin-secret-123"));
    }
}
