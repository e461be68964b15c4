use crate::repos::user_repo::{Role, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Granted,
    Denied,
}

impl Decision {
    pub fn message(&self) -> &'static str {
        match self {
            Decision::Granted => "Access granted",
            Decision::Denied => "Access denied",
        }
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, Decision::Granted)
    }
}

/// Coarse role gate. An absent user is always denied.
///
/// This checks the role only; whoever produced `user` is responsible for
/// having authenticated it.
pub fn authorize_role(user: Option<&User>, required: Role) -> Decision {
    match user {
        Some(u) if u.role == required => Decision::Granted,
        _ => Decision::Denied,
    }
}
