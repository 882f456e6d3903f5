/// Identity of the caller for one inbound request
///
/// Resolved once by the auth middleware and carried through request
/// extensions. A missing bearer credential is a valid anonymous caller;
/// an invalid one never reaches the handlers.
#[derive(Debug, Clone, Default)]
pub enum Caller {
    /// No credential presented
    #[default]
    Anonymous,
    /// Credential verified against the identity service
    User(VerifiedUser),
}

impl Caller {
    pub const fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous)
    }

    /// Verified identity, if the caller authenticated
    pub const fn user(&self) -> Option<&VerifiedUser> {
        match self {
            Self::Anonymous => None,
            Self::User(user) => Some(user),
        }
    }
}

/// Identity returned by the hosted identity service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedUser {
    /// Stable user identifier
    pub user_id: String,
    /// Email address, when the identity service exposes one
    pub email: Option<String>,
}
