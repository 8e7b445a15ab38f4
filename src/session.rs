use crate::{
    error::{Error, Result},
    supabase::Identity,
    types::User,
};

/// Who is signed in, for the lifetime of one command.
///
/// Initialised from the identity service at start-up and updated by sign-in,
/// sign-up and sign-out. Commands that need a signed-in user receive it by
/// reference and call [`require_user`](Self::require_user).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionContext {
    current_user: Option<User>,
}

impl SessionContext {
    pub async fn initialize(identity: &dyn Identity) -> Result<Self> {
        let current_user = identity.current_user().await?;
        if let Some(user) = &current_user {
            log::debug!("Session restored for {}", user.email);
        }
        Ok(Self { current_user })
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.current_user.is_some()
    }

    pub fn require_user(&self) -> Result<&User> {
        self.current_user.as_ref().ok_or(Error::NotSignedIn)
    }

    pub async fn sign_up(
        &mut self,
        identity: &dyn Identity,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<&User> {
        let user = identity.sign_up(name, email, password).await?;
        Ok(self.current_user.insert(user))
    }

    pub async fn sign_in(
        &mut self,
        identity: &dyn Identity,
        email: &str,
        password: &str,
    ) -> Result<&User> {
        let user = identity.sign_in(email, password).await?;
        Ok(self.current_user.insert(user))
    }

    pub async fn sign_out(&mut self, identity: &dyn Identity) -> Result<()> {
        identity.sign_out().await?;
        self.current_user = None;
        Ok(())
    }
}
