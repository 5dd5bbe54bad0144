//! GraphQL authentication mutations
//!
//! signUp and login issue a bearer token for subsequent requests; neither
//! requires authentication. changePassword authenticates with the current
//! password itself rather than a token.

use super::prelude::*;

#[derive(Default)]
pub struct AuthMutations;

#[Object]
impl AuthMutations {
    /// Register a new user and return a token for it
    async fn sign_up(
        &self,
        ctx: &Context<'_>,
        user_name: String,
        email: String,
        password: String,
    ) -> Result<AuthPayload> {
        let auth = ctx.data_unchecked::<AuthService>();

        let payload = auth
            .sign_up(SignUpInput {
                user_name,
                email,
                password,
            })
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "signup failed"))?;

        Ok(AuthPayload {
            token: payload.token,
            user: user_record_to_graphql(payload.user),
        })
    }

    /// Authenticate with email and password
    async fn login(
        &self,
        ctx: &Context<'_>,
        email: String,
        password: String,
    ) -> Result<AuthPayload> {
        let auth = ctx.data_unchecked::<AuthService>();

        let payload = auth
            .login(&email, &password)
            .await
            .inspect_err(|e| tracing::warn!(email = %email, error = %e, "login failed"))?;

        Ok(AuthPayload {
            token: payload.token,
            user: user_record_to_graphql(payload.user),
        })
    }

    /// Replace a user's password after verifying the current one
    async fn change_password(
        &self,
        ctx: &Context<'_>,
        email: String,
        current_password: String,
        new_password: String,
    ) -> Result<User> {
        let auth = ctx.data_unchecked::<AuthService>();

        let user = auth
            .change_password(&email, &current_password, &new_password)
            .await
            .inspect_err(|e| tracing::warn!(email = %email, error = %e, "password change failed"))?;

        Ok(user_record_to_graphql(user))
    }
}
