use super::prelude::*;

#[derive(Default)]
pub struct UserQueries;

#[Object]
impl UserQueries {
    /// List all registered users
    async fn users(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        let auth = ctx.data_unchecked::<AuthService>();

        let records = auth.list_users().await?;
        Ok(records.into_iter().map(user_record_to_graphql).collect())
    }
}
