use crate::Config;

pub async fn set_staff(config: Config, email: String, revoke: bool) -> anyhow::Result<()> {
    let pool = foodgram::create_pool(&config.database.url, 1).await?;
    let state = foodgram::shared_state(&config, pool.clone(), pool);
    let tokens = foodgram_user::TokenSigner::new(
        &config.auth.secret_key,
        config.auth.token_lifetime_days,
    );
    let command = foodgram_user::Command::new(state, tokens);

    match command.set_staff(&email, !revoke).await {
        Ok(id) if revoke => tracing::info!("{email} (#{id}) no longer has staff access"),
        Ok(id) => tracing::info!("{email} (#{id}) now has staff access"),
        Err(foodgram_shared::Error::NotFound(_)) => tracing::error!("user {email} not found"),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
