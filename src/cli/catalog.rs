use std::path::PathBuf;

use foodgram_recipe::TagInput;

use crate::Config;

async fn catalog(config: &Config) -> anyhow::Result<foodgram_recipe::Catalog> {
    let pool = foodgram::create_pool(&config.database.url, 1).await?;
    let state = foodgram::shared_state(config, pool.clone(), pool);

    Ok(foodgram_recipe::Catalog(state))
}

pub async fn import_ingredients(config: Config, path: PathBuf) -> anyhow::Result<()> {
    let file = std::fs::File::open(&path)?;
    let report = catalog(&config).await?.import_ingredients(file).await?;

    tracing::info!(
        "{}: {} ingredients imported, {} skipped",
        path.display(),
        report.inserted,
        report.skipped
    );

    Ok(())
}

pub async fn create_tag(config: Config, name: String, slug: String) -> anyhow::Result<()> {
    let tag = catalog(&config)
        .await?
        .create_tag(TagInput { name, slug })
        .await?;

    tracing::info!("tag {} created with id {}", tag.slug, tag.id);

    Ok(())
}
