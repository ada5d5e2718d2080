use foodgram_shared::{Error, PageArgs};
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn cannot_follow_self() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.path()).await?;
    let cmd = helpers::command(&state);
    let john = helpers::create_user(&state, "john").await?;

    let err = cmd.subscribe(&john, john.id).await.unwrap_err();
    assert!(matches!(err, Error::Field { .. }));

    Ok(())
}

#[tokio::test]
async fn follow_is_not_duplicated() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.path()).await?;
    let cmd = helpers::command(&state);
    let john = helpers::create_user(&state, "john").await?;
    let jane = helpers::create_user(&state, "jane").await?;

    cmd.subscribe(&john, jane.id).await?;
    let err = cmd.subscribe(&john, jane.id).await.unwrap_err();
    assert!(matches!(err, Error::Duplicate(_)));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM subscribe")
        .fetch_one(&state.read_db)
        .await?;
    assert_eq!(count, 1);

    Ok(())
}

#[tokio::test]
async fn unfollow_missing_relation_fails() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.path()).await?;
    let cmd = helpers::command(&state);
    let john = helpers::create_user(&state, "john").await?;
    let jane = helpers::create_user(&state, "jane").await?;

    let err = cmd.unsubscribe(&john, jane.id).await.unwrap_err();
    assert!(matches!(err, Error::Missing(_)));

    let err = cmd.subscribe(&john, 999).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    Ok(())
}

#[tokio::test]
async fn following_lists_subscribed_profiles() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.path()).await?;
    let cmd = helpers::command(&state);
    let query = foodgram_user::Query(state.clone());
    let john = helpers::create_user(&state, "john").await?;
    let jane = helpers::create_user(&state, "jane").await?;
    let bob = helpers::create_user(&state, "bob").await?;

    cmd.subscribe(&john, bob.id).await?;
    cmd.subscribe(&john, jane.id).await?;

    let page = query.following(&john, &PageArgs::default()).await?;
    assert_eq!(page.count, 2);
    let names: Vec<_> = page.results.iter().map(|p| p.username.as_str()).collect();
    assert_eq!(names, vec!["bob", "jane"]);
    assert!(page.results.iter().all(|p| p.is_subscribed));

    let profile = query.find(Some(&jane), bob.id).await?.unwrap();
    assert!(!profile.is_subscribed);

    cmd.unsubscribe(&john, bob.id).await?;
    let profile = query.find(Some(&john), bob.id).await?.unwrap();
    assert!(!profile.is_subscribed);

    Ok(())
}
