use foodgram_recipe::Relation;
use foodgram_shared::Error;
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn favorite_toggle() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.path()).await?;
    helpers::seed_tags(&state).await?;
    helpers::seed_ingredients(&state).await?;
    let john = helpers::create_user(&state, "john").await?;
    let id = state
        .command
        .create(&john, helpers::recipe_input("Tea", vec![1], vec![(5, 2)]))
        .await?;

    state.command.add(&john, Relation::Favorite, id).await?;
    assert!(state.query.find(Some(&john), id).await?.unwrap().is_favorited);

    state.command.remove(&john, Relation::Favorite, id).await?;
    assert!(!state.query.find(Some(&john), id).await?.unwrap().is_favorited);

    Ok(())
}

#[tokio::test]
async fn duplicate_add_is_rejected_and_not_stored() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.path()).await?;
    helpers::seed_tags(&state).await?;
    helpers::seed_ingredients(&state).await?;
    let john = helpers::create_user(&state, "john").await?;
    let id = state
        .command
        .create(&john, helpers::recipe_input("Tea", vec![1], vec![(5, 2)]))
        .await?;

    for relation in [Relation::Favorite, Relation::ShoppingCart] {
        state.command.add(&john, relation, id).await?;
        let err = state.command.add(&john, relation, id).await.unwrap_err();
        assert!(matches!(err, Error::Duplicate(_)));
    }

    assert_eq!(helpers::count(&state, "favorite").await?, 1);
    assert_eq!(helpers::count(&state, "shopping_cart").await?, 1);

    Ok(())
}

#[tokio::test]
async fn removing_missing_relation_fails() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.path()).await?;
    helpers::seed_tags(&state).await?;
    helpers::seed_ingredients(&state).await?;
    let john = helpers::create_user(&state, "john").await?;
    let jane = helpers::create_user(&state, "jane").await?;
    let id = state
        .command
        .create(&john, helpers::recipe_input("Tea", vec![1], vec![(5, 2)]))
        .await?;
    state.command.add(&jane, Relation::Favorite, id).await?;

    let err = state
        .command
        .remove(&john, Relation::Favorite, id)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Missing(_)));
    assert_eq!(helpers::count(&state, "favorite").await?, 1);

    let err = state
        .command
        .add(&john, Relation::ShoppingCart, 999)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    Ok(())
}

#[tokio::test]
async fn concurrent_adds_store_one_row() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.path()).await?;
    helpers::seed_tags(&state).await?;
    helpers::seed_ingredients(&state).await?;
    let john = helpers::create_user(&state, "john").await?;
    let id = state
        .command
        .create(&john, helpers::recipe_input("Tea", vec![1], vec![(5, 2)]))
        .await?;

    let (a, b) = tokio::join!(
        state.command.add(&john, Relation::Favorite, id),
        state.command.add(&john, Relation::Favorite, id),
    );

    assert!(a.is_ok() != b.is_ok());
    assert_eq!(helpers::count(&state, "favorite").await?, 1);

    Ok(())
}
