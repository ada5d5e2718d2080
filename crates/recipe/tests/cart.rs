use foodgram_recipe::{IngredientInput, Relation};
use foodgram_shared::Caller;
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn flour_is_aggregated_across_recipes() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.path()).await?;
    helpers::seed_tags(&state).await?;
    helpers::seed_ingredients(&state).await?;
    let john = helpers::create_user(&state, "john").await?;

    let a = state
        .command
        .create(&john, helpers::recipe_input("A", vec![1], vec![(1, 200)]))
        .await?;
    let b = state
        .command
        .create(&john, helpers::recipe_input("B", vec![1], vec![(1, 300)]))
        .await?;
    state.command.add(&john, Relation::ShoppingCart, a).await?;
    state.command.add(&john, Relation::ShoppingCart, b).await?;

    assert_eq!(state.query.shopping_list(&john).await?, "flour: 500 g");

    Ok(())
}

#[tokio::test]
async fn same_name_different_unit_is_merged_by_name() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.path()).await?;
    helpers::seed_tags(&state).await?;
    helpers::seed_ingredients(&state).await?;
    let john = helpers::create_user(&state, "john").await?;
    let admin = Caller {
        id: john.id,
        is_staff: true,
    };

    let milk_cups = state
        .catalog
        .create_ingredient(
            &admin,
            IngredientInput {
                name: "milk".to_owned(),
                measurement_unit: "cup".to_owned(),
            },
        )
        .await?;

    let a = state
        .command
        .create(&john, helpers::recipe_input("A", vec![1], vec![(4, 100), (2, 5)]))
        .await?;
    let b = state
        .command
        .create(&john, helpers::recipe_input("B", vec![1], vec![(milk_cups.id, 2)]))
        .await?;
    state.command.add(&john, Relation::ShoppingCart, a).await?;
    state.command.add(&john, Relation::ShoppingCart, b).await?;

    assert_eq!(
        state.query.shopping_list(&john).await?,
        "milk: 102 cup\nsugar: 5 g"
    );

    Ok(())
}

#[tokio::test]
async fn empty_cart_exports_empty_list() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.path()).await?;
    let john = helpers::create_user(&state, "john").await?;

    assert_eq!(state.query.shopping_list(&john).await?, "");

    Ok(())
}
