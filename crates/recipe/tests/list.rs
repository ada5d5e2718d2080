use foodgram_recipe::{RecipeFilter, Relation};
use foodgram_shared::PageArgs;
use temp_dir::TempDir;

mod helpers;

fn names(page: &foodgram_shared::Page<foodgram_recipe::RecipeView>) -> Vec<&str> {
    page.results.iter().map(|r| r.name.as_str()).collect()
}

#[tokio::test]
async fn tag_filter_is_a_deduplicated_union() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.path()).await?;
    helpers::seed_tags(&state).await?;
    helpers::seed_ingredients(&state).await?;
    let john = helpers::create_user(&state, "john").await?;

    for (name, tags) in [
        ("Omelette", vec![1]),
        ("Brunch", vec![1, 2]),
        ("Soup", vec![2]),
        ("Steak", vec![3]),
    ] {
        state
            .command
            .create(&john, helpers::recipe_input(name, tags, vec![(3, 2)]))
            .await?;
    }

    let filter = RecipeFilter {
        tags: vec!["breakfast".to_owned()],
        ..Default::default()
    };
    let page = state
        .query
        .list(None, &filter, &PageArgs::default())
        .await?;
    assert_eq!(names(&page), vec!["Brunch", "Omelette"]);
    assert_eq!(page.count, 2);

    let filter = RecipeFilter {
        tags: vec!["breakfast".to_owned(), "lunch".to_owned()],
        ..Default::default()
    };
    let page = state
        .query
        .list(None, &filter, &PageArgs::default())
        .await?;
    assert_eq!(names(&page), vec!["Brunch", "Omelette", "Soup"]);
    assert_eq!(page.count, 3);

    Ok(())
}

#[tokio::test]
async fn author_filter_and_pagination() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.path()).await?;
    helpers::seed_tags(&state).await?;
    helpers::seed_ingredients(&state).await?;
    let john = helpers::create_user(&state, "john").await?;
    let jane = helpers::create_user(&state, "jane").await?;

    for name in ["A", "B", "C"] {
        state
            .command
            .create(&john, helpers::recipe_input(name, vec![1], vec![(1, 1)]))
            .await?;
    }
    state
        .command
        .create(&jane, helpers::recipe_input("D", vec![1], vec![(1, 1)]))
        .await?;

    let filter = RecipeFilter {
        author: Some(john.id),
        ..Default::default()
    };
    let page = state
        .query
        .list(None, &filter, &PageArgs::new(2, 2))
        .await?;
    assert_eq!(page.count, 3);
    assert_eq!(names(&page), vec!["C"]);
    assert!(page.has_previous());
    assert!(!page.has_next());

    Ok(())
}

#[tokio::test]
async fn membership_flags_only_apply_to_authenticated_viewers() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.path()).await?;
    helpers::seed_tags(&state).await?;
    helpers::seed_ingredients(&state).await?;
    let john = helpers::create_user(&state, "john").await?;

    let tea = state
        .command
        .create(&john, helpers::recipe_input("Tea", vec![1], vec![(5, 2)]))
        .await?;
    let cake = state
        .command
        .create(&john, helpers::recipe_input("Cake", vec![1], vec![(1, 2)]))
        .await?;
    state.command.add(&john, Relation::Favorite, tea).await?;
    state.command.add(&john, Relation::ShoppingCart, cake).await?;

    let favorited = RecipeFilter {
        is_favorited: Some(true),
        ..Default::default()
    };
    let page = state
        .query
        .list(Some(&john), &favorited, &PageArgs::default())
        .await?;
    assert_eq!(names(&page), vec!["Tea"]);

    let page = state
        .query
        .list(None, &favorited, &PageArgs::default())
        .await?;
    assert_eq!(names(&page), vec!["Cake", "Tea"]);

    let not_in_cart = RecipeFilter {
        is_in_shopping_cart: Some(false),
        ..Default::default()
    };
    let page = state
        .query
        .list(Some(&john), &not_in_cart, &PageArgs::default())
        .await?;
    assert_eq!(names(&page), vec!["Tea"]);
    assert!(page.results[0].is_favorited);
    assert!(!page.results[0].is_in_shopping_cart);

    Ok(())
}
