use foodgram_recipe::{ImportReport, IngredientInput, TagInput};
use foodgram_shared::{Caller, Error};
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn import_skips_existing_and_blank_rows() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.path()).await?;

    let report = state
        .catalog
        .import_ingredients("flour,g\nsugar,g\nflour,g\n,g\nsalt\n".as_bytes())
        .await?;
    assert_eq!(
        report,
        ImportReport {
            inserted: 2,
            skipped: 3
        }
    );

    let report = state
        .catalog
        .import_ingredients("flour,g\nflour,kg\n".as_bytes())
        .await?;
    assert_eq!(
        report,
        ImportReport {
            inserted: 1,
            skipped: 1
        }
    );

    assert_eq!(helpers::count(&state, "ingredient").await?, 3);

    Ok(())
}

#[tokio::test]
async fn ingredient_search_is_case_insensitive_prefix() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.path()).await?;
    state
        .catalog
        .import_ingredients("Сахар,г\nсоль,г\nSalt,g\nsugar,g\nbrown sugar,g\n".as_bytes())
        .await?;

    let found = state.catalog.ingredients(Some("SU")).await?;
    assert_eq!(
        found.iter().map(|i| i.name.as_str()).collect::<Vec<_>>(),
        vec!["sugar"]
    );

    let found = state.catalog.ingredients(Some("са")).await?;
    assert_eq!(
        found.iter().map(|i| i.name.as_str()).collect::<Vec<_>>(),
        vec!["Сахар"]
    );

    assert_eq!(state.catalog.ingredients(None).await?.len(), 5);
    assert!(state.catalog.ingredients(Some("%")).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn only_staff_creates_ingredients() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.path()).await?;
    let user = Caller {
        id: 1,
        is_staff: false,
    };
    let input = || IngredientInput {
        name: "flour".to_owned(),
        measurement_unit: "g".to_owned(),
    };

    let err = state
        .catalog
        .create_ingredient(&user, input())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Forbidden));

    let staff = Caller {
        is_staff: true,
        ..user
    };
    let created = state.catalog.create_ingredient(&staff, input()).await?;
    assert_eq!(
        state.catalog.find_ingredient(created.id).await?,
        Some(created)
    );

    let err = state
        .catalog
        .create_ingredient(&staff, input())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Field { ref field, .. } if field == "name"));

    Ok(())
}

#[tokio::test]
async fn tags_are_listed_by_name() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.path()).await?;
    helpers::seed_tags(&state).await?;

    let slugs = state
        .catalog
        .tags()
        .await?
        .into_iter()
        .map(|t| t.slug)
        .collect::<Vec<_>>();
    assert_eq!(slugs, vec!["breakfast", "dinner", "lunch"]);

    let err = state
        .catalog
        .create_tag(TagInput {
            name: "Again".to_owned(),
            slug: "lunch".to_owned(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Field { ref field, .. } if field == "slug"));

    let err = state
        .catalog
        .create_tag(TagInput {
            name: "Bad".to_owned(),
            slug: "not a slug".to_owned(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validate(_)));

    assert_eq!(state.catalog.find_tag(2).await?.unwrap().slug, "lunch");
    assert!(state.catalog.find_tag(99).await?.is_none());

    Ok(())
}
