use std::sync::Arc;

use inventory_api::models::{NewProduct, Product};
use inventory_api::store::{ProductStore, StoreError};

fn sample(id: &str, name: &str, amount: i64) -> Product {
    Product {
        category: "Tools".into(),
        id: id.into(),
        name: name.into(),
        amount,
        photo: None,
    }
}

fn draft(name: &str, amount: i64) -> NewProduct {
    NewProduct {
        name: name.into(),
        category: "Tools".into(),
        amount,
        photo: None,
    }
}

#[tokio::test]
async fn write_then_read_round_trips_the_collection() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let store = ProductStore::new(dir.path().join("products.json"));

    let products = vec![sample("1", "Widget", 5), sample("2", "Gadget", 3)];
    store.write_all(&products).await?;

    let loaded = store.read_all().await?;
    assert_eq!(loaded, products, "order and content must survive the disk");

    // Writing back what was read must not change the effective content.
    store.write_all(&loaded).await?;
    assert_eq!(store.read_all().await?, products);

    Ok(())
}

#[tokio::test]
async fn read_fails_on_missing_document() {
    let dir = tempfile::tempdir().unwrap();
    let store = ProductStore::new(dir.path().join("absent.json"));

    let err = store.read_all().await.unwrap_err();
    assert!(matches!(err, StoreError::Io(_)), "got {err:?}");
}

#[tokio::test]
async fn read_fails_on_malformed_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.json");
    std::fs::write(&path, "{ this is not json").unwrap();

    let store = ProductStore::new(path);
    let err = store.read_all().await.unwrap_err();
    assert!(matches!(err, StoreError::Parse(_)), "got {err:?}");
}

#[tokio::test]
async fn ensure_document_seeds_once_and_preserves_existing_data() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let store = ProductStore::new(dir.path().join("nested/dir/products.json"));

    store.ensure_document().await?;
    assert!(store.read_all().await?.is_empty());

    store.write_all(&[sample("1", "Widget", 5)]).await?;
    store.ensure_document().await?;
    assert_eq!(store.read_all().await?.len(), 1, "must not clobber data");

    Ok(())
}

#[tokio::test]
async fn insert_mints_unique_ids_even_in_the_same_millisecond() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let store = ProductStore::new(dir.path().join("products.json"));
    store.write_all(&[]).await?;

    let a = store.insert(draft("Widget", 1)).await?.expect("created");
    let b = store.insert(draft("Gadget", 1)).await?.expect("created");
    let c = store.insert(draft("Sprocket", 1)).await?.expect("created");

    assert_ne!(a.id, b.id);
    assert_ne!(b.id, c.id);
    assert_ne!(a.id, c.id);

    Ok(())
}

#[tokio::test]
async fn insert_rejects_duplicate_names() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let store = ProductStore::new(dir.path().join("products.json"));
    store.write_all(&[]).await?;

    assert!(store.insert(draft("Widget", 1)).await?.is_some());
    assert!(store.insert(draft("Widget", 9)).await?.is_none());
    assert_eq!(store.read_all().await?.len(), 1);

    Ok(())
}

// Two simultaneous +1 adjustments must both land; the store serializes every
// read-modify-write on its lock, so the lost-update outcome cannot occur.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_adjustments_do_not_drop_writes() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let store = Arc::new(ProductStore::new(dir.path().join("products.json")));
    store.write_all(&[sample("x", "Widget", 0)]).await?;

    let s1 = Arc::clone(&store);
    let s2 = Arc::clone(&store);
    let (a, b) = tokio::join!(
        tokio::spawn(async move { s1.adjust_amount("x", 1).await }),
        tokio::spawn(async move { s2.adjust_amount("x", 1).await }),
    );
    a??.expect("product exists");
    b??.expect("product exists");

    let products = store.read_all().await?;
    assert_eq!(products[0].amount, 2);

    Ok(())
}
