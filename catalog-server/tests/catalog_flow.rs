//! End-to-end catalog flows against the real collaborators:
//! in-memory SQLite, filesystem media store and the broadcast bus.

use std::path::PathBuf;
use std::sync::Arc;

use catalog_server::{CatalogService, DbService, FsMediaStore, MessageBus, RepoError};
use shared::error::ErrorCode;
use shared::message::{ChangePayload, ChangeType};
use shared::models::{CategoryCreate, ImageKind, InventorySubmission, ProductSubmission};
use tempfile::TempDir;
use tokio::sync::broadcast;

struct Fixture {
    catalog: CatalogService,
    media: FsMediaStore,
    events: broadcast::Receiver<shared::BusMessage>,
    _images: TempDir,
}

async fn fixture() -> Fixture {
    let images = tempfile::tempdir().unwrap();
    let db = DbService::in_memory().await.unwrap();
    let media = FsMediaStore::new(images.path());
    let bus = Arc::new(MessageBus::new());
    let events = bus.subscribe();
    let catalog = CatalogService::new(db.pool, Arc::new(media.clone()), bus);
    Fixture {
        catalog,
        media,
        events,
        _images: images,
    }
}

impl Fixture {
    fn next_change(&mut self) -> ChangePayload {
        self.events.try_recv().unwrap().parse_payload().unwrap()
    }

    async fn seed_variant_media(&self, product_id: i64, variant_id: i64) -> Vec<PathBuf> {
        let mut folders = Vec::new();
        for kind in ImageKind::ALL {
            let folder = self.media.variant_folder(product_id, variant_id, kind);
            tokio::fs::create_dir_all(&folder).await.unwrap();
            tokio::fs::write(folder.join("0.jpg"), b"jpeg").await.unwrap();
            folders.push(folder);
        }
        folders
    }
}

fn widget(variants: Vec<InventorySubmission>) -> ProductSubmission {
    ProductSubmission {
        name: "Widget".into(),
        short_description: Some("A very useful widget".into()),
        user_id: 42,
        has_variants: true,
        inventory: variants,
        ..Default::default()
    }
}

#[tokio::test]
async fn widget_lifecycle() {
    let mut fx = fixture().await;

    // add: one variant, model type "M1" created
    let product = fx
        .catalog
        .add_product(widget(vec![
            InventorySubmission::new(5, 10.0).with_model_types(["M1"]),
        ]))
        .await
        .unwrap();
    assert_eq!(product.inventory.len(), 1);
    assert_eq!(product.inventory[0].quantity, 5);
    assert_eq!(product.inventory[0].model_type_names(), vec!["M1"]);
    let first = product.inventory[0].clone();

    let change = fx.next_change();
    assert_eq!(change.resource, "product");
    assert_eq!(change.change_type, ChangeType::Insert);
    assert_eq!(change.version, 1);
    assert_eq!(change.data.unwrap()["name"], "Widget");

    // new variant without id, old one untouched: M1 reused
    let updated = fx
        .catalog
        .update_product(
            product.id,
            widget(vec![
                InventorySubmission::new(3, 12.0).with_model_types(["M1"]),
            ]),
        )
        .await
        .unwrap();
    assert_eq!(updated.inventory.len(), 2);
    assert_eq!(updated.variant(first.id), Some(&first));
    assert_eq!(fx.catalog.list_model_types().await.unwrap().len(), 1);

    let change = fx.next_change();
    assert_eq!(change.change_type, ChangeType::Update);
    assert_eq!(change.version, 2);

    // zero quantity on the first variant: gone, media purged, M1 kept
    let folders = fx.seed_variant_media(product.id, first.id).await;
    let updated = fx
        .catalog
        .update_product(
            product.id,
            widget(vec![InventorySubmission::existing(first.id, 0, 0.0)]),
        )
        .await
        .unwrap();
    assert_eq!(updated.inventory.len(), 1);
    assert!(updated.variant(first.id).is_none());
    for folder in folders {
        assert!(!folder.exists(), "{} should be purged", folder.display());
    }
    let models = fx.catalog.list_model_types().await.unwrap();
    assert_eq!(models.len(), 1);
    assert_eq!(models[0].name, "M1");

    // delete: product folder purged, nothing left behind
    let remaining = updated.inventory[0].id;
    fx.seed_variant_media(product.id, remaining).await;
    assert!(fx.catalog.delete_product(product.id).await.unwrap());
    assert!(!fx.media.product_folder(product.id).exists());
    assert!(fx.catalog.get_product(product.id).await.unwrap().is_none());

    let mut conn = fx.catalog.pool().acquire().await.unwrap();
    let orphans: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM inventory")
        .fetch_one(&mut *conn)
        .await
        .unwrap();
    assert_eq!(orphans, 0);
}

#[tokio::test]
async fn categories_are_replaced_and_guarded() {
    let mut fx = fixture().await;
    let a = fx
        .catalog
        .create_category(CategoryCreate { name: "A".into() })
        .await
        .unwrap();
    let b = fx
        .catalog
        .create_category(CategoryCreate { name: "B".into() })
        .await
        .unwrap();
    assert_eq!(fx.next_change().resource, "category");
    assert_eq!(fx.next_change().version, 2);

    let mut sub = widget(vec![]);
    sub.category_ids = vec![a.id, 999];
    let product = fx.catalog.add_product(sub).await.unwrap();
    assert_eq!(product.category_ids(), vec![a.id]);

    // disjoint replacement
    let mut sub = widget(vec![]);
    sub.category_ids = vec![b.id];
    let updated = fx.catalog.update_product(product.id, sub).await.unwrap();
    assert_eq!(updated.category_ids(), vec![b.id]);

    // b is referenced, a is free
    let err = fx.catalog.delete_category(b.id).await.unwrap_err();
    assert!(matches!(err, RepoError::Conflict(ErrorCode::CategoryHasProducts, _)));
    let members = fx.catalog.products_in_category(b.id).await.unwrap();
    assert_eq!(members.len(), 1);
    assert!(fx.catalog.delete_category(a.id).await.unwrap());
}

#[tokio::test]
async fn failed_update_changes_nothing() {
    let mut fx = fixture().await;
    let mut other = widget(vec![]);
    other.name = "Gadget".into();
    fx.catalog.add_product(other).await.unwrap();

    let product = fx
        .catalog
        .add_product(widget(vec![InventorySubmission::new(2, 1.0)]))
        .await
        .unwrap();
    let variant_id = product.inventory[0].id;
    let folders = fx.seed_variant_media(product.id, variant_id).await;
    while fx.events.try_recv().is_ok() {}

    let mut sub = widget(vec![InventorySubmission::existing(variant_id, 0, 0.0)]);
    sub.name = "Gadget".into();
    let err = fx.catalog.update_product(product.id, sub).await.unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(..)));

    let stored = fx.catalog.get_product(product.id).await.unwrap().unwrap();
    assert_eq!(stored.name, "Widget");
    assert_eq!(stored.inventory, product.inventory);
    for folder in folders {
        assert!(folder.exists());
    }
    assert!(fx.events.try_recv().is_err());
}

#[tokio::test]
async fn products_by_user() {
    let fx = fixture().await;
    fx.catalog.add_product(widget(vec![])).await.unwrap();
    let mut theirs = widget(vec![]);
    theirs.name = "Sprocket".into();
    theirs.user_id = 7;
    fx.catalog.add_product(theirs).await.unwrap();

    let owned = fx.catalog.find_products_by_user(42).await.unwrap();
    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0].name, "Widget");
    assert_eq!(fx.catalog.list_products().await.unwrap().len(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_writers_on_a_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("catalog.db");
    let db = DbService::new(&db_path.to_string_lossy(), 8).await.unwrap();
    let media = FsMediaStore::new(dir.path().join("images"));
    let catalog = CatalogService::new(db.pool, Arc::new(media), Arc::new(MessageBus::new()));

    let mut products = Vec::new();
    for i in 0..8 {
        let mut sub = widget(vec![InventorySubmission::new(1, 1.0)]);
        sub.name = format!("Widget {i}");
        products.push(catalog.add_product(sub).await.unwrap());
    }

    let mut handles = Vec::new();
    for (i, product) in products.iter().enumerate() {
        let catalog = catalog.clone();
        let id = product.id;
        handles.push(tokio::spawn(async move {
            let mut failures = Vec::new();
            for round in 0..20 {
                let mut sub = widget(vec![
                    InventorySubmission::new(round + 1, 1.0).with_model_types(["Shared", "M1"]),
                ]);
                sub.name = format!("Widget {i}");
                if let Err(e) = catalog.update_product(id, sub).await {
                    failures.push(e.to_string());
                }
            }

            let mut extra = widget(vec![InventorySubmission::new(2, 2.0)]);
            extra.name = format!("Sprocket {i}");
            if let Err(e) = catalog.add_product(extra).await {
                failures.push(e.to_string());
            }
            failures
        }));
    }

    let mut failures = Vec::new();
    for handle in handles {
        failures.extend(handle.await.unwrap());
    }
    assert!(failures.is_empty(), "failed writes: {failures:?}");

    for product in &products {
        let stored = catalog.get_product(product.id).await.unwrap().unwrap();
        assert_eq!(stored.inventory.len(), 21);
    }
    assert_eq!(catalog.list_products().await.unwrap().len(), 16);
    assert_eq!(catalog.list_model_types().await.unwrap().len(), 2);
}
