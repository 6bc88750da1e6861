use content_store::{CollectionName, CollectionService, DocumentStore};
use serde_json::json;
use std::sync::Arc;

fn main() -> Result<(), content_store::Error> {
    let path = std::env::temp_dir().join("content_store_example_basic.json");
    let _ = std::fs::remove_file(&path);
    let svc = CollectionService::new(Arc::new(DocumentStore::open(&path)?));

    // create
    let a = svc.create(
        CollectionName::Team,
        json!({ "name": "Ada", "position": "Lead" }),
    )?;
    let b = svc.create(CollectionName::Team, json!({ "name": "Bo" }))?;
    println!("created {} and {}", a.id, b.id);

    // update keeps the id
    let b = svc.update(
        CollectionName::Team,
        b.id,
        json!({ "name": "Bo", "position": "Designer" }),
    )?;
    println!("updated = {:?}", b);

    // delete is idempotent
    svc.delete(CollectionName::Team, a.id)?;
    svc.delete(CollectionName::Team, a.id)?;

    for name in CollectionName::ALL {
        println!("{name}: {:?}", svc.list(name));
    }
    println!("on disk:\n{}", std::fs::read_to_string(&path).unwrap_or_default());

    let _ = std::fs::remove_file(&path);
    Ok(())
}
