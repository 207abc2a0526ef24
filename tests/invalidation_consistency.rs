//! The schema's invalidation map and the cache agree table by table.

use serde_json::json;

use matchday_cache::TagCache;
use matchday_data::{invalidation_set, ENTITY_TABLES};

#[tokio::test]
async fn invalidating_a_table_clears_exactly_its_set() {
    for (table, _) in ENTITY_TABLES {
        let cache = TagCache::in_memory();
        for (key, _) in ENTITY_TABLES {
            cache.set(key, &json!([])).await.unwrap();
        }

        let set = invalidation_set(table);
        cache.invalidate_many(set.iter().copied()).await.unwrap();

        for (key, _) in ENTITY_TABLES {
            let expected_gone = set.contains(key);
            assert_eq!(
                !cache.contains(key).await.unwrap(),
                expected_gone,
                "mutating {table}: key {key}"
            );
        }
    }
}

#[tokio::test]
async fn invalidation_sets_cover_every_dependent_declaration() {
    for (table, dependents) in ENTITY_TABLES {
        let set = invalidation_set(table);
        assert_eq!(set[0], *table);
        for dependent in *dependents {
            assert!(set.contains(dependent), "{table} missing {dependent}");
        }
        assert_eq!(set.len(), 1 + dependents.len());
    }
}
