//! Walking a collection page by page through encoded cursors must visit
//! every row exactly once, in order, whatever the page size or ties.

use chrono::{Duration, TimeZone, Utc};
use lorekeeper_core::{
    Entity, Filter, PaginationSettings, ResourceId, ResourceKind, ResourceStore, SortDirection,
    Visibility,
};
use lorekeeper_pagination::{Page, PageRequest};
use lorekeeper_store::{sort_entities, MemoryStore};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

fn seed(store: &MemoryStore, names: &[u8]) {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    for (i, name) in names.iter().enumerate() {
        let mut attributes = Map::new();
        attributes.insert("name".to_string(), json!(format!("n{name}")));
        // timestamps repeat every third row to exercise the id tie-break
        let at = base + Duration::seconds((i / 3) as i64);
        store.insert(
            ResourceKind::Items,
            Entity {
                id: ResourceId::new(format!("item-{i:03}")),
                owner_id: None,
                visibility: Visibility::Public,
                owner_role: None,
                created_at: at,
                updated_at: at,
                attributes,
            },
        );
    }
}

async fn fetch(store: &MemoryStore, request: &PageRequest) -> Page<Entity> {
    let plan = request.plan();
    let rows = store
        .find_many(
            ResourceKind::Items,
            &plan.filter_with(&Filter::True),
            &plan.order_by,
            plan.limit,
        )
        .await
        .unwrap();
    request.assemble(rows)
}

fn query(limit: usize, sort_by: &str, order: SortDirection, token: Option<(&str, String)>) -> Map<String, Value> {
    let mut query = Map::new();
    query.insert("limit".to_string(), json!(limit.to_string()));
    query.insert("sortBy".to_string(), json!(sort_by));
    query.insert("sortOrder".to_string(), json!(order.as_str()));
    if let Some((name, token)) = token {
        query.insert(name.to_string(), json!(token));
    }
    query
}

async fn walk_forward(
    store: &MemoryStore,
    limit: usize,
    sort_by: &str,
    order: SortDirection,
) -> (Vec<String>, Vec<Page<Entity>>) {
    let settings = PaginationSettings::default();
    let mut seen = Vec::new();
    let mut pages = Vec::new();
    let mut token: Option<String> = None;

    loop {
        let q = query(limit, sort_by, order, token.take().map(|t| ("cursor", t)));
        let request = PageRequest::from_query(ResourceKind::Items, &q, &settings).unwrap();
        let page = fetch(store, &request).await;
        seen.extend(page.items.iter().map(|e| e.id.to_string()));
        let next = page.pagination.next_cursor.clone();
        pages.push(page);
        match next {
            Some(next) => token = Some(next),
            None => break,
        }
        assert!(pages.len() <= 200, "pagination did not terminate");
    }
    (seen, pages)
}

fn expected_order(store_rows: Vec<Entity>, sort_by: &str, order: SortDirection) -> Vec<String> {
    let mut rows = store_rows;
    sort_entities(&mut rows, &lorekeeper_pagination::order_by(sort_by, order));
    rows.into_iter().map(|e| e.id.to_string()).collect()
}

async fn all_rows(store: &MemoryStore) -> Vec<Entity> {
    store
        .find_many(ResourceKind::Items, &Filter::True, &[], usize::MAX)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_forward_walk_with_duplicate_sort_values() {
    let store = MemoryStore::new();
    seed(&store, &[1, 1, 1, 2, 2, 3, 3, 3, 3, 4]);

    let (seen, pages) = walk_forward(&store, 3, "name", SortDirection::Asc).await;
    assert_eq!(seen, expected_order(all_rows(&store).await, "name", SortDirection::Asc));
    assert_eq!(pages.len(), 4);
    assert!(!pages[0].pagination.has_prev);
    assert!(pages[1].pagination.has_prev);
    assert!(!pages[3].pagination.has_next);
}

#[tokio::test]
async fn test_backward_walk_returns_previous_page() {
    let store = MemoryStore::new();
    seed(&store, &[5, 4, 3, 2, 1, 0, 9, 8]);
    let settings = PaginationSettings::default();

    let (_, pages) = walk_forward(&store, 3, "createdAt", SortDirection::Desc).await;
    let second = &pages[1];
    let prev = second.pagination.prev_cursor.clone().unwrap();

    let q = query(3, "createdAt", SortDirection::Desc, Some(("before", prev)));
    let request = PageRequest::from_query(ResourceKind::Items, &q, &settings).unwrap();
    let back = fetch(&store, &request).await;

    let first_ids: Vec<_> = pages[0].items.iter().map(|e| e.id.clone()).collect();
    let back_ids: Vec<_> = back.items.iter().map(|e| e.id.clone()).collect();
    assert_eq!(back_ids, first_ids);
    assert!(!back.pagination.has_prev);
    assert!(back.pagination.has_next);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn walking_pages_visits_every_row_once(
        names in prop::collection::vec(0u8..5, 0..40),
        limit in 1usize..7,
        descending in any::<bool>(),
        sort_by in prop::sample::select(vec!["name", "createdAt", "updatedAt"]),
    ) {
        let order = if descending { SortDirection::Desc } else { SortDirection::Asc };
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let (seen, expected) = runtime.block_on(async {
            let store = MemoryStore::new();
            seed(&store, &names);
            let (seen, _) = walk_forward(&store, limit, sort_by, order).await;
            (seen, expected_order(all_rows(&store).await, sort_by, order))
        });

        let mut unique = seen.clone();
        unique.sort();
        unique.dedup();
        prop_assert_eq!(unique.len(), seen.len(), "a row was repeated");
        prop_assert_eq!(seen, expected);
    }
}
