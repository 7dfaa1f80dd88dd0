//! Integration tests for the in-memory snapshot store.
//!
//! These tests verify the full functionality of the store: edge CRUD,
//! derived graph queries, cache refresh on mutation, and cycle
//! diagnostics.

use linkage::store::in_memory::new_in_memory_store;
use linkage::store::DiagramStore;
use linkage_engine::{
    DependencyType, Direction, EdgeFilter, EdgeId, EmphasisTier, NewEdge, NodeId,
};

fn new_edge(source: &str, target: &str) -> NewEdge {
    NewEdge {
        source: source.into(),
        target: target.into(),
        dependency_type: DependencyType::DependsOn,
    }
}

fn typed_edge(source: &str, target: &str, dependency_type: DependencyType) -> NewEdge {
    NewEdge {
        source: source.into(),
        target: target.into(),
        dependency_type,
    }
}

// ========== Edge CRUD Tests ==========

#[tokio::test]
async fn test_add_edge_assigns_prefixed_id() {
    let mut store = new_in_memory_store("test".to_string());

    let edge = store.add_edge(new_edge("a", "b")).await.unwrap();

    assert!(edge.id.as_str().starts_with("test-"));
    assert_eq!(edge.source, NodeId::from("a"));
    assert_eq!(edge.target, NodeId::from("b"));
    assert_eq!(store.edge_count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_get_edge() {
    let mut store = new_in_memory_store("test".to_string());
    let created = store.add_edge(new_edge("a", "b")).await.unwrap();

    let found = store.get_edge(&created.id).await.unwrap();
    assert_eq!(found, Some(created));

    let missing = store
        .get_edge(&EdgeId::from("test-nothere"))
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_remove_edge() {
    let mut store = new_in_memory_store("test".to_string());
    let created = store.add_edge(new_edge("a", "b")).await.unwrap();

    let removed = store.remove_edge(&created.id).await.unwrap();
    assert_eq!(removed.id, created.id);
    assert_eq!(store.edge_count().await.unwrap(), 0);

    // Removing again fails
    assert!(store.remove_edge(&created.id).await.is_err());
}

#[tokio::test]
async fn test_duplicate_connectors_are_preserved() {
    let mut store = new_in_memory_store("test".to_string());
    store.add_edge(new_edge("a", "b")).await.unwrap();
    store.add_edge(new_edge("a", "b")).await.unwrap();

    assert_eq!(store.edge_count().await.unwrap(), 2);

    let counts = store.dependency_counts().await.unwrap();
    assert_eq!(counts.get(&"a".into()).outgoing, 2);
    assert_eq!(counts.get(&"b".into()).incoming, 2);
}

#[tokio::test]
async fn test_self_edge_is_accepted() {
    let mut store = new_in_memory_store("test".to_string());
    store.add_edge(new_edge("a", "a")).await.unwrap();

    let counts = store.dependency_counts().await.unwrap();
    assert_eq!(counts.get(&"a".into()).incoming, 1);
    assert_eq!(counts.get(&"a".into()).outgoing, 1);
}

#[tokio::test]
async fn test_list_edges_filters() {
    let mut store = new_in_memory_store("test".to_string());
    store.add_edge(new_edge("a", "b")).await.unwrap();
    store
        .add_edge(typed_edge("b", "c", DependencyType::Blocks))
        .await
        .unwrap();
    store
        .add_edge(typed_edge("c", "d", DependencyType::Blocks))
        .await
        .unwrap();

    let blocks = store
        .list_edges(&EdgeFilter {
            dependency_type: Some(DependencyType::Blocks),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(blocks.len(), 2);

    let touching_b = store
        .list_edges(&EdgeFilter {
            node: Some("b".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(touching_b.len(), 2);

    let limited = store
        .list_edges(&EdgeFilter {
            limit: Some(1),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(limited.len(), 1);
}

// ========== Derived Query Tests ==========

#[tokio::test]
async fn test_closures_reflect_mutations() {
    let mut store = new_in_memory_store("test".to_string());
    store.add_edge(new_edge("a", "b")).await.unwrap();
    let bc = store.add_edge(new_edge("b", "c")).await.unwrap();

    let down = store.downstream(&"a".into()).await.unwrap();
    assert!(down.contains(&"b".into()));
    assert!(down.contains(&"c".into()));

    // Removing b->c shrinks the closure on the next query.
    store.remove_edge(&bc.id).await.unwrap();
    let down = store.downstream(&"a".into()).await.unwrap();
    assert!(down.contains(&"b".into()));
    assert!(!down.contains(&"c".into()));
}

#[tokio::test]
async fn test_critical_path_cache_refreshes() {
    let mut store = new_in_memory_store("test".to_string());
    store.add_edge(new_edge("a", "b")).await.unwrap();
    assert_eq!(store.critical_path().await.unwrap().len(), 2);

    store.add_edge(new_edge("b", "c")).await.unwrap();
    assert_eq!(store.critical_path().await.unwrap().len(), 3);

    // Repeated queries over an unchanged snapshot are identical.
    let first = store.critical_path().await.unwrap();
    let second = store.critical_path().await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_neighbors_preserve_edge_order() {
    let mut store = new_in_memory_store("test".to_string());
    store.add_edge(new_edge("b", "c")).await.unwrap();
    store.add_edge(new_edge("b", "d")).await.unwrap();

    let next = store
        .neighbors(&"b".into(), Direction::Downstream)
        .await
        .unwrap();
    assert_eq!(next, vec![NodeId::from("c"), NodeId::from("d")]);
}

#[tokio::test]
async fn test_hop_distances_and_emphasis() {
    let mut store = new_in_memory_store("test".to_string());
    store.add_edge(new_edge("a", "b")).await.unwrap();
    store.add_edge(new_edge("b", "c")).await.unwrap();
    store.add_edge(new_edge("c", "d")).await.unwrap();

    let hops = store
        .hop_distances(&"a".into(), Direction::Downstream)
        .await
        .unwrap();
    assert_eq!(hops.get(&"d".into()), Some(&3));

    let emphasis = store.chain_emphasis(&"a".into()).await.unwrap();
    assert_eq!(emphasis.get(&"b".into()), Some(&EmphasisTier::Full));
    assert_eq!(emphasis.get(&"c".into()), Some(&EmphasisTier::Partial));
    assert_eq!(emphasis.get(&"d".into()), Some(&EmphasisTier::Minimal));
}

#[tokio::test]
async fn test_unknown_node_queries_are_empty_not_errors() {
    let store = new_in_memory_store("test".to_string());

    assert!(store.upstream(&"ghost".into()).await.unwrap().is_empty());
    assert!(store.downstream(&"ghost".into()).await.unwrap().is_empty());
    assert!(store
        .hop_distances(&"ghost".into(), Direction::Upstream)
        .await
        .unwrap()
        .is_empty());
    assert!(store.critical_path().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_node_ids_in_first_seen_order() {
    let mut store = new_in_memory_store("test".to_string());
    store.add_edge(new_edge("m", "n")).await.unwrap();
    store.add_edge(new_edge("a", "m")).await.unwrap();

    let nodes = store.node_ids().await.unwrap();
    assert_eq!(
        nodes,
        vec![NodeId::from("m"), NodeId::from("n"), NodeId::from("a")]
    );
}

// ========== Cycle Diagnostic Tests ==========

#[tokio::test]
async fn test_would_create_cycle() {
    let mut store = new_in_memory_store("test".to_string());
    store.add_edge(new_edge("a", "b")).await.unwrap();
    store.add_edge(new_edge("b", "c")).await.unwrap();

    // c -> a would close the loop
    assert!(store
        .would_create_cycle(&"c".into(), &"a".into())
        .await
        .unwrap());

    // a -> c is just a shortcut
    assert!(!store
        .would_create_cycle(&"a".into(), &"c".into())
        .await
        .unwrap());

    // Unknown endpoints cannot close anything
    assert!(!store
        .would_create_cycle(&"x".into(), &"y".into())
        .await
        .unwrap());

    // A self-edge is always a cycle
    assert!(store
        .would_create_cycle(&"a".into(), &"a".into())
        .await
        .unwrap());
}

#[tokio::test]
async fn test_cycles_are_reported_not_rejected() {
    let mut store = new_in_memory_store("test".to_string());
    store.add_edge(new_edge("a", "b")).await.unwrap();
    store.add_edge(new_edge("b", "a")).await.unwrap();
    store.add_edge(new_edge("c", "d")).await.unwrap();

    let cycles = store.cycles().await.unwrap();
    assert_eq!(cycles.len(), 1);
    assert_eq!(cycles[0].len(), 2);

    // The cyclic snapshot still answers every query.
    assert!(!store.downstream(&"a".into()).await.unwrap().is_empty());
    assert!(store.critical_path().await.unwrap().len() <= 4);
}

#[tokio::test]
async fn test_self_loop_is_a_reported_cycle() {
    let mut store = new_in_memory_store("test".to_string());
    store.add_edge(new_edge("a", "a")).await.unwrap();

    let cycles = store.cycles().await.unwrap();
    assert_eq!(cycles.len(), 1);
    assert_eq!(cycles[0], vec![NodeId::from("a")]);
}
