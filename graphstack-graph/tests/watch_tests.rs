use graphstack_graph::{ActionRef, BondRef, EntityRef, Graph, GraphDelegate, NodeKind, Record};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Debug, PartialEq)]
enum Seen {
    Entity(String),
    Action(String),
    Bond(String),
}

struct Watcher {
    tx: mpsc::UnboundedSender<Seen>,
}

impl GraphDelegate for Watcher {
    fn did_insert_entity(&self, entity: EntityRef<'_>) {
        let _ = self.tx.send(Seen::Entity(entity.node_type().to_string()));
    }

    fn did_insert_action(&self, action: ActionRef<'_>) {
        let _ = self.tx.send(Seen::Action(action.node_type().to_string()));
    }

    fn did_insert_bond(&self, bond: BondRef<'_>) {
        let _ = self.tx.send(Seen::Bond(bond.node_type().to_string()));
    }
}

fn watcher() -> (Arc<Watcher>, mpsc::UnboundedReceiver<Seen>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Arc::new(Watcher { tx }), rx)
}

async fn next(rx: &mut mpsc::UnboundedReceiver<Seen>) -> Seen {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for delegate callback")
        .expect("delegate channel closed")
}

async fn assert_quiet(rx: &mut mpsc::UnboundedReceiver<Seen>) {
    let extra = tokio::time::timeout(Duration::from_millis(300), rx.recv()).await;
    assert!(extra.is_err(), "unexpected extra callback: {:?}", extra);
}

// ── Registration ─────────────────────────────────────────────────

#[tokio::test]
async fn watch_reports_duplicate_registration() {
    let graph = Graph::open_in_memory().unwrap();
    assert!(!graph.watch_entity("user"));
    assert!(graph.watch_entity("user"));
    assert!(!graph.watch_action("user")); // same value, different kind
}

#[tokio::test]
async fn duplicate_watch_dispatches_once() {
    let graph = Graph::open_in_memory().unwrap();
    let (delegate, mut rx) = watcher();
    graph.set_delegate(delegate);

    graph.watch_entity("user");
    graph.watch_entity("user");

    graph.insert(Record::entity("user"));
    graph.save().await.unwrap();

    assert_eq!(next(&mut rx).await, Seen::Entity("user".into()));
    assert_quiet(&mut rx).await;
}

// ── Selectivity ──────────────────────────────────────────────────

#[tokio::test]
async fn unwatched_records_never_dispatch() {
    let graph = Graph::open_in_memory().unwrap();
    let (delegate, mut rx) = watcher();
    graph.set_delegate(delegate);

    graph.watch_entity("user");

    graph.insert(Record::entity("group"));
    graph.insert(Record::action("user")); // watched value, wrong kind
    graph.save().await.unwrap();

    assert_quiet(&mut rx).await;
}

#[tokio::test]
async fn watches_are_kind_scoped() {
    let graph = Graph::open_in_memory().unwrap();
    let (delegate, mut rx) = watcher();
    graph.set_delegate(delegate);

    graph.watch_entity("user");
    graph.watch_action("clicked");
    graph.watch_bond("follows");

    graph.insert(Record::entity("user"));
    graph.insert(Record::action("clicked"));
    graph.insert(Record::bond("follows"));
    graph.save().await.unwrap();

    let mut seen = vec![next(&mut rx).await, next(&mut rx).await, next(&mut rx).await];
    seen.sort_by_key(|s| match s {
        Seen::Entity(_) => 0,
        Seen::Action(_) => 1,
        Seen::Bond(_) => 2,
    });
    assert_eq!(
        seen,
        vec![
            Seen::Entity("user".into()),
            Seen::Action("clicked".into()),
            Seen::Bond("follows".into()),
        ]
    );
    assert_quiet(&mut rx).await;
}

#[tokio::test]
async fn general_watch_matches_property_fields() {
    let graph = Graph::open_in_memory().unwrap();
    let (delegate, mut rx) = watcher();
    graph.set_delegate(delegate);

    graph.watch(NodeKind::Entity, "role", "admin");

    graph.insert(Record::entity("user").with_property("role", "admin"));
    graph.insert(Record::entity("user").with_property("role", "guest"));
    graph.save().await.unwrap();

    assert_eq!(next(&mut rx).await, Seen::Entity("user".into()));
    assert_quiet(&mut rx).await;
}

#[tokio::test]
async fn commits_without_watches_dispatch_nothing() {
    let graph = Graph::open_in_memory().unwrap();
    let (delegate, mut rx) = watcher();
    graph.set_delegate(delegate);

    graph.insert(Record::entity("user"));
    graph.save().await.unwrap();

    assert_quiet(&mut rx).await;
}

#[tokio::test]
async fn save_works_without_a_delegate() {
    let graph = Graph::open_in_memory().unwrap();
    graph.watch_entity("user");

    graph.insert(Record::entity("user"));
    graph.save().await.unwrap();

    let found = graph
        .query(graphstack_graph::Filter::eq("type", "user"))
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
}
