//! Search behaviour over in-memory link graphs

use crate::{node, GraphFetcher, LineExtractor};
use link_racer::search::{Coordinator, SearchOptions, Visit};
use link_racer::{find_shortest_path, Budget, SearchError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn coordinator(fetcher: Arc<GraphFetcher>, workers: usize, options: SearchOptions) -> Coordinator {
    Coordinator::new(fetcher, Arc::new(LineExtractor), workers, options)
}

/// Diamond with a tail: A links B and C, both link D, D links T
fn diamond() -> GraphFetcher {
    GraphFetcher::from_edges(&[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D"), ("D", "T")])
}

#[tokio::test]
async fn test_start_equals_target() {
    let fetcher = Arc::new(diamond());
    let path = find_shortest_path(
        &node("A"),
        &node("A"),
        4,
        SearchOptions::default(),
        fetcher.clone(),
        Arc::new(LineExtractor),
    )
    .await
    .unwrap();

    assert_eq!(path.urls(), &[node("A")]);
    assert_eq!(fetcher.calls(), 0);
}

#[tokio::test]
async fn test_single_worker_is_breadth_first() {
    let fetcher = Arc::new(diamond());
    let visits: Arc<Mutex<Vec<Visit>>> = Arc::new(Mutex::new(Vec::new()));
    let recorded = visits.clone();

    let report = coordinator(fetcher, 1, SearchOptions::default())
        .with_progress_callback(Arc::new(move |visit: &Visit| {
            recorded.lock().unwrap().push(visit.clone());
        }))
        .search(&node("A"), &node("T"))
        .await
        .unwrap();

    assert_eq!(
        report.path.urls(),
        &[node("A"), node("B"), node("D"), node("T")]
    );

    let visits = visits.lock().unwrap();
    let order: Vec<&str> = visits.iter().map(|v| v.url.as_str()).collect();
    assert_eq!(order, vec![node("A"), node("B"), node("C"), node("D")]);
    assert_eq!(
        visits.iter().map(|v| v.sequence).collect::<Vec<_>>(),
        vec![1, 2, 3, 4]
    );
    assert_eq!(visits[0].parent, None);
    assert_eq!(visits[3].parent, Some(node("B")));

    // T was claimed but never fetched
    assert_eq!(report.stats.pages_fetched, 4);
    assert_eq!(report.stats.urls_claimed, 5);
}

#[tokio::test]
async fn test_unreachable_target_explores_everything() {
    let mut graph = GraphFetcher::from_edges(&[("A", "B"), ("A", "C"), ("B", "A"), ("C", "B")]);
    graph.add_page(&node("Island"));
    let fetcher = Arc::new(graph);

    let result = coordinator(fetcher.clone(), 4, SearchOptions::default())
        .search(&node("A"), &node("Island"))
        .await;

    match result {
        Err(SearchError::PathNotFound { claimed, .. }) => {
            assert_eq!(claimed, 3);
            assert_eq!(fetcher.calls(), claimed);
        }
        other => panic!("expected PathNotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_visit_limit() {
    let chain: Vec<(String, String)> = (0..20)
        .map(|i| (i.to_string(), (i + 1).to_string()))
        .collect();
    let edges: Vec<(&str, &str)> = chain.iter().map(|(a, b)| (a.as_str(), b.as_str())).collect();
    let fetcher = Arc::new(GraphFetcher::from_edges(&edges));

    let options = SearchOptions {
        max_visited: Some(3),
        ..SearchOptions::default()
    };
    let result = coordinator(fetcher.clone(), 2, options)
        .search(&node("0"), &node("20"))
        .await;

    match result {
        Err(SearchError::ExhaustedBudget { budget, fetched }) => {
            assert_eq!(budget, Budget::VisitLimit(3));
            assert_eq!(fetched, 3);
        }
        other => panic!("expected ExhaustedBudget, got {:?}", other),
    }
    assert_eq!(fetcher.calls(), 3);
}

#[tokio::test]
async fn test_fetch_failures_are_skipped() {
    let fetcher = Arc::new(
        GraphFetcher::from_edges(&[("A", "B"), ("A", "C"), ("B", "T"), ("C", "D"), ("D", "T")])
            .fail("B"),
    );

    let report = coordinator(fetcher, 2, SearchOptions::default())
        .search(&node("A"), &node("T"))
        .await
        .unwrap();

    assert_eq!(
        report.path.urls(),
        &[node("A"), node("C"), node("D"), node("T")]
    );
    assert_eq!(report.stats.fetch_failures, 1);
}

#[tokio::test]
async fn test_failing_start_page_is_path_not_found() {
    let fetcher = Arc::new(diamond().fail("A"));
    let result = coordinator(fetcher, 3, SearchOptions::default())
        .search(&node("A"), &node("T"))
        .await;

    assert!(matches!(
        result,
        Err(SearchError::PathNotFound { claimed: 1, .. })
    ));
}

#[tokio::test]
async fn test_deadline() {
    // Long chain with slow pages: the deadline passes long before the end
    let chain: Vec<(String, String)> = (0..500)
        .map(|i| (i.to_string(), (i + 1).to_string()))
        .collect();
    let edges: Vec<(&str, &str)> = chain.iter().map(|(a, b)| (a.as_str(), b.as_str())).collect();
    let fetcher = Arc::new(GraphFetcher::from_edges(&edges).with_latency(20));

    let limit = Duration::from_millis(100);
    let options = SearchOptions {
        timeout: Some(limit),
        ..SearchOptions::default()
    };
    let result = coordinator(fetcher, 4, options)
        .search(&node("0"), &node("500"))
        .await;

    match result {
        Err(SearchError::ExhaustedBudget { budget, fetched }) => {
            assert_eq!(budget, Budget::Deadline(limit));
            assert!(fetched < 500);
        }
        other => panic!("expected ExhaustedBudget, got {:?}", other),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_target_found_halts_promptly() {
    // A links T directly plus a wide fan-out; the rest of the graph should
    // be mostly left alone once T is seen.
    let mut graph = GraphFetcher::from_edges(&[("A", "T")]);
    for i in 0..200 {
        graph.add_edge(&node("A"), &node(&format!("F{}", i)));
        graph.add_edge(&node(&format!("F{}", i)), &node(&format!("G{}", i)));
    }
    let fetcher = Arc::new(graph);

    let report = coordinator(fetcher.clone(), 8, SearchOptions::default())
        .search(&node("A"), &node("T"))
        .await
        .unwrap();

    assert_eq!(report.path.urls(), &[node("A"), node("T")]);
    assert_eq!(fetcher.calls(), 1);
}

/// Random graph over `size` nodes with a few links per page
fn random_graph(rng: &mut StdRng, size: usize) -> GraphFetcher {
    let mut graph = GraphFetcher::default();
    for from in 0..size {
        graph.add_page(&node(&from.to_string()));
        for _ in 0..rng.random_range(0..4) {
            let to = rng.random_range(0..size);
            graph.add_edge(&node(&from.to_string()), &node(&to.to_string()));
        }
    }
    graph
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_random_graphs_under_contention() {
    let mut rng = StdRng::seed_from_u64(0x11_7ac3);

    for round in 0..1000 {
        let size = rng.random_range(2..80);
        let fetcher = Arc::new(random_graph(&mut rng, size).with_latency(1));
        let start = node("0");
        let target = node(&rng.random_range(1..size).to_string());
        let expected = fetcher.distance(&start, &target);

        let result = coordinator(fetcher.clone(), 16, SearchOptions::default())
            .search(&start, &target)
            .await;

        let counts = fetcher.fetch_counts();
        assert!(
            counts.values().all(|&n| n == 1),
            "round {}: a page was fetched twice",
            round
        );

        match (result, expected) {
            (Ok(report), Some(distance)) => {
                let path = &report.path;
                assert_eq!(path.start(), start);
                assert_eq!(path.target(), target);
                assert!(path.hops() >= distance, "round {}: path beats BFS", round);
                for (from, to) in path.edges() {
                    assert!(
                        fetcher.has_edge(from, to),
                        "round {}: {} does not link to {}",
                        round,
                        from,
                        to
                    );
                }
                let unique: HashSet<&String> = path.urls().iter().collect();
                assert_eq!(
                    unique.len(),
                    path.urls().len(),
                    "round {}: path repeats a page",
                    round
                );
            }
            (Err(SearchError::PathNotFound { claimed, .. }), None) => {
                assert_eq!(claimed, fetcher.calls(), "round {}", round);
            }
            (result, expected) => panic!(
                "round {}: got {:?} but BFS distance is {:?}",
                round, result, expected
            ),
        }
    }
}
