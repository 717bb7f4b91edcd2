//! Integration tests for the sense rankers.

use proptest::prelude::*;

use lexigraph_core::{Lemma, OntologyGraph, PartOfSpeech, Relation, Synset, SynsetId};
use lexigraph_wsd::{
    resolve_tokens, CarveConfig, ContentToken, DegreeCentralityRanker, FirstSenseRanker,
    PageRankConfig, PersonalizedPageRankRanker, SenseRanker, SubgraphCarver,
};

fn noun(graph: &mut OntologyGraph, form: &str) -> SynsetId {
    graph.add_synset(Synset::new(PartOfSpeech::Noun).with_lemma(Lemma::new(form)))
}

/// `bank` has a finance sense and a river sense; `money` and `deposit` sit
/// near the finance sense, `shore` near the river sense.
fn bank_graph() -> OntologyGraph {
    let mut graph = OntologyGraph::new();
    let institution = noun(&mut graph, "institution");
    let slope = noun(&mut graph, "slope");
    let bank_river = noun(&mut graph, "bank");
    let bank_money = noun(&mut graph, "bank");
    let money = noun(&mut graph, "money");
    let deposit = noun(&mut graph, "deposit");
    let shore = noun(&mut graph, "shore");

    graph.add_relation_pair(bank_river, Relation::Hypernym, slope).unwrap();
    graph.add_relation_pair(shore, Relation::Hypernym, slope).unwrap();
    graph.add_relation_pair(bank_money, Relation::Hypernym, institution).unwrap();
    graph.add_relation_pair(money, Relation::AlsoSee, bank_money).unwrap();
    graph.add_relation_pair(deposit, Relation::AlsoSee, money).unwrap();
    graph
}

fn depth(max_depth: usize) -> CarveConfig {
    CarveConfig {
        max_depth,
        ..CarveConfig::default()
    }
}

#[test]
fn shared_ancestor_beyond_depth_bound_falls_back_to_first_sense() {
    // a2 -> p -> top <- q <- b2, hypernym edges only: four hops via `top`.
    let mut graph = OntologyGraph::new();
    let top = noun(&mut graph, "top");
    let p = noun(&mut graph, "p");
    let q = noun(&mut graph, "q");
    let a1 = noun(&mut graph, "a");
    let a2 = noun(&mut graph, "a");
    let b1 = noun(&mut graph, "b");
    let b2 = noun(&mut graph, "b");
    graph.add_relation(p, Relation::Hypernym, top).unwrap();
    graph.add_relation(q, Relation::Hypernym, top).unwrap();
    graph.add_relation(a2, Relation::Hypernym, p).unwrap();
    graph.add_relation(b2, Relation::Hypernym, q).unwrap();

    let sentence = [("a", "NN"), ("b", "NN")];

    let tokens = resolve_tokens(&graph, &sentence);
    let shallow = SubgraphCarver::new(depth(3)).carve(&graph, &tokens).unwrap();
    assert!(shallow.edges().is_empty());

    let mut tokens = resolve_tokens(&graph, &sentence);
    DegreeCentralityRanker::new(&graph, depth(3))
        .annotate(&mut tokens)
        .unwrap();
    assert_eq!(tokens[0].sense, Some(a1));
    assert_eq!(tokens[1].sense, Some(b1));

    let deep = SubgraphCarver::new(depth(4)).carve(&graph, &tokens).unwrap();
    assert!(deep.contains_edge(a2, p));
    assert!(deep.contains_edge(p, top));
    assert!(deep.contains_edge(top, q));
    assert!(deep.contains_edge(q, b2));

    let mut tokens = resolve_tokens(&graph, &sentence);
    DegreeCentralityRanker::new(&graph, depth(4))
        .annotate(&mut tokens)
        .unwrap();
    assert_eq!(tokens[0].sense, Some(a2));
    assert_eq!(tokens[1].sense, Some(b2));
}

#[test]
fn link_beyond_depth_bound_falls_back_to_first_sense() {
    // a -> m1 -> m2 -> m3 -> b: four hops between the only connected pair.
    let mut graph = OntologyGraph::new();
    let a1 = noun(&mut graph, "a");
    let a2 = noun(&mut graph, "a");
    let mids: Vec<SynsetId> = (1..=3).map(|i| noun(&mut graph, &format!("m{i}"))).collect();
    let b1 = noun(&mut graph, "b");
    let b2 = noun(&mut graph, "b");
    graph.add_relation(a2, Relation::Hypernym, mids[0]).unwrap();
    graph.add_relation(mids[0], Relation::Hypernym, mids[1]).unwrap();
    graph.add_relation(mids[1], Relation::Hypernym, mids[2]).unwrap();
    graph.add_relation(mids[2], Relation::Hypernym, b2).unwrap();

    let sentence = [("a", "NN"), ("b", "NN")];

    let shallow = DegreeCentralityRanker::new(&graph, depth(3));
    let mut tokens = resolve_tokens(&graph, &sentence);
    assert_eq!(shallow.annotate(&mut tokens).unwrap(), 2);
    assert_eq!(tokens[0].sense, Some(a1));
    assert_eq!(tokens[1].sense, Some(b1));

    let deep = DegreeCentralityRanker::new(&graph, depth(4));
    let mut tokens = resolve_tokens(&graph, &sentence);
    deep.annotate(&mut tokens).unwrap();
    assert_eq!(tokens[0].sense, Some(a2));
    assert_eq!(tokens[1].sense, Some(b2));
}

#[test]
fn every_ranker_prefers_the_finance_sense_near_money() {
    let graph = bank_graph();
    let sentence = [("deposit", "NN"), ("the", "DT"), ("money", "NN"), ("bank", "NN")];
    let finance = resolve_tokens(&graph, &[("bank", "NN")])[0].candidates[1];

    let degree = DegreeCentralityRanker::new(&graph, CarveConfig::default());
    let pagerank = PersonalizedPageRankRanker::new(&graph, PageRankConfig::default()).unwrap();
    let rankers: [&dyn SenseRanker; 2] = [&degree, &pagerank];

    for ranker in rankers {
        let mut tokens = resolve_tokens(&graph, &sentence);
        assert_eq!(tokens.len(), 3);
        assert_eq!(ranker.annotate(&mut tokens).unwrap(), 3);
        assert_eq!(tokens[2].sense, Some(finance));
    }

    let mut tokens = resolve_tokens(&graph, &sentence);
    FirstSenseRanker.annotate(&mut tokens).unwrap();
    assert_ne!(tokens[2].sense, Some(finance));
}

#[test]
fn carving_ignores_unrelated_synsets() {
    let mut graph = bank_graph();
    let island = noun(&mut graph, "island");
    let tokens = resolve_tokens(&graph, &[("money", "NN"), ("bank", "NN")]);

    let subgraph = SubgraphCarver::new(CarveConfig::default())
        .carve(&graph, &tokens)
        .unwrap();
    assert!(!subgraph.synsets().contains(&island));
    assert_eq!(subgraph.degree(island), 0);
}

#[test]
fn rankers_are_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PersonalizedPageRankRanker>();
    assert_send_sync::<DegreeCentralityRanker<'static>>();
    assert_send_sync::<FirstSenseRanker>();

    let graph = bank_graph();
    let ranker = PersonalizedPageRankRanker::new(&graph, PageRankConfig::default()).unwrap();
    let sentences: Vec<Vec<(&str, &str)>> = vec![
        vec![("deposit", "NN"), ("bank", "NN")],
        vec![("shore", "NN"), ("bank", "NN")],
        vec![("money", "NN"), ("bank", "NN"), ("shore", "NN")],
    ];

    let sequential: Vec<Vec<ContentToken>> = sentences
        .iter()
        .map(|sentence| {
            let mut tokens = resolve_tokens(&graph, sentence);
            ranker.annotate(&mut tokens).unwrap();
            tokens
        })
        .collect();

    let concurrent: Vec<Vec<ContentToken>> = std::thread::scope(|scope| {
        let handles: Vec<_> = sentences
            .iter()
            .map(|sentence| {
                let (graph, ranker) = (&graph, &ranker);
                scope.spawn(move || {
                    let mut tokens = resolve_tokens(graph, sentence);
                    ranker.annotate(&mut tokens).unwrap();
                    tokens
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(sequential, concurrent);
}

proptest! {
    #[test]
    fn pagerank_mass_sums_to_one(
        edges in proptest::collection::vec((0usize..8, 0usize..8), 0..20),
        context in proptest::collection::vec(proptest::collection::vec(0usize..8, 0..3), 1..4),
    ) {
        let mut graph = OntologyGraph::new();
        let ids: Vec<SynsetId> = (0..8).map(|i| noun(&mut graph, &format!("s{i}"))).collect();
        for (from, to) in edges {
            if from != to {
                graph.add_relation(ids[from], Relation::AlsoSee, ids[to]).unwrap();
            }
        }

        let ranker = PersonalizedPageRankRanker::new(&graph, PageRankConfig::default()).unwrap();
        let senses: Vec<Vec<SynsetId>> = context
            .iter()
            .map(|picks| picks.iter().map(|&i| ids[i]).collect())
            .collect();
        let slices: Vec<&[SynsetId]> = senses.iter().map(Vec::as_slice).collect();
        let ranks = ranker.rank_context(&slices).unwrap();

        if senses.iter().all(Vec::is_empty) {
            prop_assert_eq!(ranks.total(), 0.0);
        } else {
            prop_assert!((ranks.total() - 1.0).abs() < 1e-9);
        }
        prop_assert!(ranks.base().iter().all(|r| *r >= 0.0));
    }
}
