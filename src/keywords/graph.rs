use crate::keywords::tokens::is_capitalized;
use std::collections::{BTreeSet, HashMap};

/// Undirected co-occurrence graph over capitalized tokens.
///
/// Nodes are numbered in order of first appearance, which also fixes the
/// iteration order of the propagation and the tie order of [`top_k`](Self::top_k).
#[derive(Debug, Clone, Default)]
pub struct KeywordGraph {
    vocabulary: Vec<String>,
    index: HashMap<String, usize>,
    adjacency: Vec<BTreeSet<usize>>,
}

/// Parameters of the relevance propagation
#[derive(Debug, Clone, Copy)]
pub struct Propagation {
    pub damping: f64,
    pub max_iter: usize,
    pub delta: f64,
}

/// Final node scores of a propagation run
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    pub scores: Vec<f64>,
    pub rounds: usize,
    pub converged: bool,
}

impl KeywordGraph {
    /// Build the graph from a token stream.
    ///
    /// A token becomes a node if it is capitalized and at least `min_node_len`
    /// characters long. Two nodes are linked when they occur less than `window`
    /// positions apart; a term is never linked to itself.
    pub fn build(tokens: &[&str], min_node_len: usize, window: usize) -> Self {
        let is_node = |token: &str| is_capitalized(token) && token.chars().count() >= min_node_len;
        let mut graph = Self::default();

        for (i, &term) in tokens.iter().enumerate() {
            if !is_node(term) {
                continue;
            }
            let a = graph.node(term);
            let end = (i + window).min(tokens.len()).max(i + 1);
            for &other in &tokens[i + 1..end] {
                if !is_node(other) || other == term {
                    continue;
                }
                let b = graph.node(other);
                graph.adjacency[a].insert(b);
                graph.adjacency[b].insert(a);
            }
        }

        graph
    }

    fn node(&mut self, term: &str) -> usize {
        if let Some(&idx) = self.index.get(term) {
            return idx;
        }
        let idx = self.vocabulary.len();
        self.vocabulary.push(term.to_string());
        self.index.insert(term.to_string(), idx);
        self.adjacency.push(BTreeSet::new());
        idx
    }

    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }

    pub fn term(&self, node: usize) -> &str {
        &self.vocabulary[node]
    }

    pub fn node_of(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    pub fn neighbors(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.adjacency[node].iter().copied()
    }

    pub fn degree(&self, node: usize) -> usize {
        self.adjacency[node].len()
    }

    /// Run TextRank-style propagation.
    ///
    /// Every node starts at 1.0; each round computes
    /// `(1 - d) + d * sum(score(n) / degree(n))` over the neighbors into a
    /// second buffer, then swaps. Stops after `max_iter` rounds or once no node
    /// moved by more than `delta / node_count`.
    pub fn rank(&self, params: &Propagation) -> Ranking {
        let n = self.len();
        if n == 0 {
            return Ranking {
                scores: Vec::new(),
                rounds: 0,
                converged: true,
            };
        }

        let threshold = params.delta / n as f64;
        let mut current = vec![1.0; n];
        let mut next = vec![0.0; n];
        let mut rounds = 0;
        let mut converged = false;

        while rounds < params.max_iter {
            rounds += 1;
            for (node, slot) in next.iter_mut().enumerate() {
                let sum: f64 = self
                    .neighbors(node)
                    .map(|neighbor| match self.degree(neighbor) {
                        0 => 0.0,
                        degree => current[neighbor] / degree as f64,
                    })
                    .sum();
                *slot = (1.0 - params.damping) + params.damping * sum;
            }

            let max_change = current
                .iter()
                .zip(&next)
                .map(|(old, new)| (new - old).abs())
                .fold(0.0, f64::max);
            std::mem::swap(&mut current, &mut next);

            if max_change <= threshold {
                converged = true;
                break;
            }
        }

        ::log::debug!(
            "Propagation over {} nodes stopped after {} rounds (converged: {})",
            n,
            rounds,
            converged
        );

        Ranking {
            scores: current,
            rounds,
            converged,
        }
    }

    /// The `k` best terms, highest score first; equal scores keep node order
    pub fn top_k<'a>(&'a self, ranking: &Ranking, k: usize) -> Vec<(&'a str, f64)> {
        let mut ranked: Vec<(usize, f64)> = ranking.scores.iter().copied().enumerate().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
            .into_iter()
            .take(k)
            .map(|(node, score)| (self.term(node), score))
            .collect()
    }
}
