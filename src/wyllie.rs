// Wyllie's list ranking, based on pointer jumping

use super::SEQUENTIAL_THRESHOLD;
use crate::fork::parallel_for_each_tune;
use crate::list::ListNode;
use num_cpus;
use std::mem::swap;

// per-node round state: distance covered so far plus the current hop target
#[derive(Clone, Copy)]
struct Hop {
    dist: usize,
    succ: Option<usize>,
}

// log base 2 rounded up; n must be positive
fn log2_up(n: usize) -> usize {
    debug_assert!(n > 0);
    let mut a = 0;
    let mut b = n - 1;
    while b > 0 {
        b >>= 1;
        a += 1;
    }
    a
}

// Wyllie's list ranking over a node arena. Every round doubles the distance
// each node has jumped, so ceil(log2(n)) rounds reach the tail from anywhere.
//
// Work = O(n * log(n))
// Depth = O(log^2(n))
pub fn wyllie_list_ranking(nodes: &mut [ListNode]) {
    wyllie_list_ranking_tune(nodes, num_cpus::get(), SEQUENTIAL_THRESHOLD);
}

// Wyllie's list ranking with explicit tuning arguments
pub fn wyllie_list_ranking_tune(nodes: &mut [ListNode], threads: usize, seq_threshold: usize) {
    let n = nodes.len();
    if n == 0 {
        return;
    }

    let mut cur: Vec<Hop> = vec![
        Hop {
            dist: 0,
            succ: None
        };
        n
    ];
    let mut next: Vec<Hop> = cur.clone();

    {
        let nodes: &[ListNode] = &*nodes;
        parallel_for_each_tune(
            &mut cur,
            &|i, hop| {
                hop.succ = nodes[i].next;
                hop.dist = if nodes[i].next.is_none() { 0 } else { 1 };
            },
            threads,
            seq_threshold,
        );
    }

    // double-buffered rounds: read `cur`, write `next`, swap at the barrier
    for _ in 0..log2_up(n) {
        {
            let cur: &[Hop] = &cur;
            parallel_for_each_tune(
                &mut next,
                &|i, hop| match cur[i].succ {
                    Some(j) => {
                        hop.dist = cur[i].dist + cur[j].dist;
                        hop.succ = cur[j].succ;
                    }
                    None => *hop = cur[i],
                },
                threads,
                seq_threshold,
            );
        }
        swap(&mut cur, &mut next);
    }

    let cur: &[Hop] = &cur;
    parallel_for_each_tune(
        nodes,
        &|i, node| {
            node.rank = cur[i].dist;
        },
        threads,
        seq_threshold,
    );
}
