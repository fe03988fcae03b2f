// sampling-based list ranking: contract the list onto a random sample,
// rank the small list serially, then expand the ranks back out in parallel

use super::SEQUENTIAL_THRESHOLD;
use crate::fork::{parallel_for_each_tune, parallel_for_tune};
use crate::list::ListNode;
use num_cpus;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Seed used when the caller does not supply one.
pub const DEFAULT_SEED: u64 = 0;

// entry in the contracted list; `rank` holds the segment weight (hops to the
// next sampled node) until the serial pass converts it into the true rank
#[derive(Clone, Copy)]
struct SampleNode {
    next: Option<usize>,
    rank: usize,
}

// each parallel task draws from its own generator, derived from the master
// seed and the node index, so sampling is reproducible and race-free
fn node_draw(seed: u64, i: usize, n: usize) -> usize {
    let mut rng = StdRng::seed_from_u64(seed ^ (i as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15));
    rng.gen_range(0..n)
}

// Sampling-based list ranking with the default sample count (ceil(sqrt(n)))
// and seed.
//
// Work = O(n) whp
// Depth = O(sqrt(n) * log(n)) whp
pub fn sampling_based_list_ranking(nodes: &mut [ListNode]) {
    sampling_based_list_ranking_tune(
        nodes,
        None,
        DEFAULT_SEED,
        num_cpus::get(),
        SEQUENTIAL_THRESHOLD,
    );
}

// Sampling-based list ranking with explicit sample count, seed, and tuning
// arguments. `num_samples == None` means ceil(sqrt(n)); a count of n or more
// degenerates gracefully to sampling every node.
pub fn sampling_based_list_ranking_tune(
    nodes: &mut [ListNode],
    num_samples: Option<usize>,
    seed: u64,
    threads: usize,
    seq_threshold: usize,
) {
    let n = nodes.len();
    if n == 0 {
        return;
    }
    let num_samples = num_samples.unwrap_or_else(|| (n as f64).sqrt().ceil() as usize);

    let (in_samp, head) = draw_samples(nodes, num_samples, seed, threads, seq_threshold);

    // contract: each sampled node walks to the next sample, recording the
    // hop count as a segment weight; disjoint walks, so this is one
    // embarrassingly parallel pass
    let mut samplist: Vec<SampleNode> = vec![
        SampleNode {
            next: None,
            rank: 0
        };
        n
    ];
    {
        let nodes: &[ListNode] = &*nodes;
        let in_samp: &[Option<usize>] = &in_samp;
        parallel_for_each_tune(
            &mut samplist,
            &|i, entry| {
                if in_samp[i].is_none() {
                    return;
                }
                let mut weight = 0;
                let mut cur = nodes[i].next;
                while let Some(j) = cur {
                    weight += 1;
                    if let Some(sj) = in_samp[j] {
                        entry.next = Some(sj);
                        break;
                    }
                    cur = nodes[j].next;
                }
                entry.rank = weight;
            },
            threads,
            seq_threshold,
        );
    }

    // serially rank the contracted list: total weight first, then convert
    // each entry's weight into its rank (weighted variant of the serial
    // baseline)
    let shead = in_samp[head].unwrap();
    let mut total = 0;
    let mut cur = Some(shead);
    while let Some(si) = cur {
        total += samplist[si].rank;
        cur = samplist[si].next;
    }
    let mut ctr = total;
    let mut cur = Some(shead);
    while let Some(si) = cur {
        let weight = samplist[si].rank;
        samplist[si].rank = ctr;
        ctr -= weight;
        cur = samplist[si].next;
    }

    // expand: each sampled node walks its unsampled run assigning strictly
    // decreasing ranks; runs are disjoint, so relaxed stores suffice
    let ranks: Vec<AtomicUsize> = (0..n).map(|_| AtomicUsize::new(0)).collect();
    {
        let nodes: &[ListNode] = &*nodes;
        let in_samp: &[Option<usize>] = &in_samp;
        let samplist: &[SampleNode] = &samplist;
        parallel_for_tune(
            0,
            n,
            &|i| {
                if let Some(si) = in_samp[i] {
                    let mut rank = samplist[si].rank;
                    ranks[i].store(rank, Ordering::Relaxed);
                    let mut cur = nodes[i].next;
                    while let Some(j) = cur {
                        if in_samp[j].is_some() {
                            break;
                        }
                        rank -= 1;
                        ranks[j].store(rank, Ordering::Relaxed);
                        cur = nodes[j].next;
                    }
                }
            },
            threads,
            seq_threshold,
        );
    }

    parallel_for_each_tune(
        nodes,
        &|i, node| {
            node.rank = ranks[i].load(Ordering::Relaxed);
        },
        threads,
        seq_threshold,
    );
}

// draw the random sample and locate the head. Every node whose draw lands
// below `num_samples` is sampled; the tail is always sampled, and the one
// node never named as a successor (the head) is sampled afterwards. Returns
// per-node sample slots and the head index.
fn draw_samples(
    nodes: &[ListNode],
    num_samples: usize,
    seed: u64,
    threads: usize,
    seq_threshold: usize,
) -> (Vec<Option<usize>>, usize) {
    let n = nodes.len();
    let mut in_samp: Vec<Option<usize>> = vec![None; n];
    let not_head: Vec<AtomicBool> = (0..n).map(|_| AtomicBool::new(false)).collect();

    parallel_for_each_tune(
        &mut in_samp,
        &|i, slot| {
            if node_draw(seed, i, n) < num_samples {
                *slot = Some(i);
            }
            match nodes[i].next {
                None => *slot = Some(i), // the tail is always in the sample
                Some(j) => not_head[j].store(true, Ordering::Relaxed),
            }
        },
        threads,
        seq_threshold,
    );

    let head = AtomicUsize::new(usize::MAX);
    parallel_for_tune(
        0,
        n,
        &|i| {
            if !not_head[i].load(Ordering::Relaxed) {
                head.store(i, Ordering::Relaxed);
            }
        },
        threads,
        seq_threshold,
    );
    let head = head.load(Ordering::Relaxed);
    in_samp[head] = Some(head);

    (in_samp, head)
}
