// implementation of classic parallel primitives over lists and arrays in rust
// - list ranking: serial baseline, pointer jumping (Wyllie), sampling based
// - in-place parallel prefix scan (up-sweep / down-sweep)

pub mod fork;
pub mod list;
pub mod sampling;
pub mod scan;
pub mod wyllie;

pub use crate::list::{serial_list_ranking, ListNode, UNSET_RANK};
pub use crate::sampling::{
    sampling_based_list_ranking, sampling_based_list_ranking_tune, DEFAULT_SEED,
};
pub use crate::scan::{scan_inplace, scan_inplace_serial, scan_inplace_tune, scan_sum_inplace};
pub use crate::wyllie::{wyllie_list_ranking, wyllie_list_ranking_tune};

// below this many elements a dispatch runs its range sequentially
pub(crate) const SEQUENTIAL_THRESHOLD: usize = 16;

// run some tests
#[cfg(test)]
mod tests {
    use crate::list::chain_from_order;
    use crate::*;
    use rand::seq::SliceRandom;
    use rand::{rngs::StdRng, SeedableRng};

    // all three ranking strategies must agree, and the ranks of an n-node
    // list must be exactly {0, 1, ..., n-1}
    #[test]
    fn test_ranking_strategies_agree() {
        let mut rng = StdRng::seed_from_u64(3);
        for &n in &[1usize, 2, 3, 17, 100, 1000] {
            let mut order: Vec<usize> = (0..n).collect();
            order.shuffle(&mut rng);

            let nodes = chain_from_order(&order);
            let mut serial = nodes.clone();
            let mut wyllie = nodes.clone();
            let mut sampled = nodes.clone();

            serial_list_ranking(&mut serial, order[0]);
            wyllie_list_ranking(&mut wyllie);
            sampling_based_list_ranking(&mut sampled);

            for i in 0..n {
                assert_eq!(wyllie[i].rank, serial[i].rank, "wyllie, n = {}", n);
                assert_eq!(sampled[i].rank, serial[i].rank, "sampling, n = {}", n);
            }

            let mut seen = vec![false; n];
            for node in &serial {
                assert!(node.rank < n);
                assert!(!seen[node.rank], "duplicate rank {}", node.rank);
                seen[node.rank] = true;
            }
        }
    }

    #[test]
    fn test_five_node_chain_all_strategies() {
        // h -> a -> b -> c -> t
        let expected = [4usize, 3, 2, 1, 0];

        let mut nodes = chain_from_order(&[0, 1, 2, 3, 4]);
        serial_list_ranking(&mut nodes, 0);
        assert!(nodes.iter().map(|nd| nd.rank).eq(expected.iter().copied()));

        let mut nodes = chain_from_order(&[0, 1, 2, 3, 4]);
        wyllie_list_ranking(&mut nodes);
        assert!(nodes.iter().map(|nd| nd.rank).eq(expected.iter().copied()));

        let mut nodes = chain_from_order(&[0, 1, 2, 3, 4]);
        sampling_based_list_ranking(&mut nodes);
        assert!(nodes.iter().map(|nd| nd.rank).eq(expected.iter().copied()));
    }
}
