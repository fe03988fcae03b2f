// arena-style linked list node and the serial list ranking baseline

/// Value of the `rank` field before any ranking algorithm has run.
pub const UNSET_RANK: usize = usize::MAX;

/// A singly linked list node. The list lives in a flat slice and `next` is
/// an index into that slice (`None` marks the tail), so the algorithms never
/// touch raw pointers. Callers own the slice; ranking algorithms only read
/// `next` and write `rank`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListNode {
    pub next: Option<usize>,
    pub rank: usize,
}

impl ListNode {
    pub fn new(next: Option<usize>) -> Self {
        ListNode {
            next,
            rank: UNSET_RANK,
        }
    }
}

// Serial list ranking. The rank of a node is its distance from the tail of
// the list; the tail is the node with `next == None`.
//
// Work = O(n)
// Depth = O(n)
pub fn serial_list_ranking(nodes: &mut [ListNode], head: usize) {
    let mut ctr: usize = 0;
    let mut cur = Some(head);
    while let Some(i) = cur {
        cur = nodes[i].next;
        ctr += 1;
    }
    ctr -= 1; // last node is distance 0
    let mut cur = Some(head);
    while let Some(i) = cur {
        nodes[i].rank = ctr;
        cur = nodes[i].next;
        ctr = ctr.saturating_sub(1);
    }
}

// build a chain from a visit order: order[k] is the index of the k-th node
#[cfg(test)]
pub(crate) fn chain_from_order(order: &[usize]) -> Vec<ListNode> {
    let mut nodes = vec![ListNode::new(None); order.len()];
    for w in order.windows(2) {
        nodes[w[0]].next = Some(w[1]);
    }
    nodes
}
