// in-place parallel prefix scan over an associative operator, via a
// divide-and-conquer up-sweep / down-sweep

use super::SEQUENTIAL_THRESHOLD;
use crate::fork::par_do;
use num_cpus;
use num_traits::identities::Zero;
use std::cmp::max;
use std::ops::Add;

// A serial implementation for checking correctness. Each element is clamped
// to max(A[i], id) before folding, matching the parallel variant's leaf
// behavior exactly; for a true identity the clamp is a no-op.
//
// Work = O(n)
// Depth = O(n)
pub fn scan_inplace_serial<T, F>(a: &mut [T], f: &F, id: T) -> T
where
    T: Copy + Ord,
    F: Fn(T, T) -> T,
{
    let mut cur = id;
    for x in a.iter_mut() {
        let m = max(*x, id);
        let next = f(cur, m);
        *x = cur;
        cur = next;
    }
    cur
}

// Parallel in-place exclusive prefix scan: A[i] becomes the fold of
// A[0..i), A[0] becomes id, and the total fold is returned. Allocates one
// auxiliary array of n-1 elements.
//
// Work = O(n)
// Depth = O(log(n))
pub fn scan_inplace<T, F>(a: &mut [T], f: &F, id: T) -> T
where
    T: Copy + Ord + Send + Sync,
    F: Fn(T, T) -> T + Sync,
{
    scan_inplace_tune(a, f, id, num_cpus::get(), SEQUENTIAL_THRESHOLD)
}

// parallel in-place exclusive prefix scan with explicit tuning arguments
pub fn scan_inplace_tune<T, F>(a: &mut [T], f: &F, id: T, threads: usize, seq_threshold: usize) -> T
where
    T: Copy + Ord + Send + Sync,
    F: Fn(T, T) -> T + Sync,
{
    if threads == 0 {
        panic!("threads cannot be zero!");
    }
    if seq_threshold == 0 {
        panic!("seq_threshold cannot be zero!");
    }
    if a.is_empty() {
        return id;
    }

    let mut aux = vec![id; a.len() - 1];
    let total = scan_up(a, &mut aux, f, id, threads, seq_threshold);
    scan_down(a, &aux, f, id, threads, seq_threshold);
    total
}

// parallel in-place exclusive prefix sum over any type with a zero
pub fn scan_sum_inplace<T>(a: &mut [T]) -> T
where
    T: Copy + Ord + Zero + Add<Output = T> + Send + Sync,
{
    scan_inplace(a, &|x, y| x + y, T::zero())
}

// up-sweep: fold both halves (concurrently when the budget allows), stash
// the left half's total at the split boundary, return the combined fold.
// The tuning arguments only decide whether to spawn; the recursion itself is
// identical either way, so sequential and parallel runs are bit-identical.
fn scan_up<T, F>(a: &[T], aux: &mut [T], f: &F, id: T, threads: usize, seq_threshold: usize) -> T
where
    T: Copy + Ord + Send + Sync,
    F: Fn(T, T) -> T + Sync,
{
    if a.len() == 1 {
        return max(a[0], id);
    }
    let mid = a.len() / 2 + a.len() % 2; // left half takes the extra element
    let (left, right) = a.split_at(mid);
    let (left_aux, right_aux) = aux.split_at_mut(mid);
    let (left_inner, boundary) = left_aux.split_at_mut(mid - 1);

    let (l, r) = if threads == 1 || a.len() <= seq_threshold {
        (
            scan_up(left, left_inner, f, id, 1, seq_threshold),
            scan_up(right, right_aux, f, id, 1, seq_threshold),
        )
    } else {
        let left_threads: usize = threads / 2;
        let right_threads: usize = threads - left_threads;
        par_do(
            move || scan_up(left, left_inner, f, id, left_threads, seq_threshold),
            move || scan_up(right, right_aux, f, id, right_threads, seq_threshold),
        )
    };
    boundary[0] = l;
    f(l, r)
}

// down-sweep: write the incoming prefix at a leaf; otherwise recurse with
// the prefix on the left and f(prefix, left total) on the right
fn scan_down<T, F>(r: &mut [T], aux: &[T], f: &F, s: T, threads: usize, seq_threshold: usize)
where
    T: Copy + Send + Sync,
    F: Fn(T, T) -> T + Sync,
{
    let n = r.len();
    if n == 1 {
        r[0] = s;
        return;
    }
    let mid = n / 2 + n % 2;
    let sprime = f(s, aux[mid - 1]);
    let (left, right) = r.split_at_mut(mid);
    let (left_aux, right_aux) = aux.split_at(mid);
    let left_inner = &left_aux[..mid - 1];

    if threads == 1 || n <= seq_threshold {
        scan_down(left, left_inner, f, s, 1, seq_threshold);
        scan_down(right, right_aux, f, sprime, 1, seq_threshold);
    } else {
        let left_threads: usize = threads / 2;
        let right_threads: usize = threads - left_threads;
        par_do(
            move || scan_down(left, left_inner, f, s, left_threads, seq_threshold),
            move || scan_down(right, right_aux, f, sprime, right_threads, seq_threshold),
        );
    }
}
