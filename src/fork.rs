// fork-join primitives shared by every algorithm in this crate
// - par_do: run two tasks concurrently and join both
// - parallel_for: apply a function to every index of a range
// - parallel_for_each: apply a function to every element of a mutable slice

use super::SEQUENTIAL_THRESHOLD;
use num_cpus;

// run two tasks concurrently, block until both finish, return both results
pub fn par_do<A, B, RA, RB>(a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    crossbeam::scope(|scope| {
        let handle = scope.spawn(move |_| a());
        let rb = b();
        (handle.join().unwrap(), rb)
    })
    .unwrap()
}

// apply f to every index in [lo, hi), in parallel
pub fn parallel_for<F: Fn(usize) + Sync>(lo: usize, hi: usize, f: &F) {
    parallel_for_tune(lo, hi, f, num_cpus::get(), SEQUENTIAL_THRESHOLD);
}

// apply f to every index in [lo, hi), in parallel
pub fn parallel_for_tune<F: Fn(usize) + Sync>(
    lo: usize,
    hi: usize,
    f: &F,
    threads: usize,
    seq_threshold: usize,
) {
    if threads == 0 {
        panic!("threads cannot be zero!");
    }
    if seq_threshold == 0 {
        panic!("seq_threshold cannot be zero!");
    }
    parallel_for_split(lo, hi, f, threads, seq_threshold);
}

fn parallel_for_split<F: Fn(usize) + Sync>(
    lo: usize,
    hi: usize,
    f: &F,
    threads: usize,
    seq_threshold: usize,
) {
    if threads == 1 || hi - lo <= seq_threshold {
        // sequential
        for i in lo..hi {
            f(i);
        }
    } else {
        // parallel
        let mid = lo + (hi - lo) / 2;
        let left_threads: usize = threads / 2;
        let right_threads: usize = threads - left_threads;

        crossbeam::scope(|scope| {
            scope.spawn(|_| {
                parallel_for_split(lo, mid, f, left_threads, seq_threshold);
            });
            parallel_for_split(mid, hi, f, right_threads, seq_threshold);
        })
        .unwrap();
    }
}

// apply f to every element of the slice, in parallel; f also receives the
// element's index so callers can cross-reference other per-index arrays
pub fn parallel_for_each<T: Send, F: Fn(usize, &mut T) + Sync>(data: &mut [T], f: &F) {
    parallel_for_each_tune(data, f, num_cpus::get(), SEQUENTIAL_THRESHOLD);
}

// apply f to every element of the slice, in parallel
pub fn parallel_for_each_tune<T: Send, F: Fn(usize, &mut T) + Sync>(
    data: &mut [T],
    f: &F,
    threads: usize,
    seq_threshold: usize,
) {
    if threads == 0 {
        panic!("threads cannot be zero!");
    }
    if seq_threshold == 0 {
        panic!("seq_threshold cannot be zero!");
    }
    parallel_for_each_split(0, data, f, threads, seq_threshold);
}

fn parallel_for_each_split<T: Send, F: Fn(usize, &mut T) + Sync>(
    base: usize,
    data: &mut [T],
    f: &F,
    threads: usize,
    seq_threshold: usize,
) {
    if threads == 1 || data.len() <= seq_threshold {
        // sequential
        for (i, t) in data.iter_mut().enumerate() {
            f(base + i, t);
        }
    } else {
        // parallel
        let mid = data.len() / 2;
        let left_threads: usize = threads / 2;
        let right_threads: usize = threads - left_threads;

        // have to split, since each thread requires unique access...
        let (left, right) = data.split_at_mut(mid);

        crossbeam::scope(|scope| {
            scope.spawn(|_| {
                parallel_for_each_split(base, left, f, left_threads, seq_threshold);
            });
            parallel_for_each_split(base + mid, right, f, right_threads, seq_threshold);
        })
        .unwrap();
    }
}

// run some tests
#[cfg(test)]
mod tests {
    use crate::fork::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_par_do_returns_both() {
        let (a, b) = par_do(|| 1 + 1, || "two");
        assert_eq!(a, 2);
        assert_eq!(b, "two");
    }

    #[test]
    fn test_parallel_for_visits_every_index() {
        const N: usize = 1000;
        let hits: Vec<AtomicUsize> = (0..N).map(|_| AtomicUsize::new(0)).collect();
        parallel_for(0, N, &|i| {
            hits[i].fetch_add(1, Ordering::Relaxed);
        });
        for h in &hits {
            assert_eq!(h.load(Ordering::Relaxed), 1);
        }
    }

    #[test]
    fn test_parallel_for_each_indices_line_up() {
        let mut data = vec![0usize; 777];
        parallel_for_each_tune(&mut data, &|i, t| *t = i * 3, 8, 4);
        for (i, t) in data.iter().enumerate() {
            assert_eq!(*t, i * 3);
        }
    }

    #[test]
    fn test_parallel_for_empty_range() {
        parallel_for(5, 5, &|_| panic!("must not be called"));
    }

    // tests to ensure the dispatchers panic if given bad tuning args
    #[test]
    #[should_panic]
    fn test_parallel_for_bad_args() {
        parallel_for_tune(0, 1, &|_| {}, 0, 1);
    }
    #[test]
    #[should_panic]
    fn test_parallel_for_each_bad_args() {
        let mut data = [0usize; 1];
        parallel_for_each_tune(&mut data, &|_, _| {}, 1, 0);
    }
}
