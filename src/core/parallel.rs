// parallel.rs -- Block-partitioned parallel loops on scoped threads.
//
// The range is cut into one contiguous block per thread; the last block
// absorbs the remainder. With fewer items than threads the surplus
// threads are simply not spawned.

use std::thread;

/// Hardware concurrency, at least 1.
pub fn optimal_number_of_threads() -> usize {
    thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
}

/// Block boundaries for `len` items over `threads` workers.
fn blocks(len: usize, threads: usize) -> Vec<(usize, usize)> {
    let threads = threads.clamp(1, len.max(1));
    let block = len / threads;
    (0..threads)
        .map(|i| {
            let begin = i * block;
            let end = if i == threads - 1 { len } else { begin + block };
            (begin, end)
        })
        .collect()
}

/// Call `f(i)` for every `i` in `[ini, end)` across all hardware threads.
pub fn parallel_for<F>(ini: usize, end: usize, f: F)
where
    F: Fn(usize) + Sync,
{
    parallel_for_with(optimal_number_of_threads(), ini, end, f);
}

/// `parallel_for` with an explicit thread count.
pub fn parallel_for_with<F>(threads: usize, ini: usize, end: usize, f: F)
where
    F: Fn(usize) + Sync,
{
    if end <= ini {
        return;
    }
    let parts = blocks(end - ini, threads);
    if parts.len() == 1 {
        (ini..end).for_each(&f);
        return;
    }
    let f = &f;
    thread::scope(|s| {
        for (b, e) in parts {
            s.spawn(move || (ini + b..ini + e).for_each(f));
        }
    });
}

/// Apply `f` to every element of `data` in parallel.
pub fn parallel_for_each<T, F>(data: &mut [T], f: F)
where
    T: Send,
    F: Fn(&mut T) + Sync,
{
    parallel_for_each_with(optimal_number_of_threads(), data, f);
}

pub fn parallel_for_each_with<T, F>(threads: usize, data: &mut [T], f: F)
where
    T: Send,
    F: Fn(&mut T) + Sync,
{
    if data.is_empty() {
        return;
    }
    let parts = blocks(data.len(), threads);
    let f = &f;
    thread::scope(|s| {
        let mut rest = data;
        for (b, e) in parts {
            let (chunk, tail) = rest.split_at_mut(e - b);
            rest = tail;
            s.spawn(move || chunk.iter_mut().for_each(f));
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_blocks_cover_range() {
        assert_eq!(blocks(10, 3), vec![(0, 3), (3, 6), (6, 10)]);
        assert_eq!(blocks(2, 8), vec![(0, 1), (1, 2)]);
        assert_eq!(blocks(0, 4), vec![(0, 0)]);
    }

    #[test]
    fn test_parallel_for_visits_each_index_once() {
        let hits: Vec<AtomicUsize> = (0..1000).map(|_| AtomicUsize::new(0)).collect();
        parallel_for_with(4, 0, 1000, |i| {
            hits[i].fetch_add(1, Ordering::Relaxed);
        });
        assert!(hits.iter().all(|h| h.load(Ordering::Relaxed) == 1));
    }

    #[test]
    fn test_parallel_for_offset_and_empty() {
        let sum = AtomicUsize::new(0);
        parallel_for(10, 20, |i| {
            sum.fetch_add(i, Ordering::Relaxed);
        });
        assert_eq!(sum.load(Ordering::Relaxed), (10..20).sum::<usize>());

        parallel_for(5, 5, |_| panic!("empty range must not call f"));
        parallel_for(7, 3, |_| panic!("reversed range must not call f"));
    }

    #[test]
    fn test_parallel_for_each() {
        let mut data: Vec<u64> = (0..257).collect();
        parallel_for_each_with(3, &mut data, |v| *v *= 2);
        assert_eq!(data, (0..257).map(|v| v * 2).collect::<Vec<_>>());
    }

    #[test]
    fn test_optimal_threads_positive() {
        assert!(optimal_number_of_threads() >= 1);
    }
}
