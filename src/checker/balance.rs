// src/checker/balance.rs
// =============================================================================
// Spreads external URLs into "waves" so we never hit one host with a burst
// of parallel requests.
//
// How it works:
// 1. Every URL gets a domain key: scheme and leading "www." removed, then
//    the first N characters (7 by default, so "akka.io/..." URLs all land
//    together). This is a cheap heuristic; different hosts sharing a prefix
//    are treated as one host, and that is accepted.
// 2. URLs are grouped into buckets by key, first-seen order kept.
// 3. The buckets are transposed: wave 1 takes the first URL of every bucket,
//    wave 2 the second of every bucket that still has one, and so on.
//
//    buckets [[gh1, gh2, gh3], [tw1, tw2], [fb1]]
//    waves   [[gh1, tw1, fb1], [gh2, tw2], [gh3]]
//
// 4. A wave may still be wider than the fan-out cap (many distinct hosts).
//    WaveQueue hands out at most `cap` URLs at a time and pushes the rest
//    back as the very next wave.
// =============================================================================

use std::collections::{HashMap, VecDeque};

// URLs requested together; all from distinct domain keys
pub type Wave = Vec<String>;

// Computes the grouping key for a URL
//
// Example (length 7):
//   "https://www.github.com/foo" -> "github."
//   "http://akka.io/docs"        -> "akka.io"
pub fn domain_key(url: &str, length: usize) -> String {
    let without_scheme = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    let without_www = without_scheme
        .strip_prefix("www.")
        .unwrap_or(without_scheme);
    without_www.chars().take(length).collect()
}

// Groups URLs by domain key, buckets in order of first appearance
pub fn group_by_domain(urls: &[String], key_length: usize) -> Vec<Vec<String>> {
    // HashMap iteration order is random, so the map only points into an
    // ordered Vec of buckets
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut buckets: Vec<Vec<String>> = Vec::new();

    for url in urls {
        let key = domain_key(url, key_length);
        let slot = *index.entry(key).or_insert_with(|| {
            buckets.push(Vec::new());
            buckets.len() - 1
        });
        buckets[slot].push(url.clone());
    }

    buckets
}

// Transposes ragged rows: the i-th output row holds the i-th element of
// every input row long enough to have one
pub fn transpose<T: Clone>(rows: &[Vec<T>]) -> Vec<Vec<T>> {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    (0..width)
        .map(|column| rows.iter().filter_map(|row| row.get(column).cloned()).collect())
        .collect()
}

// Queue of outstanding waves, consumed front to back
#[derive(Debug, Clone)]
pub struct WaveQueue {
    waves: VecDeque<Wave>,
    max_wave_size: usize,
}

impl WaveQueue {
    pub fn new(waves: Vec<Wave>, max_wave_size: usize) -> Self {
        Self {
            waves: waves.into_iter().filter(|wave| !wave.is_empty()).collect(),
            // a zero cap would never make progress
            max_wave_size: max_wave_size.max(1),
        }
    }

    // Takes the next wave, returning any overflow beyond the cap to the
    // front of the queue
    pub fn next_wave(&mut self) -> Option<Wave> {
        let mut wave = self.waves.pop_front()?;
        if wave.len() > self.max_wave_size {
            let overflow = wave.split_off(self.max_wave_size);
            self.waves.push_front(overflow);
        }
        Some(wave)
    }

    pub fn is_empty(&self) -> bool {
        self.waves.is_empty()
    }

    // Number of waves left, counting each oversized wave by how many
    // capped waves it will become
    pub fn remaining_waves(&self) -> usize {
        self.waves
            .iter()
            .map(|wave| wave.len().div_ceil(self.max_wave_size))
            .sum()
    }

    pub fn remaining_urls(&self) -> usize {
        self.waves.iter().map(Vec::len).sum()
    }
}

// Groups, transposes and queues the URLs in one go
pub fn balance(urls: &[String], key_length: usize, max_wave_size: usize) -> WaveQueue {
    let buckets = group_by_domain(urls, key_length);
    WaveQueue::new(transpose(&buckets), max_wave_size)
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why VecDeque and not Vec?
//    - We pop waves from the front and sometimes push overflow back to the
//      front; both are O(1) on a VecDeque
//
// 2. Why split_off?
//    - wave.split_off(n) keeps the first n items in `wave` and returns the
//      rest, preserving order, which is exactly the overflow we re-queue
// -----------------------------------------------------------------------------
