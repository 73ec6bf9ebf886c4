//! Test to verify concurrent read access to a shared index

use rollsketch::prelude::*;
use std::collections::BTreeSet;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};

fn term(i: usize) -> String {
    // Letters only, so no two terms share a sketch.
    let mut word = String::from("term");
    let mut n = i;
    loop {
        word.push((b'a' + (n % 26) as u8) as char);
        n /= 26;
        if n == 0 {
            break;
        }
    }
    word
}

#[test]
fn test_parallel_reads() {
    let terms: Vec<String> = (0..1000).map(term).collect();
    let index = Arc::new(SketchIndex::with_radius(1).unwrap().build(&terms));

    const NUM_READERS: usize = 8;
    let barrier = Arc::new(Barrier::new(NUM_READERS));

    let mut handles = vec![];

    for i in 0..NUM_READERS {
        let index = Arc::clone(&index);
        let barrier = Arc::clone(&barrier);

        let handle = thread::spawn(move || {
            barrier.wait();

            let start = Instant::now();
            let mut found = 0;
            for j in 0..100 {
                let query = term((i * 100 + j) % 1000);
                if index.lookup(&query).contains(&query) {
                    found += 1;
                }
            }

            (start.elapsed(), found)
        });

        handles.push(handle);
    }

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    println!("\n=== Parallel Read Test ===");
    println!("Number of reader threads: {}", NUM_READERS);
    for (i, (duration, _)) in results.iter().enumerate() {
        println!("  Thread {}: {:?}", i, duration);
    }

    let avg = results.iter().map(|(d, _)| *d).sum::<Duration>() / NUM_READERS as u32;
    println!("  Average: {:?}", avg);

    for (_, found) in &results {
        assert_eq!(*found, 100);
    }
}

#[test]
fn test_parallel_results_match_sequential() {
    let terms: Vec<String> = (0..200).map(term).collect();
    let index = Arc::new(SketchIndex::with_radius(1).unwrap().build(&terms));
    let queries: Vec<String> = (0..50).map(|i| format!("{}x", term(i * 3))).collect();

    let expected: Vec<BTreeSet<String>> = queries.iter().map(|q| index.lookup(q)).collect();
    let queries = Arc::new(queries);

    const NUM_READERS: usize = 4;
    let barrier = Arc::new(Barrier::new(NUM_READERS));
    let handles: Vec<_> = (0..NUM_READERS)
        .map(|_| {
            let index = Arc::clone(&index);
            let queries = Arc::clone(&queries);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                queries
                    .iter()
                    .map(|q| index.lookup(q))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_concurrent_sketch_tables() {
    // Different alphabets grow separate power tables from several threads.
    let handles: Vec<_> = ["ab", "abc", "abcd", "abcdefgh"]
        .into_iter()
        .map(|symbols| {
            thread::spawn(move || {
                let sketcher = Sketcher::new(Alphabet::from_symbols(symbols).unwrap());
                let word: String = symbols.chars().cycle().take(300).collect();
                let mut rolling = sketcher.rolling();
                rolling.extend(word.chars());
                assert_eq!(rolling.sketch(), sketcher.sketch(&word));
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}
