//! Worker threads share one growable arena.
//!
//! Demonstrates: init → concurrent allocate → join → snapshot dump →
//! destroy. Set `RUST_LOG=debug` to watch blocks being appended.
//!
//! Usage: `cargo run -p strata-bench --example concurrent_workers [workers] [rounds] [initial_size]`

use std::sync::Arc;
use std::thread;

use strata_arena::{Arena, ArenaConfig};
use strata_bench::{replay, DemoArgs};

fn main() {
    env_logger::init();

    let args = DemoArgs::parse(std::env::args().skip(1));
    println!(
        "{} workers, {} rounds, {} allocations",
        args.workers,
        args.rounds,
        args.total_allocations()
    );

    let arena = Arc::new(Arena::new(ArenaConfig::growable(args.initial_size)).unwrap());

    let workers: Vec<_> = (0..args.workers)
        .map(|i| {
            let arena = Arc::clone(&arena);
            let sizes = args.sizes_for(i);
            thread::spawn(move || replay(&arena, &sizes))
        })
        .collect();

    for (i, worker) in workers.into_iter().enumerate() {
        let allocs = worker.join().unwrap().unwrap();
        match allocs.first() {
            Some(first) => println!("worker {i}: {} allocations, first at {first}", allocs.len()),
            None => println!("worker {i}: no allocations"),
        }
    }

    print!("{}", arena.snapshot());
    arena.destroy();
}
