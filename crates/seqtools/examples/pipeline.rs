//! Pipeline example - lazy combinators over indexed and pulled inputs

use seqtools::prelude::*;
use seqtools::{
    chain, combinations_checked, count, cycle, indexed, product_checked, pull, range, tee,
    zip_longest, SeqConfig, Sparse,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = SeqConfig::from_json(
        r#"{ "max_odometer_space": 1000, "max_tee_branches": 4, "join_separator": " | " }"#,
    )?;
    println!("Config: {:?}", config);

    // Holes in a sparse collection are skipped
    let mut readings = Sparse::with_length(6);
    readings.set(0, 12);
    readings.set(2, 15);
    readings.set(5, 11);
    let dense = indexed(&readings).join_default(&config);
    println!("Readings: {}", dense);

    // Infinite sources stay lazy until bounded
    let odd_squares = count(1u64, 2).map(|x| x * x).limit(5).to_array();
    println!("Odd squares: {:?}", odd_squares);

    let merged = chain(vec![range(0, 3, 1)?, range(10, 7, -1)?]).join(",");
    println!("Chained ranges: {}", merged);

    // Runs of equal keys
    for (key, members) in pull("aaabccdd".chars()).group_by(|c| *c) {
        println!("Run {:?}: {} members", key, members.len());
    }

    // Fan out one pass to several readers
    let mut branches = tee(range(0, 4, 1)?, 2);
    let evens = branches[0].by_ref().filter(|x| *x % 2 == 0).to_array();
    let odds = branches[1].by_ref().filter_false(|x| *x % 2 == 0).to_array();
    println!(
        "Tee: evens {:?}, odds {:?}, upstream pulls {}",
        evens,
        odds,
        branches[0].upstream_pulls()
    );

    let rows = zip_longest(0, vec![vec![1, 2, 3], vec![4]]).to_array();
    println!("Zip longest: {:?}", rows);

    let pattern = cycle(vec!["tick", "tock"]).slice(0, Some(5), 1)?.join(" ");
    println!("Cycle: {}", pattern);

    let pairs = combinations_checked(vec!['a', 'b', 'c', 'd'], 2, &config)?.count();
    println!("Pairs of four: {}", pairs);

    // Exceeds the configured odometer space
    match product_checked(vec![0..20, 0..20, 0..20], &config) {
        Ok(grid) => println!("Grid of {} points", grid.total_size()),
        Err(e) => println!("Refused: {}", e),
    }

    Ok(())
}
