use std::path::Path;

use miette::*;

use aoc2025_day_7::part2;
use aoc2025_day_7::runner::{solve_file, INPUTS};

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    println!("Part Two:");
    for name in INPUTS {
        println!("{}", solve_file(dir, name, part2::count_all_paths));
    }
    Ok(())
}
