use clap::Parser;
use hopscotch_table::Error;
use hopscotch_table::FoldHash;
use hopscotch_table::HashMap;
use hopscotch_table::Options;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'c', long = "capacity", default_value_t = 1024)]
    capacity: usize,

    #[arg(long = "max-load", default_value_t = 0.75)]
    max_load_factor: f64,

    #[arg(long = "min-load", default_value_t = 0.25)]
    min_load_factor: f64,

    /// Hash keys with foldhash instead of the default polynomial hash
    #[arg(long)]
    foldhash: bool,
}

fn fill<P>(mut map: HashMap<u64, u64, P>, target_capacity: usize) -> Result<(), Error>
where
    P: hopscotch_table::HashProvider<u64>,
{
    println!("Filling map with u64 keys until it reaches {target_capacity} slots...");

    let mut next_key = 0u64;
    let mut failures = 0usize;
    while map.capacity() <= target_capacity {
        match map.insert(next_key, next_key) {
            Ok(_) => {}
            Err(Error::CapacityExhausted(error)) => {
                failures += 1;
                eprintln!("insert of {next_key} failed: {error}");
                if failures > 16 {
                    break;
                }
            }
            Err(error) => return Err(error),
        }
        next_key += 1;

        // Stop right before the insertion that would grow past the target.
        if map.capacity() == target_capacity
            && (map.len() + 1) as f64 / map.capacity() as f64 > map.max_load_factor()
        {
            break;
        }
    }

    println!("Inserted {} keys", map.len());
    println!("Capacity: {}", map.capacity());
    println!("Final load factor: {:.2}%", map.load_factor() * 100.0);

    map.probe_histogram().print();
    map.debug_stats().print();
    println!("Failed insertions: {failures}");
    Ok(())
}

fn main() -> Result<(), Error> {
    env_logger::init();
    let args = Args::parse();

    println!(
        "Creating HashMap (target capacity {}, load factors {}..{})",
        args.capacity, args.min_load_factor, args.max_load_factor
    );

    let options = Options::new().load_factors(args.max_load_factor, args.min_load_factor);
    if args.foldhash {
        let map = HashMap::with_options(options.hash_provider(FoldHash::default()))?;
        fill(map, args.capacity)
    } else {
        let map = HashMap::with_options(options)?;
        fill(map, args.capacity)
    }
}
