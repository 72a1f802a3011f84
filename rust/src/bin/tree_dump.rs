//! Build a tree from command-line keys and dump its structure.
//!
//! Usage: `tree_dump [--order N] KEY...`
//!
//! Without `--order` the order is chosen from the number of keys.
//!
//! Set `RUST_LOG=bplustree_set=debug` to watch splits and root growth.

use std::env;
use std::process::ExitCode;

use bplustree_set::{order_validation, BPlusTreeSet};
use tracing_subscriber::EnvFilter;

#[derive(Debug, PartialEq)]
struct Args {
    order: usize,
    keys: Vec<i64>,
}

fn parse_args<I>(args: I) -> Result<Args, String>
where
    I: IntoIterator<Item = String>,
{
    let mut order = None;
    let mut keys = Vec::new();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        if arg == "--order" {
            let value = args.next().ok_or("--order needs a value")?;
            order = Some(
                value
                    .parse()
                    .map_err(|_| format!("--order expects a number, got '{}'", value))?,
            );
        } else {
            let key = arg
                .parse()
                .map_err(|_| format!("keys must be integers, got '{}'", arg))?;
            keys.push(key);
        }
    }
    let order = order.unwrap_or_else(|| order_validation::recommended_order(keys.len()));
    Ok(Args { order, keys })
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("usage: tree_dump [--order N] KEY...");
            return ExitCode::from(2);
        }
    };

    let tree = match BPlusTreeSet::from_keys(args.order, args.keys) {
        Ok(tree) => tree,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    print!("{}", tree);
    println!("size: {}", tree.size());
    println!("height: {}", tree.height());
    match tree.check_invariants_detailed() {
        Ok(()) => {
            println!("invariants: ok");
            ExitCode::SUCCESS
        }
        Err(err) => {
            println!("invariants: {}", err);
            ExitCode::FAILURE
        }
    }
}
