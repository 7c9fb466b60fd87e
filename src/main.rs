use zagreb::anneal::{AnnealConfig, Annealer, Direction};
use zagreb::conjecture;
use zagreb::graph::GraphState;
use zagreb::propose::ProposalStrategy;

use rand::rngs::SmallRng;
use rand::SeedableRng;

fn main() {
    let mut n = 8usize;
    let mut v = 3usize;
    let mut exhaustive = true;
    let mut cfg = AnnealConfig::default();
    let mut init_path: Option<String> = None;
    let mut save_path: Option<String> = None;
    let mut compare = false;

    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--n" => {
                let val = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2));
                n = val.parse().unwrap_or_else(|_| usage_and_exit(2));
                i += 2;
            }
            "--v" => {
                let val = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2));
                v = val.parse().unwrap_or_else(|_| usage_and_exit(2));
                i += 2;
            }
            "--direction" => {
                let val = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2));
                cfg.direction = match val.as_str() {
                    "min" => Direction::Minimize,
                    "max" => Direction::Maximize,
                    _ => usage_and_exit(2),
                };
                i += 2;
            }
            "--strategy" => {
                let val = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2));
                exhaustive = match val.as_str() {
                    "exhaustive" => true,
                    "degree" => false,
                    _ => usage_and_exit(2),
                };
                i += 2;
            }
            "--t0" => {
                let val = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2));
                cfg.initial_temperature = val.parse().unwrap_or_else(|_| usage_and_exit(2));
                i += 2;
            }
            "--cooling" => {
                let val = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2));
                cfg.cooling_factor = val.parse().unwrap_or_else(|_| usage_and_exit(2));
                i += 2;
            }
            "--seed" => {
                let val = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2));
                cfg.seed = Some(val.parse().unwrap_or_else(|_| usage_and_exit(2)));
                i += 2;
            }
            "--report-every" => {
                let val = args.get(i + 1).unwrap_or_else(|| usage_and_exit(2));
                cfg.report_every = val.parse().unwrap_or_else(|_| usage_and_exit(2));
                i += 2;
            }
            "--init" => {
                init_path = Some(args.get(i + 1).unwrap_or_else(|| usage_and_exit(2)).clone());
                i += 2;
            }
            "--save" => {
                save_path = Some(args.get(i + 1).unwrap_or_else(|| usage_and_exit(2)).clone());
                i += 2;
            }
            "--conjecture" => {
                compare = true;
                i += 1;
            }
            "--help" | "-h" => usage_and_exit(0),
            _ => usage_and_exit(2),
        }
    }

    cfg.strategy = match (exhaustive, cfg.direction) {
        (true, Direction::Minimize) => ProposalStrategy::ExhaustiveWeightedMin,
        (true, Direction::Maximize) => ProposalStrategy::ExhaustiveWeightedMax,
        (false, Direction::Minimize) => ProposalStrategy::DegreeWeightedMin,
        (false, Direction::Maximize) => {
            eprintln!("The degree-weighted strategy only supports --direction min.");
            std::process::exit(2);
        }
    };

    // Resolve the seed up front so the banner can report it.
    let seed = cfg.seed.unwrap_or_else(rand::random);
    cfg.seed = Some(seed);

    let start = match &init_path {
        Some(path) => {
            let g = GraphState::load_from_file(path).unwrap_or_else(|e| {
                eprintln!("Failed to load {path}: {e}");
                std::process::exit(1);
            });
            n = g.node_count();
            let m = g.edge_count();
            if m + 1 < n {
                eprintln!("{path}: graph has too few edges to be connected");
                std::process::exit(1);
            }
            v = m - n + 1;
            g
        }
        None => {
            if !conjecture::graph_exists(n, v) {
                eprintln!("No connected graph with n = {n} and cyclomatic number {v} exists.");
                std::process::exit(1);
            }
            let m = n - 1 + v;
            let mut rng = SmallRng::seed_from_u64(seed);
            GraphState::random_connected(n, m, &mut rng).unwrap_or_else(|e| {
                eprintln!("Failed to build a starting graph: {e}");
                std::process::exit(1);
            })
        }
    };

    let m = start.edge_count();
    println!("--------------------------------------------------");
    println!("Zagreb search: {} cM2 on n = {n}, v = {v} (m = {m})", cfg.direction);
    println!(
        "Strategy: {:?} | T0 = {} | cooling = {} | seed = {seed}",
        cfg.strategy, cfg.initial_temperature, cfg.cooling_factor
    );
    println!("--------------------------------------------------");

    let annealer = Annealer::new(start, &cfg).unwrap_or_else(|e| {
        eprintln!("Cannot start search: {e}");
        std::process::exit(1);
    });
    let initial_energy = annealer.current_energy();
    println!("Initial energy: {initial_energy}");

    let outcome = annealer.run();

    println!("Best energy: {}", outcome.best_energy);
    println!("Edges: {:?}", outcome.best.edges());
    println!(
        "Iterations: {} | accepted: {} | no-ops: {}",
        outcome.iterations, outcome.accepted_moves, outcome.no_op_iterations
    );

    if compare {
        let conjectured = match cfg.direction {
            Direction::Minimize => conjecture::min_cm2(n, v),
            Direction::Maximize => conjecture::max_cm2(n, v),
        };
        match conjectured {
            Some(value) => println!("Conjectured {} cM2(n = {n}, v = {v}) = {value}", cfg.direction),
            None => println!("No closed-form conjecture covers (n = {n}, v = {v})."),
        }
    }

    if let Some(path) = save_path {
        match outcome.best.save_to_file(&path) {
            Ok(()) => println!("Best graph saved to {path}"),
            Err(e) => {
                eprintln!("Failed to save {path}: {e}");
                std::process::exit(1);
            }
        }
    }
}

fn usage_and_exit(code: i32) -> ! {
    eprintln!(
        "Usage:\n  zagreb [--n N] [--v V] [--direction min|max] [--strategy exhaustive|degree]\n         [--t0 T] [--cooling U] [--seed SEED] [--report-every K]\n         [--init FILE] [--save FILE] [--conjecture]\n\nOptions:\n  --n N              Graph order (default: 8)\n  --v V              Cyclomatic number; the search uses m = n - 1 + v edges (default: 3)\n  --direction D      Optimize toward min or max cM2 (default: min)\n  --strategy S       exhaustive: Metropolis-weighted over all swaps; degree: cheap degree bias (default: exhaustive)\n  --t0 T             Initial temperature, > 1 (default: 10000)\n  --cooling U        Geometric cooling factor in (0, 1) (default: 0.995)\n  --seed SEED        Seed for the run's RNG (default: random)\n  --report-every K   Print progress every K iterations; 0 = quiet (default: 0)\n  --init FILE        Start from a saved 0/1 adjacency matrix (overrides --n/--v)\n  --save FILE        Save the best graph's adjacency matrix\n  --conjecture       Compare the result against the closed-form conjecture\n"
    );
    std::process::exit(code)
}
