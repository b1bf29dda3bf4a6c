use argh::FromArgs;
use gauss_solve::{ops, plu_with_params, solve_in_place_with_params, LuFactorization, LuParams};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(FromArgs)]
/// Decompose and solve a dense linear system. Runs the built-in 3x3 system by default.
struct Args {
    /// path to a JSON file with `matrix`, `rhs` and optional `params`
    #[argh(option, short = 'i')]
    input: Option<PathBuf>,

    /// reject ill-conditioned systems instead of warning
    #[argh(switch)]
    strict: bool,

    /// print the factorization as JSON
    #[argh(switch)]
    json: bool,
}

#[derive(Debug, Deserialize)]
struct LinearSystem {
    matrix: Vec<Vec<f64>>,
    rhs: Vec<f64>,
    #[serde(default)]
    params: LuParams,
}

impl LinearSystem {
    fn smoke_test() -> Self {
        Self {
            matrix: vec![
                vec![2.0, 3.0, -1.0],
                vec![4.0, 1.0, 2.0],
                vec![-2.0, 7.0, 2.0],
            ],
            rhs: vec![5.0, 6.0, 3.0],
            params: LuParams::default(),
        }
    }
}

fn print_matrix(n: usize, a: &[f64]) {
    for row in a.chunks(n) {
        for v in row {
            print!("{:.6} ", v);
        }
        println!();
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let mut system = match &args.input {
        Some(path) => {
            log::info!("Loading system from {}", path.display());
            serde_json::from_reader(std::fs::File::open(path)?)?
        }
        None => LinearSystem::smoke_test(),
    };
    if args.strict {
        system.params.strict = true;
    }

    let n = system.matrix.len();
    let a0 = system.matrix.concat();

    println!("Testing PLU decomposition:");
    let mut a = a0.clone();
    let mut p = vec![0; n];
    plu_with_params(n, &mut a, &mut p, &system.params)?;

    println!("Permutation vector P:");
    for pi in &p {
        print!("{} ", pi);
    }
    println!();

    println!("Matrix A after PLU decomposition (L and U stored in-place):");
    print_matrix(n, &a);

    let mut a = a0.clone();
    let mut x = system.rhs.clone();
    solve_in_place_with_params(n, &mut a, &mut x, &system.params)?;

    println!("Solution vector x:");
    for v in &x {
        print!("{:.6} ", v);
    }
    println!();

    let residual = ops::residual_norm(n, &a0, &x, &system.rhs)?;
    log::info!("Residual |A x - b| = {:e}", residual);

    if args.json {
        let lu = LuFactorization::with_params(n, a0, &system.params)?;
        println!("{}", serde_json::to_string_pretty(&lu)?);
    }

    Ok(())
}
