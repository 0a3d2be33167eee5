use argh::FromArgs;
use linsys::{
    system::{EliminationConfig, LinearSystem, Plane},
    vector::{scalar, Decimal, Vector},
};

/// Reduce a linear system to row-echelon form
#[derive(Debug, FromArgs)]
struct Args {
    /// equations written as comma separated coefficients, e.g. `1,1,-1=3` (put `--` before
    /// the first equation if it starts with a minus sign)
    #[argh(positional, from_str_fn(to_plane))]
    equations: Vec<Plane>,

    /// coefficients below this magnitude are treated as zero
    #[argh(option, short = 't', default = "scalar::DEFAULT_TOLERANCE", from_str_fn(to_decimal))]
    tolerance: Decimal,

    /// print the pivot choices made during the reduction
    #[argh(switch, short = 'v')]
    verbose: bool,
}

fn to_decimal(value: &str) -> Result<Decimal, String> {
    scalar::parse(value).map_err(|e| e.to_string())
}

fn to_plane(value: &str) -> Result<Plane, String> {
    let (lhs, rhs) = value
        .split_once('=')
        .ok_or_else(|| format!("Missing '=' in equation {value}"))?;
    let coefficients: Vec<&str> = lhs.split(',').collect();
    let normal_vector = Vector::parse(&coefficients).map_err(|e| e.to_string())?;
    Ok(Plane::new(normal_vector, to_decimal(rhs)?))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = argh::from_env();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let system = LinearSystem::new(args.equations)?;
    log::info!(
        "reducing {} equations in {} variables",
        system.len(),
        system.dimension()
    );

    let config = EliminationConfig::new(args.tolerance)?;
    let triangular = system.compute_triangular_form_with(&config)?;

    println!("{system}");
    println!();
    println!("{triangular}");
    println!();

    let pivots = triangular
        .indices_of_first_nonzero_terms_in_each_row()?
        .into_iter()
        .map(|pivot| pivot.map_or_else(|| "-".to_string(), |col| format!("x_{}", col + 1)))
        .collect::<Vec<_>>();
    println!("Pivots: {}", pivots.join(", "));

    Ok(())
}
