use crate::cli::QueryArgs;
use crate::config::QueryConfig;
use crate::error::Result;
use kinephase::core::models::kinematics::KineVar;
use kinephase::core::phase_space::PhaseSpace;
use std::io::{self, Write};
use tracing::{debug, warn};

pub fn run(args: QueryArgs) -> Result<()> {
    let config = QueryConfig::from_file(&args.config)?;
    let interaction = config.interaction(args.energy)?;
    let ps = PhaseSpace::with_params(&interaction, config.phase_space_params());

    println!("Interaction: {}", interaction.as_key());
    write_limits(&mut io::stdout().lock(), &ps)?;
    Ok(())
}

/// One row per limited variable. A variable whose limits fail is reported on
/// its own row and the listing goes on.
fn write_limits<W: Write>(out: &mut W, ps: &PhaseSpace<'_>) -> io::Result<()> {
    for var in KineVar::LIMITED {
        match ps.limits(var) {
            Ok(range) if range.is_undefined() => {
                writeln!(out, "{:>3}: undefined", var.as_str())?;
            }
            Ok(range) => {
                debug!("{var} limits: {range}");
                writeln!(out, "{:>3}: [{:.6e}, {:.6e}]", var.as_str(), range.min, range.max)?;
            }
            Err(e) => {
                warn!("No {var} limits: {e}");
                writeln!(out, "{:>3}: error ({e})", var.as_str())?;
            }
        }
    }
    Ok(())
}
