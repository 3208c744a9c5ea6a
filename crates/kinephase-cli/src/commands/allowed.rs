use crate::cli::QueryArgs;
use crate::config::QueryConfig;
use crate::error::{CliError, Result};
use kinephase::core::models::kinematics::Kinematics;
use kinephase::core::phase_space::PhaseSpace;

pub fn run(args: QueryArgs) -> Result<()> {
    let config = QueryConfig::from_file(&args.config)?;
    let interaction = config.interaction(args.energy)?;
    let kine = interaction.kinematics;
    if kine == Kinematics::default() {
        return Err(CliError::Config(
            "the [interaction.kinematics] table is required for 'allowed'".to_string(),
        ));
    }

    let allowed = PhaseSpace::with_params(&interaction, config.phase_space_params()).is_allowed()?;
    println!("Interaction: {}", interaction.as_key());
    println!("Kinematics:  {kine:?}");
    println!("Allowed:     {allowed}");
    Ok(())
}
