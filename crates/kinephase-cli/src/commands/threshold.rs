use crate::cli::QueryArgs;
use crate::config::QueryConfig;
use crate::error::Result;
use kinephase::core::phase_space::PhaseSpace;
use tracing::info;

pub fn run(args: QueryArgs) -> Result<()> {
    let config = QueryConfig::from_file(&args.config)?;
    let interaction = config.interaction(args.energy)?;
    let ps = PhaseSpace::with_params(&interaction, config.phase_space_params());

    let threshold = ps.threshold()?;
    let frame = ps.threshold_frame();
    info!("Threshold for {} = {threshold} GeV", interaction.as_key());

    println!("Interaction:  {}", interaction.as_key());
    println!("Threshold:    {threshold:.6} GeV ({frame:?} frame)");
    println!(
        "Probe energy: {:.6} GeV -> {}",
        interaction.probe_energy(frame),
        if ps.is_above_threshold()? {
            "above threshold"
        } else {
            "below threshold"
        }
    );
    Ok(())
}
