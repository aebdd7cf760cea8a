use super::mass_label;
use crate::cli::PeptideArgs;
use crate::config::models::AppConfig;
use crate::error::Result;
use molecules::residues::library::ResidueLibrary;
use tracing::info;

pub fn run(args: PeptideArgs, config: &AppConfig) -> Result<()> {
    let library = config.residue_library()?;
    let text = render(&library, &args.sequence, mass_label(config.mass_table))?;
    info!("Computed masses for a {}-residue sequence.", args.sequence.chars().count());

    println!("{}", text);
    Ok(())
}

fn render(library: &ResidueLibrary, sequence: &str, label: &str) -> Result<String> {
    let residue_sum = library.sequence_residue_mass(sequence)?;
    let peptide = library.peptide_mass(sequence)?;
    Ok([
        format!("Sequence:          {} ({} residues)", sequence, sequence.chars().count()),
        format!("Residue mass sum:  {:.6}", residue_sum),
        format!("{} peptide mass (+H2O): {:.6}", label, peptide),
    ]
    .join("\n"))
}
