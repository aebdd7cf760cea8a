use super::mass_label;
use crate::cli::ListArgs;
use crate::config::models::AppConfig;
use crate::error::Result;
use molecules::core::elements::MassKind;
use molecules::residues::residue::Residue;
use std::sync::Arc;
use tracing::info;

pub fn run(args: ListArgs, config: &AppConfig) -> Result<()> {
    let library = config.residue_library()?;
    let residues = if args.common {
        library.common()?.as_slice()
    } else {
        library.residues()
    };
    info!("Listing {} residue(s).", residues.len());

    println!("{}", render(residues, config.mass_table));
    Ok(())
}

fn render(residues: &[Arc<Residue>], table: MassKind) -> String {
    let mut lines = vec![format!(
        "{:<6} {:<6} {:<32} {:>16}",
        "Code",
        "Abbr",
        "Name",
        format!("{} mass", mass_label(table))
    )];
    lines.extend(residues.iter().map(|residue| {
        format!(
            "{:<6} {:<6} {:<32} {:>16.6}",
            residue.letter().map(String::from).unwrap_or_else(|| "-".to_string()),
            residue.abbr(),
            residue.name(),
            residue.residue_mass()
        )
    }));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use molecules::residues::library::ResidueLibrary;

    #[test]
    fn render_has_a_header_and_one_row_per_residue() {
        let lib = ResidueLibrary::standard().unwrap();
        let text = render(lib.common().unwrap().as_slice(), MassKind::Monoisotopic);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 21);
        assert!(lines[0].starts_with("Code   Abbr   Name"));
        assert!(lines[0].ends_with("Monoisotopic mass"));
        assert!(lines[1].starts_with("A      Ala    Alanine"));
        assert!(lines[1].ends_with("71.037114"));
    }

    #[test]
    fn uncoded_residues_show_a_dash() {
        let lib = ResidueLibrary::standard().unwrap();
        let text = render(lib.residues(), MassKind::Monoisotopic);
        let last = text.lines().last().unwrap();
        assert!(last.starts_with("-      Sar    Sarcosine"));
    }
}
