use crate::cli::{LookupKey, ResidueArgs};
use crate::config::models::AppConfig;
use crate::error::{CliError, Result};
use molecules::residues::library::ResidueLibrary;
use molecules::residues::residue::Residue;
use std::sync::Arc;
use tracing::{debug, info};

pub fn run(args: ResidueArgs, config: &AppConfig) -> Result<()> {
    let library = config.residue_library()?;
    let residue = find(&library, &args.query, args.by)?;
    info!("Found residue {} for query '{}'", residue.abbr(), args.query);

    println!("{}", describe(residue));
    Ok(())
}

fn find<'a>(
    library: &'a ResidueLibrary,
    query: &str,
    by: Option<LookupKey>,
) -> Result<&'a Arc<Residue>> {
    let found = match by {
        Some(LookupKey::Letter) => {
            let mut chars = query.chars();
            match (chars.next(), chars.next()) {
                (Some(letter), None) => library.by_letter(letter)?,
                _ => {
                    return Err(CliError::Argument(format!(
                        "'{}' is not a one-letter code",
                        query
                    )));
                }
            }
        }
        Some(LookupKey::Abbr) => library.by_abbr(query)?,
        Some(LookupKey::Name) => library.by_name(query)?,
        None => {
            let mut chars = query.chars();
            let as_letter = match (chars.next(), chars.next()) {
                (Some(letter), None) => library.by_letter(letter)?,
                _ => None,
            };
            debug!("Resolving '{}' without an explicit lookup key.", query);
            match as_letter {
                Some(residue) => Some(residue),
                None => match library.by_abbr(query)? {
                    Some(residue) => Some(residue),
                    None => library.by_name(query)?,
                },
            }
        }
    };
    found.ok_or_else(|| CliError::NotFound(query.to_string()))
}

fn describe(residue: &Residue) -> String {
    let code = residue
        .letter()
        .map(|letter| format!(", {}", letter))
        .unwrap_or_default();
    let classification = residue
        .classification()
        .map(|class| class.as_str())
        .unwrap_or("unclassified");

    [
        format!("{} ({}{})", residue.name(), residue.abbr(), code),
        format!("  Classification:    {}", classification),
        format!("  Side chain:        {}", residue.side_chain()),
        format!("  Formula:           {}", residue.formula()),
        format!("  Side chain mass:   {:.6}", residue.side_chain_mass()),
        format!("  Residue mass:      {:.6}", residue.residue_mass()),
        format!("  Immonium ion mass: {:.6}", residue.immonium_ion_mass()),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> ResidueLibrary {
        ResidueLibrary::standard().unwrap()
    }

    #[test]
    fn single_character_queries_are_codes() {
        let lib = library();
        assert_eq!(find(&lib, "W", None).unwrap().name(), "Tryptophan");
    }

    #[test]
    fn longer_queries_try_abbreviation_then_name() {
        let lib = library();
        assert_eq!(find(&lib, "Hyp", None).unwrap().name(), "Hydroxyproline");
        assert_eq!(find(&lib, "Sarcosine", None).unwrap().abbr(), "Sar");
    }

    #[test]
    fn explicit_key_restricts_the_lookup() {
        let lib = library();
        assert!(matches!(
            find(&lib, "Ala", Some(LookupKey::Name)),
            Err(CliError::NotFound(_))
        ));
        assert!(matches!(
            find(&lib, "Ala", Some(LookupKey::Letter)),
            Err(CliError::Argument(_))
        ));
        assert_eq!(
            find(&lib, "Glycine", Some(LookupKey::Name)).unwrap().abbr(),
            "Gly"
        );
    }

    #[test]
    fn unknown_query_is_not_found() {
        let lib = library();
        assert!(matches!(find(&lib, "Xyz", None), Err(CliError::NotFound(q)) if q == "Xyz"));
    }

    #[test]
    fn description_lists_formulas_and_masses() {
        let lib = library();
        let text = describe(find(&lib, "A", None).unwrap());
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "Alanine (Ala, A)");
        assert_eq!(lines[1], "  Classification:    common");
        assert_eq!(lines[2], "  Side chain:        CH(3)");
        assert_eq!(lines[3], "  Formula:           C(3)H(5)NO");
        assert_eq!(lines[5], "  Residue mass:      71.037114");
        assert_eq!(lines[6], "  Immonium ion mass: 44.050024");
    }

    #[test]
    fn description_of_uncoded_residue_omits_the_code() {
        let lib = library();
        let text = describe(find(&lib, "Orn", None).unwrap());
        assert!(text.starts_with("Ornithine (Orn)\n"));
    }
}
