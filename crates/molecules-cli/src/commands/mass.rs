use super::mass_label;
use crate::cli::MassArgs;
use crate::config::models::AppConfig;
use crate::error::Result;
use molecules::core::elements::MassKind;
use molecules::core::formula::EmpiricalFormula;
use tracing::info;

pub fn run(args: MassArgs, config: &AppConfig) -> Result<()> {
    let formula = if args.simple {
        EmpiricalFormula::parse_simple_with(&args.formula, &config.elements)?
    } else {
        EmpiricalFormula::parse_with(&args.formula, &config.elements)?
    };
    let mass = formula.mass(&config.elements)?;
    info!("Parsed '{}' as {} with mass {}", args.formula, formula, mass);

    println!("{}", render(&formula, mass, config.mass_table));
    Ok(())
}

fn render(formula: &EmpiricalFormula, mass: f64, table: MassKind) -> String {
    let canonical = if formula.is_empty() {
        "(empty)".to_string()
    } else {
        formula.to_string()
    };
    let composition = formula
        .counts()
        .map(|(symbol, count)| format!("{} {}", symbol, count))
        .collect::<Vec<_>>()
        .join(", ");

    [
        format!("Formula:     {}", canonical),
        format!("Composition: {}", composition),
        format!("{} mass: {:.6}", mass_label(table), mass),
    ]
    .join("\n")
}
