pub mod list;
pub mod mass;
pub mod peptide;
pub mod residue;

use molecules::core::elements::MassKind;

fn mass_label(table: MassKind) -> &'static str {
    match table {
        MassKind::Monoisotopic => "Monoisotopic",
        MassKind::Average => "Average",
    }
}
