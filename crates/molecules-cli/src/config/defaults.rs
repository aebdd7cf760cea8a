use molecules::core::elements::MassKind;

pub struct DefaultsConfig {
    pub mass_table: MassKind,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            mass_table: MassKind::Monoisotopic,
        }
    }
}
