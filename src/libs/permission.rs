//! Permission code table.
//!
//! Maps the short codes the reporting service sends (`VAC`, `DM`, ...) to the
//! labels shown in the matrix. Codes are matched case-insensitively; entries
//! from the configuration file override or extend the built-in table.

use std::collections::BTreeMap;

const BUILTIN_LABELS: [(&str, &str); 11] = [
    ("VAC", "Vacaciones"),
    ("DM", "Descanso Médico"),
    ("LCG", "Licencia con Goce"),
    ("LSG", "Licencia sin Goce"),
    ("CAP", "Capacitación"),
    ("COM", "Comisión de Servicio"),
    ("LPM", "Licencia por Maternidad"),
    ("LPP", "Licencia por Paternidad"),
    ("ONO", "Onomástico"),
    ("CMP", "Compensación de Horas"),
    ("SUS", "Suspensión"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionCatalog {
    labels: BTreeMap<String, String>,
}

impl Default for PermissionCatalog {
    fn default() -> Self {
        let labels = BUILTIN_LABELS
            .iter()
            .map(|(code, label)| (code.to_string(), label.to_string()))
            .collect();
        PermissionCatalog { labels }
    }
}

impl PermissionCatalog {
    /// The built-in table with `overrides` applied on top.
    pub fn with_overrides(overrides: &BTreeMap<String, String>) -> Self {
        let mut catalog = Self::default();
        for (code, label) in overrides {
            catalog.labels.insert(normalize(code), label.clone());
        }
        catalog
    }

    /// Label for a code, or `Permiso (<code>)` when the code is unknown.
    pub fn label(&self, code: &str) -> String {
        let code = code.trim();
        match self.labels.get(&normalize(code)) {
            Some(label) => label.clone(),
            None => format!("Permiso ({})", code),
        }
    }

    pub fn is_known(&self, code: &str) -> bool {
        self.labels.contains_key(&normalize(code))
    }
}

fn normalize(code: &str) -> String {
    code.trim().to_uppercase()
}
