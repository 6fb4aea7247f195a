//! Synonym dictionary for the electrical-supply catalog
//!
//! The raw table maps a term to the abbreviations and trade names buyers
//! actually type. Raw entries may be authored in one direction only; the
//! built index always holds the symmetric closure.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::types::AppResult;
use crate::validation::validate_synonym_table;

/// Raw synonym table as authored (term -> interchangeable terms)
pub type RawSynonyms = HashMap<String, Vec<String>>;

/// Built-in dictionary of construction/electrical vocabulary.
/// Keys and values are normalized on build, so casing here is cosmetic.
pub const BUILTIN_SYNONYMS: &[(&str, &[&str])] = &[
    // Lighting
    ("PAINEL", &["LUMINARIA", "PLAFON", "LED", "LUM", "LUMIN"]),
    ("LUMINARIA", &["PAINEL", "PLAFON", "LED", "LUM", "LUMIN"]),
    ("PLAFON", &["PAINEL", "LUMINARIA", "LED"]),
    ("LED", &["LUMINARIA", "PAINEL", "REFLETOR"]),
    ("ARANDELA", &["ARAND"]),
    ("REFLETOR", &["REF"]),
    ("LAMPADA", &["LAMP"]),
    // Wire and cable
    ("FIO", &["CABO", "CONDUTOR", "CB", "CAB"]),
    ("CABO", &["FIO", "CONDUTOR", "CB", "CAB"]),
    // Infrastructure
    ("ELETRODUTO", &["CONDUITE", "TUBO", "ELET"]),
    (
        "CONDUITE",
        &[
            "ELETRODUTO",
            "TUBO",
            "MANGUEIRA",
            "MANGUEIRA CORRUGADA",
            "ELETRODUTO CORRUGADO",
        ],
    ),
    ("CONDULETE", &["CAIXA MULTIPLA", "CX MULTIPLA"]),
    ("CAIXA", &["CX", "CX.", "CXA"]),
    ("QUADRO", &["QD", "QD.", "QDR", "QUAD"]),
    ("QUADRADA", &["QUAD", "QD", "QDR"]),
    ("QUADRADO", &["QUAD", "QD", "QDR"]),
    // Devices and modules
    (
        "DISJUNTOR",
        &["MINI DISJUNTOR", "DPS", "DR", "DISJ", "DISJ.", "DISJUN", "BREAKER"],
    ),
    ("TOMADA", &["CONJUNTO", "PLACA", "TOM", "TOM."]),
    ("INTERRUPTOR", &["CONJUNTO", "TECLA", "INT", "INT.", "INTER"]),
    ("MODULO", &["MOD", "MOD.", "MÓDULO"]),
    ("PLACA", &["PL", "PL.", "ESPELHO"]),
    ("DR", &["DIFERENCIAL", "RESIDUAL"]),
    // Mounting
    ("EMBUTIR", &["EMB", "EMB."]),
    ("SOBREPOR", &["SOB", "SOB.", "EXTERNO"]),
    ("ABRACADEIRA", &["ABRAC"]),
    ("DISTRIBUICAO", &["DIST"]),
    ("ISOLANTE", &["ISOL"]),
    // Materials
    ("ALUMINIO", &["ALUM"]),
    ("GALVANIZADO", &["GALV"]),
    ("ZINCADO", &["ZINC"]),
    ("FLEXIVEL", &["FLEX"]),
    // Phases
    ("MONOFASICO", &["MONOPOLAR", "MONO"]),
    ("MONOPOLAR", &["MONOFASICO", "MONO"]),
    ("BIFASICO", &["BIPOLAR"]),
    ("BIPOLAR", &["BIFASICO"]),
    ("TRIFASICO", &["TRIPOLAR"]),
    ("TRIPOLAR", &["TRIFASICO"]),
    // Colors
    ("BRANCO", &["BC"]),
    ("PRETO", &["PT"]),
    ("VERMELHO", &["VM"]),
    ("VERDE", &["VD"]),
    ("AMARELO", &["AM"]),
    ("AZUL", &["AZ"]),
    ("CINZA", &["CZ"]),
    // Units
    ("PC", &["PECA"]),
    ("MT", &["METRO"]),
    ("MM", &["MILIMETRO"]),
    // Anchors / fixing
    ("TIJOLO", &["TIJ"]),
    ("FURADO", &["FUR"]),
];

/// The built-in dictionary as a raw table
pub fn builtin_table() -> RawSynonyms {
    BUILTIN_SYNONYMS
        .iter()
        .map(|(term, values)| {
            (
                (*term).to_string(),
                values.iter().map(|v| (*v).to_string()).collect(),
            )
        })
        .collect()
}

/// One fully built, immutable generation of the synonym index.
///
/// Readers hold an `Arc<SynonymData>` snapshot for the duration of a query,
/// so a concurrent reload can never hand them a half-built index.
#[derive(Debug, Default)]
pub struct SynonymData {
    /// Normalized raw table as authored (pre-symmetric), kept for prefix
    /// matching and for the admin dictionary listing
    raw: HashMap<String, Vec<String>>,
    /// Sorted raw keys, scanned by the prefix rule
    raw_keys: Vec<String>,
    /// term -> interchangeable terms, symmetric closure
    index: HashMap<String, HashSet<String>>,
}

impl SynonymData {
    /// Build the symmetric index from a raw table.
    ///
    /// Every `key -> value` pair inserts `value` into `index[key]` and `key`
    /// into `index[value]`, whether or not the raw table declares the
    /// reverse direction. No entry maps to itself implicitly.
    fn build(raw: &RawSynonyms) -> AppResult<Self> {
        validate_synonym_table(raw)?;

        let mut normalized_raw: HashMap<String, Vec<String>> = HashMap::new();
        let mut index: HashMap<String, HashSet<String>> = HashMap::new();

        for (key, values) in raw {
            let key = key.trim().to_uppercase();
            let values: Vec<String> = values.iter().map(|v| v.trim().to_uppercase()).collect();

            for value in &values {
                index.entry(key.clone()).or_default().insert(value.clone());
                index.entry(value.clone()).or_default().insert(key.clone());
            }

            normalized_raw.insert(key, values);
        }

        let mut raw_keys: Vec<String> = normalized_raw.keys().cloned().collect();
        raw_keys.sort();

        Ok(Self {
            raw: normalized_raw,
            raw_keys,
            index,
        })
    }

    /// Terms interchangeable with `term` (expects a normalized term)
    pub fn lookup(&self, term: &str) -> Option<&HashSet<String>> {
        self.index.get(term)
    }

    /// Raw (pre-symmetric) keys starting with `prefix`, in sorted order
    pub fn keys_with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> {
        self.raw_keys
            .iter()
            .filter(move |k| k.starts_with(prefix))
            .map(|k| k.as_str())
    }

    /// The normalized raw table
    pub fn raw_table(&self) -> &HashMap<String, Vec<String>> {
        &self.raw
    }

    /// Number of indexed terms
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

/// Shared, reloadable synonym index.
///
/// Reload replaces the whole generation behind a single pointer swap; any
/// query in flight keeps reading the generation it snapshotted.
pub struct SynonymIndex {
    data: RwLock<Arc<SynonymData>>,
}

impl SynonymIndex {
    /// Build from the built-in dictionary
    pub fn new() -> Self {
        // The built-in table is known-good, so build cannot fail here
        let data = SynonymData::build(&builtin_table()).unwrap_or_default();
        Self {
            data: RwLock::new(Arc::new(data)),
        }
    }

    /// Build from a caller-supplied raw table
    pub fn build(raw: &RawSynonyms) -> AppResult<Self> {
        let data = SynonymData::build(raw)?;
        Ok(Self {
            data: RwLock::new(Arc::new(data)),
        })
    }

    /// Take a consistent snapshot of the current generation
    pub fn snapshot(&self) -> Arc<SynonymData> {
        self.data.read().clone()
    }

    /// Replace the index wholesale. All-or-nothing: a table that fails
    /// validation leaves the previous generation in place.
    pub fn reload(&self, raw: &RawSynonyms) -> AppResult<()> {
        let fresh = Arc::new(SynonymData::build(raw)?);
        *self.data.write() = fresh;
        Ok(())
    }
}

impl Default for SynonymIndex {
    fn default() -> Self {
        Self::new()
    }
}
