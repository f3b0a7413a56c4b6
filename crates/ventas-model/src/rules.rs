//! Cleaning rules for the sales transaction dataset.
//!
//! Every table the pipeline consults (sentinel tokens, date formats, synonym
//! maps, ...) lives here instead of inline in the stages. The defaults
//! reproduce the rules of the known export; a TOML file can override any
//! subset of them:
//!
//! ```toml
//! [coercion.quantity_words]
//! uno = "1"
//! dos = "2"
//! tres = "3"
//!
//! [categorical.ciudad]
//! "málaga" = "malaga"
//! "sevila" = "sevilla"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::columns::{
    CANTIDAD, CIUDAD, DESCRIPCION_PRODUCTO, FECHA, ID_TRANSACCION, NOMBRE_CLIENTE, NOTAS,
    PRECIO_UNITARIO, PRODUCTO_ID, REGION,
};
use crate::error::{ModelError, Result};

/// All rules consulted by the cleaning pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningRules {
    pub missing: MissingValueRules,
    pub text: TextRules,
    pub coercion: CoercionRules,
    pub filter: FilterRules,
    /// Synonym maps keyed by column, then by sanitized (lowercase) raw value.
    pub categorical: BTreeMap<String, BTreeMap<String, String>>,
    pub dedupe: DedupeRules,
    pub presentation: PresentationRules,
    pub finalize: FinalizeRules,
}

impl CleaningRules {
    /// Load rules from a TOML file. Keys absent from the file keep their defaults.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ModelError::io(path, e))?;
        toml::from_str(&contents).map_err(|e| ModelError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Render the rules as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Synonym map for a categorical column, if one is configured.
    pub fn synonyms_for(&self, column: &str) -> Option<&BTreeMap<String, String>> {
        self.categorical.get(column)
    }
}

/// Sentinel tokens and per-column fill values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissingValueRules {
    /// Tokens (compared trimmed and case-insensitively) that denote an absent value.
    pub sentinels: Vec<String>,
    /// Literal default written into a column wherever it is missing.
    pub fill: BTreeMap<String, String>,
}

impl Default for MissingValueRules {
    fn default() -> Self {
        Self {
            sentinels: ["n/a", "na", "null", "", "--"]
                .into_iter()
                .map(String::from)
                .collect(),
            fill: BTreeMap::from([(NOTAS.to_string(), "sin notas".to_string())]),
        }
    }
}

impl MissingValueRules {
    /// Returns true when `value` is one of the sentinel tokens.
    pub fn is_sentinel(&self, value: &str) -> bool {
        let key = value.trim().to_lowercase();
        self.sentinels
            .iter()
            .any(|sentinel| sentinel.trim().to_lowercase() == key)
    }
}

/// Free-text columns that get trimmed, lowercased and whitespace-collapsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextRules {
    pub columns: Vec<String>,
}

impl Default for TextRules {
    fn default() -> Self {
        Self {
            columns: [
                NOMBRE_CLIENTE,
                PRODUCTO_ID,
                DESCRIPCION_PRODUCTO,
                CIUDAD,
                REGION,
                NOTAS,
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

/// Type coercion settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoercionRules {
    pub date_column: String,
    /// chrono `strftime` patterns, tried in order; the first match wins.
    pub date_formats: Vec<String>,
    pub quantity_column: String,
    pub price_column: String,
    /// Characters removed from prices before decimal parsing.
    pub price_strip_chars: String,
    /// Spelled-out quantities mapped to digits before numeric parsing.
    pub quantity_words: BTreeMap<String, String>,
}

impl Default for CoercionRules {
    fn default() -> Self {
        Self {
            date_column: FECHA.to_string(),
            date_formats: ["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d", "%b %d, %y", "%b %d %Y"]
                .into_iter()
                .map(String::from)
                .collect(),
            quantity_column: CANTIDAD.to_string(),
            price_column: PRECIO_UNITARIO.to_string(),
            price_strip_chars: "$€£, ".to_string(),
            quantity_words: BTreeMap::from([
                ("uno".to_string(), "1".to_string()),
                ("dos".to_string(), "2".to_string()),
            ]),
        }
    }
}

/// Fields whose absence invalidates a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterRules {
    pub critical_fields: Vec<String>,
}

impl Default for FilterRules {
    fn default() -> Self {
        Self {
            critical_fields: [FECHA, CANTIDAD, PRECIO_UNITARIO, ID_TRANSACCION]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Business key used for deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupeRules {
    /// Key columns. When any is absent from the table the whole row is the key.
    pub key: Vec<String>,
}

impl Default for DedupeRules {
    fn default() -> Self {
        Self {
            key: vec![ID_TRANSACCION.to_string()],
        }
    }
}

/// Display formatting applied just before output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationRules {
    pub title_case_columns: Vec<String>,
    /// Display value substituted for missing cells, per column.
    pub missing_display: BTreeMap<String, String>,
}

impl Default for PresentationRules {
    fn default() -> Self {
        Self {
            title_case_columns: [NOMBRE_CLIENTE, DESCRIPCION_PRODUCTO, CIUDAD, REGION, NOTAS]
                .into_iter()
                .map(String::from)
                .collect(),
            missing_display: BTreeMap::from([(NOTAS.to_string(), "Sin Notas".to_string())]),
        }
    }
}

/// Final ordering before handoff to the sinks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinalizeRules {
    pub sort_column: String,
}

impl Default for FinalizeRules {
    fn default() -> Self {
        Self {
            sort_column: FECHA.to_string(),
        }
    }
}

impl Default for CleaningRules {
    fn default() -> Self {
        Self {
            missing: MissingValueRules::default(),
            text: TextRules::default(),
            coercion: CoercionRules::default(),
            filter: FilterRules::default(),
            categorical: default_categorical(),
            dedupe: DedupeRules::default(),
            presentation: PresentationRules::default(),
            finalize: FinalizeRules::default(),
        }
    }
}

fn default_categorical() -> BTreeMap<String, BTreeMap<String, String>> {
    let products = BTreeMap::from([
        ("laptop model x".to_string(), "laptop modelo x".to_string()),
        (
            "teclado inalambrico".to_string(),
            "teclado inalámbrico".to_string(),
        ),
        ("monitor 24\"".to_string(), "monitor 24 pulgadas".to_string()),
    ]);
    let cities = BTreeMap::from([("málaga".to_string(), "malaga".to_string())]);
    BTreeMap::from([
        (DESCRIPCION_PRODUCTO.to_string(), products),
        (CIUDAD.to_string(), cities),
    ])
}
