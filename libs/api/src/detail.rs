use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ════════════════════════════════════════════════════════════════
//  Detail Values
// ════════════════════════════════════════════════════════════════

/// Tagged value produced by numeric coercion of a field map.
///
/// `Number` for values that parse as f64, `Text` for everything else
/// (and for designated passthrough keys, which are never coerced),
/// `List` for administrative address lists merged in by the heartbeat
/// updater.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DetailValue {
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl DetailValue {
    /// Numeric view, `None` for Text/List.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            DetailValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Text view, `None` for Number/List.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            DetailValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<f64> for DetailValue {
    fn from(n: f64) -> Self {
        DetailValue::Number(n)
    }
}

impl From<String> for DetailValue {
    fn from(s: String) -> Self {
        DetailValue::Text(s)
    }
}

impl From<&str> for DetailValue {
    fn from(s: &str) -> Self {
        DetailValue::Text(s.to_string())
    }
}

impl From<Vec<String>> for DetailValue {
    fn from(v: Vec<String>) -> Self {
        DetailValue::List(v)
    }
}

/// Field map after per-key numeric coercion plus administrative fields.
pub type Detail = HashMap<String, DetailValue>;
