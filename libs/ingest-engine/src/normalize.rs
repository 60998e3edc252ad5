use agent_api::{Detail, DetailValue, FieldMap};

// ═══════════════════════════════════════════════════════════════
//  Value Normalizer
// ═══════════════════════════════════════════════════════════════

/// Coerce a decoded field map into a typed detail map.
///
/// For each key not listed in `passthrough`, attempt an f64 parse of
/// the string value; on success store the number, on failure keep the
/// original text. Passthrough keys (version strings and the like) are
/// always stored verbatim as text.
///
/// Pure and deterministic: identical inputs always yield an identical
/// detail map. No I/O, no side effects.
pub fn normalize(fields: &FieldMap, passthrough: &[&str]) -> Detail {
    let mut detail = Detail::with_capacity(fields.len());
    for (k, v) in fields {
        if passthrough.contains(&k.as_str()) {
            detail.insert(k.clone(), DetailValue::Text(v.clone()));
            continue;
        }
        match v.parse::<f64>() {
            Ok(fv) => detail.insert(k.clone(), DetailValue::Number(fv)),
            Err(_) => detail.insert(k.clone(), DetailValue::Text(v.clone())),
        };
    }
    detail
}
