// crates/tripglobe-core/src/text.rs

/// Convert a string into a folded key suitable for indexing and comparison.
///
/// This performs:
/// 1\) Transliterate Unicode → ASCII (e.g. `Côte d'Ivoire` -> `Cote d'Ivoire`)
/// 2\) Normalize to lowercase
///
/// ```rust
/// use tripglobe_core::text::fold_key;
///
/// assert_eq!(fold_key("Türkiye"), "turkiye");
/// assert_eq!(fold_key("Réunion"), "reunion");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// Parses an optional string into an `f64`, trimming whitespace first.
///
/// Returns `None` for missing input, unparsable text and non-finite values
/// (`"NaN"`, `"inf"`), since those cannot be placed on a globe.
pub fn parse_opt_f64(s: Option<&str>) -> Option<f64> {
    s.and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}
