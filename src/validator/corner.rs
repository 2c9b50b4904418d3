use crate::compiler::ParameterOption;
use ahash::AHashSet;

/// Reduces an option list to the values most likely to break an expression:
/// the greatest and smallest integers, a literal `0`, every non-numeric value
/// and every direct roll. The result keeps option order and holds each option
/// at most once.
pub(super) fn corner_cases(options: &[ParameterOption]) -> Vec<&ParameterOption> {
    let numeric: Vec<(i64, &ParameterOption)> = options
        .iter()
        .filter_map(|o| o.numeric_value().map(|n| (n, o)))
        .collect();

    let mut keep: AHashSet<&str> = AHashSet::new();
    if let Some((_, max)) = numeric.iter().max_by_key(|(n, _)| *n) {
        keep.insert(max.id.as_str());
    }
    if let Some((_, min)) = numeric.iter().min_by_key(|(n, _)| *n) {
        keep.insert(min.id.as_str());
    }
    for option in options {
        let is_zero = option.value.trim() == "0";
        if is_zero || option.numeric_value().is_none() || option.direct_roll {
            keep.insert(option.id.as_str());
        }
    }

    options
        .iter()
        .filter(|o| keep.contains(o.id.as_str()))
        .collect()
}
