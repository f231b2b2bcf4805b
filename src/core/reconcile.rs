use super::{declarations::DeclaredVariables, scanner::FoundVariables};

/// Names in `found` that `declared` has no key for, in scan order.
pub fn find_missing(declared: &DeclaredVariables, found: &FoundVariables) -> Vec<String> {
    found
        .iter()
        .filter(|name| !declared.contains(name))
        .map(str::to_string)
        .collect()
}
