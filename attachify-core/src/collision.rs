//! Collision-safe name assignment within one record.

use std::collections::HashSet;

/// Reserve a unique file name for `base` + `ext` within the current
/// record's resolution pass.
///
/// If the candidate is free it is taken as-is; otherwise `_1`, `_2`, ...
/// are probed between base and extension until a free name is found. The
/// `used` set is scoped to a single record's attachment list and must be
/// reset between records; collisions are never resolved across records.
pub fn ensure_unique(base: &str, ext: &str, used: &mut HashSet<String>) -> String {
    let candidate = format!("{base}{ext}");
    if used.insert(candidate.clone()) {
        return candidate;
    }

    let mut suffix = 1u64;
    loop {
        let probe = format!("{base}_{suffix}{ext}");
        if used.insert(probe.clone()) {
            return probe;
        }
        suffix += 1;
    }
}
