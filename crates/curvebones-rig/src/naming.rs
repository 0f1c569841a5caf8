//! Host-style unique naming.

/// Returns `base` if it is free, otherwise the first free `base.NNN`.
///
/// Suffixes start at `.001` and are zero-padded to three digits, matching the
/// convention DCC hosts use when two data-blocks want the same name.
pub fn unique_name(base: &str, mut is_taken: impl FnMut(&str) -> bool) -> String {
    if !is_taken(base) {
        return base.to_string();
    }

    let mut n: u32 = 1;
    loop {
        let candidate = format!("{}.{:03}", base, n);
        if !is_taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
