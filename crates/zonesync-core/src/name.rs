//! Zone-relative and absolute record names
//!
//! Generic records always carry names relative to their zone, with `@`
//! standing for the zone apex. Providers that store fully-qualified names
//! convert with [`absolute_name`] on the way out and [`relative_name`] on
//! the way in.

/// The relative name of the zone apex
pub const APEX: &str = "@";

/// Strip a single trailing dot, if any
pub fn trim_dot(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}

/// Convert a fully-qualified (or already relative) name into a name
/// relative to `zone`.
///
/// Suffix matching is label-aware and case-insensitive: `badexample.com` is
/// not inside `example.com`. Names outside the zone are returned unchanged
/// (minus a trailing dot). The apex and the empty name both map to `@`.
pub fn relative_name(fqdn: &str, zone: &str) -> String {
    let name = trim_dot(fqdn);
    let zone = trim_dot(zone);

    if name.is_empty() || name == APEX || name.eq_ignore_ascii_case(zone) {
        return APEX.to_string();
    }
    if zone.is_empty() || name.len() <= zone.len() + 1 {
        return name.to_string();
    }

    let split = name.len() - zone.len();
    match (name.get(..split - 1), name.get(split - 1..split), name.get(split..)) {
        (Some(head), Some("."), Some(tail)) if tail.eq_ignore_ascii_case(zone) => {
            head.to_string()
        }
        _ => name.to_string(),
    }
}

/// Convert a zone-relative name into its fully-qualified form inside `zone`.
///
/// `@` and the empty name map to the zone itself. A name ending in a dot is
/// treated as already fully-qualified, as is a name that already ends with
/// the zone. The result never carries a trailing dot.
pub fn absolute_name(name: &str, zone: &str) -> String {
    let zone = trim_dot(zone);

    if name.is_empty() || name == APEX {
        return zone.to_string();
    }
    if let Some(fqdn) = name.strip_suffix('.') {
        return fqdn.to_string();
    }
    if zone.is_empty() || relative_name(name, zone) != name {
        return name.to_string();
    }
    format!("{}.{}", name, zone)
}

/// Whether `name` (relative or absolute) denotes the apex of `zone`
pub fn is_apex(name: &str, zone: &str) -> bool {
    relative_name(name, zone) == APEX
}
