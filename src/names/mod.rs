//! Name resolution: from raw metadata names to display names.
//!
//! Metadata names carry arity markers (``List`1``), nesting separators (`Outer/Inner`) and
//! fully qualified generic arguments (``Dictionary`2<System.String,System.Int32>``). This
//! module turns them into the names a declaration shows:
//!
//! | Raw name                                                     | Display name                   |
//! |--------------------------------------------------------------|--------------------------------|
//! | `System.Int32`                                               | `int`                          |
//! | `System.Int32[]`                                             | `int[]`                        |
//! | ``System.Collections.Generic.Dictionary`2<System.String,T>`` | `Dictionary<string, T>`        |
//! | ``SchoolSys.DataTree`1/GatherHash`1<TKey,T>``                | `GatherHash<T>`                |
//! | ``SchoolSys.GuestMember`1`` (open, no arguments)             | ``GuestMember`1``              |
//!
//! Generic argument lists are parsed as balanced bracket groups and localized recursively.
//! Keyword aliasing ([`primitives`]) applies to leaf names only, so a generic container is never
//! aliased and no substring of a longer name is rewritten.

/// Built-in type keywords
pub mod primitives;

pub use primitives::{keyword_for, PrimitiveKind};

/// The four names produced for one type reference
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedName {
    /// The provider's raw, arity-suffixed name
    pub identity_key: String,
    /// The display name (``Dictionary<string, T>``)
    pub display_name: String,
    /// `namespace.display_name`, or just the display name in the global namespace
    pub full_display_name: String,
    /// The namespace
    pub namespace: String,
}

/// Resolve a raw type name into its identity key and display names
///
/// When `generic_args` is non-empty and the raw name does not already carry an argument
/// list, the arguments are appended before localization (a generic definition named by its
/// own formal parameters).
///
/// ## Arguments
/// * 'raw_name'     - The provider's raw full name
/// * 'namespace'    - The provider's namespace for the type
/// * 'generic_args' - Argument names to apply to an open generic name
pub fn resolve(raw_name: &str, namespace: &str, generic_args: &[String]) -> ResolvedName {
    let explicit = if generic_args.is_empty() || raw_name.contains('<') {
        raw_name.to_string()
    } else {
        format!("{}<{}>", raw_name, generic_args.join(","))
    };

    let display_name = localize(&explicit);
    let full_display_name = if namespace.is_empty() {
        display_name.clone()
    } else {
        format!("{}.{}", namespace, display_name)
    };

    ResolvedName {
        identity_key: raw_name.to_string(),
        display_name,
        full_display_name,
        namespace: namespace.to_string(),
    }
}

/// Localize a raw type name into its display form
///
/// ## Arguments
/// * 'raw' - The raw name, with or without a generic argument list
pub fn localize(raw: &str) -> String {
    let raw = raw.trim();

    let Some(open) = raw.find('<') else {
        let (element, suffix) = split_suffix(raw);
        let display = match keyword_for(element) {
            Some(keyword) => keyword.to_string(),
            None => strip_namespace(element).to_string(),
        };
        return format!("{}{}", display, suffix);
    };

    let close = matching_close(raw, open);
    let container = &raw[..open];
    let args = split_generic_args(raw.get(open + 1..close).unwrap_or_default());
    let suffix = raw.get(close + 1..).unwrap_or_default();

    let own = match own_arity(container) {
        Some(arity) if arity <= args.len() => &args[args.len() - arity..],
        _ => &args[..],
    };
    let base = strip_arity(strip_namespace(container));

    if own.is_empty() {
        return format!("{}{}", base, suffix);
    }

    let rendered: Vec<String> = own.iter().map(|arg| localize(arg)).collect();
    format!("{}<{}>{}", base, rendered.join(", "), suffix)
}

/// Split a generic argument list on its top-level commas
///
/// Commas nested inside `<...>` or `[...]` (multi-dimensional arrays) do not split.
///
/// ## Arguments
/// * 'list' - The text between the outermost angle brackets
pub fn split_generic_args(list: &str) -> Vec<&str> {
    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (index, ch) in list.char_indices() {
        match ch {
            '<' | '[' => depth += 1,
            '>' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                args.push(list[start..index].trim());
                start = index + 1;
            }
            _ => {}
        }
    }

    let last = list[start..].trim();
    if !last.is_empty() || !args.is_empty() {
        args.push(last);
    }
    args
}

/// Turn a display-form generic name back into its arity-suffixed form
///
/// `Dictionary<K, V>` becomes ``Dictionary`2``; names without an argument list are returned
/// unchanged. Only top-level commas are counted.
///
/// ## Arguments
/// * 'name' - The display name
pub fn unlocalize(name: &str) -> String {
    let Some(open) = name.find('<') else {
        return name.to_string();
    };
    let close = matching_close(name, open);
    let count = split_generic_args(name.get(open + 1..close).unwrap_or_default()).len();
    format!("{}`{}", &name[..open], count.max(1))
}

/// Remove the namespace and enclosing-type path from a name without generic arguments
///
/// ## Arguments
/// * 'name' - e.g. ``SchoolSys.DataTree`1/GatherHash`1``
pub fn strip_namespace(name: &str) -> &str {
    let innermost = name.rsplit('/').next().unwrap_or(name);
    innermost.rsplit('.').next().unwrap_or(innermost)
}

/// Remove arity markers (`` `N ``) from a name
///
/// ## Arguments
/// * 'name' - e.g. ``GuestMember`1``
pub fn strip_arity(name: &str) -> String {
    let mut stripped = String::with_capacity(name.len());
    let mut chars = name.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '`' && chars.peek().is_some_and(char::is_ascii_digit) {
            while chars.peek().is_some_and(char::is_ascii_digit) {
                chars.next();
            }
        } else {
            stripped.push(ch);
        }
    }
    stripped
}

/// Remove a trailing generic argument list (`GuestMember<T>` becomes `GuestMember`)
///
/// ## Arguments
/// * 'display' - A display name
pub fn strip_generic_suffix(display: &str) -> &str {
    display.find('<').map_or(display, |open| &display[..open])
}

/// Number of generic arguments declared by the innermost segment of a container name.
///
/// `None` when no segment carries a marker (the provider did not use arity markers).
fn own_arity(container: &str) -> Option<usize> {
    if !container.contains('`') {
        return None;
    }

    let innermost = container.rsplit('/').next().unwrap_or(container);
    match innermost.rfind('`') {
        Some(tick) => innermost[tick + 1..].parse().ok(),
        None => Some(0),
    }
}

/// Index of the `>` closing the `<` at `open`, or the end of the string if unbalanced
fn matching_close(name: &str, open: usize) -> usize {
    let mut depth = 0usize;
    for (index, ch) in name.char_indices().skip_while(|(index, _)| *index < open) {
        match ch {
            '<' => depth += 1,
            '>' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return index;
                }
            }
            _ => {}
        }
    }
    name.len()
}

/// Split trailing array, pointer and reference decorations off a leaf name
fn split_suffix(name: &str) -> (&str, &str) {
    let element_end = name
        .trim_end_matches(|ch: char| matches!(ch, '[' | ']' | ',' | '*' | '&'))
        .len();
    name.split_at(element_end)
}
