//! MSBuild escaping and path conversion.

use std::path::MAIN_SEPARATOR;

/// Characters MSBuild escapes as `%XX`.
const SPECIAL: &[char] = &['%', '*', '?', '@', '$', '(', ')', ';', '\''];

/// Decode `%XX` escapes. Malformed escapes are kept literally.
pub fn unescape(raw: &str) -> String {
    if !raw.contains('%') {
        return raw.to_string();
    }
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let hex = std::str::from_utf8(&bytes[i + 1..i + 3])
                .ok()
                .and_then(|h| u8::from_str_radix(h, 16).ok());
            if let Some(byte) = hex {
                out.push(byte);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if SPECIAL.contains(&c) {
            out.push_str(&format!("%{:02x}", c as u32));
        } else {
            out.push(c);
        }
    }
    out
}

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

fn has_drive_prefix(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

fn is_rooted(path: &str) -> bool {
    path.starts_with(is_separator) || has_drive_prefix(path)
}

/// Convert an unescaped MSBuild path to a host path, resolved against `base_dir`.
///
/// Both `\` and `/` act as separators. Returns `None` for paths that cannot
/// name a single location (wildcards, NUL).
pub fn from_msbuild_path(path: &str, base_dir: &str) -> Option<String> {
    if path.contains(['*', '?', '\0']) {
        return None;
    }
    if is_rooted(path) {
        return Some(normalize_path(path));
    }
    if base_dir.is_empty() {
        return Some(normalize_path(path));
    }
    let mut joined = String::with_capacity(base_dir.len() + path.len() + 1);
    joined.push_str(base_dir);
    joined.push(MAIN_SEPARATOR);
    joined.push_str(path);
    Some(normalize_path(&joined))
}

/// Lexically normalise a path to host separators.
///
/// Collapses repeated separators, drops `.` segments and folds `..` into the
/// preceding segment. A trailing separator is kept.
pub fn normalize_path(path: &str) -> String {
    let (prefix, rest) = if has_drive_prefix(path) {
        path.split_at(2)
    } else {
        ("", path)
    };
    let absolute = rest.starts_with(is_separator);
    let trailing = rest.len() > 1 && rest.ends_with(is_separator);

    let mut segments: Vec<&str> = Vec::new();
    for segment in rest.split(is_separator) {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if absolute => {}
                _ => segments.push(".."),
            },
            _ => segments.push(segment),
        }
    }

    let sep = MAIN_SEPARATOR.to_string();
    let mut out = String::with_capacity(path.len());
    out.push_str(prefix);
    if absolute {
        out.push(MAIN_SEPARATOR);
    }
    out.push_str(&segments.join(&sep));
    if trailing && !segments.is_empty() {
        out.push(MAIN_SEPARATOR);
    }
    if out.is_empty() {
        out.push('.');
    }
    out
}
