//! Document path arithmetic
//!
//! All document locations are relative, `/`-separated paths. Backslashes in
//! source file names are normalized before any other processing.

/// Replace platform separators with `/`
pub fn standardize(path: &str) -> String {
    path.replace('\\', "/")
}

/// Directory part of a path; `""` for a bare file name
pub fn dirname(path: &str) -> &str {
    path.rfind('/').map_or("", |i| &path[..i])
}

/// Last path segment
pub fn basename(path: &str) -> &str {
    path.rfind('/').map_or(path, |i| &path[i + 1..])
}

/// Last path segment without its final extension
///
/// A leading dot does not start an extension, so `.hidden` stays as is.
pub fn file_stem(path: &str) -> &str {
    let base = basename(path);
    match base.rfind('.') {
        Some(0) | None => base,
        Some(i) => &base[..i],
    }
}

/// Join segments with `/`, skipping empty ones
pub fn join<'a>(segments: impl IntoIterator<Item = &'a str>) -> String {
    segments
        .into_iter()
        .filter(|s| !s.is_empty() && *s != ".")
        .collect::<Vec<_>>()
        .join("/")
}

/// Location of an entry document: the source file's stem plus `.{extension}`
pub fn entry_document_path(file_name: &str, extension: &str) -> Option<String> {
    let stem = file_stem(&standardize(file_name)).to_string();
    if stem.is_empty() {
        return None;
    }
    Some(format!("{}.{}", stem, extension))
}

/// Location of a member split out of the document at `parent`:
/// `dirname(parent)/stem(parent)/name.ext`, lower-cased
pub fn member_document_path(parent: &str, name: &str, extension: &str) -> String {
    let file = format!("{}.{}", name, extension);
    join([dirname(parent), file_stem(parent), file.as_str()]).to_lowercase()
}

/// Relative link from the directory `from_dir` to `target`
///
/// A `#anchor` suffix on the target is carried over unchanged.
pub fn relative(from_dir: &str, target: &str) -> String {
    let (target_path, anchor) = match target.split_once('#') {
        Some((p, a)) => (p, Some(a)),
        None => (target, None),
    };

    let from: Vec<&str> = segments(from_dir).collect();
    let to: Vec<&str> = segments(target_path).collect();
    let common = from
        .iter()
        .zip(&to)
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = vec![".."; from.len() - common];
    parts.extend(&to[common..]);

    let mut link = parts.join("/");
    if let Some(anchor) = anchor {
        link.push('#');
        link.push_str(anchor);
    }
    link
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty() && *s != ".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_parts() {
        assert_eq!(dirname("baz/qux.md"), "baz");
        assert_eq!(dirname("index.md"), "");
        assert_eq!(basename("a/b/c.ts"), "c.ts");
        assert_eq!(file_stem("src/index.d.ts"), "index.d");
        assert_eq!(file_stem(".hidden"), ".hidden");
        assert_eq!(file_stem("Makefile"), "Makefile");
    }

    #[test]
    fn test_entry_document_path() {
        assert_eq!(
            entry_document_path("src/index.ts", "md").as_deref(),
            Some("index.md")
        );
        assert_eq!(
            entry_document_path("C:\\project\\src\\Api.ts", "md").as_deref(),
            Some("Api.md")
        );
        assert_eq!(entry_document_path("", "md"), None);
        assert_eq!(entry_document_path("src/", "md"), None);
    }

    #[test]
    fn test_member_document_path() {
        assert_eq!(member_document_path("baz.md", "qux", "md"), "baz/qux.md");
        assert_eq!(
            member_document_path("index/Baz.md", "Qux", "md"),
            "index/baz/qux.md"
        );
    }

    #[test]
    fn test_relative() {
        assert_eq!(relative("", "baz/qux.md#qux"), "baz/qux.md#qux");
        assert_eq!(relative("baz", "baz/qux.md#qux"), "qux.md#qux");
        assert_eq!(relative("baz", "index.md#foo"), "../index.md#foo");
        assert_eq!(relative("a/b", "a/c/d.md"), "../c/d.md");
        assert_eq!(relative("", "index.md"), "index.md");
    }
}
