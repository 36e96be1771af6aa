/// Lexically normalizes a `/`-separated path.
///
/// Backslashes count as separators, repeated separators and `.` segments are
/// dropped and `..` removes the preceding segment. A leading `/` is kept and
/// `..` cannot climb above it. Relative paths keep leading `..` segments. The
/// empty path normalizes to `.`.
///
/// # Example
/// ```
/// use docview_core::result::normalize_path;
/// assert_eq!(normalize_path("cases//invoices/./a.pdf"), "cases/invoices/a.pdf");
/// assert_eq!(normalize_path(r"cases\invoices\..\a.pdf"), "cases/a.pdf");
/// ```
pub fn normalize_path(path: &str) -> String {
    let path = path.replace('\\', "/");
    let absolute = path.starts_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(last) if *last != ".." => {
                    segments.pop();
                }
                _ if absolute => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    match (absolute, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// Key under which the extraction result of `{folder}/{file}.pdf` is stored.
///
/// # Example
/// ```
/// use docview_core::result::document_key;
/// assert_eq!(
///     document_key("pdpvp_textract_test_cases/", "invoices", "a"),
///     "pdpvp_textract_test_cases/invoices/a.pdf"
/// );
/// ```
pub fn document_key(prefix: &str, folder: &str, file: &str) -> String {
    normalize_path(&format!("{prefix}/{folder}/{file}.pdf"))
}
