//! Parsing of the container tool's `list` output

/// Whether `listing` has an entry named exactly `name`
///
/// Accepts both plain listings where the name starts the line and the
/// `ID | NAME | STATUS | IMAGE` table distrobox prints. The name must match as
/// a whole token: `ubuntu-signal` does not match `ubuntu-signal-old`.
pub fn listing_contains(listing: &str, name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    listing
        .lines()
        .filter(|line| !is_header(line))
        .any(|line| line_names(line, name))
}

/// The `ID | NAME | ...` title row of the table
fn is_header(line: &str) -> bool {
    let mut columns = line.split('|').map(str::trim);
    columns.next() == Some("ID") && columns.next() == Some("NAME")
}

fn line_names(line: &str, name: &str) -> bool {
    if let Some(rest) = line.trim_start().strip_prefix(name) {
        if rest.is_empty() || rest.starts_with(|c: char| c.is_whitespace() || c == '|') {
            return true;
        }
    }
    line.split('|').nth(1).is_some_and(|col| col.trim() == name)
}
