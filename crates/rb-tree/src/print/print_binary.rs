use super::types::PrintChild;

/// Renders the left and right children of a binary node, one per line,
/// each prefixed by `tab` and an arrow. Absent children are skipped.
pub fn print_binary(tab: Option<&str>, children: [Option<&PrintChild<'_>>; 2]) -> String {
    let tab = tab.unwrap_or("");
    let [left, right] = children;

    let mut out = String::new();
    for (arrow, child) in [("← ", left), ("→ ", right)] {
        let Some(child) = child else {
            continue;
        };
        let child_tab = format!("{tab}  ");
        out.push('\n');
        out.push_str(tab);
        out.push_str(arrow);
        out.push_str(&child(&child_tab));
    }

    out
}
