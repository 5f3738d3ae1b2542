// src/projector/markdown.rs
//! Plain-terminal rendering for the markdown the service returns
//! (career advice and industry trends).

/// Render markdown as plain text: headings underlined, list markers as bullets,
/// emphasis markers removed, runs of blank lines collapsed.
pub fn render_markdown(source: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut previous_blank = true;

    for raw_line in source.lines() {
        let line = raw_line.trim_end();

        if line.trim().is_empty() {
            if !previous_blank {
                out.push(String::new());
            }
            previous_blank = true;
            continue;
        }
        previous_blank = false;

        if let Some((level, title)) = heading(line) {
            let title = strip_inline(title);
            let rule = if level == 1 { '=' } else { '-' };
            let width = title.chars().count();
            out.push(title);
            out.push(rule.to_string().repeat(width));
            continue;
        }

        if is_rule(line) {
            out.push("-".repeat(40));
            continue;
        }

        let indent = line.len() - line.trim_start().len();
        let body = line.trim_start();
        if let Some(item) = body
            .strip_prefix("* ")
            .or_else(|| body.strip_prefix("- "))
            .or_else(|| body.strip_prefix("+ "))
        {
            out.push(format!("{}  • {}", " ".repeat(indent), strip_inline(item)));
        } else {
            out.push(format!("{}{}", " ".repeat(indent), strip_inline(body)));
        }
    }

    while out.last().is_some_and(|l| l.is_empty()) {
        out.pop();
    }
    out.join("\n")
}

fn heading(line: &str) -> Option<(usize, &str)> {
    let trimmed = line.trim_start();
    let level = trimmed.chars().take_while(|c| *c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    trimmed[level..]
        .strip_prefix(' ')
        .map(|title| (level, title.trim().trim_end_matches('#').trim_end()))
}

fn is_rule(line: &str) -> bool {
    let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    compact.len() >= 3
        && (compact.chars().all(|c| c == '-')
            || compact.chars().all(|c| c == '*')
            || compact.chars().all(|c| c == '_'))
}

fn strip_inline(text: &str) -> String {
    text.replace("**", "").replace("__", "").replace('`', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_are_underlined() {
        let rendered = render_markdown("# Career Advice\n## Next steps");
        assert_eq!(
            rendered,
            "Career Advice\n=============\nNext steps\n----------"
        );
    }

    #[test]
    fn test_bold_and_code_markers_removed() {
        assert_eq!(
            render_markdown("**1.** Learn `tokio` and **async** Rust"),
            "1. Learn tokio and async Rust"
        );
    }

    #[test]
    fn test_list_items_become_bullets() {
        assert_eq!(
            render_markdown("- Docker\n* Kubernetes\n  - Helm"),
            "  • Docker\n  • Kubernetes\n    • Helm"
        );
    }

    #[test]
    fn test_blank_runs_collapse() {
        assert_eq!(render_markdown("\n\nA\n\n\n\nB\n\n"), "A\n\nB");
    }

    #[test]
    fn test_horizontal_rule_and_hashtag_text() {
        assert_eq!(render_markdown("---"), "-".repeat(40));
        // No space after '#': not a heading.
        assert_eq!(render_markdown("#rustlang"), "#rustlang");
    }
}
