//! Pretty-printing of schema examples.

use crate::schema::Schema;

/// Render a human-readable example of what a conforming value looks like.
///
/// Collects the schema's flat token stream and formats it with bracket-aware
/// indentation. The output is documentation for humans, not for re-parsing.
pub fn render_example(schema: &dyn Schema) -> String {
    let mut tokens = Vec::new();
    schema.example(&mut tokens);
    render_tokens(&tokens)
}

/// Formatting rules: `{` starts its own indented line (unless it is the very
/// first token) and indents what follows; `,` inside a `{` context breaks the
/// line at the same depth; `[`, `(`, and `,` elsewhere stay inline; `}`
/// dedents and forces the next sibling onto a new line; `)` and `]` dedent
/// silently. Nesting is tracked with an explicit bracket stack since the
/// stream is already flat.
fn render_tokens(tokens: &[String]) -> String {
    let mut out = String::new();
    let mut pending_space = false;
    let mut break_line = false;
    let mut brackets: Vec<char> = Vec::new();

    for token in tokens {
        let mut break_after = false;
        if !break_line && pending_space && starts_word(token) {
            out.push(' ');
        } else if let Some(single) = lone_char(token) {
            match single {
                '{' => {
                    if !out.is_empty() {
                        out.push('\n');
                        indent(&mut out, brackets.len());
                        break_line = false;
                    }
                    break_after = true;
                    brackets.push('{');
                }
                '[' | '(' => brackets.push(single),
                ')' | ']' => {
                    brackets.pop();
                }
                '}' => {
                    brackets.pop();
                    break_line = true;
                }
                ',' => break_after = brackets.last() == Some(&'{'),
                _ => {}
            }
        }
        if break_line && !out.is_empty() {
            out.push('\n');
            indent(&mut out, brackets.len());
        }
        out.push_str(token);
        pending_space = ends_word_or_colon(token);
        break_line = break_after;
    }

    out
}

fn lone_char(token: &str) -> Option<char> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

fn starts_word(token: &str) -> bool {
    token
        .chars()
        .next()
        .is_some_and(|c| c.is_alphanumeric() || c == '_')
}

fn ends_word_or_colon(token: &str) -> bool {
    token
        .chars()
        .next_back()
        .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == ':')
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}
