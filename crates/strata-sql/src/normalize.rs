/// Canonicalizes rendered SQL so statements from different flavors, or
/// baselines written by hand, compare equal.
///
/// * identifier delimiters (`` ` ``, `[]`) become `"`
/// * placeholders (`?`, `?1`, `$1`, `@p0`) become `$n`, numbered in order of
///   appearance
/// * line endings become `\n`, trailing whitespace is removed, and runs of
///   spaces after the indentation collapse to one
///
/// Delimiters and placeholders inside string literals are left alone.
pub fn normalize(sql: &str) -> String {
    let canonical = canonicalize_tokens(&sql.replace("\r\n", "\n"));

    let lines: Vec<_> = canonical
        .lines()
        .map(collapse_spaces)
        .skip_while(|line| line.is_empty())
        .collect();

    let end = lines
        .iter()
        .rposition(|line| !line.is_empty())
        .map_or(0, |index| index + 1);

    lines[..end].join("\n")
}

fn canonicalize_tokens(sql: &str) -> String {
    let mut ret = String::with_capacity(sql.len());
    let mut chars = sql.chars().peekable();
    let mut placeholders = 0;

    while let Some(c) = chars.next() {
        match c {
            '\'' => {
                ret.push(c);
                // `''` inside a literal is an escaped quote; the loop sees it
                // as the end of one literal and the start of the next.
                for c in chars.by_ref() {
                    ret.push(c);
                    if c == '\'' {
                        break;
                    }
                }
            }
            '"' | '`' | '[' => {
                let close = match c {
                    '[' => ']',
                    c => c,
                };

                ret.push('"');
                while let Some(c) = chars.next() {
                    if c == close {
                        if chars.peek() == Some(&close) {
                            chars.next();
                        } else {
                            break;
                        }
                    }
                    if c == '"' {
                        ret.push('"');
                    }
                    ret.push(c);
                }
                ret.push('"');
            }
            '?' | '$' | '@' => {
                let mut digits = String::new();

                if c == '@' {
                    while let Some(&next) = chars.peek() {
                        if next.is_ascii_alphanumeric() || next == '_' {
                            digits.push(next);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                } else {
                    while let Some(&next) = chars.peek() {
                        if next.is_ascii_digit() {
                            digits.push(next);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                }

                if c != '?' && digits.is_empty() {
                    ret.push(c);
                    continue;
                }

                placeholders += 1;
                ret.push('$');
                ret.push_str(&placeholders.to_string());
            }
            c => ret.push(c),
        }
    }

    ret
}

fn collapse_spaces(line: &str) -> String {
    let line = line.trim_end();
    let body = line.trim_start();
    let mut ret = line[..line.len() - body.len()].to_string();

    let mut prev_space = false;
    for c in body.chars() {
        if c == ' ' || c == '\t' {
            if !prev_space {
                ret.push(' ');
            }
            prev_space = true;
        } else {
            ret.push(c);
            prev_space = false;
        }
    }

    ret
}
