//! Shared argument helpers for the admin commands.

use crate::core::prelude::*;

/// Splits a command line on whitespace, keeping `"quoted text"` and
/// `'quoted text'` together.
///
/// A quote only opens at the start of a token and only closes at the end
/// of one, so apostrophes inside words (`Women's`) stay literal. A quote
/// that never closes is kept as a plain character.
pub fn tokenize(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut literal = Vec::new();
    loop {
        match split_tokens(&chars, &literal) {
            Ok(tokens) => return tokens,
            Err(open_at) => literal.push(open_at),
        }
    }
}

/// One pass over `chars`; `Err` carries the index of an unclosed quote.
fn split_tokens(chars: &[char], literal: &[usize]) -> std::result::Result<Vec<String>, usize> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<(char, usize)> = None;
    let mut in_token = false;

    for (i, &c) in chars.iter().enumerate() {
        let at_token_end = chars.get(i + 1).map_or(true, |next| next.is_whitespace());
        match quote {
            Some((q, _)) if c == q && at_token_end => quote = None,
            Some(_) => current.push(c),
            None if (c == '"' || c == '\'') && !in_token && !literal.contains(&i) => {
                quote = Some((c, i));
                in_token = true;
            }
            None if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if let Some((_, open_at)) = quote {
        return Err(open_at);
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

/// Parses a 1-based position as typed by the user into a 0-based index.
pub fn parse_position(arg: &str, what: &str) -> Result<usize> {
    match arg.trim().trim_start_matches('#').parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(AppError::Validation(format!(
            "{} must be a position starting at 1, got '{}'",
            what, arg
        ))),
    }
}

/// Returns `args[index]` or a usage error.
pub fn arg<'a>(args: &[&'a str], index: usize, usage: &str) -> Result<&'a str> {
    args.get(index)
        .copied()
        .ok_or_else(|| AppError::Validation(format!("Usage: {}", usage)))
}

/// Everything from `args[index]` on, joined by single spaces.
pub fn rest(args: &[&str], index: usize, usage: &str) -> Result<String> {
    if args.len() <= index {
        return Err(AppError::Validation(format!("Usage: {}", usage)));
    }
    Ok(args[index..].join(" "))
}
