use std::{borrow::Borrow, collections::HashMap, ffi::OsStr, hash::Hash};

pub type Result = std::result::Result<String, InterpError>;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum InterpError {
    #[error("Undefined variable '{0}' (byte offset {1})")]
    UndefinedVar(String, usize),

    #[error("Unclosed brace (byte offset {0})")]
    UnclosedBrace(usize),
}

/// Expands `#{var}` placeholders in `fmt` using `variables`.
/// `##` is an escape for a literal `#`; a lone `#` passes through unchanged.
pub fn interp<K, V>(fmt: &str, variables: &HashMap<K, V>) -> Result
where
    K: Borrow<str> + Hash + Eq,
    V: AsRef<OsStr>,
{
    let mut res = String::with_capacity(fmt.len() * 2);
    let mut chars = fmt.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c != '#' {
            res.push(c);
            continue;
        }
        match chars.peek() {
            Some(&(_, '#')) => {
                chars.next();
                res.push('#');
            }
            Some(&(_, '{')) => {
                chars.next();
                let mut var_name = String::new();
                loop {
                    match chars.next() {
                        Some((_, '}')) => break,
                        Some((_, c)) => var_name.push(c),
                        None => return Err(InterpError::UnclosedBrace(i)),
                    }
                }
                let Some(value) = variables.get(var_name.as_str()) else {
                    return Err(InterpError::UndefinedVar(var_name, i));
                };
                res += value.as_ref().to_string_lossy().as_ref();
            }
            _ => res.push('#'),
        }
    }
    Ok(res)
}
