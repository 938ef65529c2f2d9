use std::{env, iter::Peekable, path::PathBuf, str::Chars};

use crate::error::{ConfigError, Result};

pub fn home_dir() -> PathBuf {
    env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
}

pub fn xdg_config_home() -> PathBuf {
    env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Resolves a path that may start with `~` and contain `$VAR` or `${VAR}`
/// references. Relative results are joined onto the current directory.
pub fn resolve_path(path: &str) -> Result<PathBuf> {
    let path = path.trim();
    if path.is_empty() {
        return Err(ConfigError::EmptyPath);
    }

    let path_buf = PathBuf::from(expand_variables(path)?);
    if path_buf.is_absolute() {
        Ok(path_buf)
    } else {
        Ok(env::current_dir()?.join(path_buf))
    }
}

fn expand_variables(path: &str) -> Result<String> {
    let mut result = String::with_capacity(path.len());
    let mut chars = path.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '$' if chars.peek() == Some(&'{') => {
                chars.next();
                let mut var_name = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    var_name.push(c);
                }
                if !closed {
                    return Err(ConfigError::UnclosedVariable(format!("${{{var_name}")));
                }
                result.push_str(&env_var(&var_name, path)?);
            }
            '$' => {
                let var_name = consume_var_name(&mut chars);
                if var_name.is_empty() {
                    result.push('$');
                } else {
                    result.push_str(&env_var(&var_name, path)?);
                }
            }
            '~' if result.is_empty() => result.push_str(&home_dir().to_string_lossy()),
            _ => result.push(c),
        }
    }

    Ok(result)
}

fn consume_var_name(chars: &mut Peekable<Chars>) -> String {
    let mut var_name = String::new();
    while let Some(&c) = chars.peek() {
        if c.is_alphanumeric() || c == '_' {
            var_name.push(c);
            chars.next();
        } else {
            break;
        }
    }
    var_name
}

fn env_var(var_name: &str, input: &str) -> Result<String> {
    match var_name {
        "HOME" => Ok(home_dir().to_string_lossy().into_owned()),
        "XDG_CONFIG_HOME" => Ok(xdg_config_home().to_string_lossy().into_owned()),
        _ => {
            env::var(var_name).map_err(|_| {
                ConfigError::MissingEnvVar {
                    var: var_name.into(),
                    input: input.into(),
                }
            })
        }
    }
}
