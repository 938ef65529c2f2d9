use std::env;

/// Restores the previous values of the variables it overrode when dropped,
/// including when the test body panics.
struct EnvGuard {
    saved: Vec<(String, Option<String>)>,
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in self.saved.drain(..) {
            match value {
                Some(value) => env::set_var(&key, value),
                None => env::remove_var(&key),
            }
        }
    }
}

/// Runs `f` with `vars` set. Callers must be `#[serial]`.
pub fn with_env<F>(vars: Vec<(&str, &str)>, f: F)
where
    F: FnOnce(),
{
    let _guard = EnvGuard {
        saved: vars
            .iter()
            .map(|(key, _)| (key.to_string(), env::var(key).ok()))
            .collect(),
    };

    for (key, value) in vars {
        env::set_var(key, value);
    }

    f();
}
