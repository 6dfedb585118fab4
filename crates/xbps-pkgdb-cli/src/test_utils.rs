use std::env;

/// Restores the saved variables when dropped, so a failing assertion does
/// not leak overrides into the next test.
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

/// Runs `f` with each variable set to `Some(value)` or removed for `None`.
/// Callers must be `#[serial]`.
pub fn with_env<F>(vars: &[(&str, Option<&str>)], f: F)
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
        match value {
            Some(value) => env::set_var(key, value),
            None => env::remove_var(key),
        }
    }

    f();
}
