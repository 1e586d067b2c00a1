/// Runs `f` with `set` applied and `unset` removed from the process
/// environment, restoring the previous values afterwards.
#[cfg(test)]
pub fn with_env<F>(set: Vec<(&str, &str)>, unset: &[&str], f: F)
where
    F: FnOnce(),
{
    let old_vars: Vec<_> = set
        .iter()
        .map(|(k, _)| *k)
        .chain(unset.iter().copied())
        .map(|k| (k, std::env::var(k).ok()))
        .collect();

    for (key, value) in &set {
        std::env::set_var(key, value);
    }
    for key in unset {
        std::env::remove_var(key);
    }

    f();

    for (key, old_value) in old_vars {
        match old_value {
            Some(v) => std::env::set_var(key, v),
            None => std::env::remove_var(key),
        }
    }
}
