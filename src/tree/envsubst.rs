//! `${NAME}` substitution for path-contributing configuration strings.
use crate::error::ResolveError;

/// Marker cause handed to `shellexpand` when a variable is unset.
#[derive(Debug)]
struct Unset;

/// Replace `$NAME` and `${NAME}` tokens in `input` using `lookup`.
///
/// A `$` not followed by a variable name is kept verbatim.
///
/// # Errors
///
/// Returns [`ResolveError::UndefinedVariable`] for the first token whose
/// variable `lookup` does not know. Nothing is substituted in that case.
pub fn substitute<F>(input: &str, lookup: F) -> Result<String, ResolveError>
where
    F: Fn(&str) -> Option<String>,
{
    shellexpand::env_with_context(input, |name: &str| lookup(name).map(Some).ok_or(Unset))
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ResolveError::UndefinedVariable {
            var: e.var_name,
            input: input.to_string(),
        })
}

/// Look `name` up in the process environment.
#[must_use]
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}
