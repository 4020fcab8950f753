//! Path expansion for configuration values.

/// Expand `~` and `$VAR` / `${VAR}` references.
///
/// Unknown variables leave the input untouched apart from `~` expansion.
pub fn expand_path(input: &str) -> String {
    match shellexpand::full(input) {
        Ok(expanded) => expanded.into_owned(),
        Err(_) => shellexpand::tilde(input).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_path_is_unchanged() {
        assert_eq!(expand_path("/etc/hosts"), "/etc/hosts");
    }

    #[test]
    fn tilde_is_expanded() {
        if let Some(home) = dirs::home_dir() {
            let expanded = expand_path("~/.ssh/id_rsa");
            assert!(expanded.starts_with(&*home.to_string_lossy()));
            assert!(expanded.ends_with(".ssh/id_rsa"));
        }
    }

    #[test]
    fn unknown_variable_keeps_input() {
        let input = "$FILECHOOSER_TEST_SURELY_UNSET_VAR/key";
        assert_eq!(expand_path(input), input);
    }
}
