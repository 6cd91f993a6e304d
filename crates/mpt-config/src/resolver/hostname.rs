//! Host name of the machine running the process

use std::env;

/// Host name as reported by the operating system
///
/// Falls back to the `HOSTNAME`/`COMPUTERNAME` variables, then `localhost`.
pub fn system_hostname() -> String {
    let non_empty = |name: String| (!name.is_empty()).then_some(name);
    gethostname::gethostname()
        .into_string()
        .ok()
        .and_then(non_empty)
        .or_else(|| env::var("HOSTNAME").ok().and_then(non_empty))
        .or_else(|| env::var("COMPUTERNAME").ok().and_then(non_empty))
        .unwrap_or_else(|| "localhost".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hostname_is_non_empty() {
        let name = system_hostname();
        assert!(!name.is_empty());
        assert!(!name.contains('\0'));
    }

    #[test]
    fn test_hostname_matches_os_when_available() {
        if let Ok(os_name) = gethostname::gethostname().into_string() {
            if !os_name.is_empty() {
                assert_eq!(system_hostname(), os_name);
            }
        }
    }
}
