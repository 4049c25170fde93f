/// Name of the variable that turns on the execution trace.
pub const TRACE_VAR: &str = "ALI_TRACE";

/// Settings taken from the process environment, read once at startup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Env {
    /// Print every executed instruction to stderr.
    pub trace: bool,
}

impl Env {
    pub fn from_process() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Env {
            trace: lookup(TRACE_VAR).is_some_and(|value| is_enabled(&value)),
        }
    }
}

fn is_enabled(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod test {
    use super::*;

    fn env_with(trace: Option<&str>) -> Env {
        Env::from_lookup(|name| {
            assert_eq!(name, TRACE_VAR);
            trace.map(String::from)
        })
    }

    #[test]
    fn trace_setting() {
        assert_eq!(env_with(None), Env::default());
        assert!(env_with(Some("1")).trace);
        assert!(env_with(Some("True")).trace);
        assert!(!env_with(Some("0")).trace);
        assert!(!env_with(Some("")).trace);
    }
}
