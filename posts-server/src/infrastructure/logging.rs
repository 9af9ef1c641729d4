use anyhow::{Context, Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global subscriber.
///
/// `RUST_LOG` wins when set. Otherwise `default_level` applies everywhere except
/// sqlx, whose per-statement logging is held at `warn`.
pub(crate) fn init_logging(default_level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_directives(default_level))
            .with_context(|| format!("invalid log level '{default_level}'"))?,
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(())
}

fn default_directives(level: &str) -> String {
    format!("{level},sqlx=warn")
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::EnvFilter;

    use super::default_directives;

    #[test]
    fn default_directives_quiet_sqlx() {
        let directives = default_directives("debug");
        assert_eq!(directives, "debug,sqlx=warn");
        EnvFilter::try_new(directives).expect("directives must parse");
    }
}
