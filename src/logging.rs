use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Level used when neither `RUST_LOG` nor `AWS_LAMBDA_LOG_LEVEL` is set
pub const DEFAULT_DIRECTIVES: &str = "info";

/// Builds the level filter from `directives`, falling back to `info` when
/// they are absent, blank or unparseable.
pub fn env_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Installs JSON logging for CloudWatch.
///
/// Lambda stamps every line itself, so the timestamp and ANSI colors are
/// left out.
pub fn init() {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV)
        .or_else(|_| std::env::var("AWS_LAMBDA_LOG_LEVEL").map(|l| l.to_lowercase()))
        .ok();

    tracing_subscriber::registry()
        .with(env_filter(directives.as_deref()))
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_ansi(false)
                .without_time(),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn falls_back_to_info() {
        assert_eq!(env_filter(None).max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(
            env_filter(Some("  ")).max_level_hint(),
            Some(LevelFilter::INFO)
        );
    }

    #[test]
    fn keeps_explicit_directives() {
        let filter = env_filter(Some("sagemaker_kb_glue=debug"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }
}
