//! Logging setup utilities for the Hiroba binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// Both the library crate and the binary get the same default level. The
/// filter can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `crate_name` - The library crate whose logs should be shown (e.g., "hiroba_server")
/// * `binary_name` - The name of the binary (e.g., "hiroba-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use hiroba_shared::logger::setup_logger;
///
/// setup_logger("hiroba_server", "hiroba-server", "debug");
/// ```
pub fn setup_logger(crate_name: &str, binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(crate_name, binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the filter directive used when `RUST_LOG` is not set.
///
/// Targets use underscores, so dashes in the binary name are normalized. A
/// binary whose target equals the crate's gets no separate directive.
fn default_filter(crate_name: &str, binary_name: &str, default_log_level: &str) -> String {
    let crate_target = crate_name.replace('-', "_");
    let binary_target = binary_name.replace('-', "_");

    let mut directives = vec![format!("{}={}", crate_target, default_log_level)];
    if binary_target != crate_target {
        directives.push(format!("{}={}", binary_target, default_log_level));
    }
    directives.push(format!("tower_http={}", default_log_level));
    directives.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_skips_binary_matching_crate() {
        // テスト項目: バイナリ名を正規化してクレート名と一致する場合、ディレクティブは重複しない
        // given (前提条件):
        let crate_name = "hiroba_server";
        let binary_name = "hiroba-server";

        // when (操作):
        let filter = default_filter(crate_name, binary_name, "info");

        // then (期待する結果):
        assert_eq!(filter, "hiroba_server=info,tower_http=info");
    }

    #[test]
    fn test_default_filter_keeps_distinct_binary() {
        // テスト項目: クレート名と異なるバイナリ名はハイフンを変換して追加される
        // given (前提条件):
        let crate_name = "hiroba_client";
        let binary_name = "hiroba-replay";

        // when (操作):
        let filter = default_filter(crate_name, binary_name, "debug");

        // then (期待する結果):
        assert_eq!(
            filter,
            "hiroba_client=debug,hiroba_replay=debug,tower_http=debug"
        );
    }
}
