//! Logging setup utilities for the Duet binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Crates whose log output is enabled by the default filter.
const WORKSPACE_CRATES: [&str; 3] = ["duet_shared", "duet_server", "duet_client"];

/// Build the default filter directive used when `RUST_LOG` is not set.
///
/// Every workspace crate and the binary itself are enabled at `default_log_level`.
fn default_directive(binary_name: &str, default_log_level: &str) -> String {
    let binary_target = binary_name.replace('-', "_");
    let mut targets: Vec<String> = WORKSPACE_CRATES.iter().map(|name| name.to_string()).collect();
    if !targets.contains(&binary_target) {
        targets.push(binary_target);
    }

    targets
        .iter()
        .map(|target| format!("{}={}", target, default_log_level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize the tracing subscriber with the specified default log level.
///
/// The log level can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "duet-server", "duet-client")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use duet_shared::logger::setup_logger;
///
/// setup_logger("duet-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directive(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_covers_workspace_and_binary() {
        // テスト項目: デフォルトのフィルタにワークスペースの全クレートとバイナリが含まれる
        // given (前提条件):
        let binary_name = "duet-server";

        // when (操作):
        let directive = default_directive(binary_name, "info");
        let other = default_directive("relay-tool", "debug");

        // then (期待する結果): 既にクレートとして含まれるバイナリは重複しない
        assert_eq!(directive, "duet_shared=info,duet_server=info,duet_client=info");
        assert!(other.ends_with(",relay_tool=debug"));
    }
}
