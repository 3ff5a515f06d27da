use std::env;
use std::sync::OnceLock;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::{info, warn};

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

pub const DEFAULT_METRICS_PORT: u16 = 9102;

fn resolve_port(raw: Option<String>, default_port: u16) -> u16 {
    raw.and_then(|raw| raw.parse::<u16>().ok())
        .unwrap_or(default_port)
}

/// Install the global recorder and serve it on `0.0.0.0:<port>/metrics`, where
/// the port comes from `port_env` or falls back to `default_port`.
///
/// Must be called from inside a tokio runtime; the HTTP exporter is spawned on
/// it. Repeated calls reuse the first exporter.
pub fn init_metrics(port_env: &str, default_port: u16) -> Option<&'static PrometheusHandle> {
    if let Some(existing) = PROMETHEUS_HANDLE.get() {
        return Some(existing);
    }

    let port = resolve_port(env::var(port_env).ok(), default_port);

    let (recorder, exporter) = match PrometheusBuilder::new()
        .with_http_listener(([0, 0, 0, 0], port))
        .build()
    {
        Ok(parts) => parts,
        Err(err) => {
            warn!(error = %err, metrics_port = port, "failed to build prometheus exporter");
            return None;
        }
    };

    let handle = recorder.handle();
    if let Err(err) = metrics::set_global_recorder(recorder) {
        warn!(error = %err, "metrics recorder already installed");
        return None;
    }

    tokio::spawn(async move {
        if let Err(err) = exporter.await {
            warn!(error = ?err, "prometheus exporter stopped");
        }
    });

    info!(metrics_port = port, "started prometheus exporter");
    let _ = PROMETHEUS_HANDLE.set(handle);
    PROMETHEUS_HANDLE.get()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_falls_back_on_missing_or_invalid_values() {
        assert_eq!(resolve_port(None, DEFAULT_METRICS_PORT), 9102);
        assert_eq!(resolve_port(Some("70000".into()), 9102), 9102);
        assert_eq!(resolve_port(Some("9300".into()), 9102), 9300);
    }

    #[tokio::test]
    async fn exporter_listens_and_renders_recorded_metrics() {
        std::env::set_var("SM_METRICS_TEST_PORT", "19402");

        let handle = init_metrics("SM_METRICS_TEST_PORT", DEFAULT_METRICS_PORT)
            .expect("exporter should start");

        metrics::counter!("skill_match_batches_total", "kind" => "project").increment(1);
        assert!(handle.render().contains("skill_match_batches_total"));

        tokio::task::yield_now().await;
        let stream = tokio::net::TcpStream::connect(("127.0.0.1", 19402)).await;
        assert!(stream.is_ok(), "exporter port refused: {stream:?}");

        // second call reuses the running exporter
        assert!(init_metrics("SM_METRICS_TEST_PORT", DEFAULT_METRICS_PORT).is_some());
    }
}
