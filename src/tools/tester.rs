//! Simulated execution of a custom tool. No network traffic: the test
//! reports what a healthy (or misconfigured) invocation would look like, so
//! a seller can sanity-check the configuration before enabling the tool.

use serde_json::json;
use std::time::Duration;
use time::OffsetDateTime;
use tokio::time::sleep;

use crate::prompt::WebhookSpec;

/// Latency of the simulated call, roughly what the real webhook round trip
/// would take.
pub const SIMULATED_LATENCY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestOutcome {
    pub ok: bool,
    /// Pretty-printed JSON body shown in the preview area.
    pub body: String,
}

/// Runs the simulated invocation. `latency` is injected so tests run
/// instantly; `now` is injected so the reported timestamp is deterministic.
pub async fn run_test(spec: &WebhookSpec, latency: Duration, now: OffsetDateTime) -> TestOutcome {
    if spec.url.trim().is_empty() {
        return failure_outcome();
    }

    sleep(latency).await;

    let payload = json!({
        "success": true,
        "data": {
            "message": "Tool ejecutada correctamente",
            "timestamp": iso_timestamp(now),
            "result": "Datos de prueba obtenidos exitosamente",
        }
    });
    TestOutcome {
        ok: true,
        body: pretty(&payload),
    }
}

fn failure_outcome() -> TestOutcome {
    let payload = json!({
        "error": true,
        "message": "Error al ejecutar la tool",
        "details": "Verifique la configuración y URL",
    });
    TestOutcome {
        ok: false,
        body: pretty(&payload),
    }
}

fn pretty(payload: &serde_json::Value) -> String {
    serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string())
}

fn iso_timestamp(now: OffsetDateTime) -> String {
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
        now.year(),
        u8::from(now.month()),
        now.day(),
        now.hour(),
        now.minute(),
        now.second(),
        now.millisecond()
    )
}
