//! Probe command: send the payload, print what happened.

use anyhow::{Context, Result};
use console::style;
use serde::Serialize;

use kantoku_core::probe::{ProbeRunner, WebhookClient};
use kantoku_infra::webhook::{ReqwestWebhookClient, webhook_origin};
use kantoku_types::config::ProbeConfig;
use kantoku_types::probe::{ProbeOutcome, ProbeReport};

const HEAVY_RULE: &str = "==================================================";
const LIGHT_RULE: &str = "--------------------------------------------------";

/// Build the HTTP client and run one probe as described by `config`.
///
/// Returns whether the probe passed. Fails only if the HTTP client itself
/// cannot be constructed, before any request is attempted.
pub async fn execute(config: &ProbeConfig, json: bool) -> Result<bool> {
    let client =
        ReqwestWebhookClient::new(config.timeout()).context("could not set up the HTTP client")?;
    let runner = ProbeRunner::new(client).with_daily_goal(config.daily_goal_minutes);

    Ok(run_probe(&runner, &config.webhook_url, &config.user_id, json).await)
}

/// Probe `url` for `user_id` and print a styled (or JSON) report.
///
/// Every failure is reported on stdout and folded into the `false` return.
pub async fn run_probe<C: WebhookClient>(
    runner: &ProbeRunner<C>,
    url: &str,
    user_id: &str,
    json: bool,
) -> bool {
    if !json {
        print_request_header(url, user_id);
    }

    let report = runner.run(url, user_id).await;

    if json {
        print_json(&report);
    } else {
        for line in outcome_lines(&report) {
            println!("{line}");
        }
        print_verdict(report.passed());
    }

    report.passed()
}

/// Report a failure that happened before any request could be sent.
///
/// Keeps the same shape as a regular run: progress lines and verdict in text
/// mode, a single JSON object in JSON mode.
pub fn report_setup_failure(config: &ProbeConfig, err: &anyhow::Error, json: bool) {
    let message = format!("{err:#}");
    if json {
        println!("{}", setup_failure_json(config, &message));
    } else {
        print_request_header(&config.webhook_url, &config.user_id);
        println!("💥 {} {message}", style("Unexpected Error:").red());
        print_verdict(false);
    }
}

fn setup_failure_json(config: &ProbeConfig, message: &str) -> serde_json::Value {
    serde_json::json!({
        "webhook_url": config.webhook_url,
        "user_id": config.user_id,
        "passed": false,
        "error": message,
    })
}

/// Banner plus target and user lines, printed before anything can fail.
fn print_request_header(url: &str, user_id: &str) {
    for line in request_lines(url, user_id) {
        println!("{line}");
    }
}

fn request_lines(url: &str, user_id: &str) -> Vec<String> {
    vec![
        format!("{} Testing n8n Generate Tasks Workflow", style("🚀").bold()),
        HEAVY_RULE.to_string(),
        format!("📡 Sending request to: {}", style(url).cyan()),
        format!("👤 User ID: {user_id}"),
        LIGHT_RULE.to_string(),
    ]
}

/// Closing rule and pass/fail line.
fn print_verdict(passed: bool) {
    println!("{HEAVY_RULE}");
    if passed {
        println!("✅ {}", style("Test Passed").green().bold());
    } else {
        println!("❌ {}", style("Test Failed").red().bold());
    }
}

/// Human-readable lines describing the outcome of `report`.
pub fn outcome_lines(report: &ProbeReport) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(status) = report.outcome.status() {
        lines.push(format!(
            "📊 Status Code: {} {}",
            style(status).bold(),
            style(format!("({} ms)", report.elapsed_ms)).dim()
        ));
        lines.push(LIGHT_RULE.to_string());
    }

    match &report.outcome {
        ProbeOutcome::Success { body, .. } => {
            lines.push(format!("✨ {}", style("Success! Response:").green()));
            // 2-space indent, non-ASCII kept as-is.
            lines.push(serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string()));
        }
        ProbeOutcome::HttpError { body, .. } => {
            lines.push(format!("❌ {}", style("Error Response:").red()));
            lines.push(body.clone());
        }
        ProbeOutcome::ConnectionFailed { .. } => {
            let origin =
                webhook_origin(&report.webhook_url).unwrap_or_else(|| report.webhook_url.clone());
            lines.push(format!(
                "💥 {} Could not connect to n8n server",
                style("Connection Error:").red()
            ));
            lines.push(format!("   Make sure n8n is running on {origin}"));
        }
        ProbeOutcome::TimedOut { timeout_secs } => {
            lines.push(format!(
                "⏱️  {} Request took too long (no response within {timeout_secs}s)",
                style("Timeout:").yellow()
            ));
        }
        ProbeOutcome::Unexpected { message } => {
            lines.push(format!(
                "💥 {} {message}",
                style("Unexpected Error:").red()
            ));
        }
    }

    lines
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    report: &'a ProbeReport,
    passed: bool,
}

fn print_json(report: &ProbeReport) {
    let json_report = JsonReport {
        report,
        passed: report.passed(),
    };
    match serde_json::to_string_pretty(&json_report) {
        Ok(text) => println!("{text}"),
        Err(e) => println!("{}", serde_json::json!({ "passed": false, "error": e.to_string() })),
    }
}
