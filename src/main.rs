//! dlp-gate: policy gate for data-movement actions.
//!
//! Reads one action event as JSON from stdin, writes a verdict to stdout.
//!
//! Event shape:
//!   {"action": "file_transfer",
//!    "source": {"url": "https://intranet.example.com/doc"},
//!    "destination": {"component": "usb"},
//!    "file": {"name": "q3.pdf", "mime_type": "application/pdf", "size_bytes": 4096}}
//!
//! Flags:
//!   --dump-policy     print the merged policy and exit
//!   --check-policy    compile every rule, report rejects, exit non-zero on any
//!   --escalate-block  downgrade BLOCK verdicts to WARN (dry-run rollout)

use std::io::Read;

use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

use dlp_gate::config::PolicyConfig;
use dlp_gate::eval::{ActionEvent, EvaluationContext, PolicyEngine};
use dlp_gate::logging;

fn init_logger() {
    let config = ConfigBuilder::new().set_time_level(log::LevelFilter::Off).build();
    let _ = TermLogger::init(
        log::LevelFilter::Warn,
        config,
        TerminalMode::Stderr,
        ColorChoice::Never,
    );
}

fn dump_policy(config: &PolicyConfig) {
    match toml::to_string_pretty(config) {
        Ok(rendered) => print!("{rendered}"),
        Err(e) => {
            eprintln!("failed to render policy: {e}");
            std::process::exit(1);
        }
    }
}

fn check_policy(config: &PolicyConfig) {
    let engine = PolicyEngine::from_config(config);
    if engine.rejected().is_empty() {
        println!("policy OK: {} rule(s)", engine.rule_count());
        return;
    }
    for name in engine.rejected() {
        eprintln!("invalid rule: {name}");
    }
    eprintln!(
        "{} of {} rule(s) rejected",
        engine.rejected().len(),
        engine.rule_count() + engine.rejected().len()
    );
    std::process::exit(1);
}

fn main() {
    init_logger();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let escalate_block = args.iter().any(|a| a == "--escalate-block");

    let config = PolicyConfig::load();

    if args.iter().any(|a| a == "--dump-policy") {
        dump_policy(&config);
        return;
    }
    if args.iter().any(|a| a == "--check-policy") {
        check_policy(&config);
        return;
    }

    let mut input = String::new();
    if std::io::stdin().read_to_string(&mut input).is_err() {
        eprintln!("failed to read stdin");
        std::process::exit(1);
    }
    if input.trim().is_empty() {
        std::process::exit(0);
    }

    let event: ActionEvent = match serde_json::from_str(&input) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("JSON parse error: {e}");
            std::process::exit(1);
        }
    };

    let mut engine = PolicyEngine::from_config(&config);
    if escalate_block {
        engine.set_escalate_block(true);
    }

    let result = engine.evaluate(&EvaluationContext::from_event(&event));
    logging::log_verdict(&event, &result);

    let output = serde_json::json!({
        "verdict": {
            "decision": result.decision.as_str(),
            "reason": result.reason,
        }
    });

    println!("{}", serde_json::to_string(&output).unwrap());
}
