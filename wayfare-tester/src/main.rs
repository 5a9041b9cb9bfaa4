mod browser;
mod common;
mod logic;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use browser::{BrowserConfig, BrowserKind, WizardBridge, new_session};
use common::scenario::{ScenarioCtx, get_scenario, list_scenarios, scenario_keys};
use common::{artifacts_dir, capture_artifacts, parse_seeds, split_csv};
use logic::{LogicTester, ScenarioResult};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TestMode {
    /// Pure booking logic testing (fast, no browser)
    Logic,
    /// Browser automation testing (slow, captures screenshots)
    Browser,
    /// Run both logic and browser tests
    Both,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum HeadlessMode {
    /// Run browsers in headless mode
    Headless,
    /// Run browsers with visible windows
    Windowed,
}

impl HeadlessMode {
    const fn is_headless(self) -> bool {
        matches!(self, Self::Headless)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Console,
    Json,
    Markdown,
}

#[derive(Debug, Parser)]
#[command(name = "wayfare-tester", version = "0.1.0")]
#[command(about = "Automated QA for the Wayfare booking wizard - pure logic and browser automation")]
struct Args {
    /// Test mode: logic (fast), browser (visual), or both
    #[arg(long, value_enum, default_value_t = TestMode::Logic)]
    mode: TestMode,

    /// Scenarios to run (comma-separated, `all` for every scenario)
    #[arg(long, default_value = "smoke")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Seeds to run (comma-separated)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Number of iterations per scenario and seed (logic mode only)
    #[arg(long, default_value_t = 10)]
    iterations: usize,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    // Browser-specific options
    /// Browsers to run (chrome,edge,firefox,safari) - browser mode only
    #[arg(long, default_value = "chrome")]
    browsers: String,

    /// URL of the booking page (keep ?test=1 to expose the bridge)
    #[arg(long, default_value = "http://localhost:8080/booking?test=1")]
    base_url: String,

    /// Artifacts directory for screenshots and logs
    #[arg(long, default_value = "target/test-artifacts")]
    artifacts_dir: String,

    /// Connect to a Selenium Grid hub instead of local drivers
    #[arg(long)]
    hub: Option<String>,

    /// Run headless where supported
    #[arg(long, value_enum, default_value_t = HeadlessMode::Headless)]
    headless: HeadlessMode,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    announce_banner();

    let start_time = Instant::now();
    let scenarios = expand_scenarios(&args.scenarios);
    let seeds = parse_seeds(&args.seeds)?;
    log::debug!("scenarios {scenarios:?} seeds {seeds:?}");

    let results = run_logic_scenarios(&args, &scenarios, &seeds);
    let browser_failures = run_browser_scenarios(&args, &scenarios, &seeds).await?;

    write_reports(&args, &results, start_time)?;

    if browser_failures > 0 || results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }

    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(output_target.writer(), "  {key:20} - {description}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🧳 Wayfare Automated Tester".bright_cyan().bold());
    println!("{}", "===========================".cyan());
}

fn expand_scenarios(scenarios_arg: &str) -> Vec<String> {
    let mut scenarios = split_csv(scenarios_arg);
    if scenarios.iter().any(|s| s == "all") {
        scenarios.retain(|s| s != "all");
        for key in scenario_keys() {
            if !scenarios.iter().any(|s| s == key) {
                scenarios.push(key.to_string());
            }
        }
    }
    scenarios
}

fn build_browser_config(args: &Args) -> BrowserConfig {
    BrowserConfig {
        headless: args.headless.is_headless(),
        implicit_wait_secs: 3,
        remote_hub: args.hub.clone(),
    }
}

fn run_logic_scenarios(args: &Args, scenarios: &[String], seeds: &[u64]) -> Vec<ScenarioResult> {
    let mut results = Vec::new();
    if !matches!(args.mode, TestMode::Logic | TestMode::Both) {
        return results;
    }

    println!("{}", "🧠 Running Logic Tests".bright_yellow().bold());
    println!("{}", "-".repeat(30).yellow());

    let logic_tester = LogicTester::new(args.verbose);
    for scenario_name in scenarios {
        let Some(scenario) = get_scenario(scenario_name) else {
            eprintln!("⚠️  Unknown scenario: {}", scenario_name.yellow());
            continue;
        };
        if let Some(logic_scenario) = scenario.as_logic_scenario() {
            results.extend(logic_tester.run_scenario(&logic_scenario, seeds, args.iterations));
        } else {
            eprintln!(
                "⚠️  Scenario {} has no logic test implementation",
                scenario_name.yellow()
            );
        }
    }
    results
}

/// Returns the number of failed browser runs.
async fn run_browser_scenarios(args: &Args, scenarios: &[String], seeds: &[u64]) -> Result<usize> {
    if !matches!(args.mode, TestMode::Browser | TestMode::Both) {
        return Ok(0);
    }

    println!("{}", "🌐 Running Browser Tests".bright_blue().bold());
    println!("{}", "-".repeat(30).blue());

    let cfg = build_browser_config(args);
    let mut failures = 0;
    for browser_name in split_csv(&args.browsers) {
        let Some(kind) = BrowserKind::parse(&browser_name) else {
            eprintln!("⚠️  Unknown browser: {}", browser_name.yellow());
            continue;
        };

        let driver = match new_session(kind, &cfg).await {
            Ok(d) => d,
            Err(e) => {
                eprintln!("❌ Could not start {}: {e}", kind.label());
                continue;
            }
        };

        failures += run_browser_scenarios_for_driver(args, scenarios, seeds, kind, &driver).await;
        if let Err(e) = driver.quit().await {
            log::warn!("closing {} session failed: {e}", kind.label());
        }
    }

    Ok(failures)
}

async fn run_browser_scenarios_for_driver(
    args: &Args,
    scenarios: &[String],
    seeds: &[u64],
    kind: BrowserKind,
    driver: &thirtyfour::WebDriver,
) -> usize {
    let label = kind.label();
    let mut failures = 0;
    for scenario_name in scenarios {
        let Some(scenario) = get_scenario(scenario_name) else {
            eprintln!("⚠️  Unknown scenario: {}", scenario_name.yellow());
            continue;
        };
        for &seed in seeds {
            let ctx = ScenarioCtx {
                base_url: args.base_url.clone(),
                seed,
                bridge: WizardBridge::new(driver),
                verbose: args.verbose,
            };
            let scenario_start = Instant::now();
            match scenario.run_browser(driver, &ctx).await {
                Ok(()) => {
                    println!(
                        "✅ [{} seed {seed}] {scenario_name} - {:?}",
                        label.green(),
                        scenario_start.elapsed()
                    );
                }
                Err(e) => {
                    failures += 1;
                    eprintln!(
                        "❌ [{} seed {seed}] {scenario_name} - {:?}: {e:#}",
                        label.red(),
                        scenario_start.elapsed()
                    );
                    let dir = artifacts_dir(&args.artifacts_dir, label, scenario_name, seed);
                    if let Err(capture) = capture_artifacts(driver, &dir, &e).await {
                        log::warn!("could not save artifacts to {dir}: {capture:#}");
                    }
                }
            }
        }
    }
    failures
}

fn write_reports(args: &Args, results: &[ScenarioResult], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;
    match args.report {
        ReportFormat::Json => logic::reports::generate_json_report(&mut output_target, results)?,
        ReportFormat::Markdown => {
            if results.is_empty() {
                writeln!(
                    &mut output_target,
                    "# Wayfare Logic Test Results\n\n_No scenarios executed._"
                )?;
            } else {
                logic::reports::generate_markdown_report(&mut output_target, results)?;
            }
        }
        ReportFormat::Console => {
            if results.is_empty() {
                writeln!(&mut output_target, "No logic scenarios executed.")?;
            } else {
                logic::reports::generate_console_report(
                    &mut output_target,
                    results,
                    start_time.elapsed(),
                )?;
            }
            writeln!(&mut output_target)?;
            writeln!(&mut output_target, "🏁 Total time: {:?}", start_time.elapsed())?;
        }
    }
    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args {
            mode: TestMode::Logic,
            scenarios: "smoke".to_string(),
            list_scenarios: false,
            seeds: "1337".to_string(),
            iterations: 1,
            report: ReportFormat::Json,
            verbose: false,
            output: None,
            browsers: "chrome".to_string(),
            base_url: "http://localhost:8080/booking?test=1".to_string(),
            artifacts_dir: "target/test-artifacts".to_string(),
            hub: None,
            headless: HeadlessMode::Headless,
        }
    }

    fn temp_file(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "wayfare-{label}-{}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ))
    }

    #[test]
    fn expands_all_scenarios_keyword_without_duplicates() {
        let expanded = expand_scenarios("smoke,all");
        assert_eq!(expanded.first().map(String::as_str), Some("smoke"));
        assert_eq!(expanded.iter().filter(|s| *s == "smoke").count(), 1);
        assert!(expanded.contains(&"card-format".to_string()));
        assert_eq!(expanded.len(), scenario_keys().len());
    }

    #[test]
    fn expand_scenarios_without_all_preserves_order() {
        let expanded = expand_scenarios("seat-budget,smoke");
        assert_eq!(
            expanded,
            vec!["seat-budget".to_string(), "smoke".to_string()]
        );
    }

    #[test]
    fn run_logic_scenarios_skips_when_not_enabled() {
        let args = Args {
            mode: TestMode::Browser,
            ..base_args()
        };
        assert!(run_logic_scenarios(&args, &["smoke".to_string()], &[42]).is_empty());
    }

    #[test]
    fn run_logic_scenarios_collects_one_result_per_seed() {
        let args = base_args();
        let scenarios = vec!["seat-toggle".to_string(), "no-such-scenario".to_string()];
        let results = run_logic_scenarios(&args, &scenarios, &[1, 2]);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.passed), "{results:?}");
    }

    #[test]
    fn browser_mode_is_a_no_op_in_logic_mode() {
        let args = base_args();
        let failures = tokio_test::block_on(run_browser_scenarios(&args, &[], &[1]))
            .expect("browser stage");
        assert_eq!(failures, 0);
    }

    #[test]
    fn unknown_browsers_are_skipped() {
        let args = Args {
            mode: TestMode::Browser,
            browsers: "netscape".to_string(),
            ..base_args()
        };
        let failures =
            tokio_test::block_on(run_browser_scenarios(&args, &["smoke".to_string()], &[1]))
                .expect("browser stage");
        assert_eq!(failures, 0);
    }

    #[test]
    fn write_reports_emits_json_output() {
        let path = temp_file("report.json");
        let args = Args {
            output: Some(path.clone()),
            ..base_args()
        };
        let results = run_logic_scenarios(&args, &["card-format".to_string()], &[5]);
        write_reports(&args, &results, Instant::now()).expect("write report");
        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).expect("read")).expect("json");
        assert_eq!(parsed[0]["scenario_name"], "Card Number Formatting");
        assert_eq!(parsed[0]["passed"], true);
    }

    #[test]
    fn write_reports_marks_empty_markdown() {
        let path = temp_file("report.md");
        let args = Args {
            report: ReportFormat::Markdown,
            output: Some(path.clone()),
            ..base_args()
        };
        write_reports(&args, &[], Instant::now()).expect("write report");
        let text = std::fs::read_to_string(path).expect("read");
        assert!(text.contains("_No scenarios executed._"));
    }

    #[test]
    fn output_target_writes_to_file() {
        let path = temp_file("target.txt");
        let mut target = OutputTarget::new(Some(path.clone())).expect("create");
        writeln!(target, "hello").expect("write");
        target.flush_inner().expect("flush");
        assert_eq!(std::fs::read_to_string(path).expect("read"), "hello\n");
    }
}
