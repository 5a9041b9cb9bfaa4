use anyhow::{Context, Result};
use chrono::Utc;
use std::{fs, path::Path};
use thirtyfour::prelude::*;

pub fn artifacts_dir(base: &str, browser: &str, scenario: &str, seed: u64) -> String {
    let ts = Utc::now().format("%Y%m%dT%H%M%S");
    format!("{base}/{browser}/{scenario}/seed-{seed}/{ts}")
}

/// Save screenshot, DOM, bridge snapshot and error chain for a failed browser run.
pub async fn capture_artifacts(driver: &WebDriver, dir: &str, err: &anyhow::Error) -> Result<()> {
    let screenshot = driver.screenshot_as_png().await.ok();
    let source = driver.source().await.ok();
    let state = driver
        .execute(
            "return window.__wayfareTest && window.__wayfareTest.state && window.__wayfareTest.state()",
            vec![],
        )
        .await
        .ok()
        .map(|ret| ret.json().clone());

    write_artifact_files(
        Path::new(dir),
        screenshot.as_deref(),
        source.as_deref(),
        state.as_ref(),
        &format!("{err:#}"),
    )
}

fn write_artifact_files(
    dir: &Path,
    screenshot: Option<&[u8]>,
    source: Option<&str>,
    state: Option<&serde_json::Value>,
    error_chain: &str,
) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    if let Some(png) = screenshot {
        fs::write(dir.join("screenshot.png"), png).context("writing screenshot")?;
    }
    if let Some(src) = source {
        fs::write(dir.join("dom.html"), src).context("writing DOM")?;
    }
    if let Some(state_json) = state {
        let payload = serde_json::to_vec_pretty(state_json)?;
        fs::write(dir.join("state.json"), payload).context("writing bridge state")?;
    }
    fs::write(dir.join("error.txt"), error_chain).context("writing error chain")?;
    Ok(())
}

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Comma-separated `u64` seeds.
pub fn parse_seeds(s: &str) -> Result<Vec<u64>> {
    split_csv(s)
        .iter()
        .map(|token| {
            token
                .parse::<u64>()
                .with_context(|| format!("invalid seed {token:?}"))
        })
        .collect()
}
