use anyhow::{Context, Result};
use chrono::Utc;

use crate::{
    config::AppConfig,
    domain::{OutputRecord, Region, RegionRegistry},
    fetcher::PageFetcher,
    infrastructure::{directories::ResolvedPaths, shutdown::ShutdownListener},
    schedule::{self, DaySchedules, ParseOptions, TableExtractor},
    store::ScheduleStore,
};

/// What the pipeline reports back for one region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub ok: bool,
    pub message: String,
}

pub struct ParserApp {
    config: AppConfig,
    region: Region,
    fetcher: PageFetcher,
    extractor: TableExtractor,
    store: ScheduleStore,
}

impl ParserApp {
    pub fn initialize(config: AppConfig, paths: ResolvedPaths, region_id: &str) -> Result<Self> {
        let registry = load_registry(&config)?;
        let region = registry.find(region_id)?.clone();
        let fetcher = PageFetcher::new(config.source.clone())?;

        Ok(Self {
            config,
            region,
            fetcher,
            extractor: TableExtractor::new(),
            store: ScheduleStore::new(paths.data_dir),
        })
    }

    pub async fn run(self, mut shutdown: ShutdownListener) -> RunOutcome {
        tracing::info!(target: "app", region = %self.region.id, name = %self.region.name, "starting parse");

        let result = tokio::select! {
            res = self.refresh() => res,
            reason = shutdown.notified() => {
                tracing::warn!(target: "app", reason, "shutdown requested; aborting parse");
                return RunOutcome {
                    ok: false,
                    message: format!("interrupted by {reason}"),
                };
            }
        };

        match result {
            Ok(record) => {
                tracing::info!(
                    target: "app",
                    region = %record.region_id,
                    updated = %record.fact.update_fact,
                    "schedule saved"
                );
                RunOutcome {
                    ok: true,
                    message: format!("{} updated at {}", self.region.name, record.fact.update_fact),
                }
            }
            Err(err) => {
                let message = format!("{err:#}");
                tracing::error!(target: "app", region = %self.region.id, error = %message, "parse failed");
                RunOutcome { ok: false, message }
            }
        }
    }

    async fn refresh(&self) -> Result<OutputRecord> {
        let html = self.fetcher.fetch(&self.region).await?;
        let schedules = self.parse(&html)?;

        let record = schedule::assemble(&self.region, schedules, Utc::now(), self.config.timezone)
            .context("failed to serialize schedule data")?;

        match self.store.read(&record.region_id) {
            Ok(Some(previous)) if previous.meta.content_hash == record.meta.content_hash => {
                tracing::info!(target: "store", "schedule content unchanged since last run");
            }
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(target: "store", error = %err, "previous record unreadable; overwriting");
            }
        }

        let path = self.store.write(&record)?;
        tracing::info!(target: "store", path = %path.display(), "record written");
        Ok(record)
    }

    fn parse(&self, html: &str) -> Result<DaySchedules> {
        let options = ParseOptions {
            simplify_states: self.config.simplify_states,
        };
        let schedules = schedule::parse_page(html, &self.extractor, options)
            .context("schedule table not found or empty")?;

        for (day, queues) in [("today", &schedules.today), ("tomorrow", &schedules.tomorrow)] {
            if queues.is_empty() {
                tracing::warn!(target: "parse", day, "no cells for day");
            } else {
                tracing::debug!(
                    target: "parse",
                    day,
                    queues = queues.len(),
                    states = %queues
                        .iter()
                        .map(|(queue, state)| format!("{queue}={}", state.as_str()))
                        .collect::<Vec<_>>()
                        .join(" "),
                    "day parsed"
                );
            }
        }
        Ok(schedules)
    }
}

pub fn load_registry(config: &AppConfig) -> Result<RegionRegistry> {
    match &config.regions_file {
        Some(path) => Ok(RegionRegistry::load(path)?),
        None => Ok(RegionRegistry::default()),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{
        config::{env::LoggingConfig, DirectoryConfig, SourceConfig},
        domain::DisruptionState,
    };

    fn config(data_dir: &std::path::Path) -> AppConfig {
        AppConfig {
            source: SourceConfig {
                url: "https://www.voe.com.ua/disconnection/detailed".parse().unwrap(),
                fetch_timeout: Duration::from_secs(1),
                user_agent: "test".into(),
            },
            directories: DirectoryConfig {
                logs_dir: data_dir.display().to_string(),
                data_dir: data_dir.display().to_string(),
            },
            logging: LoggingConfig {
                level: "info".into(),
            },
            timezone: chrono_tz::Europe::Kyiv,
            regions_file: None,
            simplify_states: false,
        }
    }

    fn paths(dir: &std::path::Path) -> ResolvedPaths {
        ResolvedPaths {
            logs_dir: dir.to_path_buf(),
            data_dir: dir.to_path_buf(),
        }
    }

    #[test]
    fn unknown_region_fails_initialization() {
        let dir = tempfile::tempdir().unwrap();
        let err = ParserApp::initialize(config(dir.path()), paths(dir.path()), "atlantis")
            .err()
            .unwrap();
        assert!(err.to_string().contains("unknown region `atlantis`"));
    }

    #[test]
    fn parse_reports_missing_table() {
        let dir = tempfile::tempdir().unwrap();
        let app = ParserApp::initialize(config(dir.path()), paths(dir.path()), "vinnytsia").unwrap();
        let err = app.parse("<html><body>Just a moment...</body></html>").unwrap_err();
        assert_eq!(format!("{err:#}"), "schedule table not found or empty: no rows");
    }

    #[test]
    fn parse_reads_both_days() {
        let dir = tempfile::tempdir().unwrap();
        let app = ParserApp::initialize(config(dir.path()), paths(dir.path()), "vinnytsia").unwrap();
        let html = r#"<table class="disconnection-detailed-table"><tbody>
            <tr><td><div class="disconnection-detailed-table-cell cell current_day has_disconnection full_hour confirm_0" data-queue="2.1"></div></td></tr>
            <tr><td><div class="disconnection-detailed-table-cell cell other_day" data-queue="2.1"></div></td></tr>
        </tbody></table>"#;
        let schedules = app.parse(html).unwrap();
        assert_eq!(schedules.today["2.1"], DisruptionState::Maybe);
        assert_eq!(schedules.tomorrow["2.1"], DisruptionState::Yes);
    }

    #[test]
    fn registry_file_overrides_default() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("regions.json");
        std::fs::write(&file, r#"[{"id": "khmelnytskyi", "name": "Хмельницький"}]"#).unwrap();

        let mut cfg = config(dir.path());
        cfg.regions_file = Some(file);
        let registry = load_registry(&cfg).unwrap();
        assert!(registry.find("khmelnytskyi").is_ok());
        assert!(registry.find("vinnytsia").is_err());
    }
}
