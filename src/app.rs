//! Main application orchestration and execution
//!
//! Wires the CLI modes together: registry management, a single verbose run
//! against one target, and sequential batches over many. All terminal output
//! goes through the output coordinator; structured log entries go through
//! the run logger and stay quiet unless verbose or debug mode asks for them.

use crate::cli::Cli;
use crate::config::{display_config_summary, load_config, Config};
use crate::error::{AppError, Result};
use crate::logging::{Logger, RunLogger};
use crate::models::Target;
use crate::output::{ColoredFormatter, OutputCoordinator, OutputFormatterFactory};
use crate::probe::{ProbeExecutor, SystemPingExecutor};
use crate::runner::{BatchEvent, BatchRunner, RunController, RunEvent};
use crate::stats::RollingStats;
use crate::storage::{ReportWriter, ServerStore};

/// Main application struct that coordinates all components
pub struct App {
    cli: Cli,
    config: Config,
    coordinator: OutputCoordinator,
    logger: Logger,
    run_logger: RunLogger,
}

impl App {
    /// Create a new application instance with CLI configuration
    pub fn new(cli: Cli) -> Result<Self> {
        let config = load_config(cli.clone())?;

        let enable_color = config.use_color && ColoredFormatter::supports_color();
        let formatter = OutputFormatterFactory::create_formatter(enable_color, config.verbose);

        Ok(Self {
            coordinator: OutputCoordinator::new(formatter),
            logger: Logger::with_config("APP".to_string(), &config),
            run_logger: RunLogger::new(&config),
            cli,
            config,
        })
    }

    /// Run the application
    pub async fn run(self) -> Result<()> {
        if self.config.debug {
            println!("{} v{}", crate::PKG_NAME, crate::VERSION);
            println!();
            println!("Configuration:");
            for line in display_config_summary(&self.config).lines() {
                println!("  {}", line);
            }
            println!();
        }

        for warning in self.config.validation_warnings() {
            println!("{}", self.coordinator.display_warning(&warning)?);
        }

        if self.cli.list {
            return self.list_servers();
        }
        if let Some(target) = self.cli.parsed_add()? {
            return self.add_server(target).await;
        }
        if let Some(name) = self.cli.remove.clone() {
            return self.remove_server(&name);
        }

        let store = ServerStore::new(&self.config.data_dir);
        let targets = resolve_targets(self.cli.all, &self.cli.targets, &store)?;
        if targets.is_empty() {
            return Err(AppError::validation(
                "no servers registered; add one with --add NAME=ADDR",
            ));
        }

        self.logger
            .debug(&format!("Resolved {} target(s)", targets.len()))
            .log()
            .await;

        if self.cli.is_single_run() {
            let target = targets
                .into_iter()
                .next()
                .ok_or_else(|| AppError::internal("target list emptied unexpectedly"))?;
            self.run_single(target).await
        } else {
            self.run_batch(targets).await
        }
    }

    /// Probe one target and show every sample as it arrives
    async fn run_single(&self, target: Target) -> Result<()> {
        let run_config = self.config.to_run_config()?;

        println!("{}", self.coordinator.display_run_banner(&target, &run_config)?);
        println!();

        let run_id = self
            .run_logger
            .run_started(&target, run_config.total_ticks())
            .await;

        let controller = RunController::with_system_executor();
        let mut handle = controller.start(target, run_config)?;

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);
        let mut interrupted = false;

        let mut rolling = RollingStats::new();
        let mut final_result = None;

        loop {
            tokio::select! {
                event = handle.next_event() => {
                    let event = match event {
                        Some(event) => event,
                        None => break,
                    };
                    match event {
                        RunEvent::Progress { sample, .. } => {
                            rolling.observe(&sample);
                            self.run_logger.sample(&run_id, &sample).await;
                            println!("{}", self.coordinator.display_probe(&sample, &rolling)?);
                        }
                        RunEvent::Finished(result) => final_result = Some(result),
                    }
                }
                _ = &mut ctrl_c, if !interrupted => {
                    interrupted = true;
                    handle.cancel();
                    println!(
                        "{}",
                        self.coordinator
                            .display_warning("Interrupted, stopping at the next tick")?
                    );
                }
            }
        }

        let result = final_result
            .ok_or_else(|| AppError::channel("run ended without a terminal result"))?;
        self.run_logger.run_finished(&run_id, &result).await;

        println!();
        println!("{}", self.coordinator.display_run_summary(&result)?);

        if result.is_failed() {
            let reason = result
                .error
                .clone()
                .unwrap_or_else(|| "probe invocation failed".to_string());
            return Err(AppError::probe(reason));
        }
        if !result.has_successes() {
            return Err(AppError::probe(format!("no replies from {}", result.target)));
        }
        Ok(())
    }

    /// Probe several targets one after another and summarize them as a table
    async fn run_batch(&self, targets: Vec<Target>) -> Result<()> {
        let run_config = self.config.to_run_config()?;

        let runner = BatchRunner::with_system_executor();
        let mut handle = runner.start(targets, run_config.clone())?;

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);
        let mut interrupted = false;

        let mut rolling = RollingStats::new();
        let mut current_run_id = String::new();
        let mut final_batch = None;

        loop {
            tokio::select! {
                event = handle.next_event() => {
                    let event = match event {
                        Some(event) => event,
                        None => break,
                    };
                    match event {
                        BatchEvent::RunStarted { index, total, target } => {
                            rolling = RollingStats::new();
                            current_run_id = self
                                .run_logger
                                .run_started(&target, run_config.total_ticks())
                                .await;
                            println!(
                                "{}",
                                self.coordinator.display_run_started(index, total, &target)?
                            );
                        }
                        BatchEvent::Progress { sample, .. } => {
                            rolling.observe(&sample);
                            self.run_logger.sample(&current_run_id, &sample).await;
                            if self.config.verbose {
                                println!(
                                    "{}",
                                    self.coordinator.display_probe(&sample, &rolling)?
                                );
                            }
                        }
                        BatchEvent::RunFinished { result, .. } => {
                            self.run_logger.run_finished(&current_run_id, &result).await;
                            println!("{}", self.coordinator.display_run_finished(&result)?);
                        }
                        BatchEvent::Finished(batch) => final_batch = Some(batch),
                    }
                }
                _ = &mut ctrl_c, if !interrupted => {
                    interrupted = true;
                    handle.cancel();
                    println!(
                        "{}",
                        self.coordinator
                            .display_warning("Interrupted, finishing the current run")?
                    );
                }
            }
        }

        let batch = final_batch
            .ok_or_else(|| AppError::channel("batch ended without a terminal result"))?;
        self.run_logger.batch_finished(&batch).await;

        println!();
        println!("{}", self.coordinator.display_batch_results(&batch)?);

        if !self.config.no_report && !batch.is_empty() {
            let writer = ReportWriter::new(&self.config.data_dir);
            match writer.save_batch_report(&batch) {
                Ok(path) => println!(
                    "{}",
                    self.coordinator
                        .display_success(&format!("Results saved to {}", path.display()))?
                ),
                // the results are already on screen; a failed export is not fatal
                Err(e) => println!(
                    "{}",
                    self.coordinator
                        .display_warning(&format!("Could not save report: {}", e))?
                ),
            }
        }

        if batch.runs_with_successes() == 0 {
            return Err(AppError::probe("no replies from any target"));
        }
        Ok(())
    }

    /// Print the registered servers
    fn list_servers(&self) -> Result<()> {
        let store = ServerStore::new(&self.config.data_dir);
        let servers = store.load()?;

        println!("Registered servers ({}):", servers.len());
        for server in &servers {
            println!("  {:<24} {}", server.name, server.address);
        }
        println!();
        println!("Registry: {}", store.store_path().display());
        Ok(())
    }

    /// Add a server to the registry, probing it once first unless disabled
    async fn add_server(&self, target: Target) -> Result<()> {
        if self.config.verify_on_add {
            println!("Verifying {}...", target);

            let executor = SystemPingExecutor::new();
            let timeout = self.config.to_run_config()?.timeout;
            match executor.probe(&target.address, timeout).await? {
                Some(rtt) => println!(
                    "{}",
                    self.coordinator.display_success(&format!(
                        "{} answered in {:.1} ms",
                        target.address,
                        rtt.as_secs_f64() * 1000.0
                    ))?
                ),
                None => {
                    return Err(AppError::validation(format!(
                        "{} did not answer a probe; use --no-verify to add it anyway",
                        target.address
                    )))
                }
            }
        }

        let store = ServerStore::new(&self.config.data_dir);
        let added = store.add_server(&target.name, &target.address)?;
        println!("{}", self.coordinator.display_success(&format!("Added {}", added))?);
        Ok(())
    }

    /// Remove a server from the registry by name
    fn remove_server(&self, name: &str) -> Result<()> {
        let store = ServerStore::new(&self.config.data_dir);
        let removed = store.remove_server(name)?;
        println!(
            "{}",
            self.coordinator.display_success(&format!("Removed {}", removed))?
        );
        Ok(())
    }
}

/// Turn the raw `--target` values into concrete targets
///
/// With `--all` or no explicit targets the whole registry is used (seeding
/// it on first use). A bare token that exactly matches a registered name
/// resolves to that server; anything else is taken literally. Explicit
/// targets never touch the registry file on disk.
fn resolve_targets(all: bool, raw_targets: &[String], store: &ServerStore) -> Result<Vec<Target>> {
    if all || raw_targets.is_empty() {
        return store.load();
    }

    let registered = if store.store_path().exists() {
        store.load()?
    } else {
        Vec::new()
    };

    let mut targets = Vec::new();
    for raw in raw_targets {
        let parsed: Target = raw.parse()?;
        // a bare address token may name a registered server
        if parsed.name == parsed.address {
            if let Some(stored) = registered.iter().find(|s| s.name == parsed.name) {
                targets.push(stored.clone());
                continue;
            }
        }
        targets.push(parsed);
    }
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_resolve_empty_targets_uses_registry() {
        let temp_dir = TempDir::new().unwrap();
        let store = ServerStore::new(temp_dir.path());

        let targets = resolve_targets(false, &[], &store).unwrap();
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0].name, "Cloudflare DNS");
        assert_eq!(targets[1].name, "Google DNS");
    }

    #[test]
    fn test_resolve_all_flag_probes_the_whole_registry() {
        let temp_dir = TempDir::new().unwrap();
        let store = ServerStore::new(temp_dir.path());
        store
            .save(&[
                Target::new("office", "10.0.0.9"),
                Target::new("backbone", "10.0.0.1"),
            ])
            .unwrap();

        let targets = resolve_targets(true, &[], &store).unwrap();
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0].name, "backbone");
        assert_eq!(targets[1].name, "office");
    }

    #[test]
    fn test_resolve_bare_token_matching_registered_name() {
        let temp_dir = TempDir::new().unwrap();
        let store = ServerStore::new(temp_dir.path());
        store
            .save(&[Target::new("office", "10.0.0.9")])
            .unwrap();

        let targets = resolve_targets(false, &strings(&["office"]), &store).unwrap();
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].name, "office");
        assert_eq!(targets[0].address, "10.0.0.9");
    }

    #[test]
    fn test_resolve_unknown_bare_token_is_literal() {
        let temp_dir = TempDir::new().unwrap();
        let store = ServerStore::new(temp_dir.path());
        store
            .save(&[Target::new("office", "10.0.0.9")])
            .unwrap();

        let targets = resolve_targets(false, &strings(&["8.8.4.4"]), &store).unwrap();
        assert_eq!(targets[0].name, "8.8.4.4");
        assert_eq!(targets[0].address, "8.8.4.4");
    }

    #[test]
    fn test_resolve_named_token_ignores_registry() {
        let temp_dir = TempDir::new().unwrap();
        let store = ServerStore::new(temp_dir.path());
        store
            .save(&[Target::new("office", "10.0.0.9")])
            .unwrap();

        let targets = resolve_targets(false, &strings(&["office=192.168.0.1"]), &store).unwrap();
        assert_eq!(targets[0].name, "office");
        assert_eq!(targets[0].address, "192.168.0.1");
    }

    #[test]
    fn test_resolve_explicit_targets_never_seed_the_registry() {
        let temp_dir = TempDir::new().unwrap();
        let store = ServerStore::new(temp_dir.path());

        let targets = resolve_targets(false, &strings(&["8.8.8.8", "dns=1.1.1.1"]), &store).unwrap();
        assert_eq!(targets.len(), 2);
        assert!(!store.store_path().exists());
    }

    #[test]
    fn test_resolve_rejects_malformed_tokens() {
        let temp_dir = TempDir::new().unwrap();
        let store = ServerStore::new(temp_dir.path());

        assert!(resolve_targets(false, &strings(&["name="]), &store).is_err());
        assert!(resolve_targets(false, &strings(&["=1.1.1.1"]), &store).is_err());
    }
}
