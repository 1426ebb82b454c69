//! CLI route: run context built from parsed arguments; dispatches one mode
//! and streams its results through presentation.

use crate::api::{ComparisonMode, TreeCompare};
use crate::cli::parse::Cli;
use crate::cli::presentation::{format_item, OutputFormat};
use crate::config::TreeCompareConfig;
use crate::error::{Result, TreeCompareError};
use crate::tree::reconcile::PathShape;
use dialoguer::Confirm;
use std::io::{ErrorKind, Write};
use tracing::{debug, info};

/// Runtime context for one CLI invocation
pub struct RunContext {
    compare: TreeCompare,
    shape: PathShape,
    format: OutputFormat,
    interactive: bool,
}

impl RunContext {
    /// Fold CLI overrides into `config` and bind the two directories
    pub fn new(cli: &Cli, mut config: TreeCompareConfig) -> Result<Self> {
        if let Some(block_size) = cli.block_size {
            config.compare.block_size = block_size;
        }
        if let Some(ref strategy) = cli.strategy {
            config.reconcile.strategy = strategy.parse()?;
        }
        if cli.follow_symlinks {
            config.walk.follow_symlinks = true;
        }
        config.validate()?;
        debug!(config = ?config, "Resolved configuration");

        Ok(Self {
            compare: TreeCompare::new(&cli.dir1, &cli.dir2, config),
            shape: if cli.relative {
                PathShape::Relative
            } else {
                PathShape::Full
            },
            format: cli.format.parse()?,
            interactive: cli.interactive,
        })
    }

    /// Run `mode`, writing one line per result to `out`
    ///
    /// Returns the number of results written. A closed output pipe ends the
    /// run early without error.
    pub fn execute<W: Write>(&self, mode: ComparisonMode, out: &mut W) -> Result<usize> {
        info!(mode = ?mode, "Running comparison");
        let results = self.compare.run(mode)?;

        if mode == ComparisonMode::Purge && self.interactive && !confirm_purge()? {
            info!("Purge declined");
            return Ok(0);
        }

        let mut written = 0;
        for item in results {
            let mut line = format_item(&item?, self.shape, self.format)?;
            line.push(b'\n');
            match out.write_all(&line) {
                Ok(()) => written += 1,
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                    debug!("Output closed, stopping early");
                    break;
                }
                Err(e) => return Err(TreeCompareError::io("<stdout>", e)),
            }
        }
        if let Err(e) = out.flush() {
            if e.kind() != ErrorKind::BrokenPipe {
                return Err(TreeCompareError::io("<stdout>", e));
            }
        }

        info!(results = written, "Comparison finished");
        Ok(written)
    }
}

fn confirm_purge() -> Result<bool> {
    Confirm::new()
        .with_prompt("Delete files in DIR1 that are duplicated in DIR2?")
        .default(false)
        .interact()
        .map_err(|e| TreeCompareError::Config(format!("Confirmation failed: {}", e)))
}
