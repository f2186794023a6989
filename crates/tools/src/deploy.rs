//! Building, deploying and initializing the contracts through the `stellar` CLI.
//!
//! Every operation is first turned into an [`Invocation`] so it can be shown
//! with `--dry-run` or executed as a subprocess.

use crate::config::{Config, ConfigError};
use crate::contracts::ContractKind;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;

pub const STELLAR_CLI: &str = "stellar";
pub const WASM_TARGET: &str = "wasm32-unknown-unknown";

#[derive(Error, Debug)]
pub enum DeployError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("No source account configured; set SOROBAN_ACCOUNT or profile.<network>.account")]
    MissingAccount,

    #[error("WASM file not found: {0}")]
    WasmNotFound(PathBuf),

    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {code:?}: {stderr}")]
    CommandFailed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("{program} timed out after {timeout_ms}ms")]
    Timeout { program: String, timeout_ms: u64 },
}

/// A fully-resolved external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    fn stellar<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Invocation {
            program: STELLAR_CLI.to_string(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    fn with_network(mut self, config: &Config) -> Result<Self, DeployError> {
        let account = config.account.as_deref().ok_or(DeployError::MissingAccount)?;
        self.args.extend([
            "--source".to_string(),
            account.to_string(),
            "--rpc-url".to_string(),
            config.rpc_url.clone(),
            "--network-passphrase".to_string(),
            config.network_passphrase.clone(),
        ]);
        Ok(self)
    }

    /// Run to completion and return trimmed stdout.
    pub async fn run(&self, timeout: Duration) -> Result<String, DeployError> {
        tracing::debug!(command = %self, "running");

        let child = Command::new(&self.program)
            .args(&self.args)
            .kill_on_drop(true)
            .output();

        let output = tokio::time::timeout(timeout, child)
            .await
            .map_err(|_| DeployError::Timeout {
                program: self.program.clone(),
                timeout_ms: timeout.as_millis() as u64,
            })?
            .map_err(|source| DeployError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(DeployError::CommandFailed {
                program: self.program.clone(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        tracing::debug!(%stdout, "command finished");
        Ok(stdout)
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) || arg.contains(';') {
                write!(f, " '{}'", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Where `stellar contract build` leaves the optimized module.
pub fn default_wasm_path(kind: ContractKind, profile: &str) -> PathBuf {
    Path::new("target")
        .join(WASM_TARGET)
        .join(profile)
        .join(kind.wasm_file())
}

/// Build one contract, or the whole workspace when `kind` is `None`.
pub fn build_invocation(kind: Option<ContractKind>, profile: &str) -> Invocation {
    let invocation = Invocation::stellar(["contract", "build", "--profile", profile]);
    match kind {
        Some(kind) => invocation.with_args(["--package", kind.package()]),
        None => invocation,
    }
}

pub fn deploy_invocation(config: &Config, wasm: &Path) -> Result<Invocation, DeployError> {
    Invocation::stellar(["contract", "deploy", "--wasm"])
        .with_args([wasm.display().to_string()])
        .with_network(config)
}

/// Call `init(admin)` on an already deployed contract.
pub fn init_invocation(config: &Config, kind: ContractKind, admin: &str) -> Result<Invocation, DeployError> {
    let contract_id = config.contract_id(kind)?;
    let invocation = Invocation::stellar(["contract", "invoke", "--id", contract_id]).with_network(config)?;
    Ok(invocation.with_args(["--", "init", "--admin", admin]))
}

/// Deploy a compiled contract and return the new contract id.
pub async fn deploy(config: &Config, kind: ContractKind, wasm: &Path, dry_run: bool) -> Result<Option<String>, DeployError> {
    if !dry_run && !wasm.exists() {
        return Err(DeployError::WasmNotFound(wasm.to_path_buf()));
    }

    let invocation = deploy_invocation(config, wasm)?;
    if dry_run {
        println!("{}", invocation);
        return Ok(None);
    }

    tracing::info!(contract = %kind, network = %config.network, "deploying");
    let contract_id = invocation
        .run(Duration::from_millis(config.rpc_timeout_ms))
        .await?;
    tracing::info!(contract = %kind, %contract_id, "deployed; export {}={}", kind.env_var(), contract_id);
    Ok(Some(contract_id))
}
