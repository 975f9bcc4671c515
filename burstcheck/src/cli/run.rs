//! run サブコマンド
//!
//! 1バッチ分のリクエストを一斉送信し、結果を集計します。

use crate::config::DispatchConfig;
use crate::dispatch::{BatchSummary, Dispatcher};
use clap::Args;

/// run サブコマンドの引数
///
/// 省略された値は環境変数（`BURSTCHECK_*`、次に旧名）、最後にデフォルト値で補う。
/// サブコマンドなしの起動も `RunArgs::default()` として同じ経路を通る。
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// URL every request is sent to [env: BURSTCHECK_TARGET]
    #[arg(short, long)]
    pub target: Option<String>,

    /// Number of concurrent requests in the batch [env: BURSTCHECK_COUNT] [default: 100]
    #[arg(short, long)]
    pub count: Option<usize>,

    /// Per-request timeout in seconds, unbounded when unset [env: BURSTCHECK_TIMEOUT_SECS]
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Print the batch summary as JSON on stdout
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

impl TryFrom<&RunArgs> for DispatchConfig {
    type Error = crate::config::ConfigError;

    fn try_from(args: &RunArgs) -> Result<Self, Self::Error> {
        DispatchConfig::resolve(args.target.as_deref(), args.count, args.timeout_secs)
    }
}

/// How a completed batch went
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Every slot succeeded (or the batch was empty)
    AllSucceeded,
    /// At least one slot failed
    SomeFailed,
}

impl RunStatus {
    /// Status of a finished batch
    pub fn of(summary: &BatchSummary) -> Self {
        if summary.all_succeeded() {
            Self::AllSucceeded
        } else {
            Self::SomeFailed
        }
    }

    /// Process exit code for this status
    pub fn exit_code(self) -> i32 {
        match self {
            Self::AllSucceeded => 0,
            Self::SomeFailed => 2,
        }
    }
}

/// Execute one batch and report it
pub async fn execute(config: DispatchConfig, json: bool) -> anyhow::Result<RunStatus> {
    let dispatcher = Dispatcher::http(config.timeout)?;
    let summary = dispatcher.run_batch(&config.target, config.count).await?;

    summary.report();
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(RunStatus::of(&summary))
}
