use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use sysinfo::{Process, ProcessRefreshKind, ProcessesToUpdate, System};

/// MemoryUsage はレポート生成時点のメモリ使用量スナップショット（単位はバイト）。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryUsage {
    pub rss: u64,
    pub virtual_memory: u64,
    pub system_total: u64,
    pub system_used: u64,
}

/// HostInfoProvider はプロセス稼働時間とメモリ使用量を提供する。
///
/// 集約処理を実プロセスなしでテストできるよう、トレイト経由で注入する。
pub trait HostInfoProvider: Send + Sync {
    fn uptime_seconds(&self) -> f64;
    fn memory_usage(&self) -> MemoryUsage;
}

/// SystemHostInfo は sysinfo で現在のプロセスを読む HostInfoProvider 実装。
///
/// 稼働時間はプロセス起動時刻から数える。プロセス情報が取れない環境では
/// `new()` 呼び出し時点からの経過時間を返す。
pub struct SystemHostInfo {
    started_at: Instant,
}

impl SystemHostInfo {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
        }
    }
}

impl Default for SystemHostInfo {
    fn default() -> Self {
        Self::new()
    }
}

impl HostInfoProvider for SystemHostInfo {
    fn uptime_seconds(&self) -> f64 {
        let fallback = self.started_at.elapsed().as_secs_f64();
        let Ok(pid) = sysinfo::get_current_pid() else {
            return fallback;
        };

        let mut sys = System::new();
        sys.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::nothing(),
        );
        // run_time は秒単位のため、1 秒未満の精度は new() 以降の経過時間で補う
        sys.process(pid)
            .map(Process::run_time)
            .map_or(fallback, |secs| {
                fallback.max(Duration::from_secs(secs).as_secs_f64())
            })
    }

    fn memory_usage(&self) -> MemoryUsage {
        let mut sys = System::new();
        sys.refresh_memory();

        let mut usage = MemoryUsage {
            system_total: sys.total_memory(),
            system_used: sys.used_memory(),
            ..MemoryUsage::default()
        };

        // プロセス情報が取れない環境ではシステム値のみ返す
        if let Ok(pid) = sysinfo::get_current_pid() {
            sys.refresh_processes_specifics(
                ProcessesToUpdate::Some(&[pid]),
                true,
                ProcessRefreshKind::nothing().with_memory(),
            );
            if let Some(process) = sys.process(pid) {
                usage.rss = process.memory();
                usage.virtual_memory = process.virtual_memory();
            }
        }

        usage
    }
}
