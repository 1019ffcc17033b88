//! ACIM rotor-state estimator
//!
//! 誘導モーター（ACIM）のセンサレスFOC用ロータ状態推定器。
//! 測定したd-q軸電流と機械角/機械角速度から、ロータ磁束・スリップ速度・
//! 固定子電気角を制御周期ごとに推定します。
//!
//! - [`port`]: 制御ブロック間の信号ポート（値の有無を明示）
//! - [`tick`]: ハードウェアカウンタのティック差分→経過時間変換
//! - [`foc`]: ロータ磁束/位相推定器と角度ヘルパー
//! - [`config`]: デフォルトパラメータと設定構造体

#![cfg_attr(not(test), no_std)]

mod fmt;

pub mod config;
pub mod foc;
pub mod port;
pub mod tick;

pub use config::{ConfigError, EstimatorConfig};
pub use foc::{AcimEstimator, AcimOutputs, DqCurrent, EstimatorMode};
pub use port::{Component, InputPort, OutputPort};
pub use tick::{TickClock, TickSource};

#[cfg(all(target_arch = "arm", target_os = "none"))]
pub use tick::CycleCounter;
