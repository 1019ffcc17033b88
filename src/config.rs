//! Configuration module
//!
//! このモジュールはロータ状態推定器のパラメータと、
//! 構築時に検証される設定構造体を提供します。

pub mod estimator;
pub mod params;

// params.rsから主要な定数を再エクスポート
pub use params::*;

// estimator.rsから構造体を再エクスポート
pub use estimator::{ConfigError, EstimatorConfig};
