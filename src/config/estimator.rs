//! 推定器の設定構造体
//!
//! 構築時にのみ検証し、制御ループ内ではエラーを返さない。

use core::fmt;

use super::params;

/// 設定検証のエラー型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// スリップゲインが正の有限値ではない
    InvalidSlipGain,

    /// 最大スリップ位相変化が正の有限値ではない
    InvalidMaxSlipStep,

    /// ティック周波数が0
    InvalidTickFrequency,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSlipGain => f.write_str("slip gain must be positive and finite"),
            ConfigError::InvalidMaxSlipStep => {
                f.write_str("max slip step must be positive and finite")
            }
            ConfigError::InvalidTickFrequency => f.write_str("tick frequency must be non-zero"),
        }
    }
}

/// ロータ磁束/位相推定器の設定
///
/// 推定器の生存期間中は変更されない。
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EstimatorConfig {
    /// スリップゲイン [1/s]（ロータ時定数の逆数）
    slip_gain: f32,

    /// 1周期あたりの最大スリップ位相変化 [rad]
    max_slip_step: f32,
}

impl EstimatorConfig {
    /// デフォルト設定を生成（params.rsの値を使用）
    pub const fn default() -> Self {
        Self {
            slip_gain: params::DEFAULT_SLIP_GAIN,
            max_slip_step: params::DEFAULT_MAX_SLIP_STEP,
        }
    }

    /// スリップゲインを指定して設定を生成
    ///
    /// # Arguments
    /// * `slip_gain` - スリップゲイン [1/s]
    ///
    /// # Returns
    /// * `Ok(EstimatorConfig)` - 検証成功
    /// * `Err(ConfigError::InvalidSlipGain)` - 0以下、NaN、無限大
    pub fn new(slip_gain: f32) -> Result<Self, ConfigError> {
        if !is_positive_finite(slip_gain) {
            error!("Invalid slip gain: {}", slip_gain);
            return Err(ConfigError::InvalidSlipGain);
        }

        Ok(Self {
            slip_gain,
            ..Self::default()
        })
    }

    /// 最大スリップ位相変化を差し替えた設定を返す
    pub fn with_max_slip_step(self, max_slip_step: f32) -> Result<Self, ConfigError> {
        if !is_positive_finite(max_slip_step) {
            error!("Invalid max slip step: {}", max_slip_step);
            return Err(ConfigError::InvalidMaxSlipStep);
        }

        Ok(Self {
            max_slip_step,
            ..self
        })
    }

    /// スリップゲイン [1/s]
    #[inline]
    pub fn slip_gain(&self) -> f32 {
        self.slip_gain
    }

    /// 最大スリップ位相変化 [rad]
    #[inline]
    pub fn max_slip_step(&self) -> f32 {
        self.max_slip_step
    }
}

#[inline]
fn is_positive_finite(value: f32) -> bool {
    value.is_finite() && value > 0.0
}
