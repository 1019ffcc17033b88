//! ティック→時間変換モジュール
//!
//! フリーランニングのハードウェアカウンタ（32ビット、ラップアラウンドあり）の
//! 差分から経過時間 [s] を計算します。
//!
//! ラップアラウンドは `u32::wrapping_sub` によるモジュラ減算で処理するため、
//! 2回のサンプル間でカウンタが一周しても正しい（小さな正の）経過時間が得られます。
//! 一周以上経過した場合はカウンタ周期を法とした値になります。

use crate::config::{ConfigError, DEFAULT_TICK_HZ};

/// カウンタ周波数を保持する変換器
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickClock {
    /// カウンタ周波数 [Hz]
    frequency_hz: u32,
}

impl TickClock {
    /// コアクロック（DWTサイクルカウンタ）用の変換器
    pub const fn core_clock() -> Self {
        Self {
            frequency_hz: DEFAULT_TICK_HZ,
        }
    }

    /// 任意周波数のカウンタ用の変換器を作成
    ///
    /// # Arguments
    /// * `frequency_hz` - カウンタ周波数 [Hz]
    ///
    /// # Returns
    /// * `Err(ConfigError::InvalidTickFrequency)` - 周波数が0の場合
    pub fn new(frequency_hz: u32) -> Result<Self, ConfigError> {
        if frequency_hz == 0 {
            error!("Tick frequency must be non-zero");
            return Err(ConfigError::InvalidTickFrequency);
        }
        Ok(Self { frequency_hz })
    }

    #[inline]
    pub fn frequency_hz(&self) -> u32 {
        self.frequency_hz
    }

    /// 前回から今回までのティック数（ラップアラウンド対応）
    #[inline]
    pub fn elapsed_ticks(previous: u32, current: u32) -> u32 {
        current.wrapping_sub(previous)
    }

    /// 前回から今回までの経過時間 [s]
    ///
    /// # Arguments
    /// * `previous` - 前回のティック値
    /// * `current` - 今回のティック値
    #[inline]
    pub fn elapsed_secs(&self, previous: u32, current: u32) -> f32 {
        Self::elapsed_ticks(previous, current) as f32 / self.frequency_hz as f32
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::core_clock()
    }
}

/// 現在のティック値を提供するカウンタ
pub trait TickSource {
    /// 現在のティック値（フリーランニング、ラップアラウンドあり）
    fn now(&mut self) -> u32;
}

#[cfg(all(target_arch = "arm", target_os = "none"))]
pub use cycle_counter::CycleCounter;

#[cfg(all(target_arch = "arm", target_os = "none"))]
mod cycle_counter {
    use cortex_m::peripheral::{DCB, DWT};

    use super::TickSource;

    /// DWTサイクルカウンタ（コアクロック 170MHz、約25秒で一周）
    pub struct CycleCounter {
        _private: (),
    }

    impl CycleCounter {
        /// トレースとDWTサイクルカウンタを有効化
        pub fn enable(dcb: &mut DCB, dwt: &mut DWT) -> Self {
            dcb.enable_trace();
            dwt.enable_cycle_counter();
            info!("DWT cycle counter enabled");
            Self { _private: () }
        }
    }

    impl TickSource for CycleCounter {
        #[inline]
        fn now(&mut self) -> u32 {
            DWT::cycle_count()
        }
    }
}
