//! ロータ状態推定とタイマーの設定パラメータ

/// スリップゲイン [1/s]（ロータ時定数の逆数）（デフォルト値）
/// 一般的な小型誘導モーターのロータ時定数 約68ms に相当
pub const DEFAULT_SLIP_GAIN: f32 = 14.706;

/// 1制御周期あたりの最大スリップ位相変化 [rad]（デフォルト値）
/// スリップ速度のしきい値は `DEFAULT_MAX_SLIP_STEP / dt` となる
pub const DEFAULT_MAX_SLIP_STEP: f32 = 0.1;

/// タイムスタンプ用カウンタの周波数 [Hz]
/// STM32G431VB コアクロック 170MHz（DWTサイクルカウンタ）
pub const DEFAULT_TICK_HZ: u32 = 170_000_000;

/// 制御周期 [μs]（10kHz = 100μs）（デフォルト値）
pub const DEFAULT_CONTROL_PERIOD_US: u32 = 100;

/// 1制御周期あたりのティック数（デフォルトのクロックと制御周期から算出）
pub const DEFAULT_TICKS_PER_CYCLE: u32 = DEFAULT_TICK_HZ / 1_000_000 * DEFAULT_CONTROL_PERIOD_US;

/// スリップ制限が連続で発動した場合の警告ログ間隔 [周期]
/// 10kHzで約0.1秒ごと
pub const CLAMP_WARN_INTERVAL: u32 = 1000;
