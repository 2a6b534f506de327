//! Vector width selection for buffer comparison.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::scalar::WORD;
use crate::error::UnknownStrategy;

/// Widest comparison kernel the dispatcher may use.
///
/// A strategy also permits every narrower width below it, so `Avx512`
/// still compares a 40-byte region with 32-byte AVX2 chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompareStrategy {
    /// Machine-word chunks only.
    Scalar,
    /// 128-bit x86 vectors.
    Sse2,
    /// 256-bit x86 vectors.
    Avx2,
    /// 512-bit x86 vectors (needs AVX-512F and AVX-512BW).
    Avx512,
    /// 128-bit AArch64 vectors.
    Neon,
}

impl CompareStrategy {
    pub const ALL: [CompareStrategy; 5] = [
        CompareStrategy::Scalar,
        CompareStrategy::Sse2,
        CompareStrategy::Avx2,
        CompareStrategy::Avx512,
        CompareStrategy::Neon,
    ];

    /// Bytes compared per step by the widest kernel of this strategy.
    pub const fn widest_width(self) -> usize {
        match self {
            CompareStrategy::Scalar => WORD,
            CompareStrategy::Sse2 | CompareStrategy::Neon => 16,
            CompareStrategy::Avx2 => 32,
            CompareStrategy::Avx512 => 64,
        }
    }

    /// Whether the running CPU can execute this strategy.
    pub fn is_supported(self) -> bool {
        match self {
            CompareStrategy::Scalar => true,
            #[cfg(target_arch = "x86_64")]
            CompareStrategy::Sse2 => std::arch::is_x86_feature_detected!("sse2"),
            #[cfg(target_arch = "x86_64")]
            CompareStrategy::Avx2 => {
                std::arch::is_x86_feature_detected!("sse2")
                    && std::arch::is_x86_feature_detected!("avx2")
            }
            #[cfg(target_arch = "x86_64")]
            CompareStrategy::Avx512 => {
                std::arch::is_x86_feature_detected!("sse2")
                    && std::arch::is_x86_feature_detected!("avx2")
                    && std::arch::is_x86_feature_detected!("avx512f")
                    && std::arch::is_x86_feature_detected!("avx512bw")
            }
            #[cfg(target_arch = "aarch64")]
            CompareStrategy::Neon => std::arch::is_aarch64_feature_detected!("neon"),
            #[allow(unreachable_patterns)]
            _ => false,
        }
    }

    /// The widest supported strategy on this CPU.
    pub fn detect() -> Self {
        [
            CompareStrategy::Avx512,
            CompareStrategy::Avx2,
            CompareStrategy::Sse2,
            CompareStrategy::Neon,
        ]
        .into_iter()
        .find(|s| s.is_supported())
        .unwrap_or(CompareStrategy::Scalar)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            CompareStrategy::Scalar => "scalar",
            CompareStrategy::Sse2 => "sse2",
            CompareStrategy::Avx2 => "avx2",
            CompareStrategy::Avx512 => "avx512",
            CompareStrategy::Neon => "neon",
        }
    }
}

impl fmt::Display for CompareStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompareStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == wanted)
            .ok_or_else(|| UnknownStrategy(s.to_string()))
    }
}
