//! Writer parameters for the `.npy` codec.

use crate::dtype::ByteOrder;
use crate::error::NdError;

/// Configuration for writing `.npy` files.
///
/// Reading accepts any alignment and byte order; these values only shape
/// what the writer produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NpyConfig {
    /// The preamble (magic, version, length and header) is padded to a
    /// multiple of this many bytes so the data section starts aligned.
    ///
    /// Default: 64. Must be a power of two.
    pub alignment: usize,

    /// Byte order of the element data written.
    ///
    /// Default: the host order.
    pub byte_order: ByteOrder,
}

impl NpyConfig {
    /// Default preamble alignment.
    pub const DEFAULT_ALIGNMENT: usize = 64;

    /// Default data byte order.
    pub const DEFAULT_BYTE_ORDER: ByteOrder = ByteOrder::NATIVE;

    /// Create a validated config.
    pub fn new(alignment: usize, byte_order: ByteOrder) -> Result<Self, NdError> {
        let config = Self {
            alignment,
            byte_order,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants a hand-built config must satisfy.
    pub fn validate(&self) -> Result<(), NdError> {
        if !self.alignment.is_power_of_two() {
            return Err(NdError::InvalidConfig {
                detail: format!("alignment {} is not a power of two", self.alignment),
            });
        }
        Ok(())
    }

    /// Same config writing in `byte_order`.
    pub fn with_byte_order(self, byte_order: ByteOrder) -> Self {
        Self { byte_order, ..self }
    }
}

impl Default for NpyConfig {
    fn default() -> Self {
        Self {
            alignment: Self::DEFAULT_ALIGNMENT,
            byte_order: Self::DEFAULT_BYTE_ORDER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_64_byte_native() {
        let config = NpyConfig::default();
        assert_eq!(config.alignment, 64);
        assert!(config.byte_order.is_native());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn alignment_must_be_power_of_two() {
        assert!(NpyConfig::new(48, ByteOrder::Little).is_err());
        assert!(NpyConfig::new(0, ByteOrder::Little).is_err());
        assert_eq!(NpyConfig::new(16, ByteOrder::Big).unwrap().alignment, 16);
    }

    #[test]
    fn with_byte_order_keeps_alignment() {
        let config = NpyConfig::new(32, ByteOrder::Little)
            .unwrap()
            .with_byte_order(ByteOrder::Big);
        assert_eq!(config.alignment, 32);
        assert_eq!(config.byte_order, ByteOrder::Big);
    }
}
