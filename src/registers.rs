use num_bigint::{BigInt, Sign};

/// Accumulator and data register.
///
/// Registers have no fixed width, so values are never clamped or wrapped. Overflow is only
/// observed by the arithmetic opcodes, through [`Flags`].
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct RegisterFile {
    acc: BigInt,
    data: BigInt,
}

impl RegisterFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accumulator(&self) -> &BigInt {
        &self.acc
    }

    pub fn set_accumulator(&mut self, val: impl Into<BigInt>) {
        self.acc = val.into();
    }

    pub fn data_register(&self) -> &BigInt {
        &self.data
    }

    pub fn set_data_register(&mut self, val: impl Into<BigInt>) {
        self.data = val.into();
    }

    /// Exchange accumulator and data register.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.acc, &mut self.data);
    }
}

/// Condition flags, set only by `ADD` and `SUB`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Flags {
    pub zero: bool,
    pub overflow: bool,
}

impl Flags {
    /// Recompute both flags from the accumulator.
    ///
    /// Overflow means the value no longer fits a 32-bit signed word.
    pub fn update(&mut self, acc: &BigInt) {
        self.zero = acc.sign() == Sign::NoSign;
        self.overflow = i32::try_from(acc).is_err();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn swap_registers() {
        let mut reg = RegisterFile::new();
        reg.set_accumulator(4);
        reg.set_data_register(-9);
        reg.swap();
        assert_eq!(reg.accumulator(), &BigInt::from(-9));
        assert_eq!(reg.data_register(), &BigInt::from(4));
    }

    #[test]
    fn flag_bounds() {
        #[rustfmt::skip]
        let cases = [
            // (acc, zero, overflow)
            (0, true, false),
            (1, false, false),
            (i32::MAX as i64, false, false),
            (i32::MAX as i64 + 1, false, true),
            (i32::MIN as i64, false, false),
            (i32::MIN as i64 - 1, false, true),
            (i64::MAX, false, true),
        ];
        for (acc, zero, overflow) in cases {
            let mut flags = Flags::default();
            flags.update(&BigInt::from(acc));
            assert_eq!(flags, Flags { zero, overflow }, "flags for {acc}");
        }
    }

    #[test]
    fn flags_past_64_bits() {
        let mut flags = Flags::default();
        let huge = BigInt::from(1) << 100u32;
        flags.update(&huge);
        assert_eq!(flags, Flags { zero: false, overflow: true });
        flags.update(&(&huge - &huge));
        assert_eq!(flags, Flags { zero: true, overflow: false });
    }
}
