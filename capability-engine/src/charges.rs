//! Bearer-charge flags
//!
//! A bank may accept several charge arrangements at once, so the set is kept
//! as a bitset: containment and overlap are plain AND tests on the bits.

use crate::{Error, Result};
use bitflags::bitflags;
use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

bitflags! {
    /// Bearer-charge arrangements (ISO 20022 `ChrgBr`)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ChargeTypes: u8 {
        /// Shared: each side pays its own bank's charges
        const SHA = 1;
        /// Payer bears all charges
        const OWN = 1 << 1;
        /// Beneficiary bears all charges
        const BEN = 1 << 2;
    }
}

impl ChargeTypes {
    /// No charge arrangement
    pub const NONE: Self = Self::empty();

    /// True iff `charge` is non-empty and every one of its bits is present
    pub fn supports(self, charge: ChargeTypes) -> bool {
        !charge.is_empty() && self.contains(charge)
    }

    /// True iff at least one bit of `charges` is present
    pub fn supports_any(self, charges: ChargeTypes) -> bool {
        self.intersects(charges)
    }

    /// Flag names in bit order, `["None"]` when empty
    pub fn names(self) -> Vec<&'static str> {
        if self.is_empty() {
            return vec!["None"];
        }
        self.iter_names().map(|(name, _)| name).collect()
    }

    /// Parse flag names or a raw bit combination.
    ///
    /// Accepts `"SHA"`, `"sha | own"`, `"SHA, BEN"`, `"3"` and `"None"`.
    /// Unknown bits in numeric input are dropped.
    pub fn parse(input: &str) -> Result<Self> {
        let mut flags = ChargeTypes::NONE;

        for token in input
            .split(|c: char| c == '|' || c == ',' || c == '+' || c.is_whitespace())
            .filter(|t| !t.is_empty())
        {
            if let Ok(bits) = token.parse::<u64>() {
                flags |= Self::from_raw(bits);
                continue;
            }

            let upper = token.to_ascii_uppercase();
            if upper == "NONE" {
                continue;
            }

            let flag = ChargeTypes::from_name(&upper)
                .ok_or_else(|| Error::Parse(format!("Unknown charge type: {}", token)))?;
            flags |= flag;
        }

        Ok(flags)
    }

    /// Build from a raw numeric combination, truncating unknown bits
    pub fn from_raw(bits: u64) -> Self {
        let known = bits & u64::from(ChargeTypes::all().bits());
        // `known` fits in the three low bits
        ChargeTypes::from_bits_truncate(known as u8)
    }
}

impl Default for ChargeTypes {
    fn default() -> Self {
        ChargeTypes::NONE
    }
}

impl Serialize for ChargeTypes {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.names().join(" | "))
    }
}

impl<'de> Deserialize<'de> for ChargeTypes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(ChargeTypesVisitor)
    }
}

struct ChargeTypesVisitor;

impl<'de> Visitor<'de> for ChargeTypesVisitor {
    type Value = ChargeTypes;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a charge type name, a list of names, or a numeric bit combination")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<ChargeTypes, E> {
        Ok(ChargeTypes::from_raw(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<ChargeTypes, E> {
        u64::try_from(v)
            .map(ChargeTypes::from_raw)
            .map_err(|_| E::custom(format!("negative charge type bits: {}", v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<ChargeTypes, E> {
        ChargeTypes::parse(v).map_err(E::custom)
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<ChargeTypes, E> {
        Ok(ChargeTypes::NONE)
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<ChargeTypes, E> {
        Ok(ChargeTypes::NONE)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<ChargeTypes, A::Error> {
        let mut flags = ChargeTypes::NONE;
        while let Some(item) = seq.next_element::<ChargeTypes>()? {
            flags |= item;
        }
        Ok(flags)
    }
}
