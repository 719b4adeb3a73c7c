// ── Class and interface identifiers ───────────────────────────────────────────
//
// `Guid` has the exact layout of the native `GUID` / `CLSID` / `IID` structure
// so that `&Guid` can be handed to ole32 as a `REFCLSID` / `REFIID`.
// Text form is the registry form: `{6B29FC40-CA47-1067-B31D-00DD010662DA}`.

use std::{fmt, str::FromStr};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ComError;

/// A 128-bit globally unique identifier.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Guid {
    pub data1: u32,
    pub data2: u16,
    pub data3: u16,
    pub data4: [u8; 8],
}

/// `IUnknown`, the interface every COM object implements.
pub const IID_IUNKNOWN: Guid = Guid::from_u128(0x00000000_0000_0000_c000_000000000046);

/// `IDispatch`, the automation interface.
pub const IID_IDISPATCH: Guid = Guid::from_u128(0x00020400_0000_0000_c000_000000000046);

impl Guid {
    pub const fn zeroed() -> Self {
        Self {
            data1: 0,
            data2: 0,
            data3: 0,
            data4: [0; 8],
        }
    }

    /// Build from the value as it reads left to right in text form.
    pub const fn from_u128(v: u128) -> Self {
        Self {
            data1: (v >> 96) as u32,
            data2: (v >> 80) as u16,
            data3: (v >> 64) as u16,
            data4: (v as u64).to_be_bytes(),
        }
    }

    pub const fn to_u128(self) -> u128 {
        ((self.data1 as u128) << 96)
            | ((self.data2 as u128) << 80)
            | ((self.data3 as u128) << 64)
            | (u64::from_be_bytes(self.data4) as u128)
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::zeroed()
    }

    /// Parse `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`, optionally wrapped in
    /// braces.  Hex digits are case-insensitive.
    pub fn parse(text: &str) -> Result<Self, ComError> {
        let invalid = || ComError::InvalidGuid(text.to_owned());

        let trimmed = text.trim();
        let body = match (trimmed.strip_prefix('{'), trimmed.ends_with('}')) {
            (Some(rest), true) => &rest[..rest.len() - 1],
            (None, false) => trimmed,
            _ => return Err(invalid()),
        };

        let groups: Vec<&str> = body.split('-').collect();
        let lens = [8, 4, 4, 4, 12];
        if groups.len() != lens.len()
            || groups.iter().zip(lens).any(|(g, n)| g.len() != n)
            || !groups.iter().all(|g| g.bytes().all(|b| b.is_ascii_hexdigit()))
        {
            return Err(invalid());
        }

        let hex: String = groups.concat();
        let v = u128::from_str_radix(&hex, 16).map_err(|_| invalid())?;
        Ok(Self::from_u128(v))
    }
}

impl FromStr for Guid {
    type Err = ComError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = &self.data4;
        write!(
            f,
            "{{{:08X}-{:04X}-{:04X}-{:02X}{:02X}-{:02X}{:02X}{:02X}{:02X}{:02X}{:02X}}}",
            self.data1, self.data2, self.data3, d[0], d[1], d[2], d[3], d[4], d[5], d[6], d[7]
        )
    }
}

impl fmt::Debug for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Guid({self})")
    }
}

impl Serialize for Guid {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Guid {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let text = String::deserialize(d)?;
        Guid::parse(&text).map_err(de::Error::custom)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iunknown_fields() {
        assert_eq!(IID_IUNKNOWN.data1, 0);
        assert_eq!(IID_IUNKNOWN.data2, 0);
        assert_eq!(IID_IUNKNOWN.data3, 0);
        assert_eq!(IID_IUNKNOWN.data4, [0xC0, 0, 0, 0, 0, 0, 0, 0x46]);
    }

    #[test]
    fn layout_matches_native_guid() {
        assert_eq!(std::mem::size_of::<Guid>(), 16);
        assert_eq!(std::mem::align_of::<Guid>(), 4);
    }

    #[test]
    fn display_is_braced_upper_case() {
        assert_eq!(
            IID_IDISPATCH.to_string(),
            "{00020400-0000-0000-C000-000000000046}"
        );
    }

    #[test]
    fn parse_with_and_without_braces() {
        let a = Guid::parse("{6b29fc40-ca47-1067-b31d-00dd010662da}").expect("braced");
        let b = Guid::parse("6B29FC40-CA47-1067-B31D-00DD010662DA").expect("bare");
        assert_eq!(a, b);
        assert_eq!(a.data1, 0x6B29_FC40);
        assert_eq!(a.data2, 0xCA47);
        assert_eq!(a.data3, 0x1067);
        assert_eq!(a.data4, [0xB3, 0x1D, 0x00, 0xDD, 0x01, 0x06, 0x62, 0xDA]);
        assert_eq!(a.to_string(), "{6B29FC40-CA47-1067-B31D-00DD010662DA}");
    }

    #[test]
    fn parse_rejects_malformed_text() {
        for bad in [
            "",
            "{6B29FC40-CA47-1067-B31D-00DD010662DA",
            "6B29FC40-CA47-1067-B31D00DD010662DA",
            "6B29FC40-CA47-1067-B31D-00DD010662DZ",
            "+B29FC40-CA47-1067-B31D-00DD010662DA",
            "6B29FC40-CA47-1067-B31D-00DD010662DA-00",
        ] {
            assert!(
                matches!(Guid::parse(bad), Err(ComError::InvalidGuid(_))),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn serde_uses_registry_form() {
        let json = serde_json::to_string(&IID_IUNKNOWN).expect("serialize");
        assert_eq!(json, "\"{00000000-0000-0000-C000-000000000046}\"");
        let back: Guid = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, IID_IUNKNOWN);
        assert!(serde_json::from_str::<Guid>("\"nope\"").is_err());
    }

    #[test]
    fn zeroed_is_zero() {
        assert!(Guid::zeroed().is_zero());
        assert!(!IID_IUNKNOWN.is_zero());
    }
}
