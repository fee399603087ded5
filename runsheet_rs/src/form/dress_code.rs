use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// `#rrggbb` の色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    value: u32,
}

impl HexColor {
    pub fn from_rgb(value: u32) -> Self {
        Self {
            value: value & 0xff_ffff,
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        let invalid = || Error::InvalidColor(value.to_string());

        let digits = value.trim().strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let value = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
        Ok(Self { value })
    }

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::from_rgb(rng.gen_range(0..=0xff_ffff))
    }

    pub fn rgb(&self) -> u32 {
        self.value
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.value)
    }
}

impl FromStr for HexColor {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl TryFrom<String> for HexColor {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DressCode {
    primary: HexColor,
    secondary: HexColor,
}

impl Default for DressCode {
    fn default() -> Self {
        Self {
            primary: HexColor::from_rgb(0x00ff00),
            secondary: HexColor::from_rgb(0xffffff),
        }
    }
}

impl DressCode {
    pub fn new(primary: HexColor, secondary: HexColor) -> Self {
        Self { primary, secondary }
    }

    pub fn set_primary(&mut self, value: &str) -> Result<()> {
        self.primary = HexColor::parse(value)?;
        Ok(())
    }

    pub fn set_secondary(&mut self, value: &str) -> Result<()> {
        self.secondary = HexColor::parse(value)?;
        Ok(())
    }

    pub fn primary(&self) -> HexColor {
        self.primary
    }

    pub fn secondary(&self) -> HexColor {
        self.secondary
    }

    /// 2 色とも乱数で決め直します
    pub fn randomize(&mut self) {
        self.randomize_with(&mut rand::thread_rng());
    }

    pub fn randomize_with<R: Rng>(&mut self, rng: &mut R) {
        self.primary = HexColor::random(rng);
        self.secondary = HexColor::random(rng);
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::{DressCode, HexColor};

    #[test]
    fn parse() {
        let color = HexColor::parse("#1A2b3c").unwrap();
        assert_eq!(color.rgb(), 0x1a2b3c);
        assert_eq!(color.to_string(), "#1a2b3c");

        assert!(HexColor::parse("1a2b3c").is_err());
        assert!(HexColor::parse("#1a2b3").is_err());
        assert!(HexColor::parse("#1a2b3g").is_err());
        assert!(HexColor::parse("#+1a2b3").is_err());
    }

    // 先頭の 0 も 6 桁で出す
    #[test]
    fn padded() {
        assert_eq!(HexColor::from_rgb(0xff).to_string(), "#0000ff");
        assert_eq!(HexColor::from_rgb(0x1ff_ffff).to_string(), "#ffffff");
    }

    #[test]
    fn dress_code() {
        let mut dress_code = DressCode::default();
        assert_eq!(dress_code.primary().to_string(), "#00ff00");
        assert_eq!(dress_code.secondary().to_string(), "#ffffff");

        dress_code.set_primary("#000000").unwrap();
        assert!(dress_code.set_secondary("white").is_err());
        assert_eq!(dress_code.primary().rgb(), 0);
        assert_eq!(dress_code.secondary().to_string(), "#ffffff");
    }

    #[test]
    fn randomize() {
        let mut dress_code = DressCode::default();
        dress_code.randomize_with(&mut StdRng::seed_from_u64(7));

        for color in [dress_code.primary(), dress_code.secondary()] {
            let text = color.to_string();
            assert_eq!(text.len(), 7);
            assert_eq!(HexColor::parse(&text).unwrap(), color);
        }

        // 同じ種なら同じ色
        let mut other = DressCode::default();
        other.randomize_with(&mut StdRng::seed_from_u64(7));
        assert_eq!(other, dress_code);
    }

    #[test]
    fn serialize() {
        let json = serde_json::to_string(&DressCode::default()).unwrap();
        assert_eq!(json, r##"{"primary":"#00ff00","secondary":"#ffffff"}"##);
        assert!(
            serde_json::from_str::<DressCode>(r##"{"primary":"red","secondary":"#ffffff"}"##)
                .is_err()
        );
    }
}
