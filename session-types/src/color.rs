use std::fmt;

use serde_json::{Value, json};

use crate::{
    document::{Fields, JsonData, ReadMode},
    error::{Error, Result},
    guid::{TokenGenerator, guid},
};

const DEFAULT_NAME: &str = "my_color";

/// An RGBA color with 8-bit channels. Alpha 255 is fully opaque.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Color {
    pub guid: String,
    pub name: String,
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::with_id(guid(), r, g, b, a)
    }

    /// Like [`Color::new`], drawing the identity token from `ids`.
    pub fn generated_by(ids: &dyn TokenGenerator, r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::with_id(ids.generate(), r, g, b, a)
    }

    fn with_id(guid: String, r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            guid,
            name: DEFAULT_NAME.to_string(),
            r,
            g,
            b,
            a,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_guid(mut self, guid: impl Into<String>) -> Self {
        self.guid = guid.into();
        self
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255).with_name("white")
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255).with_name("black")
    }

    /// Channels normalized to `[0, 1]`.
    pub fn to_float_array(&self) -> [f64; 4] {
        [self.r, self.g, self.b, self.a].map(|c| f64::from(c) / 255.0)
    }

    /// Inverse of [`Color::to_float_array`], rounding half up.
    ///
    /// Components outside `[0, 1]` saturate to 0 or 255.
    pub fn from_float(r: f64, g: f64, b: f64, a: f64) -> Self {
        fn channel(value: f64) -> u8 {
            (value * 255.0 + 0.5) as u8
        }

        Self::new(channel(r), channel(g), channel(b), channel(a))
    }

    /// Parses `#rrggbb` or `#rrggbbaa`; the `#` is optional and alpha defaults
    /// to opaque.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidHex(hex.to_string()));
        }
        let byte = |at: usize| {
            digits
                .get(at..at + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| Error::InvalidHex(hex.to_string()))
        };

        match digits.len() {
            6 => Ok(Self::new(byte(0)?, byte(2)?, byte(4)?, 255)),
            8 => Ok(Self::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(Error::InvalidHex(hex.to_string())),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new(255, 255, 255, 255)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Color(r={}, g={}, b={}, a={})",
            self.r, self.g, self.b, self.a
        )
    }
}

impl JsonData for Color {
    const TYPE: &'static str = "Color";

    fn to_json_data(&self) -> Value {
        json!({
            "type": Self::TYPE,
            "guid": self.guid,
            "name": self.name,
            "r": self.r,
            "g": self.g,
            "b": self.b,
            "a": self.a,
        })
    }

    fn from_json_data_with(data: &Value, mode: ReadMode) -> Result<Self> {
        let fields = Fields::new(data, Self::TYPE, mode)?;

        Ok(Self {
            r: fields.channel("r")?,
            g: fields.channel("g")?,
            b: fields.channel("b")?,
            a: fields.channel("a")?,
            guid: fields.string_or_else("guid", guid)?,
            name: fields.string_or_else("name", || DEFAULT_NAME.to_string())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::guid::{SequenceGenerator, is_guid};

    #[test]
    fn named_constructors() {
        let white = Color::white();
        assert_eq!((white.r, white.g, white.b, white.a), (255, 255, 255, 255));
        assert_eq!(white.name, "white");

        let black = Color::black();
        assert_eq!((black.r, black.g, black.b, black.a), (0, 0, 0, 255));
        assert_eq!(black.name, "black");
    }

    #[test]
    fn default_is_opaque_white_with_fresh_id() {
        let color = Color::default();
        assert_eq!((color.r, color.g, color.b, color.a), (255, 255, 255, 255));
        assert_eq!(color.name, "my_color");
        assert!(is_guid(&color.guid));
        assert_ne!(color.guid, Color::default().guid);
    }

    #[test]
    fn float_conversion_round_trips_every_channel_value() {
        for v in 0..=255u8 {
            let color = Color::new(v, 255 - v, v / 2, v);
            let [r, g, b, a] = color.to_float_array();
            let restored = Color::from_float(r, g, b, a);
            assert_eq!(
                (restored.r, restored.g, restored.b, restored.a),
                (color.r, color.g, color.b, color.a)
            );
        }
    }

    #[test]
    fn from_float_rounds_half_up_and_saturates() {
        let color = Color::from_float(0.5, 1.0, -0.25, 2.0);
        assert_eq!((color.r, color.g, color.b, color.a), (128, 255, 0, 255));
        assert_eq!(Color::black().to_float_array(), [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn parse_hex_with_and_without_alpha() {
        let color = Color::from_hex("#10203040").unwrap();
        assert_eq!((color.r, color.g, color.b, color.a), (0x10, 0x20, 0x30, 0x40));

        let color = Color::from_hex("ff8000").unwrap();
        assert_eq!((color.r, color.g, color.b, color.a), (255, 128, 0, 255));

        assert!(matches!(Color::from_hex("#12345"), Err(Error::InvalidHex(_))));
        assert!(matches!(Color::from_hex("zz0000"), Err(Error::InvalidHex(_))));
        assert!(matches!(Color::from_hex("#ééé"), Err(Error::InvalidHex(_))));
        assert!(matches!(Color::from_hex("+f+f+f"), Err(Error::InvalidHex(_))));
    }

    #[test]
    fn json_data_keeps_key_order() {
        let ids = SequenceGenerator::new();
        let color = Color::generated_by(&ids, 1, 2, 3, 4).with_name("c");
        let data = color.to_json_data();

        let keys: Vec<&str> = data.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["type", "guid", "name", "r", "g", "b", "a"]);
        assert_eq!(
            data,
            json!({
                "type": "Color",
                "guid": "00000000-0000-4000-8000-000000000001",
                "name": "c",
                "r": 1, "g": 2, "b": 3, "a": 4,
            })
        );
    }

    #[test]
    fn json_data_round_trip() {
        let color = Color::new(12, 34, 56, 78).with_name("ocean");
        assert_eq!(Color::from_json_data(&color.to_json_data()).unwrap(), color);
    }

    #[test]
    fn missing_channel_is_malformed_in_every_mode() {
        let data = json!({ "type": "Color", "guid": "g", "name": "n", "r": 1, "g": 2, "b": 3 });
        for mode in [ReadMode::Strict, ReadMode::Permissive] {
            assert!(matches!(
                Color::from_json_data_with(&data, mode),
                Err(Error::MalformedInput { key, .. }) if key == "a"
            ));
        }
    }

    #[test]
    fn optional_keys_default_only_when_permissive() {
        let data = json!({ "r": 1, "g": 2, "b": 3, "a": 4 });
        assert!(Color::from_json_data(&data).is_err());

        let color = Color::from_json_data_with(&data, ReadMode::Permissive).unwrap();
        assert_eq!(color.name, "my_color");
        assert!(is_guid(&color.guid));
        assert_eq!((color.r, color.g, color.b, color.a), (1, 2, 3, 4));
    }

    #[test]
    fn display() {
        assert_eq!(
            Color::new(1, 2, 3, 4).to_string(),
            "Color(r=1, g=2, b=3, a=4)"
        );
    }
}
