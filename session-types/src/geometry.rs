use std::{fmt, path::Path};

use serde_json::Value;

use crate::{
    color::Color,
    document::{self, JsonData, ReadMode},
    error::{Error, Result},
    point::Point,
};

/// Any record this crate knows how to decode, selected by its `type` key.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Color(Color),
    Point(Point),
}

impl Geometry {
    pub fn from_json_data_with(data: &Value, mode: ReadMode) -> Result<Self> {
        match data.get("type").and_then(Value::as_str) {
            Some(tag) if tag == Color::TYPE => {
                Color::from_json_data_with(data, mode).map(Self::Color)
            }
            Some(tag) if tag == Point::TYPE => {
                Point::from_json_data_with(data, mode).map(Self::Point)
            }
            Some(other) => Err(Error::malformed(
                "type",
                format!("unknown record type \"{other}\""),
            )),
            None => Err(Error::malformed("type", "missing")),
        }
    }

    pub fn from_json_with(path: impl AsRef<Path>, mode: ReadMode) -> Result<Self> {
        Self::from_json_data_with(&document::read(path)?, mode)
    }

    pub fn to_json_data(&self) -> Value {
        match self {
            Self::Color(color) => color.to_json_data(),
            Self::Point(point) => point.to_json_data(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Color(_) => Color::TYPE,
            Self::Point(_) => Point::TYPE,
        }
    }
}

impl From<Color> for Geometry {
    fn from(color: Color) -> Self {
        Self::Color(color)
    }
}

impl From<Point> for Geometry {
    fn from(point: Point) -> Self {
        Self::Point(point)
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Color(color) => color.fmt(f),
            Self::Point(point) => point.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn dispatches_on_type_tag() {
        let point = Point::new(1.0, 2.0, 3.0);
        let decoded =
            Geometry::from_json_data_with(&point.to_json_data(), ReadMode::Strict).unwrap();
        assert_eq!(decoded, Geometry::Point(point));

        let color = Color::black();
        let decoded =
            Geometry::from_json_data_with(&color.to_json_data(), ReadMode::Strict).unwrap();
        assert_eq!(decoded.type_name(), "Color");
        assert_eq!(decoded.to_json_data(), color.to_json_data());
    }

    #[test]
    fn unknown_or_missing_tag_is_malformed() {
        for data in [json!({ "type": "Mesh" }), json!({ "x": 1 }), json!(42)] {
            assert!(matches!(
                Geometry::from_json_data_with(&data, ReadMode::Permissive),
                Err(Error::MalformedInput { key, .. }) if key == "type"
            ));
        }
    }

    #[test]
    fn display_delegates() {
        let color = Color::new(9, 8, 7, 6);
        assert_eq!(
            Geometry::from(color).to_string(),
            "Color(r=9, g=8, b=7, a=6)"
        );
    }
}
