use std::fmt;

use serde_json::{Value, json};

use crate::{
    color::Color,
    document::{Fields, JsonData, ReadMode},
    error::{Error, Result},
    guid::{TokenGenerator, guid},
};

const DEFAULT_NAME: &str = "my_point";
const DEFAULT_WIDTH: f64 = 1.0;

/// A point in 3D space with display attributes.
///
/// The point owns its color; cloning a point clones the color with it.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub guid: String,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Display diameter.
    pub width: f64,
    pub color: Color,
}

impl Point {
    /// A point at `(x, y, z)` with a fresh id, default name and width, and a
    /// white color.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self::with_ids(guid(), Color::white(), x, y, z)
    }

    /// Like [`Point::new`], drawing the ids of the point and its color from `ids`.
    pub fn generated_by(ids: &dyn TokenGenerator, x: f64, y: f64, z: f64) -> Self {
        let guid = ids.generate();
        let color = Color::generated_by(ids, 255, 255, 255, 255).with_name("white");
        Self::with_ids(guid, color, x, y, z)
    }

    fn with_ids(guid: String, color: Color, x: f64, y: f64, z: f64) -> Self {
        Self {
            guid,
            name: DEFAULT_NAME.to_string(),
            x,
            y,
            z,
            width: DEFAULT_WIDTH,
            color,
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

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

/// `Point(x, y, z, guid, name, r,g,b,a, width)`.
///
/// Numbers use the shortest `f64` display, so `1.0` prints as `1`.
impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Color { r, g, b, a, .. } = &self.color;
        write!(
            f,
            "Point({}, {}, {}, {}, {}, {r},{g},{b},{a}, {})",
            self.x, self.y, self.z, self.guid, self.name, self.width
        )
    }
}

impl JsonData for Point {
    const TYPE: &'static str = "Point";

    fn to_json_data(&self) -> Value {
        json!({
            "type": Self::TYPE,
            "guid": self.guid,
            "name": self.name,
            "x": self.x,
            "y": self.y,
            "z": self.z,
            "width": self.width,
            "pointcolor": self.color.to_json_data(),
        })
    }

    /// JSON has no spelling for NaN or infinity.
    fn validate(&self) -> Result<()> {
        let values = [
            ("x", self.x),
            ("y", self.y),
            ("z", self.z),
            ("width", self.width),
        ];
        match values.into_iter().find(|(_, value)| !value.is_finite()) {
            Some((key, _)) => Err(Error::malformed(key, "not finite")),
            None => Ok(()),
        }
    }

    fn from_json_data_with(data: &Value, mode: ReadMode) -> Result<Self> {
        let fields = Fields::new(data, Self::TYPE, mode)?;

        let color = match fields.document("pointcolor")? {
            Some(color) => Color::from_json_data_with(color, fields.mode())?,
            None => Color::white(),
        };

        Ok(Self {
            x: fields.number("x")?,
            y: fields.number("y")?,
            z: fields.number("z")?,
            guid: fields.string_or_else("guid", guid)?,
            name: fields.string_or_else("name", || DEFAULT_NAME.to_string())?,
            width: fields.number_or("width", DEFAULT_WIDTH)?,
            color,
        })
    }
}
