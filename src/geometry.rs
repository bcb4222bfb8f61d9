//! GeoJSON geometry parsing and validation (RFC 7946 §3.1), plus the LPF
//! certainty annotation. No geometry algorithms live here; only the
//! nesting grammar of `coordinates` is checked.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::error::{json_kind, LpfError, Result};

// ------------- GeometryKind -------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
    GeometryCollection,
}

impl GeometryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeometryKind::Point => "Point",
            GeometryKind::MultiPoint => "MultiPoint",
            GeometryKind::LineString => "LineString",
            GeometryKind::MultiLineString => "MultiLineString",
            GeometryKind::Polygon => "Polygon",
            GeometryKind::MultiPolygon => "MultiPolygon",
            GeometryKind::GeometryCollection => "GeometryCollection",
        }
    }
}

impl FromStr for GeometryKind {
    type Err = LpfError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Point" => Ok(GeometryKind::Point),
            "MultiPoint" => Ok(GeometryKind::MultiPoint),
            "LineString" => Ok(GeometryKind::LineString),
            "MultiLineString" => Ok(GeometryKind::MultiLineString),
            "Polygon" => Ok(GeometryKind::Polygon),
            "MultiPolygon" => Ok(GeometryKind::MultiPolygon),
            "GeometryCollection" => Ok(GeometryKind::GeometryCollection),
            other => Err(LpfError::InvalidGeometry {
                kind: other.to_string(),
                message: "unknown geometry type".to_string(),
            }),
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ------------- Certainty -------------

/// Confidence in a geometry's accuracy (LPF extension).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Certainty {
    Certain,
    LessCertain,
    Uncertain,
}

impl Certainty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Certainty::Certain => "certain",
            Certainty::LessCertain => "less-certain",
            Certainty::Uncertain => "uncertain",
        }
    }
}

impl FromStr for Certainty {
    type Err = LpfError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "certain" => Ok(Certainty::Certain),
            "less-certain" => Ok(Certainty::LessCertain),
            "uncertain" => Ok(Certainty::Uncertain),
            other => Err(LpfError::InvalidCertainty(other.to_string())),
        }
    }
}

impl fmt::Display for Certainty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ------------- Geometry -------------

/// A validated GeoJSON geometry. For `GeometryCollection` the members
/// live in `geometries` and `coordinates` is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    kind: GeometryKind,
    coordinates: Value,
    geometries: Vec<Geometry>,
    certainty: Option<Certainty>,
}

impl Geometry {
    pub fn new(kind: GeometryKind, coordinates: Value, certainty: Option<Certainty>) -> Result<Self> {
        if kind == GeometryKind::GeometryCollection {
            return Err(LpfError::InvalidGeometry {
                kind: kind.to_string(),
                message: "a GeometryCollection carries geometries, not coordinates".to_string(),
            });
        }
        validate_coordinates(kind, &coordinates)?;
        Ok(Self {
            kind,
            coordinates,
            geometries: Vec::new(),
            certainty,
        })
    }

    pub fn collection(geometries: Vec<Geometry>, certainty: Option<Certainty>) -> Self {
        Self {
            kind: GeometryKind::GeometryCollection,
            coordinates: Value::Null,
            geometries,
            certainty,
        }
    }

    /// Build from a GeoJSON geometry object. A non-empty `when` member is
    /// recognized but unsupported and fails rather than being dropped.
    pub fn from_value(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| LpfError::Shape {
            field: "Feature:geometry".to_string(),
            expected: "a GeoJSON geometry object",
            found: json_kind(value),
        })?;
        let kind: GeometryKind = object
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| LpfError::Shape {
                field: "Feature:geometry:type".to_string(),
                expected: "a geometry type string",
                found: json_kind(object.get("type").unwrap_or(&Value::Null)),
            })?
            .parse()?;
        let certainty = match object.get("certainty") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.parse()?),
            Some(other) => {
                return Err(LpfError::Shape {
                    field: "Feature:geometry:certainty".to_string(),
                    expected: "a string",
                    found: json_kind(other),
                })
            }
        };
        if !is_empty_member(object.get("when")) {
            return Err(LpfError::NotImplemented("temporal scoping (when) on geometries"));
        }
        if kind == GeometryKind::GeometryCollection {
            let members = object
                .get("geometries")
                .and_then(Value::as_array)
                .ok_or_else(|| LpfError::InvalidGeometry {
                    kind: kind.to_string(),
                    message: "geometries must be an array of geometry objects".to_string(),
                })?;
            let geometries = members
                .iter()
                .map(Geometry::from_value)
                .collect::<Result<Vec<_>>>()?;
            Ok(Geometry::collection(geometries, certainty))
        } else {
            let coordinates = object.get("coordinates").cloned().unwrap_or(Value::Null);
            Geometry::new(kind, coordinates, certainty)
        }
    }

    pub fn kind(&self) -> GeometryKind {
        self.kind
    }

    pub fn coordinates(&self) -> &Value {
        &self.coordinates
    }

    pub fn geometries(&self) -> &[Geometry] {
        &self.geometries
    }

    pub fn certainty(&self) -> Option<Certainty> {
        self.certainty
    }

    pub fn asdict(&self) -> Value {
        let mut result = Map::new();
        result.insert(
            "type".to_string(),
            Value::String(self.kind.as_str().to_string()),
        );
        if self.kind == GeometryKind::GeometryCollection {
            result.insert(
                "geometries".to_string(),
                Value::Array(self.geometries.iter().map(Geometry::asdict).collect()),
            );
        } else {
            result.insert("coordinates".to_string(), self.coordinates.clone());
        }
        if let Some(certainty) = self.certainty {
            result.insert(
                "certainty".to_string(),
                Value::String(certainty.as_str().to_string()),
            );
        }
        Value::Object(result)
    }
}

/// True when a member is absent or an empty object/array/string.
pub(crate) fn is_empty_member(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Object(map)) => map.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

// ------------- coordinate grammar -------------

fn invalid(kind: GeometryKind, message: impl Into<String>) -> LpfError {
    LpfError::InvalidGeometry {
        kind: kind.to_string(),
        message: message.into(),
    }
}

/// A position is an array of 2 or 3 numbers.
fn is_position(value: &Value) -> bool {
    match value.as_array() {
        Some(items) => {
            (2..=3).contains(&items.len()) && items.iter().all(Value::is_number)
        }
        None => false,
    }
}

fn check_positions(kind: GeometryKind, value: &Value, min: usize, what: &str) -> Result<()> {
    let items = value
        .as_array()
        .ok_or_else(|| invalid(kind, format!("{what} must be an array of positions")))?;
    if items.len() < min {
        return Err(invalid(
            kind,
            format!("{what} requires at least {min} positions, found {}", items.len()),
        ));
    }
    for (i, item) in items.iter().enumerate() {
        if !is_position(item) {
            return Err(invalid(
                kind,
                format!("{what} position {i} must be an array of 2 or 3 numbers"),
            ));
        }
    }
    Ok(())
}

fn check_rings(kind: GeometryKind, value: &Value, what: &str) -> Result<()> {
    let rings = value
        .as_array()
        .ok_or_else(|| invalid(kind, format!("{what} must be an array of linear rings")))?;
    for (i, ring) in rings.iter().enumerate() {
        check_positions(kind, ring, 4, &format!("{what} ring {i}"))?;
    }
    Ok(())
}

fn validate_coordinates(kind: GeometryKind, coordinates: &Value) -> Result<()> {
    match kind {
        GeometryKind::Point => {
            if !is_position(coordinates) {
                return Err(invalid(
                    kind,
                    "coordinates must be an array of 2 or 3 numbers",
                ));
            }
            Ok(())
        }
        GeometryKind::MultiPoint => check_positions(kind, coordinates, 0, "coordinates"),
        GeometryKind::LineString => check_positions(kind, coordinates, 2, "coordinates"),
        GeometryKind::MultiLineString => {
            let lines = coordinates
                .as_array()
                .ok_or_else(|| invalid(kind, "coordinates must be an array of line strings"))?;
            for (i, line) in lines.iter().enumerate() {
                check_positions(kind, line, 2, &format!("line string {i}"))?;
            }
            Ok(())
        }
        GeometryKind::Polygon => check_rings(kind, coordinates, "coordinates"),
        GeometryKind::MultiPolygon => {
            let polygons = coordinates
                .as_array()
                .ok_or_else(|| invalid(kind, "coordinates must be an array of polygons"))?;
            for (i, polygon) in polygons.iter().enumerate() {
                check_rings(kind, polygon, &format!("polygon {i}"))?;
            }
            Ok(())
        }
        // handled by Geometry::collection
        GeometryKind::GeometryCollection => Ok(()),
    }
}
