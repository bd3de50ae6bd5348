//! DXF outline writer
//!
//! Accumulates 2D entities and serializes them through `dxf::Drawing` as
//! an ASCII AutoCAD 2000 (AC1015) document. Coordinates are inches with a
//! bottom-left origin; the header declares `$INSUNITS = 1`.

use dxf::entities::{Arc, Circle, Entity, EntityType, Line, LwPolyline};
use dxf::enums::{AcadVersion, DrawingUnits, Units};
use dxf::tables::Layer;
use dxf::{Drawing, LwPolylineVertex};
use foamkit_core::ExportError;

/// Layer holding the outer block outline
pub const OUTLINE_LAYER: &str = "OUTLINE";
/// Layer holding cavity profiles
pub const CAVITY_LAYER: &str = "CAVITIES";

/// A 2D point in outline coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Outline entity geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum DxfShape {
    Line {
        start: Point,
        end: Point,
    },
    Circle {
        center: Point,
        radius: f64,
    },
    /// Counter-clockwise from `start_angle` to `end_angle`, in degrees
    Arc {
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
    Polyline {
        points: Vec<Point>,
        closed: bool,
    },
}

impl DxfShape {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Line { .. } => "LINE",
            Self::Circle { .. } => "CIRCLE",
            Self::Arc { .. } => "ARC",
            Self::Polyline { .. } => "LWPOLYLINE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DxfEntity {
    pub layer: String,
    pub shape: DxfShape,
}

/// DXF document builder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DxfDocument {
    entities: Vec<DxfEntity>,
}

impl DxfDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entities(&self) -> &[DxfEntity] {
        &self.entities
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn count(&self, kind: &str) -> usize {
        self.entities.iter().filter(|e| e.shape.kind() == kind).count()
    }

    pub fn add(&mut self, layer: &str, shape: DxfShape) {
        self.entities.push(DxfEntity {
            layer: layer.to_string(),
            shape,
        });
    }

    pub fn add_line(&mut self, layer: &str, start: Point, end: Point) {
        self.add(layer, DxfShape::Line { start, end });
    }

    pub fn add_circle(&mut self, layer: &str, center: Point, radius: f64) {
        self.add(layer, DxfShape::Circle { center, radius });
    }

    pub fn add_arc(&mut self, layer: &str, center: Point, radius: f64, start_angle: f64, end_angle: f64) {
        self.add(
            layer,
            DxfShape::Arc {
                center,
                radius,
                start_angle,
                end_angle,
            },
        );
    }

    /// Axis-aligned rectangle from its bottom-left corner as four lines
    pub fn add_rectangle(&mut self, layer: &str, x: f64, y: f64, width: f64, height: f64) {
        let corners = [
            Point::new(x, y),
            Point::new(x + width, y),
            Point::new(x + width, y + height),
            Point::new(x, y + height),
        ];
        for i in 0..4 {
            self.add_line(layer, corners[i], corners[(i + 1) % 4]);
        }
    }

    /// Rounded rectangle as four straight sides and four corner arcs
    pub fn add_rounded_rectangle(
        &mut self,
        layer: &str,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        radius: f64,
    ) {
        let r = radius.min(width / 2.0).min(height / 2.0);
        let (x1, y1) = (x + width, y + height);

        self.add_line(layer, Point::new(x + r, y), Point::new(x1 - r, y));
        self.add_line(layer, Point::new(x1, y + r), Point::new(x1, y1 - r));
        self.add_line(layer, Point::new(x1 - r, y1), Point::new(x + r, y1));
        self.add_line(layer, Point::new(x, y1 - r), Point::new(x, y + r));

        self.add_arc(layer, Point::new(x + r, y + r), r, 180.0, 270.0);
        self.add_arc(layer, Point::new(x1 - r, y + r), r, 270.0, 360.0);
        self.add_arc(layer, Point::new(x1 - r, y1 - r), r, 0.0, 90.0);
        self.add_arc(layer, Point::new(x + r, y1 - r), r, 90.0, 180.0);
    }

    pub fn add_polyline(&mut self, layer: &str, points: Vec<Point>, closed: bool) {
        self.add(layer, DxfShape::Polyline { points, closed });
    }

    /// Serialize as an AutoCAD 2000 (AC1015) drawing in inches
    pub fn to_dxf_string(&self) -> Result<String, ExportError> {
        let mut drawing = Drawing::new();
        drawing.header.version = AcadVersion::R2000;
        drawing.header.default_drawing_units = Units::Inches;
        drawing.header.drawing_units = DrawingUnits::English;

        for name in [OUTLINE_LAYER, CAVITY_LAYER] {
            drawing.add_layer(Layer {
                name: name.to_string(),
                ..Default::default()
            });
        }
        for entity in &self.entities {
            drawing.add_entity(to_dxf_entity(entity));
        }

        let mut buffer = Vec::new();
        drawing.save(&mut buffer).map_err(|e| write_failed(e.to_string()))?;
        String::from_utf8(buffer).map_err(|e| write_failed(e.to_string()))
    }
}

fn write_failed(reason: String) -> ExportError {
    ExportError::WriteFailed {
        artifact: "outline".to_string(),
        reason,
    }
}

fn to_dxf_entity(entity: &DxfEntity) -> Entity {
    let at = |p: &Point| dxf::Point::new(p.x, p.y, 0.0);
    let specific = match &entity.shape {
        DxfShape::Line { start, end } => EntityType::Line(Line::new(at(start), at(end))),
        DxfShape::Circle { center, radius } => EntityType::Circle(Circle::new(at(center), *radius)),
        DxfShape::Arc {
            center,
            radius,
            start_angle,
            end_angle,
        } => EntityType::Arc(Arc::new(at(center), *radius, *start_angle, *end_angle)),
        DxfShape::Polyline { points, closed } => {
            let mut polyline = LwPolyline::default();
            polyline.vertices = points
                .iter()
                .map(|p| LwPolylineVertex {
                    x: p.x,
                    y: p.y,
                    ..Default::default()
                })
                .collect();
            polyline.set_is_closed(*closed);
            EntityType::LwPolyline(polyline)
        }
    };
    let mut out = Entity::new(specific);
    out.common.layer = entity.layer.clone();
    out
}
