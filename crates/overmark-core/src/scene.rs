//! The ordered collection of committed shapes.

use crate::shapes::{Shape, ShapeId};
use crate::surface::TextMeasure;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Committed shapes in z-order (back to front).
///
/// The engine is the only writer; hosts see it read-only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    shapes: Vec<Shape>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a shape on top of all others.
    pub fn add_shape(&mut self, shape: Shape) -> ShapeId {
        let id = shape.id();
        self.shapes.push(shape);
        id
    }

    /// Remove all shapes.
    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    /// Get a shape by ID.
    pub fn get_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    pub(crate) fn get_shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id() == id)
    }

    /// Swap the payload of shape `id` in place, keeping its z-position.
    /// Returns false if no such shape exists.
    pub(crate) fn replace_shape(&mut self, id: ShapeId, shape: Shape) -> bool {
        match self.get_shape_mut(id) {
            Some(slot) => {
                *slot = shape;
                true
            }
            None => false,
        }
    }

    /// Z-position of a shape (0 = bottom).
    pub fn index_of(&self, id: ShapeId) -> Option<usize> {
        self.shapes.iter().position(|s| s.id() == id)
    }

    /// Shapes in z-order (back to front).
    pub fn shapes_ordered(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Topmost shape under `point`, see [`crate::hit::shape_at`].
    pub fn shape_at(&self, point: Point, measure: &dyn TextMeasure) -> Option<ShapeId> {
        crate::hit::shape_at(self, point, measure)
    }
}
