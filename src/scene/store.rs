use slotmap::SlotMap;

use crate::error::SceneError;

use super::color::Rgb;
use super::drawable::{Drawable, DrawableId, Fill, Primitive};

/// Arena that owns every drawable of one built scene.
///
/// Drawables are addressed by generational ids so handles held in the cell
/// registry can never alias a drawable from a previous build. Insertion order
/// is kept to break paint-order ties.
#[derive(Debug, Default)]
pub struct DrawableStore {
    drawables: SlotMap<DrawableId, Drawable>,
    order: Vec<DrawableId>,
}

impl DrawableStore {
    /// Creates a new, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a drawable and returns its id.
    pub fn add(&mut self, drawable: Drawable) -> DrawableId {
        let id = self.drawables.insert(drawable);
        self.order.push(id);
        id
    }

    /// Returns a reference to the drawable, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the id does not belong to this store.
    pub fn get(&self, id: DrawableId) -> Result<&Drawable, SceneError> {
        self.drawables
            .get(id)
            .ok_or(SceneError::DrawableNotFound("drawable"))
    }

    /// Returns a mutable reference to the drawable, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the id does not belong to this store.
    pub fn get_mut(&mut self, id: DrawableId) -> Result<&mut Drawable, SceneError> {
        self.drawables
            .get_mut(id)
            .ok_or(SceneError::DrawableNotFound("drawable"))
    }

    /// Sets the overall opacity of a drawable.
    ///
    /// # Errors
    ///
    /// Returns an error if the id does not belong to this store.
    pub fn set_alpha(&mut self, id: DrawableId, alpha: f64) -> Result<(), SceneError> {
        self.get_mut(id)?.alpha = alpha;
        Ok(())
    }

    /// Replaces the content and colour of a text drawable and shows it.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is unknown or not a text drawable.
    pub fn show_text(
        &mut self,
        id: DrawableId,
        content: &str,
        color: Rgb,
    ) -> Result<(), SceneError> {
        let drawable = self.get_mut(id)?;
        let Primitive::Text(text) = &mut drawable.primitive else {
            return Err(SceneError::DrawableNotFound("text"));
        };
        content.clone_into(&mut text.content);
        text.color = color;
        drawable.alpha = 1.0;
        Ok(())
    }

    /// Replaces the fill of a shape drawable.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is unknown or not a shape drawable.
    pub fn set_fill(&mut self, id: DrawableId, new_fill: Fill) -> Result<(), SceneError> {
        let Primitive::Shape { fill, .. } = &mut self.get_mut(id)?.primitive else {
            return Err(SceneError::DrawableNotFound("shape"));
        };
        *fill = Some(new_fill);
        Ok(())
    }

    /// Iterates over drawables in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (DrawableId, &Drawable)> {
        self.order
            .iter()
            .filter_map(|&id| self.drawables.get(id).map(|d| (id, d)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.drawables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drawables.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::CellKey;
    use crate::layout::TextSize;
    use crate::math::Point2;
    use crate::scene::drawable::{Owner, Shape, Text, TextAnchor, ZOrder};

    fn text() -> Drawable {
        Drawable::new(
            Primitive::Text(Text {
                content: String::new(),
                position: Point2::new(0.0, 0.0),
                anchor: TextAnchor::Centre,
                font_size: 40.0,
                bold: false,
                color: Rgb::BLACK,
                scale: 1.0,
                extent: TextSize {
                    width: 0.0,
                    height: 0.0,
                },
            }),
            ZOrder::DIGIT,
            Owner::Cell(CellKey::new(0, 0)),
        )
        .hidden()
    }

    #[test]
    fn show_text_mutates_in_place() {
        let mut store = DrawableStore::new();
        let id = store.add(text());
        store.show_text(id, "7", Rgb::WHITE).unwrap();
        let d = store.get(id).unwrap();
        assert!(d.is_visible());
        assert_eq!(d.text().unwrap().content, "7");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn ids_from_another_store_are_rejected() {
        let mut a = DrawableStore::new();
        let id = a.add(text());
        let b = DrawableStore::new();
        assert!(b.get(id).is_err());
    }

    #[test]
    fn set_fill_rejects_text() {
        let mut store = DrawableStore::new();
        let id = store.add(text());
        let fill = Fill {
            color: Rgb::WHITE,
            alpha: 1.0,
        };
        assert!(store.set_fill(id, fill).is_err());

        let rect = store.add(Drawable::new(
            Primitive::Shape {
                shape: Shape::Rect {
                    origin: Point2::new(0.0, 0.0),
                    width: 1.0,
                    height: 1.0,
                    corner_radius: 0.0,
                },
                fill: None,
                stroke: None,
            },
            ZOrder::COLOR,
            Owner::Background,
        ));
        store.set_fill(rect, fill).unwrap();
        assert_eq!(store.get(rect).unwrap().fill(), Some(fill));
    }

    #[test]
    fn iteration_follows_insertion() {
        let mut store = DrawableStore::new();
        let first = store.add(text());
        let second = store.add(text());
        let ids: Vec<_> = store.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![first, second]);
    }
}
