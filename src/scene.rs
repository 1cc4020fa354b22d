use egui::Pos2;

use crate::element::{ObjectId, SceneObject, TextMeasure};

/// Direction of a one-step z-order change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reorder {
    Forward,
    Backward,
}

/// Ordered, id-indexed store of scene objects plus the single selection.
///
/// `objects` is in paint order, back to front. The selection, when set,
/// always names an object that is present in `objects`.
#[derive(Debug, Default, Clone)]
pub struct Scene {
    objects: Vec<SceneObject>,
    selection: Option<ObjectId>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn ids(&self) -> Vec<ObjectId> {
        self.objects.iter().map(SceneObject::id).collect()
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|obj| obj.id() == id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|obj| obj.id() == id)
    }

    pub fn index_of(&self, id: ObjectId) -> Option<usize> {
        self.objects.iter().position(|obj| obj.id() == id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.index_of(id).is_some()
    }

    /// Append an object on top of everything else and return its id
    pub fn push(&mut self, object: SceneObject) -> ObjectId {
        let id = object.id();
        self.objects.push(object);
        id
    }

    pub fn remove(&mut self, id: ObjectId) -> Option<SceneObject> {
        let index = self.index_of(id)?;
        if self.selection == Some(id) {
            self.selection = None;
        }
        Some(self.objects.remove(index))
    }

    pub fn clear(&mut self) {
        self.objects.clear();
        self.selection = None;
    }

    pub fn selection(&self) -> Option<ObjectId> {
        self.selection
    }

    pub fn selected(&self) -> Option<&SceneObject> {
        self.selection.and_then(|id| self.get(id))
    }

    pub fn selected_mut(&mut self) -> Option<&mut SceneObject> {
        let id = self.selection?;
        self.get_mut(id)
    }

    /// Select an object. Ids that are not in the scene clear the selection.
    pub fn select(&mut self, id: Option<ObjectId>) -> Option<ObjectId> {
        let selection = id.filter(|id| self.contains(*id));
        self.selection = selection;
        selection
    }

    /// Swap an object with its neighbor one step toward the front or back.
    ///
    /// Returns `false` without touching the order when the object is already
    /// at that boundary or is not in the scene.
    pub fn reorder(&mut self, id: ObjectId, direction: Reorder) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let neighbor = match direction {
            Reorder::Forward if index + 1 < self.objects.len() => index + 1,
            Reorder::Backward if index > 0 => index - 1,
            _ => return false,
        };
        self.objects.swap(index, neighbor);
        true
    }

    /// Topmost object under `pos`
    pub fn hit_test(&self, pos: Pos2, text: &dyn TextMeasure) -> Option<ObjectId> {
        self.objects
            .iter()
            .rev()
            .find(|obj| obj.hit_test(pos, text))
            .map(SceneObject::id)
    }
}
