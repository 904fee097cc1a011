use std::collections::HashMap;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// The category a group belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKind {
    /// Exact full-sequence groups.
    Sequence,
    /// Groups of structures sharing a target sequence key.
    Target,
    /// Binder-sequence buckets inside one target group.
    BinderSubgroup,
    /// User-created ad-hoc groups.
    Custom,
}

/// A named cluster of structure files.
///
/// Members are duplicate-free; insertion order is preserved for display.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureGroup {
    /// Stable key, unique within the group's category.
    pub id: String,
    /// Display label (may include computed counts).
    pub name: String,
    pub kind: GroupKind,
    /// The grouping key: a sequence hash, or the generated id for custom groups.
    pub key: String,
    members: Vec<PathBuf>,
    /// Free-form attributes (chain list, sequence preview, source group).
    pub metadata: HashMap<String, String>,
    pub is_custom: bool,
}

impl StructureGroup {
    pub fn new(id: &str, name: &str, kind: GroupKind, key: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            key: key.to_string(),
            members: Vec::new(),
            metadata: HashMap::new(),
            is_custom: kind == GroupKind::Custom,
        }
    }

    /// Adds a member unless it is already present. Returns whether it was added.
    pub fn push_member(&mut self, file: &Path) -> bool {
        if self.contains(file) {
            return false;
        }
        self.members.push(file.to_path_buf());
        true
    }

    /// Removes a member. Returns whether it was present.
    pub fn remove_member(&mut self, file: &Path) -> bool {
        let before = self.members.len();
        self.members.retain(|m| m != file);
        self.members.len() != before
    }

    pub fn members(&self) -> &[PathBuf] {
        &self.members
    }

    pub fn contains(&self, file: &Path) -> bool {
        self.members.iter().any(|m| m == file)
    }

    pub fn count(&self) -> usize {
        self.members.len()
    }
}

/// Session-scoped CRUD store for user-created groups.
///
/// Groups are keyed by a generated UUID and listed in creation order.
/// Nothing here is persisted.
#[derive(Debug, Default)]
pub struct CustomGroupStore {
    groups: HashMap<String, StructureGroup>,
    order: Vec<String>,
}

impl CustomGroupStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a group and returns its generated id.
    pub fn create(
        &mut self,
        name: &str,
        members: &[PathBuf],
        metadata: HashMap<String, String>,
    ) -> String {
        let id = Uuid::new_v4().to_string();
        let mut group = StructureGroup::new(&id, name, GroupKind::Custom, &id);
        group.metadata = metadata;
        for member in members {
            group.push_member(member);
        }
        self.order.push(id.clone());
        self.groups.insert(id.clone(), group);
        id
    }

    /// Renames a group. Returns false for an unknown id.
    pub fn rename(&mut self, id: &str, name: &str) -> bool {
        match self.groups.get_mut(id) {
            Some(group) => {
                group.name = name.to_string();
                true
            }
            None => false,
        }
    }

    /// Deletes a group. Returns false for an unknown id.
    pub fn delete(&mut self, id: &str) -> bool {
        if self.groups.remove(id).is_some() {
            self.order.retain(|existing| existing != id);
            true
        } else {
            false
        }
    }

    /// Adds members to a group; re-adding an existing member is a no-op.
    ///
    /// Returns the number of members actually added (0 for an unknown id).
    pub fn add_members(&mut self, id: &str, files: &[PathBuf]) -> usize {
        match self.groups.get_mut(id) {
            Some(group) => files.iter().filter(|file| group.push_member(file)).count(),
            None => 0,
        }
    }

    /// Removes members from a group; returns the number actually removed.
    pub fn remove_members(&mut self, id: &str, files: &[PathBuf]) -> usize {
        match self.groups.get_mut(id) {
            Some(group) => files.iter().filter(|file| group.remove_member(file)).count(),
            None => 0,
        }
    }

    pub fn get(&self, id: &str) -> Option<&StructureGroup> {
        self.groups.get(id)
    }

    /// Lists groups in creation order.
    pub fn list(&self) -> Vec<&StructureGroup> {
        self.order
            .iter()
            .filter_map(|id| self.groups.get(id))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
