//! Roadmap data supplied by the host application.
//!
//! The engine never mutates these values; it reads them to lay out nodes and
//! to decide how each node and path is styled.

use std::collections::HashMap;

use serde::Deserialize;

use crate::identifier::Id;

/// One stop on a learning roadmap.
///
/// `level` is the node's position in the sequence. It also drives the entry
/// animation stagger.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RoadmapNode {
    id: Id,
    title: String,
    #[serde(default)]
    level: u32,
    #[serde(default, alias = "lessonCount")]
    lesson_count: u32,
}

impl RoadmapNode {
    pub fn new(id: impl Into<Id>, title: impl Into<String>, level: u32) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            level,
            lesson_count: 0,
        }
    }

    pub fn with_lesson_count(mut self, lesson_count: u32) -> Self {
        self.lesson_count = lesson_count;
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lesson_count(&self) -> u32 {
        self.lesson_count
    }
}

/// Learner progress on a single node.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressStatus {
    #[default]
    Locked,
    Active,
    Completed,
}

impl ProgressStatus {
    pub fn name(self) -> &'static str {
        match self {
            Self::Locked => "locked",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

/// Progress entry for one node.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NodeProgress {
    status: ProgressStatus,
    #[serde(alias = "completedLessons")]
    completed_lessons: u32,
}

impl NodeProgress {
    pub fn new(status: ProgressStatus) -> Self {
        Self {
            status,
            completed_lessons: 0,
        }
    }

    pub fn with_completed_lessons(mut self, completed_lessons: u32) -> Self {
        self.completed_lessons = completed_lessons;
        self
    }

    pub fn status(&self) -> ProgressStatus {
        self.status
    }

    pub fn completed_lessons(&self) -> u32 {
        self.completed_lessons
    }
}

/// Progress keyed by node id.
///
/// Nodes without an entry are [`ProgressStatus::Locked`]. Entries for ids the
/// roadmap does not contain are kept but never consulted.
///
/// # Examples
///
/// ```
/// use trailmap_core::identifier::Id;
/// use trailmap_core::model::{ProgressMap, ProgressStatus};
///
/// let mut progress = ProgressMap::new();
/// progress.set_status("basics", ProgressStatus::Completed);
///
/// assert_eq!(progress.status(Id::new("basics")), ProgressStatus::Completed);
/// assert_eq!(progress.status(Id::new("unknown")), ProgressStatus::Locked);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ProgressMap {
    entries: HashMap<Id, NodeProgress>,
}

impl ProgressMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<Id>, progress: NodeProgress) {
        self.entries.insert(id.into(), progress);
    }

    /// Shorthand for inserting an entry with only a status.
    pub fn set_status(&mut self, id: impl Into<Id>, status: ProgressStatus) {
        self.insert(id, NodeProgress::new(status));
    }

    pub fn get(&self, id: Id) -> Option<&NodeProgress> {
        self.entries.get(&id)
    }

    /// Status of `id`, `Locked` when absent.
    pub fn status(&self, id: Id) -> ProgressStatus {
        self.get(id)
            .map(NodeProgress::status)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<I: Into<Id>> FromIterator<(I, ProgressStatus)> for ProgressMap {
    fn from_iter<T: IntoIterator<Item = (I, ProgressStatus)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (id, status) in iter {
            map.set_status(id, status);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_accessors() {
        let node = RoadmapNode::new("intro", "Introduction", 2).with_lesson_count(5);
        assert_eq!(node.id(), "intro");
        assert_eq!(node.title(), "Introduction");
        assert_eq!(node.level(), 2);
        assert_eq!(node.lesson_count(), 5);
    }

    #[test]
    fn test_node_deserialize_accepts_camel_case() {
        let node: RoadmapNode =
            toml::from_str(r#"id = "a"
title = "A"
level = 1
lessonCount = 4"#)
            .unwrap();
        assert_eq!(node.lesson_count(), 4);

        let node: RoadmapNode = toml::from_str(r#"id = "b"
title = "B"
lesson_count = 3"#)
        .unwrap();
        assert_eq!(node.lesson_count(), 3);
        assert_eq!(node.level(), 0);
    }

    #[test]
    fn test_progress_defaults_to_locked() {
        let progress = ProgressMap::new();
        assert!(progress.is_empty());
        assert_eq!(progress.status(Id::new("missing")), ProgressStatus::Locked);
        assert_eq!(ProgressStatus::default(), ProgressStatus::Locked);
    }

    #[test]
    fn test_progress_from_iter() {
        let progress: ProgressMap = [
            ("a", ProgressStatus::Completed),
            ("b", ProgressStatus::Active),
        ]
        .into_iter()
        .collect();

        assert_eq!(progress.len(), 2);
        assert_eq!(progress.status(Id::new("a")), ProgressStatus::Completed);
        assert_eq!(progress.status(Id::new("b")), ProgressStatus::Active);
    }

    #[test]
    fn test_progress_deserialize() {
        let progress: ProgressMap = toml::from_str(
            r#"
            [basics]
            status = "completed"
            completed_lessons = 5

            [ownership]
            status = "active"
            "#,
        )
        .unwrap();

        assert_eq!(progress.status(Id::new("basics")), ProgressStatus::Completed);
        assert_eq!(
            progress.get(Id::new("basics")).map(NodeProgress::completed_lessons),
            Some(5)
        );
        assert_eq!(progress.status(Id::new("ownership")), ProgressStatus::Active);
    }

    #[test]
    fn test_status_names() {
        assert_eq!(ProgressStatus::Locked.name(), "locked");
        assert_eq!(ProgressStatus::Active.name(), "active");
        assert_eq!(ProgressStatus::Completed.name(), "completed");
    }
}
