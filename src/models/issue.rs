use super::{
    Attachment, Changeset, CustomField, IssueCategory, IssueRelation, Journal, NamedId, Project,
    Tracker, Version, Watcher,
};
use crate::property::{Property, PropertyStorage};
use chrono::{DateTime, NaiveDate, Utc};
use serde::de::Deserializer;
use serde::Deserialize;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

/// RedmineのIssue
///
/// 部分更新の対象になるフィールドはPropertyStorage経由で持ち、
/// セッターを呼んだものだけがJSONに出力される。関連コレクション
/// （ジャーナル、リレーション、添付など）は対応する`Include`フラグ付きで
/// 取得したときだけ埋まり、それ以外は空。Noneになることはない。
///
/// 等価性はサーバーが割り当てたIDのみで決まる。ID未設定のIssueは
/// 自分自身も含め何とも等しくならない。
#[derive(Debug, Clone, Default)]
pub struct Issue {
    id: Option<i32>,
    storage: PropertyStorage,
    project: Option<Project>,
    tracker: Option<Tracker>,
    status_id: Option<i32>,
    status_name: Option<String>,
    priority_id: Option<i32>,
    priority_text: Option<String>,
    assignee_id: Option<i32>,
    assignee_name: Option<String>,
    author: Option<NamedId>,
    category: Option<IssueCategory>,
    target_version: Option<Version>,
    description: Option<String>,
    closed_on: Option<DateTime<Utc>>,
    private_issue: bool,
    custom_fields: HashSet<CustomField>,
    journals: Vec<Journal>,
    relations: Vec<IssueRelation>,
    attachments: Vec<Attachment>,
    changesets: Vec<Changeset>,
    watchers: Vec<Watcher>,
    children: Vec<Issue>,
}

impl Issue {
    pub const SUBJECT: Property<String> = Property::new("subject");
    pub const START_DATE: Property<NaiveDate> = Property::new("start_date");
    pub const DUE_DATE: Property<NaiveDate> = Property::new("due_date");
    pub const CREATED_ON: Property<DateTime<Utc>> = Property::new("created_on");
    pub const UPDATED_ON: Property<DateTime<Utc>> = Property::new("updated_on");
    pub const DONE_RATIO: Property<i32> = Property::new("done_ratio");
    pub const PARENT_ISSUE_ID: Property<i32> = Property::new("parent_issue_id");
    pub const ESTIMATED_HOURS: Property<f32> = Property::new("estimated_hours");
    pub const SPENT_HOURS: Property<f32> = Property::new("spent_hours");
    /// 更新時のコメント。ジャーナルのノートになる
    pub const NOTES: Property<String> = Property::new("notes");

    /// 未保存の新しいIssue（IDなし）
    pub fn new() -> Self {
        Self::default()
    }

    /// サーバー上の既存Issueを指すインスタンス
    pub fn with_id(id: i32) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    /// データベースID。未保存のIssueではNone
    pub fn id(&self) -> Option<i32> {
        self.id
    }

    pub fn subject(&self) -> Option<String> {
        self.storage.get(&Self::SUBJECT)
    }

    pub fn set_subject(&mut self, subject: Option<String>) {
        self.storage.set(&Self::SUBJECT, subject);
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.storage.get(&Self::START_DATE)
    }

    pub fn set_start_date(&mut self, start_date: Option<NaiveDate>) {
        self.storage.set(&Self::START_DATE, start_date);
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.storage.get(&Self::DUE_DATE)
    }

    pub fn set_due_date(&mut self, due_date: Option<NaiveDate>) {
        self.storage.set(&Self::DUE_DATE, due_date);
    }

    pub fn created_on(&self) -> Option<DateTime<Utc>> {
        self.storage.get(&Self::CREATED_ON)
    }

    pub fn set_created_on(&mut self, created_on: Option<DateTime<Utc>>) {
        self.storage.set(&Self::CREATED_ON, created_on);
    }

    pub fn updated_on(&self) -> Option<DateTime<Utc>> {
        self.storage.get(&Self::UPDATED_ON)
    }

    pub fn set_updated_on(&mut self, updated_on: Option<DateTime<Utc>>) {
        self.storage.set(&Self::UPDATED_ON, updated_on);
    }

    pub fn done_ratio(&self) -> Option<i32> {
        self.storage.get(&Self::DONE_RATIO)
    }

    pub fn set_done_ratio(&mut self, done_ratio: Option<i32>) {
        self.storage.set(&Self::DONE_RATIO, done_ratio);
    }

    /// 親IssueのID。親がなければNone
    pub fn parent_issue_id(&self) -> Option<i32> {
        self.storage.get(&Self::PARENT_ISSUE_ID)
    }

    pub fn set_parent_issue_id(&mut self, parent_issue_id: Option<i32>) {
        self.storage.set(&Self::PARENT_ISSUE_ID, parent_issue_id);
    }

    pub fn estimated_hours(&self) -> Option<f32> {
        self.storage.get(&Self::ESTIMATED_HOURS)
    }

    pub fn set_estimated_hours(&mut self, estimated_hours: Option<f32>) {
        self.storage.set(&Self::ESTIMATED_HOURS, estimated_hours);
    }

    pub fn spent_hours(&self) -> Option<f32> {
        self.storage.get(&Self::SPENT_HOURS)
    }

    pub fn set_spent_hours(&mut self, spent_hours: Option<f32>) {
        self.storage.set(&Self::SPENT_HOURS, spent_hours);
    }

    pub fn notes(&self) -> Option<String> {
        self.storage.get(&Self::NOTES)
    }

    pub fn set_notes(&mut self, notes: Option<String>) {
        self.storage.set(&Self::NOTES, notes);
    }

    pub fn project(&self) -> Option<&Project> {
        self.project.as_ref()
    }

    pub fn set_project(&mut self, project: Project) {
        self.project = Some(project);
    }

    pub fn tracker(&self) -> Option<&Tracker> {
        self.tracker.as_ref()
    }

    pub fn set_tracker(&mut self, tracker: Tracker) {
        self.tracker = Some(tracker);
    }

    pub fn status_id(&self) -> Option<i32> {
        self.status_id
    }

    pub fn set_status_id(&mut self, status_id: Option<i32>) {
        self.status_id = status_id;
    }

    pub fn status_name(&self) -> Option<&str> {
        self.status_name.as_deref()
    }

    pub fn priority_id(&self) -> Option<i32> {
        self.priority_id
    }

    pub fn set_priority_id(&mut self, priority_id: Option<i32>) {
        self.priority_id = priority_id;
    }

    pub fn priority_text(&self) -> Option<&str> {
        self.priority_text.as_deref()
    }

    /// 担当者。ユーザーまたは（サーバー設定次第で）グループのID
    pub fn assignee_id(&self) -> Option<i32> {
        self.assignee_id
    }

    pub fn set_assignee_id(&mut self, assignee_id: Option<i32>) {
        self.assignee_id = assignee_id;
    }

    pub fn assignee_name(&self) -> Option<&str> {
        self.assignee_name.as_deref()
    }

    pub fn author(&self) -> Option<&NamedId> {
        self.author.as_ref()
    }

    pub fn category(&self) -> Option<&IssueCategory> {
        self.category.as_ref()
    }

    pub fn set_category(&mut self, category: IssueCategory) {
        self.category = Some(category);
    }

    pub fn target_version(&self) -> Option<&Version> {
        self.target_version.as_ref()
    }

    pub fn set_target_version(&mut self, version: Version) {
        self.target_version = Some(version);
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    pub fn closed_on(&self) -> Option<DateTime<Utc>> {
        self.closed_on
    }

    /// 明示的に設定しなければfalse
    pub fn is_private(&self) -> bool {
        self.private_issue
    }

    pub fn set_private(&mut self, private_issue: bool) {
        self.private_issue = private_issue;
    }

    /// 読み取り専用ビュー。追加は`add_custom_field`経由で行う
    pub fn custom_fields(&self) -> &HashSet<CustomField> {
        &self.custom_fields
    }

    /// 同じIDのフィールドが既にあれば新しい値で置き換える。
    /// Redmineに保存するには正しいデータベースIDが必須
    pub fn add_custom_field(&mut self, custom_field: CustomField) {
        self.custom_fields.replace(custom_field);
    }

    pub fn add_custom_fields(&mut self, custom_fields: impl IntoIterator<Item = CustomField>) {
        for field in custom_fields {
            self.add_custom_field(field);
        }
    }

    pub fn custom_field_by_id(&self, id: i32) -> Option<&CustomField> {
        self.custom_fields.iter().find(|field| field.id == id)
    }

    pub fn custom_field_by_name(&self, name: &str) -> Option<&CustomField> {
        self.custom_fields.iter().find(|field| field.name == name)
    }

    /// `Include::Journals`付きで取得したときだけ埋まる
    pub fn journals(&self) -> &[Journal] {
        &self.journals
    }

    pub fn add_journals(&mut self, journals: impl IntoIterator<Item = Journal>) {
        self.journals.extend(journals);
    }

    /// `Include::Relations`付きで取得したときだけ埋まる
    pub fn relations(&self) -> &[IssueRelation] {
        &self.relations
    }

    pub fn add_relations(&mut self, relations: impl IntoIterator<Item = IssueRelation>) {
        self.relations.extend(relations);
    }

    /// `Include::Attachments`付きで取得したときだけ埋まる
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    pub fn add_attachments(&mut self, attachments: impl IntoIterator<Item = Attachment>) {
        self.attachments.extend(attachments);
    }

    /// `Include::Changesets`付きで取得したときだけ埋まる
    pub fn changesets(&self) -> &[Changeset] {
        &self.changesets
    }

    pub fn add_changesets(&mut self, changesets: impl IntoIterator<Item = Changeset>) {
        self.changesets.extend(changesets);
    }

    /// `Include::Watchers`付きで取得したときだけ埋まる
    pub fn watchers(&self) -> &[Watcher] {
        &self.watchers
    }

    pub fn add_watchers(&mut self, watchers: impl IntoIterator<Item = Watcher>) {
        self.watchers.extend(watchers);
    }

    /// `Include::Children`付きで取得したときだけ埋まる
    pub fn children(&self) -> &[Issue] {
        &self.children
    }

    pub fn add_children(&mut self, children: impl IntoIterator<Item = Issue>) {
        self.children.extend(children);
    }

    pub fn storage(&self) -> &PropertyStorage {
        &self.storage
    }
}

impl PartialEq for Issue {
    fn eq(&self, other: &Self) -> bool {
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl Hash for Issue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[derive(Deserialize)]
struct IssueWire {
    id: i32,
    #[serde(default)]
    project: Option<Project>,
    #[serde(default)]
    tracker: Option<Tracker>,
    #[serde(default)]
    status: Option<NamedId>,
    #[serde(default)]
    priority: Option<NamedId>,
    #[serde(default)]
    author: Option<NamedId>,
    #[serde(default)]
    assigned_to: Option<NamedId>,
    #[serde(default)]
    category: Option<IssueCategory>,
    #[serde(default)]
    fixed_version: Option<Version>,
    #[serde(default)]
    parent: Option<NamedId>,
    #[serde(default)]
    subject: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    start_date: Option<NaiveDate>,
    #[serde(default)]
    due_date: Option<NaiveDate>,
    #[serde(default)]
    done_ratio: Option<i32>,
    #[serde(default)]
    is_private: Option<bool>,
    #[serde(default)]
    estimated_hours: Option<f32>,
    #[serde(default)]
    spent_hours: Option<f32>,
    #[serde(default)]
    created_on: Option<DateTime<Utc>>,
    #[serde(default)]
    updated_on: Option<DateTime<Utc>>,
    #[serde(default)]
    closed_on: Option<DateTime<Utc>>,
    #[serde(default)]
    custom_fields: Vec<CustomField>,
    #[serde(default)]
    journals: Vec<Journal>,
    #[serde(default)]
    relations: Vec<IssueRelation>,
    #[serde(default)]
    attachments: Vec<Attachment>,
    #[serde(default)]
    changesets: Vec<Changeset>,
    #[serde(default)]
    watchers: Vec<Watcher>,
    #[serde(default)]
    children: Vec<Issue>,
}

impl<'de> Deserialize<'de> for Issue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = IssueWire::deserialize(deserializer)?;
        let mut issue = Issue::with_id(wire.id);
        // レスポンスに現れたフィールドだけを設定済みにする
        if wire.subject.is_some() {
            issue.set_subject(wire.subject);
        }
        if wire.start_date.is_some() {
            issue.set_start_date(wire.start_date);
        }
        if wire.due_date.is_some() {
            issue.set_due_date(wire.due_date);
        }
        if wire.created_on.is_some() {
            issue.set_created_on(wire.created_on);
        }
        if wire.updated_on.is_some() {
            issue.set_updated_on(wire.updated_on);
        }
        if wire.done_ratio.is_some() {
            issue.set_done_ratio(wire.done_ratio);
        }
        if let Some(parent) = &wire.parent {
            issue.set_parent_issue_id(Some(parent.id));
        }
        if wire.estimated_hours.is_some() {
            issue.set_estimated_hours(wire.estimated_hours);
        }
        if wire.spent_hours.is_some() {
            issue.set_spent_hours(wire.spent_hours);
        }
        if let Some(project) = wire.project {
            issue.set_project(project);
        }
        if let Some(tracker) = wire.tracker {
            issue.set_tracker(tracker);
        }
        if let Some(status) = wire.status {
            issue.status_id = Some(status.id);
            issue.status_name = status.name;
        }
        if let Some(priority) = wire.priority {
            issue.priority_id = Some(priority.id);
            issue.priority_text = priority.name;
        }
        if let Some(assigned_to) = wire.assigned_to {
            issue.assignee_id = Some(assigned_to.id);
            issue.assignee_name = assigned_to.name;
        }
        if let Some(category) = wire.category {
            issue.set_category(category);
        }
        if let Some(version) = wire.fixed_version {
            issue.set_target_version(version);
        }
        issue.author = wire.author;
        issue.description = wire.description;
        issue.closed_on = wire.closed_on;
        issue.private_issue = wire.is_private.unwrap_or(false);
        issue.add_custom_fields(wire.custom_fields);
        issue.add_journals(wire.journals);
        issue.add_relations(wire.relations);
        issue.add_attachments(wire.attachments);
        issue.add_changesets(wire.changesets);
        issue.add_watchers(wire.watchers);
        issue.add_children(wire.children);
        Ok(issue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_issue_deserialization() {
        let issue: Issue = serde_json::from_value(json!({
            "id": 3205,
            "project": {"id": 1, "name": "Sandbox"},
            "tracker": {"id": 1, "name": "Bug"},
            "status": {"id": 2, "name": "In Progress"},
            "priority": {"id": 4, "name": "Normal"},
            "author": {"id": 1, "name": "Redmine Admin"},
            "assigned_to": {"id": 3, "name": "Dave Loper"},
            "parent": {"id": 3100},
            "subject": "Pagination is off by one",
            "description": "The last issue of every page is repeated.",
            "start_date": "2024-03-01",
            "due_date": "2024-03-15",
            "done_ratio": 30,
            "is_private": false,
            "estimated_hours": 8.0,
            "created_on": "2024-03-01T09:00:00Z",
            "updated_on": "2024-03-05T17:30:00Z",
            "custom_fields": [
                {"id": 2, "name": "Severity", "value": "major"}
            ]
        }))
        .unwrap();

        assert_eq!(issue.id(), Some(3205));
        assert_eq!(issue.subject(), Some("Pagination is off by one".to_string()));
        assert_eq!(issue.project().unwrap().name, "Sandbox");
        assert_eq!(issue.tracker().unwrap().name, "Bug");
        assert_eq!(issue.status_id(), Some(2));
        assert_eq!(issue.status_name(), Some("In Progress"));
        assert_eq!(issue.priority_id(), Some(4));
        assert_eq!(issue.assignee_id(), Some(3));
        assert_eq!(issue.assignee_name(), Some("Dave Loper"));
        assert_eq!(issue.parent_issue_id(), Some(3100));
        assert_eq!(issue.done_ratio(), Some(30));
        assert_eq!(issue.estimated_hours(), Some(8.0));
        assert_eq!(
            issue.start_date(),
            Some(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
        );
        assert_eq!(
            issue.custom_field_by_id(2).unwrap().value,
            Some("major".to_string())
        );
        assert_eq!(issue.custom_field_by_name("Severity").unwrap().id, 2);
    }

    #[test]
    fn test_absent_fields_stay_unset_after_parse() {
        let issue: Issue = serde_json::from_value(json!({
            "id": 1,
            "subject": "minimal"
        }))
        .unwrap();

        assert!(issue.storage().is_set(&Issue::SUBJECT));
        assert!(!issue.storage().is_set(&Issue::DONE_RATIO));
        assert!(!issue.storage().is_set(&Issue::START_DATE));
        assert!(!issue.storage().is_set(&Issue::NOTES));
    }

    #[test]
    fn test_collections_are_empty_without_include() {
        let issue: Issue = serde_json::from_value(json!({
            "id": 1,
            "subject": "no includes requested"
        }))
        .unwrap();

        assert!(issue.journals().is_empty());
        assert!(issue.relations().is_empty());
        assert!(issue.attachments().is_empty());
        assert!(issue.changesets().is_empty());
        assert!(issue.watchers().is_empty());
        assert!(issue.children().is_empty());
        assert!(issue.custom_fields().is_empty());
    }

    #[test]
    fn test_included_collections_are_parsed() {
        let issue: Issue = serde_json::from_value(json!({
            "id": 1,
            "subject": "with includes",
            "journals": [
                {"id": 101, "notes": "looked into it", "created_on": "2024-03-02T10:00:00Z"}
            ],
            "relations": [
                {"id": 3, "issue_id": 1, "issue_to_id": 2, "relation_type": "blocks"}
            ],
            "watchers": [{"id": 5, "name": "Eva Mint"}],
            "children": [{"id": 7, "subject": "subtask"}]
        }))
        .unwrap();

        assert_eq!(issue.journals().len(), 1);
        assert_eq!(issue.relations().len(), 1);
        assert_eq!(issue.watchers().len(), 1);
        assert_eq!(issue.children().len(), 1);
        assert_eq!(issue.children()[0].id(), Some(7));
    }

    #[test]
    fn test_equality_is_by_id_only() {
        let mut a = Issue::with_id(3205);
        a.set_subject(Some("one subject".to_string()));
        let mut b = Issue::with_id(3205);
        b.set_subject(Some("completely different".to_string()));

        assert_eq!(a, b);
        assert_ne!(a, Issue::with_id(9999));
        // ID未設定同士は等しくない
        assert_ne!(Issue::new(), Issue::new());
    }

    #[test]
    fn test_hash_depends_only_on_id() {
        use std::collections::hash_map::DefaultHasher;

        let mut a = Issue::with_id(3205);
        a.set_done_ratio(Some(10));
        let b = Issue::with_id(3205);

        let mut hasher_a = DefaultHasher::new();
        let mut hasher_b = DefaultHasher::new();
        a.hash(&mut hasher_a);
        b.hash(&mut hasher_b);
        assert_eq!(hasher_a.finish(), hasher_b.finish());
    }

    #[test]
    fn test_custom_field_dedup_by_id() {
        let mut issue = Issue::new();
        issue.add_custom_field(CustomField::new(2, "Severity", "minor"));
        issue.add_custom_field(CustomField::new(2, "Severity", "major"));

        assert_eq!(issue.custom_fields().len(), 1);
        assert_eq!(
            issue.custom_field_by_id(2).unwrap().value,
            Some("major".to_string())
        );
    }

    #[test]
    fn test_clone_preserves_set_markers() {
        let mut issue = Issue::new();
        issue.set_subject(Some("subj1".to_string()));
        issue.set_done_ratio(None);

        let cloned = issue.clone();

        assert!(cloned.storage().is_set(&Issue::SUBJECT));
        assert!(cloned.storage().is_set(&Issue::DONE_RATIO));
        assert_eq!(cloned.done_ratio(), None);
    }
}
